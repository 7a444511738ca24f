//! # Agent Kinematics
//!
//! An agent only ever moves vertically. Instead of integrating acceleration
//! step by step, each tick evaluates a closed-form displacement from the tick
//! count since the last jump, so identical `(velocity, ticks)` inputs always
//! produce identical motion.

use crate::types::Kinematics;

/// Tilt applied while rising or close above the last jump height.
pub const MAX_TILT: f32 = 25.0;
/// Tilt lost per tick while falling.
pub const TILT_STEP: f32 = 20.0;
/// Nose-dive limit.
pub const MIN_TILT: f32 = -90.0;
/// Distance below the jump height that still counts as "rising" for tilt.
const TILT_GRACE: f32 = 50.0;

/// Per-tick displacement `t` ticks after an impulse of `velocity`.
///
/// `d = v t + 0.5 g t^2`, clamped to the terminal speed in either direction
/// with its sign kept, then pushed a further `rise_boost` upward when
/// negative.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn displacement(velocity: f32, ticks: u32, kin: &Kinematics) -> f32 {
    let t = ticks as f32;
    let mut d = velocity * t + 0.5 * kin.gravity * t * t;
    if d.abs() > kin.terminal_speed {
        d = kin.terminal_speed.copysign(d);
    }
    if d < 0.0 {
        d -= kin.rise_boost;
    }
    d
}

/// One simulated entity.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Agent {
    /// Horizontal position. Fixed for the lifetime of the agent.
    pub x: f32,
    pub y: f32,
    pub velocity: f32,
    pub ticks_since_impulse: u32,
    /// `y` at the moment of the last jump (or spawn).
    pub jump_height: f32,
    /// Orientation in degrees, positive nose-up. Drawing only.
    pub tilt: f32,
}

impl Agent {
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            velocity: 0.0,
            ticks_since_impulse: 0,
            jump_height: y,
            tilt: 0.0,
        }
    }

    /// Apply an upward impulse and restart the displacement clock.
    pub fn jump(&mut self, kin: &Kinematics) {
        self.velocity = kin.jump_velocity;
        self.ticks_since_impulse = 0;
        self.jump_height = self.y;
    }

    /// Advance one tick. Returns the displacement that was applied.
    pub fn advance(&mut self, kin: &Kinematics) -> f32 {
        self.ticks_since_impulse += 1;
        let d = displacement(self.velocity, self.ticks_since_impulse, kin);
        self.y += d;

        if d < 0.0 || self.y < self.jump_height + TILT_GRACE {
            self.tilt = self.tilt.max(MAX_TILT);
        } else if self.tilt > MIN_TILT {
            self.tilt -= TILT_STEP;
        }
        d
    }
}
