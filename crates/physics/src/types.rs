//! Tunable parameters for agent motion and the obstacle course.
//!
//! Defaults reproduce the reference scale: a 600 x 800 playfield with the
//! floor strip at y = 730.

use serde::{Deserialize, Serialize};

/// Vertical speed applied by a jump. Negative is upward.
pub const JUMP_VELOCITY: f32 = -10.5;
/// Coefficient of the quadratic term, `d = v t + 0.5 * GRAVITY * t^2`.
pub const GRAVITY: f32 = 3.0;
/// Largest per-tick displacement magnitude.
pub const TERMINAL_SPEED: f32 = 16.0;
/// Extra upward displacement applied whenever the agent is rising.
pub const RISE_BOOST: f32 = 2.0;

/// Vertical gap between the top and bottom barrier.
pub const GAP: f32 = 170.0;
/// Horizontal scroll per tick shared by obstacles and ground.
pub const SCROLL_SPEED: f32 = 5.0;
/// Inclusive lower bound of the gap top draw.
pub const GAP_MIN: u32 = 50;
/// Exclusive upper bound of the gap top draw.
pub const GAP_MAX: u32 = 450;
/// Floor line used by the ground-death predicate.
pub const FLOOR: f32 = 730.0;
/// Slack between the sprite's bottom edge and the floor line before an
/// agent counts as grounded.
pub const FLOOR_MARGIN: f32 = 10.0;
/// Agents above this line have flown off the top.
pub const CEILING: f32 = -50.0;
/// Spawn x of the pair that exists when a generation starts.
pub const FIRST_OBSTACLE_X: f32 = 700.0;
/// Spawn x of every pair created after a pass (the window width).
pub const SPAWN_X: f32 = 600.0;

/// Agent motion constants.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Kinematics {
    pub jump_velocity: f32,
    pub gravity: f32,
    pub terminal_speed: f32,
    pub rise_boost: f32,
}

impl Default for Kinematics {
    fn default() -> Self {
        Self {
            jump_velocity: JUMP_VELOCITY,
            gravity: GRAVITY,
            terminal_speed: TERMINAL_SPEED,
            rise_boost: RISE_BOOST,
        }
    }
}

/// Obstacle course geometry and scrolling.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CourseParams {
    pub gap: f32,
    pub scroll_speed: f32,
    pub gap_min: u32,
    pub gap_max: u32,
    pub floor: f32,
    pub floor_margin: f32,
    pub ceiling: f32,
    pub first_obstacle_x: f32,
    pub spawn_x: f32,
    /// Vertical position of the ground strip (drawing only).
    pub ground_y: f32,
}

impl Default for CourseParams {
    fn default() -> Self {
        Self {
            gap: GAP,
            scroll_speed: SCROLL_SPEED,
            gap_min: GAP_MIN,
            gap_max: GAP_MAX,
            floor: FLOOR,
            floor_margin: FLOOR_MARGIN,
            ceiling: CEILING,
            first_obstacle_x: FIRST_OBSTACLE_X,
            spawn_x: SPAWN_X,
            ground_y: FLOOR,
        }
    }
}
