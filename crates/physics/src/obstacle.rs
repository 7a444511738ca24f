//! # Obstacle Pairs
//!
//! A top/bottom barrier with a fixed vertical gap. Pairs only ever move left,
//! are marked passed at most once, and are dropped once fully off-screen.

use crate::agent::Agent;
use crate::collision::Silhouettes;
use crate::types::CourseParams;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ObstaclePair {
    pub x: f32,
    /// Upper edge of the gap (bottom of the top barrier).
    pub gap_top: f32,
    /// Lower edge of the gap (top of the bottom barrier).
    pub gap_bottom: f32,
    pub passed: bool,
}

impl ObstaclePair {
    /// Create a pair at `x` with its gap top drawn uniformly from
    /// `[gap_min, gap_max)`.
    ///
    /// # Panics
    ///
    /// Panics if `gap_min >= gap_max`. `GenerationConfig::validate` rejects
    /// such courses before any pair is spawned.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn spawn(x: f32, course: &CourseParams, rng: &mut fastrand::Rng) -> Self {
        let gap_top = rng.u32(course.gap_min..course.gap_max) as f32;
        Self::with_gap(x, gap_top, course.gap)
    }

    /// Create a pair with a known gap top.
    #[must_use]
    pub fn with_gap(x: f32, gap_top: f32, gap: f32) -> Self {
        Self {
            x,
            gap_top,
            gap_bottom: gap_top + gap,
            passed: false,
        }
    }

    pub fn advance(&mut self, scroll_speed: f32) {
        self.x -= scroll_speed;
    }

    #[must_use]
    pub fn trailing_edge(&self, pipe_width: f32) -> f32 {
        self.x + pipe_width
    }

    #[must_use]
    pub fn is_off_screen(&self, pipe_width: f32) -> bool {
        self.trailing_edge(pipe_width) < 0.0
    }

    /// Vertical origin of the top barrier's shape.
    #[must_use]
    pub fn top_origin(&self, pipe_height: f32) -> f32 {
        self.gap_top - pipe_height
    }

    /// Pixel-exact test of `agent` against both barriers.
    ///
    /// The agent's vertical position is rounded half-to-even before the
    /// offsets are formed.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn collides_with(&self, agent: &Agent, shapes: &Silhouettes) -> bool {
        let dx = (self.x - agent.x).round() as i32;
        let agent_y = agent.y.round_ties_even() as i32;
        let top_dy = self.top_origin(shapes.pipe_height()).round() as i32 - agent_y;
        let bottom_dy = self.gap_bottom.round() as i32 - agent_y;

        shapes.agent.overlaps(&shapes.pipe_bottom, (dx, bottom_dy))
            || shapes.agent.overlaps(&shapes.pipe_top, (dx, top_dy))
    }
}
