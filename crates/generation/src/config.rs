//! Generation configuration, loadable from JSON.
//!
//! Every field has a default, so a config file only needs the values it
//! changes:
//!
//! ```json
//! { "rewards": { "pass": 10.0 }, "policy_fallback": "no_jump" }
//! ```

use std::path::Path;

use physics::{CourseParams, Kinematics};
use serde::{Deserialize, Serialize};

use crate::error::GenerationError;

/// Fitness deltas applied by the evaluator.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rewards {
    /// Added to every live agent at the start of each tick.
    pub alive: f64,
    /// Added once when an agent hits an obstacle.
    pub collision: f64,
    /// Added to every live agent when the score goes up.
    pub pass: f64,
}

impl Default for Rewards {
    fn default() -> Self {
        Self {
            alive: 0.1,
            collision: -1.0,
            pass: 5.0,
        }
    }
}

/// What to do when a policy fails to produce a usable action.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyFallback {
    /// Stop the generation with [`GenerationError::Policy`].
    #[default]
    Abort,
    /// Log a warning and treat the agent as not jumping this tick.
    NoJump,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    pub kinematics: Kinematics,
    pub course: CourseParams,
    pub rewards: Rewards,
    pub agent_x: f32,
    pub agent_y: f32,
    /// First action scalar must exceed this for the agent to jump.
    pub jump_threshold: f32,
    /// Target real-time stepping rate. The evaluator itself never sleeps.
    pub ticks_per_second: u32,
    pub policy_fallback: PolicyFallback,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            kinematics: Kinematics::default(),
            course: CourseParams::default(),
            rewards: Rewards::default(),
            agent_x: 230.0,
            agent_y: 350.0,
            jump_threshold: 0.5,
            ticks_per_second: 30,
            policy_fallback: PolicyFallback::default(),
        }
    }
}

impl GenerationConfig {
    /// Parse and validate a JSON config.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::Config`] for malformed JSON and
    /// [`GenerationError::InvalidConfig`] for values the course cannot use.
    pub fn from_json_str(json: &str) -> Result<Self, GenerationError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::Io`] if the file cannot be read, otherwise
    /// the same errors as [`GenerationConfig::from_json_str`].
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, GenerationError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// # Errors
    ///
    /// Returns [`GenerationError::InvalidConfig`] describing the first
    /// offending value.
    pub fn validate(&self) -> Result<(), GenerationError> {
        let course = &self.course;
        if course.gap_min >= course.gap_max {
            return Err(GenerationError::InvalidConfig(format!(
                "gap range [{}, {}) is empty",
                course.gap_min, course.gap_max
            )));
        }
        if course.scroll_speed <= 0.0 {
            return Err(GenerationError::InvalidConfig(format!(
                "scroll speed must be positive, got {}",
                course.scroll_speed
            )));
        }
        if self.kinematics.terminal_speed < 0.0 {
            return Err(GenerationError::InvalidConfig(format!(
                "terminal speed must not be negative, got {}",
                self.kinematics.terminal_speed
            )));
        }
        if self.ticks_per_second == 0 {
            return Err(GenerationError::InvalidConfig(
                "ticks per second must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
