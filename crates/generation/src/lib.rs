#![deny(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
//! # Generation Evaluator
//!
//! Runs one generation of the obstacle course: every contestant starts at the
//! same spot, the whole population is stepped in lockstep one tick at a time,
//! and the generation ends when the last agent has died. Rewards land in the
//! optimizer's fitness cells as they are earned.
//!
//! ## Tick order
//!
//! 1.  Pick the reference pair from the first agent's point of view.
//! 2.  Reward every live agent for surviving, query its policy, jump if asked,
//!     and advance it.
//! 3.  Scroll the ground.
//! 4.  Scroll each pair and test it against every still-live agent; a hit
//!     costs a penalty and removes the agent at once.
//! 5.  Mark pairs that left the screen or were just passed.
//! 6.  On a pass: bump the score, reward the survivors, spawn a new pair.
//! 7.  Drop off-screen pairs.
//! 8.  Remove agents that hit the floor or left through the ceiling.
//! 9.  Publish a [`Frame`].
//! 10. Stop once nobody is left.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use generation::{evaluate_generation, GenerationConfig};
//! use ml::FeedForward;
//!
//! let mut rng = fastrand::Rng::new();
//! let mut policies: Vec<FeedForward> =
//!     (0..50).map(|_| FeedForward::random(&[3, 1], &mut rng)).collect();
//! let mut fitness = vec![0.0_f64; policies.len()];
//! let outcome = evaluate_generation(GenerationConfig::default(), &mut policies, &mut fitness)?;
//! ```

pub mod config;
pub mod error;
pub mod evaluator;
pub mod frame;

pub use config::{GenerationConfig, PolicyFallback, Rewards};
pub use error::GenerationError;
pub use evaluator::{evaluate_generation, GenerationEvaluator, Outcome, Status};
pub use frame::{AgentView, Frame, ObstacleView};
