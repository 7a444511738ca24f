#![deny(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
//! # Flappy Physics
//!
//! Leaf simulation primitives for the scrolling obstacle course.
//!
//! This crate holds everything that moves or collides during a generation,
//! but none of the bookkeeping that ties agents to their decision policies.
//! The generation evaluator composes these pieces tick by tick.
//!
//! ## Key Components
//!
//! -   **Agents:** [`Agent`] integrates a closed-form fall/jump displacement
//!     from its last impulse. See the [`agent`] module.
//! -   **Obstacles:** [`ObstaclePair`] is a top/bottom barrier with a fixed
//!     vertical gap that scrolls left at a constant speed.
//! -   **Ground:** [`Ground`] is the two-tile scrolling floor strip. It never
//!     takes part in collisions.
//! -   **Collision:** [`Mask`] and [`Silhouettes`] in the [`collision`]
//!     module answer pixel-exact overlap queries.
//! -   **Parameters:** [`Kinematics`] and [`CourseParams`] carry every tunable
//!     constant, defaulting to the reference scale.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use physics::{Agent, Kinematics, ObstaclePair, CourseParams, Silhouettes};
//!
//! let kin = Kinematics::default();
//! let course = CourseParams::default();
//! let shapes = Silhouettes::standard();
//! let mut rng = fastrand::Rng::with_seed(7);
//!
//! let mut agent = Agent::new(230.0, 350.0);
//! let mut pair = ObstaclePair::spawn(course.first_obstacle_x, &course, &mut rng);
//! agent.jump(&kin);
//! agent.advance(&kin);
//! pair.advance(course.scroll_speed);
//! let hit = pair.collides_with(&agent, &shapes);
//! ```

pub mod agent;
pub mod collision;
pub mod error;
pub mod ground;
pub mod obstacle;
pub mod types;

pub use agent::{displacement, Agent};
pub use collision::{Mask, Silhouettes};
pub use error::PhysicsError;
pub use ground::{Ground, GROUND_WIDTH};
pub use obstacle::ObstaclePair;
pub use types::{CourseParams, Kinematics};
