#![deny(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
//! # Decision Policies
//!
//! The seam between the simulation and whatever optimizer proposes the
//! population. The simulation only needs two things per contestant: a
//! [`Policy`] it can query with an [`Observation`], and a
//! [`FitnessAccumulator`] it can add rewards to.
//!
//! A small tanh [`FeedForward`] network is included as a reference policy
//! and for the runtime's demo population. Genome encoding, mutation and
//! selection stay with the optimizer.

pub mod fitness;
pub mod nn;
pub mod policy;

pub use fitness::{Fitness, FitnessAccumulator};
pub use nn::{Dense, FeedForward};
pub use policy::{FnPolicy, Observation, Policy, PolicyError};
