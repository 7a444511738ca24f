//! # Flappy
//!
//! Runtime for the scrolling obstacle course.
//!
//! The binary spawns a population of random feed-forward networks, evaluates
//! one generation with the [`generation`] crate and reports the fitness every
//! network earned.
//!
//! ### The Crates
//!
//! -   **`flappy`:** this crate. Command line, logging, real-time pacing and
//!     the quit signal.
//! -   **[`physics`]:** agents, obstacle pairs, the scrolling ground and
//!     pixel-exact collision masks.
//! -   **[`ml`]:** the decision policy seam, fitness cells and a small tanh
//!     network.
//! -   **[`generation`]:** the tick loop that ties them together.
//!
//! ## Running
//!
//! ```text
//! RUST_LOG=info cargo run -p flappy -- --population 50 --seed 7 --headless
//! ```
//!
//! Without `--headless` the loop is paced to the configured tick rate (30 Hz
//! by default) so an attached viewer can follow along through `--frames`.
//! Ctrl-C stops the generation at the next tick boundary.

pub mod app;
pub mod cli;
