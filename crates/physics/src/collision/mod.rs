//! # Silhouette Collision
//!
//! Pixel-exact overlap tests between agent and obstacle shapes. Shapes are
//! built once per distinct sprite as packed [`Mask`]s and then queried with
//! integer offsets every tick.

mod mask;
mod silhouette;

pub use mask::{Mask, ALPHA_THRESHOLD};
pub use silhouette::{
    Silhouettes, AGENT_HEIGHT, AGENT_WIDTH, PIPE_HEIGHT, PIPE_INSET, PIPE_LIP_HEIGHT, PIPE_WIDTH,
};
