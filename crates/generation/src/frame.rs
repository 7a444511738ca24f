//! Read-only snapshots handed to rendering and UI collaborators.

use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct AgentView {
    /// Population index of the agent's policy.
    pub id: usize,
    pub x: f32,
    pub y: f32,
    pub tilt: f32,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ObstacleView {
    pub x: f32,
    /// Vertical origin of the top barrier's shape.
    pub top: f32,
    /// Vertical origin of the bottom barrier's shape.
    pub bottom: f32,
    pub gap_top: f32,
    pub passed: bool,
}

/// State of the course after a tick.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Frame {
    pub tick: u64,
    pub score: u32,
    pub alive: usize,
    pub agents: Vec<AgentView>,
    pub obstacles: Vec<ObstacleView>,
    /// x of both ground tiles.
    pub ground: [f32; 2],
}
