#![allow(dead_code)]

use ml::{FnPolicy, Observation, PolicyError};
use physics::{Mask, Silhouettes};

pub type Decide = fn(&Observation) -> Result<Vec<f32>, PolicyError>;

pub const EPS: f64 = 1e-3;

pub fn never(_: &Observation) -> Result<Vec<f32>, PolicyError> {
    Ok(vec![0.0])
}

pub fn always(_: &Observation) -> Result<Vec<f32>, PolicyError> {
    Ok(vec![1.0])
}

/// Jumps whenever the agent has sunk below y = 400.
pub fn hover(obs: &Observation) -> Result<Vec<f32>, PolicyError> {
    Ok(vec![if obs.y > 400.0 { 1.0 } else { 0.0 }])
}

pub fn population(decide: &[Decide]) -> Vec<FnPolicy<Decide>> {
    decide.iter().map(|&f| FnPolicy(f)).collect()
}

/// Standard agent body with transparent pipes, so only passing and
/// scrolling are observable.
pub fn hollow_pipes() -> Silhouettes {
    Silhouettes::new(Silhouettes::standard().agent, Mask::new(104, 640))
}

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < EPS,
        "expected {expected}, got {actual}"
    );
}
