use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum PhysicsError {
    #[error("alpha buffer has {actual} entries, expected {expected} for a {width}x{height} mask")]
    AlphaSizeMismatch {
        width: usize,
        height: usize,
        expected: usize,
        actual: usize,
    },
}
