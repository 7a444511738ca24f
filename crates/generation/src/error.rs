use ml::PolicyError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerationError {
    /// A decision policy could not produce a usable action.
    #[error("policy {index} failed: {source}")]
    Policy {
        index: usize,
        #[source]
        source: PolicyError,
    },
    /// Policies and fitness cells cannot be paired one to one.
    #[error("{policies} policies but {fitness} fitness cells")]
    Misaligned { policies: usize, fitness: usize },
    /// No obstacle pair is left to observe. Never happens on a normal course.
    #[error("obstacle course is empty")]
    EmptyCourse,
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    #[error("failed to parse config: {0}")]
    Config(#[from] serde_json::Error),
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
}
