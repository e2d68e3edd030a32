//! Error types for the strategy engine.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    /// Bandit construction parameters were rejected.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A caller passed an argument outside its valid domain.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A persisted snapshot was built for a different number of arms.
    #[error("dimension mismatch: live bandit has {expected} arms, snapshot has {found}")]
    DimensionMismatch { expected: usize, found: usize },

    /// A metric could not be computed; callers substitute a neutral value.
    #[error("metrics error: {0}")]
    Metrics(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for EngineError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;
