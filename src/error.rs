use thiserror::Error;

/// Errors raised by the prediction pipeline.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PredictorError {
    #[error("domain error: {0}")]
    Domain(String),

    #[error("teams not found: {}; compute team strengths first", missing.join(", "))]
    TeamsNotFound { missing: Vec<String> },

    #[error("unknown adjustment factor: {0}")]
    UnknownFactor(String),

    #[error("invalid multiplier {value} for factor {name}")]
    InvalidFactor { name: String, value: f64 },
}

pub type Result<T> = std::result::Result<T, PredictorError>;
