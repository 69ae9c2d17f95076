// Engine error taxonomy
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum AssessmentError {
    #[error("insufficient data: need at least {required} hourly observations, got {actual}")]
    InsufficientData { required: usize, actual: usize },

    #[error("malformed series: {0}")]
    MalformedSeries(String),

    #[error("unknown scoring policy: {0}")]
    UnknownPolicy(String),

    #[error("invalid scoring policy {name}: {reason}")]
    InvalidPolicy { name: String, reason: String },
}
