/// Failures while reading or writing the ambient configuration location.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AmbientError {
    #[error("invalid ambient key {0:?}")]
    InvalidKey(String),
    #[error("invalid value for ambient key {0}")]
    InvalidValue(String),
    #[error("ambient write failed for {key}: {message}")]
    Write { key: String, message: String },
}
