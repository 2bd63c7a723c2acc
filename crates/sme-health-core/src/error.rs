use thiserror::Error;

#[derive(Debug, Error)]
pub enum SmeHealthError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Invalid threshold table: {0}")]
    InvalidThresholds(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for SmeHealthError {
    fn from(e: serde_json::Error) -> Self {
        SmeHealthError::SerializationError(e.to_string())
    }
}
