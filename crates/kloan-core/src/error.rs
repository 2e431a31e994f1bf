use thiserror::Error;

#[derive(Debug, Error)]
pub enum KloanError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for KloanError {
    fn from(e: serde_json::Error) -> Self {
        KloanError::SerializationError(e.to_string())
    }
}
