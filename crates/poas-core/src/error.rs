use thiserror::Error;

#[derive(Debug, Error)]
pub enum PoasError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl PoasError {
    pub(crate) fn invalid(field: &str, reason: impl Into<String>) -> Self {
        PoasError::InvalidInput {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for PoasError {
    fn from(e: serde_json::Error) -> Self {
        PoasError::SerializationError(e.to_string())
    }
}

impl From<serde_yaml::Error> for PoasError {
    fn from(e: serde_yaml::Error) -> Self {
        PoasError::Configuration(e.to_string())
    }
}
