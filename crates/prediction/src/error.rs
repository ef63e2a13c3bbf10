//! Prediction client errors

use pitwatch_core::CoreError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PredictionError {
    /// A reading is missing or outside its documented range; nothing was sent
    #[error("Invalid {field}: {message}")]
    Validation { field: &'static str, message: String },

    /// Transport failure or non-success response, with a human-readable message
    #[error("{0}")]
    Request(String),

    /// The batch endpoint needs a minimum window of readings
    #[error("At least {required} sensor readings are required (got {provided})")]
    InsufficientReadings { required: usize, provided: usize },
}

impl PredictionError {
    pub(crate) fn validation(field: &'static str, error: CoreError) -> Self {
        let message = match error {
            CoreError::Validation(message) => message,
            other => other.to_string(),
        };
        PredictionError::Validation { field, message }
    }

    /// Message suitable for an inline banner
    pub fn message(&self) -> String {
        match self {
            PredictionError::Request(message) => message.clone(),
            other => other.to_string(),
        }
    }
}

impl From<reqwest::Error> for PredictionError {
    fn from(error: reqwest::Error) -> Self {
        PredictionError::Request(error.to_string())
    }
}

pub type Result<T> = std::result::Result<T, PredictionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_message_keeps_core_text() {
        let err = PredictionError::validation(
            "pressure",
            CoreError::Validation("pressure must be between 0 and 1000 (got -1)".to_string()),
        );
        assert_eq!(
            err.to_string(),
            "Invalid pressure: pressure must be between 0 and 1000 (got -1)"
        );
    }

    #[test]
    fn test_request_message_is_verbatim() {
        let err = PredictionError::Request("HTTP error! status: 502".to_string());
        assert_eq!(err.message(), "HTTP error! status: 502");
    }
}
