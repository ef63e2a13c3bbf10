//! Core error types
//!
//! Shared error type for the PitWatch crates plus the small set of
//! form-validation helpers every store and client relies on.

use thiserror::Error;

/// Core error type for PitWatch
#[derive(Debug, Error)]
pub enum CoreError {
    /// A required form field was missing, blank or out of range
    #[error("Validation error: {0}")]
    Validation(String),

    /// Configuration could not be loaded or is invalid
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Generic error
    #[error("Core error: {0}")]
    Generic(String),
}

/// Result type alias for core operations
pub type Result<T> = std::result::Result<T, CoreError>;

/// Validation helper functions
pub mod validation {
    use super::CoreError;

    /// Validate a non-empty string (after trimming)
    pub fn require_non_empty(value: &str, field: &str) -> Result<(), CoreError> {
        if value.trim().is_empty() {
            return Err(CoreError::Validation(format!("{} cannot be empty", field)));
        }
        Ok(())
    }

    /// Validate that a numeric reading lies inside an inclusive range
    pub fn require_range(value: f64, field: &str, min: f64, max: f64) -> Result<(), CoreError> {
        if !value.is_finite() {
            return Err(CoreError::Validation(format!(
                "{} must be a number",
                field
            )));
        }
        if value < min || value > max {
            return Err(CoreError::Validation(format!(
                "{} must be between {} and {} (got {})",
                field, min, max, value
            )));
        }
        Ok(())
    }

    /// Validate an HTTP(S) base URL
    pub fn validate_http_url(url: &str) -> Result<(), CoreError> {
        let parsed = url::Url::parse(url)
            .map_err(|e| CoreError::Validation(format!("Invalid URL format: {}", e)))?;

        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(CoreError::Validation(
                "URL must start with http:// or https://".to_string(),
            ));
        }

        Ok(())
    }
}
