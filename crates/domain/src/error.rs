//! Domain errors
//!
//! Pure domain errors with no infrastructure dependencies

use pitwatch_core::CoreError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Required fields missing or blank; the mutation was not applied
    #[error("Validation error: {0}")]
    Validation(String),

    /// Lookup by id found nothing
    #[error("{kind} {id} not found")]
    NotFound { kind: &'static str, id: String },
}

impl DomainError {
    pub fn not_found(kind: &'static str, id: impl ToString) -> Self {
        DomainError::NotFound {
            kind,
            id: id.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, DomainError::NotFound { .. })
    }
}

impl From<CoreError> for DomainError {
    fn from(error: CoreError) -> Self {
        match error {
            CoreError::Validation(message) => DomainError::Validation(message),
            other => DomainError::Validation(other.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, DomainError>;
