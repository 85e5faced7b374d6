// Typed failures returned by every decide function.
//
// Each variant is a distinct error kind callers can branch on; clients show the kind
// ("You already have an active timer") rather than a generic failure.

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("validation failed: {0}")]
    Validation(String),

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("invalid state: {0}")]
    InvalidState(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("configuration error: {0}")]
    Configuration(String),
}

impl DomainError {
    pub fn kind(&self) -> &'static str {
        match self {
            DomainError::Validation(_) => "validation_error",
            DomainError::Conflict(_) => "conflict_error",
            DomainError::InvalidState(_) => "invalid_state_error",
            DomainError::NotFound(_) => "not_found_error",
            DomainError::Configuration(_) => "configuration_error",
        }
    }
}
