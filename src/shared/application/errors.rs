use thiserror::Error;

use crate::shared::core::errors::DomainError;
use crate::shared::infrastructure::event_store::EventStoreError;

#[derive(Debug, Error)]
pub enum ApplicationError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    EventStore(#[from] EventStoreError),

    #[error("projection failed: {0}")]
    Projection(String),

    #[error("unexpected: {0}")]
    Unexpected(String),
}

impl ApplicationError {
    pub fn kind(&self) -> &'static str {
        match self {
            ApplicationError::Domain(reason) => reason.kind(),
            ApplicationError::EventStore(EventStoreError::VersionMismatch { .. }) => {
                "conflict_error"
            }
            ApplicationError::EventStore(_) => "storage_error",
            ApplicationError::Projection(_) => "projection_error",
            ApplicationError::Unexpected(_) => "unexpected_error",
        }
    }

    pub fn domain(&self) -> Option<&DomainError> {
        match self {
            ApplicationError::Domain(reason) => Some(reason),
            _ => None,
        }
    }
}
