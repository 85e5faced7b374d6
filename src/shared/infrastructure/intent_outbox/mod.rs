// Domain outbox port.
//
// Command handlers enqueue one row per intent after a successful append; the relay
// worker drains unpublished rows and marks them published once delivered. A row is
// identified by `(stream_id, stream_version)`, so re-enqueueing the same version is
// refused and delivery is at-least-once.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value as Json;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutboxRow {
    pub topic: String,
    pub event_type: String,
    pub event_version: i32,
    pub stream_id: String,
    pub stream_version: i64,
    pub occurred_at: i64,
    pub payload: Json,
}

impl OutboxRow {
    pub fn key(&self) -> (String, i64) {
        (self.stream_id.clone(), self.stream_version)
    }
}

#[derive(Debug, Error)]
pub enum OutboxError {
    #[error("duplicate outbox row for stream {stream_id} v{stream_version}")]
    Duplicate {
        stream_id: String,
        stream_version: i64,
    },

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("backend error: {0}")]
    Backend(String),
}

#[async_trait]
pub trait DomainOutbox: Send + Sync {
    async fn enqueue(&self, row: OutboxRow) -> Result<(), OutboxError>;

    /// Oldest unpublished rows first, at most `limit`.
    async fn fetch_unpublished(&self, limit: usize) -> Result<Vec<OutboxRow>, OutboxError>;

    async fn mark_published(&self, stream_id: &str, stream_version: i64)
    -> Result<(), OutboxError>;
}

pub mod in_memory;
