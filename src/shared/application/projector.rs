// Projection seam between the command handler and the read models.
//
// Purpose
// - EventProjector: turn freshly committed events into read model mutations.
// - WatermarkRepository: remember the last `{stream_id}:{version}` applied per projector.

use async_trait::async_trait;

use crate::shared::application::command_handler::Aggregate;

#[async_trait]
pub trait WatermarkRepository: Send + Sync {
    async fn get(&self, name: &str) -> anyhow::Result<Option<String>>;
    async fn set(&self, name: &str, last: &str) -> anyhow::Result<()>;
}

/// `state` is the aggregate after `events` were applied; `version` is the stream
/// version of the last event.
#[async_trait]
pub trait EventProjector<A: Aggregate>: Send + Sync {
    async fn project(
        &self,
        stream_id: &str,
        version: i64,
        state: &A,
        events: &[A::Event],
    ) -> anyhow::Result<()>;
}

pub fn watermark(stream_id: &str, version: i64) -> String {
    format!("{stream_id}:{version}")
}
