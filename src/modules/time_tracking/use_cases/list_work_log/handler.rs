use crate::modules::time_tracking::adapters::outbound::projections::WorkLogProjectionRepository;
use crate::modules::time_tracking::core::events::WorkLogEvent;
use crate::modules::time_tracking::core::projections::{Mutation, apply};
use crate::modules::time_tracking::core::state::WorkLogState;
use crate::shared::application::projector::{EventProjector, WatermarkRepository, watermark};
use async_trait::async_trait;
use std::sync::Arc;

#[derive(Clone)]
pub struct WorkLogProjector<TRepository, TWatermarkRepository>
where
    TRepository: WorkLogProjectionRepository + 'static,
    TWatermarkRepository: WatermarkRepository + 'static,
{
    pub name: String,
    pub repository: Arc<TRepository>,
    pub watermark_repository: Arc<TWatermarkRepository>,
}

impl<TRepository, TWatermarkRepository> WorkLogProjector<TRepository, TWatermarkRepository>
where
    TRepository: WorkLogProjectionRepository + 'static,
    TWatermarkRepository: WatermarkRepository + 'static,
{
    pub fn new(
        name: impl Into<String>,
        repository: Arc<TRepository>,
        watermark: Arc<TWatermarkRepository>,
    ) -> Self {
        Self {
            name: name.into(),
            repository,
            watermark_repository: watermark,
        }
    }

    pub async fn apply_one(
        &self,
        stream_id: &str,
        version: i64,
        state: &WorkLogState,
        event: &WorkLogEvent,
    ) -> anyhow::Result<()> {
        for mutation in apply(state, event) {
            match mutation {
                Mutation::UpsertEntry(view) => self.repository.upsert_entry(view).await?,
                Mutation::RemoveEntry {
                    employee_id,
                    entry_id,
                } => {
                    self.repository
                        .remove_entry(&employee_id, &entry_id)
                        .await?
                }
                Mutation::UpsertIdle(view) => self.repository.upsert_idle_period(view).await?,
                Mutation::UpsertTimesheet(view) => self.repository.upsert_timesheet(view).await?,
                Mutation::RemoveTimesheet { timesheet_id } => {
                    self.repository.remove_timesheet(&timesheet_id).await?
                }
            }
        }
        self.watermark_repository
            .set(&self.name, &watermark(stream_id, version))
            .await?;
        Ok(())
    }
}

#[async_trait]
impl<TRepository, TWatermarkRepository> EventProjector<WorkLogState>
    for WorkLogProjector<TRepository, TWatermarkRepository>
where
    TRepository: WorkLogProjectionRepository + 'static,
    TWatermarkRepository: WatermarkRepository + 'static,
{
    async fn project(
        &self,
        stream_id: &str,
        version: i64,
        state: &WorkLogState,
        events: &[WorkLogEvent],
    ) -> anyhow::Result<()> {
        let first_version = version - events.len() as i64 + 1;
        for (index, event) in events.iter().enumerate() {
            self.apply_one(stream_id, first_version + index as i64, state, event)
                .await?;
        }
        tracing::debug!(projector = %self.name, stream_id, version, "work log projected");
        Ok(())
    }
}
