use crate::modules::payroll::adapters::outbound::projections::PayrollProjectionRepository;
use crate::modules::payroll::core::events::PayrollEvent;
use crate::modules::payroll::core::state::PayrollState;
use crate::modules::payroll::use_cases::list_payroll::projection::PayrollRecordView;
use crate::shared::application::projector::{EventProjector, WatermarkRepository, watermark};
use async_trait::async_trait;
use std::sync::Arc;

pub struct PayrollProjector<TRepository, TWatermarkRepository>
where
    TRepository: PayrollProjectionRepository + 'static,
    TWatermarkRepository: WatermarkRepository + 'static,
{
    pub name: String,
    pub repository: Arc<TRepository>,
    pub watermark_repository: Arc<TWatermarkRepository>,
}

impl<TRepository, TWatermarkRepository> PayrollProjector<TRepository, TWatermarkRepository>
where
    TRepository: PayrollProjectionRepository + 'static,
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
        state: &PayrollState,
        event: &PayrollEvent,
    ) -> anyhow::Result<()> {
        let payroll_id = match event {
            PayrollEvent::PayrollRecordCreatedV1(e) => &e.payroll_id,
            PayrollEvent::PayrollRecordProcessedV1(e) => &e.payroll_id,
        };
        if let Some(record) = state.record(payroll_id) {
            self.repository
                .upsert_record(PayrollRecordView::from(record))
                .await?;
        }
        self.watermark_repository
            .set(&self.name, &watermark(stream_id, version))
            .await?;
        Ok(())
    }
}

#[async_trait]
impl<TRepository, TWatermarkRepository> EventProjector<PayrollState>
    for PayrollProjector<TRepository, TWatermarkRepository>
where
    TRepository: PayrollProjectionRepository + 'static,
    TWatermarkRepository: WatermarkRepository + 'static,
{
    async fn project(
        &self,
        stream_id: &str,
        version: i64,
        state: &PayrollState,
        events: &[PayrollEvent],
    ) -> anyhow::Result<()> {
        let first_version = version - events.len() as i64 + 1;
        for (index, event) in events.iter().enumerate() {
            self.apply_one(stream_id, first_version + index as i64, state, event)
                .await?;
        }
        Ok(())
    }
}
