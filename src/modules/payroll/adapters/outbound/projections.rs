use crate::modules::payroll::use_cases::list_payroll::projection::PayrollRecordView;
use async_trait::async_trait;

#[async_trait]
pub trait PayrollProjectionRepository: Send + Sync {
    async fn upsert_record(&self, view: PayrollRecordView) -> anyhow::Result<()>;
}
