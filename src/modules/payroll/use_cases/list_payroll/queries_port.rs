use crate::modules::payroll::use_cases::list_payroll::projection::PayrollRecordView;
use async_trait::async_trait;

#[async_trait]
pub trait PayrollQueries: Send + Sync {
    async fn record(&self, payroll_id: &str) -> anyhow::Result<Option<PayrollRecordView>>;

    /// Newest period first.
    async fn list_records(&self, employee_id: &str) -> anyhow::Result<Vec<PayrollRecordView>>;
}
