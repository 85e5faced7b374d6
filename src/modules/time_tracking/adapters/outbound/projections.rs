use crate::modules::time_tracking::use_cases::list_work_log::projection::{
    IdlePeriodView, TimeEntryView, TimesheetView,
};
use async_trait::async_trait;

#[async_trait]
pub trait WorkLogProjectionRepository: Send + Sync {
    async fn upsert_entry(&self, view: TimeEntryView) -> anyhow::Result<()>;
    async fn remove_entry(&self, employee_id: &str, entry_id: &str) -> anyhow::Result<()>;
    async fn upsert_idle_period(&self, view: IdlePeriodView) -> anyhow::Result<()>;
    async fn upsert_timesheet(&self, view: TimesheetView) -> anyhow::Result<()>;
    async fn remove_timesheet(&self, timesheet_id: &str) -> anyhow::Result<()>;
}
