use crate::modules::time_tracking::use_cases::list_work_log::projection::{
    IdlePeriodView, TimeEntryView, TimesheetView,
};
use async_trait::async_trait;

#[async_trait]
pub trait WorkLogQueries: Send + Sync {
    async fn active_entry(&self, employee_id: &str) -> anyhow::Result<Option<TimeEntryView>>;

    async fn list_entries(
        &self,
        employee_id: &str,
        offset: u64,
        limit: u64,
        sort_by_start_time_desc: bool,
    ) -> anyhow::Result<Vec<TimeEntryView>>;

    async fn entry(&self, entry_id: &str) -> anyhow::Result<Option<TimeEntryView>>;

    async fn list_idle_periods(&self, employee_id: &str) -> anyhow::Result<Vec<IdlePeriodView>>;

    async fn timesheet(&self, timesheet_id: &str) -> anyhow::Result<Option<TimesheetView>>;

    /// Newest week first.
    async fn list_timesheets(&self, employee_id: &str) -> anyhow::Result<Vec<TimesheetView>>;
}
