// Read model fixtures for repository and HTTP tests.

use crate::modules::approval::core::workflow::ApprovalStatus;
use crate::modules::time_tracking::core::events::v1::time_entry::EntrySource;
use crate::modules::time_tracking::core::state::EntryStatus;
use crate::modules::time_tracking::use_cases::list_work_log::projection::{
    TimeEntryView, TimesheetView,
};
use crate::tests::fixtures::events::work_log::{EMPLOYEE, MONDAY};
use chrono::{Days, NaiveDate};
use rust_decimal::Decimal;

pub struct TimeEntryViewBuilder {
    inner: TimeEntryView,
}

impl Default for TimeEntryViewBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[allow(dead_code)]
impl TimeEntryViewBuilder {
    /// An active manual entry started one hour into MONDAY.
    pub fn new() -> Self {
        Self {
            inner: TimeEntryView {
                entry_id: "te-fixed-0001".to_string(),
                employee_id: EMPLOYEE.to_string(),
                start_time: MONDAY + 3_600,
                end_time: None,
                duration_seconds: None,
                source: EntrySource::Manual,
                status: EntryStatus::Active,
                notes: None,
                project_id: Some("proj-billable".to_string()),
                approved: false,
                approval_status: ApprovalStatus::Pending,
                rejection_reason: None,
                timesheet_id: None,
                created_at: MONDAY + 3_600,
                updated_at: MONDAY + 3_600,
            },
        }
    }

    pub fn entry_id(mut self, v: impl Into<String>) -> Self {
        self.inner.entry_id = v.into();
        self
    }

    pub fn employee_id(mut self, v: impl Into<String>) -> Self {
        self.inner.employee_id = v.into();
        self
    }

    pub fn completed(mut self, start: i64, end: i64) -> Self {
        self.inner.start_time = start;
        self.inner.end_time = Some(end);
        self.inner.duration_seconds = Some(end - start);
        self.inner.status = EntryStatus::Completed;
        self.inner.created_at = start;
        self.inner.updated_at = end;
        self
    }

    pub fn build(self) -> TimeEntryView {
        self.inner
    }
}

/// One hour timesheet for the week starting at `week_start` (YYYY-MM-DD).
pub fn timesheet_view(timesheet_id: &str, week_start: &str, status: ApprovalStatus) -> TimesheetView {
    let week_start: NaiveDate = week_start.parse().unwrap();
    TimesheetView {
        timesheet_id: timesheet_id.to_string(),
        employee_id: EMPLOYEE.to_string(),
        week_start,
        week_end: week_start.checked_add_days(Days::new(7)).unwrap(),
        entry_ids: vec!["te-fixed-0001".to_string()],
        total_seconds: 3_600,
        billable_seconds: 3_600,
        idle_seconds: 0,
        total_hours: Decimal::ONE,
        billable_hours: Decimal::ONE,
        idle_hours: Decimal::ZERO,
        status,
        rejection_reason: None,
        generated_at: MONDAY,
        reviewed_at: None,
    }
}
