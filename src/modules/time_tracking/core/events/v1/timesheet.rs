use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// `entry_ids` are ordered by entry start time. The totals are frozen at generation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TimesheetGeneratedV1 {
    pub timesheet_id: String,
    pub employee_id: String,
    pub week_start: NaiveDate,
    pub week_end: NaiveDate,
    pub entry_ids: Vec<String>,
    pub total_seconds: i64,
    pub billable_seconds: i64,
    pub idle_seconds: i64,
    pub replaces_timesheet_id: Option<String>,
    pub generated_at: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TimesheetApprovedV1 {
    pub timesheet_id: String,
    pub employee_id: String,
    pub reviewed_at: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TimesheetRejectedV1 {
    pub timesheet_id: String,
    pub employee_id: String,
    pub reason: String,
    pub reviewed_at: i64,
}
