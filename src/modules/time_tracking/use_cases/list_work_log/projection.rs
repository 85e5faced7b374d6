use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::modules::approval::core::workflow::ApprovalStatus;
use crate::modules::time_tracking::core::events::v1::time_entry::EntrySource;
use crate::modules::time_tracking::core::state::{EntryStatus, IdlePeriod, TimeEntry, Timesheet};
use crate::shared::core::primitives::seconds_to_hours;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeEntryView {
    pub entry_id: String,
    pub employee_id: String,
    pub start_time: i64,
    pub end_time: Option<i64>,
    pub duration_seconds: Option<i64>,
    pub source: EntrySource,
    pub status: EntryStatus,
    pub notes: Option<String>,
    pub project_id: Option<String>,
    pub approved: bool,
    pub approval_status: ApprovalStatus,
    pub rejection_reason: Option<String>,
    pub timesheet_id: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl From<&TimeEntry> for TimeEntryView {
    fn from(entry: &TimeEntry) -> Self {
        Self {
            entry_id: entry.entry_id.clone(),
            employee_id: entry.employee_id.clone(),
            start_time: entry.start_time,
            end_time: entry.end_time,
            duration_seconds: entry.duration_seconds,
            source: entry.source,
            status: entry.status,
            notes: entry.notes.clone(),
            project_id: entry.project_id.clone(),
            approved: entry.is_approved(),
            approval_status: entry.approval_status,
            rejection_reason: entry.rejection_reason.clone(),
            timesheet_id: entry.timesheet_id.clone(),
            created_at: entry.created_at,
            updated_at: entry.updated_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdlePeriodView {
    pub idle_id: String,
    pub employee_id: String,
    pub time_entry_id: Option<String>,
    pub start_time: i64,
    pub end_time: Option<i64>,
    pub duration_seconds: Option<i64>,
}

impl From<&IdlePeriod> for IdlePeriodView {
    fn from(idle: &IdlePeriod) -> Self {
        Self {
            idle_id: idle.idle_id.clone(),
            employee_id: idle.employee_id.clone(),
            time_entry_id: idle.time_entry_id.clone(),
            start_time: idle.start_time,
            end_time: idle.end_time,
            duration_seconds: idle.duration_seconds,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimesheetView {
    pub timesheet_id: String,
    pub employee_id: String,
    pub week_start: NaiveDate,
    pub week_end: NaiveDate,
    pub entry_ids: Vec<String>,
    pub total_seconds: i64,
    pub billable_seconds: i64,
    pub idle_seconds: i64,
    pub total_hours: Decimal,
    pub billable_hours: Decimal,
    pub idle_hours: Decimal,
    pub status: ApprovalStatus,
    pub rejection_reason: Option<String>,
    pub generated_at: i64,
    pub reviewed_at: Option<i64>,
}

impl From<&Timesheet> for TimesheetView {
    fn from(timesheet: &Timesheet) -> Self {
        Self {
            timesheet_id: timesheet.timesheet_id.clone(),
            employee_id: timesheet.employee_id.clone(),
            week_start: timesheet.week_start,
            week_end: timesheet.week_end,
            entry_ids: timesheet.entry_ids.clone(),
            total_seconds: timesheet.total_seconds,
            billable_seconds: timesheet.billable_seconds,
            idle_seconds: timesheet.idle_seconds,
            total_hours: seconds_to_hours(timesheet.total_seconds),
            billable_hours: seconds_to_hours(timesheet.billable_seconds),
            idle_hours: seconds_to_hours(timesheet.idle_seconds),
            status: timesheet.status,
            rejection_reason: timesheet.rejection_reason.clone(),
            generated_at: timesheet.generated_at,
            reviewed_at: timesheet.reviewed_at,
        }
    }
}
