// Folded state of one employee's work log: time entries, idle periods, timesheets.
//
// Invariants kept by the deciders
// - At most one entry is active (`active_entry_id`).
// - At most one idle period is open (`open_idle_id`).
// - An entry is attached to at most one timesheet (`TimeEntry::timesheet_id`).

use chrono::NaiveDate;
use std::collections::BTreeMap;

use crate::modules::approval::core::workflow::ApprovalStatus;
use crate::modules::time_tracking::core::events::v1::time_entry::EntrySource;

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize, async_graphql::Enum)]
#[serde(rename_all = "snake_case")]
pub enum EntryStatus {
    Active,
    Completed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeEntry {
    pub entry_id: String,
    pub employee_id: String,
    pub start_time: i64,
    pub end_time: Option<i64>,
    pub duration_seconds: Option<i64>,
    pub source: EntrySource,
    pub status: EntryStatus,
    pub notes: Option<String>,
    pub project_id: Option<String>,
    pub approval_status: ApprovalStatus,
    pub rejection_reason: Option<String>,
    pub timesheet_id: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl TimeEntry {
    pub fn is_active(&self) -> bool {
        self.status == EntryStatus::Active
    }

    pub fn is_completed(&self) -> bool {
        self.status == EntryStatus::Completed
    }

    pub fn is_approved(&self) -> bool {
        self.approval_status == ApprovalStatus::Approved
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdlePeriod {
    pub idle_id: String,
    pub employee_id: String,
    pub time_entry_id: Option<String>,
    pub start_time: i64,
    pub end_time: Option<i64>,
    pub duration_seconds: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timesheet {
    pub timesheet_id: String,
    pub employee_id: String,
    pub week_start: NaiveDate,
    pub week_end: NaiveDate,
    pub entry_ids: Vec<String>,
    pub total_seconds: i64,
    pub billable_seconds: i64,
    pub idle_seconds: i64,
    pub status: ApprovalStatus,
    pub rejection_reason: Option<String>,
    pub generated_at: i64,
    pub reviewed_at: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkLogState {
    pub entries: BTreeMap<String, TimeEntry>,
    pub active_entry_id: Option<String>,
    pub idle_periods: BTreeMap<String, IdlePeriod>,
    pub open_idle_id: Option<String>,
    pub timesheets: BTreeMap<String, Timesheet>,
}

impl WorkLogState {
    pub fn entry(&self, entry_id: &str) -> Option<&TimeEntry> {
        self.entries.get(entry_id)
    }

    pub fn active_entry(&self) -> Option<&TimeEntry> {
        self.active_entry_id
            .as_deref()
            .and_then(|entry_id| self.entries.get(entry_id))
    }

    pub fn idle_period(&self, idle_id: &str) -> Option<&IdlePeriod> {
        self.idle_periods.get(idle_id)
    }

    pub fn timesheet(&self, timesheet_id: &str) -> Option<&Timesheet> {
        self.timesheets.get(timesheet_id)
    }

    pub fn timesheet_for_week(&self, week_start: NaiveDate) -> Option<&Timesheet> {
        self.timesheets
            .values()
            .find(|timesheet| timesheet.week_start == week_start)
    }

    /// Status of the timesheet an entry is attached to, if any.
    pub fn lock_of(&self, entry: &TimeEntry) -> Option<ApprovalStatus> {
        entry
            .timesheet_id
            .as_deref()
            .and_then(|timesheet_id| self.timesheets.get(timesheet_id))
            .map(|timesheet| timesheet.status)
    }

    /// Entries ordered by start time.
    pub fn entries_by_start(&self) -> Vec<&TimeEntry> {
        let mut entries: Vec<&TimeEntry> = self.entries.values().collect();
        entries.sort_by_key(|entry| (entry.start_time, entry.entry_id.clone()));
        entries
    }
}
