use crate::modules::approval::core::workflow::ReviewDecision;
use crate::modules::time_tracking::core::events::v1::time_entry::EntrySource;

/// `requested_at` is the server clock when the command was received; it is the
/// default for omitted instants and the upper bound for client supplied ones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartTimeEntry {
    pub entry_id: String,
    pub employee_id: String,
    pub source: EntrySource,
    pub project_id: Option<String>,
    pub notes: Option<String>,
    pub start_time: Option<i64>,
    pub requested_at: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StopTimeEntry {
    pub entry_id: String,
    pub employee_id: String,
    pub end_time: Option<i64>,
    pub requested_at: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimeEntryChanges {
    pub notes: Option<String>,
    pub project_id: Option<String>,
    pub start_time: Option<i64>,
    pub end_time: Option<i64>,
}

impl TimeEntryChanges {
    pub fn is_empty(&self) -> bool {
        self.notes.is_none()
            && self.project_id.is_none()
            && self.start_time.is_none()
            && self.end_time.is_none()
    }

    pub fn touches_more_than_notes(&self) -> bool {
        self.project_id.is_some() || self.start_time.is_some() || self.end_time.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateTimeEntry {
    pub entry_id: String,
    pub employee_id: String,
    pub changes: TimeEntryChanges,
    pub requested_at: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteTimeEntry {
    pub entry_id: String,
    pub employee_id: String,
    pub requested_at: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewTimeEntry {
    pub entry_id: String,
    pub employee_id: String,
    pub decision: ReviewDecision,
    pub requested_at: i64,
}
