// Event payloads for the time entry lifecycle.
//
// Versioning and evolution
// - Prefer adding fields. For breaking changes, create a V2 struct in a new file and add a new variant.
//
// Timestamps
// - All i64 values are UTC epoch seconds.

use serde::{Deserialize, Serialize};

use crate::modules::approval::core::workflow::ApprovalStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, async_graphql::Enum)]
#[serde(rename_all = "snake_case")]
pub enum EntrySource {
    Manual,
    Automatic,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TimeEntryStartedV1 {
    pub entry_id: String,
    pub employee_id: String,
    pub start_time: i64,
    pub source: EntrySource,
    pub project_id: Option<String>,
    pub notes: Option<String>,
    pub created_at: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TimeEntryStoppedV1 {
    pub entry_id: String,
    pub employee_id: String,
    pub end_time: i64,
    pub duration_seconds: i64,
    pub stopped_at: i64,
}

/// Snapshot of the editable fields after the correction.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TimeEntryCorrectedV1 {
    pub entry_id: String,
    pub employee_id: String,
    pub start_time: i64,
    pub end_time: Option<i64>,
    pub duration_seconds: Option<i64>,
    pub project_id: Option<String>,
    pub notes: Option<String>,
    pub corrected_at: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TimeEntryDeletedV1 {
    pub entry_id: String,
    pub employee_id: String,
    pub deleted_at: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TimeEntryReviewedV1 {
    pub entry_id: String,
    pub employee_id: String,
    pub status: ApprovalStatus,
    pub reason: Option<String>,
    pub reviewed_at: i64,
}
