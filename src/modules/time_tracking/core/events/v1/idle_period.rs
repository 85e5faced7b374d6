// Idle periods overlay a time entry without altering its start, end or duration.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct IdlePeriodStartedV1 {
    pub idle_id: String,
    pub employee_id: String,
    pub time_entry_id: Option<String>,
    pub start_time: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct IdlePeriodEndedV1 {
    pub idle_id: String,
    pub employee_id: String,
    pub end_time: i64,
    pub duration_seconds: i64,
}
