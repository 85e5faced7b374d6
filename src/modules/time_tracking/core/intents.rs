use serde::{Deserialize, Serialize};

use crate::modules::time_tracking::core::state::EntryStatus;

pub const TIME_ENTRY_CREATED: &str = "time_entry_created";
pub const TIME_ENTRY_UPDATED: &str = "time_entry_updated";

/// Cache-invalidation hint pushed to the employee's clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeEntryNotification {
    pub event: String,
    pub employee_id: String,
    pub entry_id: String,
    pub status: Option<EntryStatus>,
    pub deleted: bool,
    pub occurred_at: i64,
}

/// Domain intents produced by the deciders as part of an Accepted decision.
/// The outbound intent_outbox adapter translates these into OutboxRows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimeEntryIntent {
    PublishTimeEntryCreated { payload: TimeEntryNotification },
    PublishTimeEntryUpdated { payload: TimeEntryNotification },
}

impl TimeEntryIntent {
    pub fn created(employee_id: &str, entry_id: &str, occurred_at: i64) -> Self {
        TimeEntryIntent::PublishTimeEntryCreated {
            payload: TimeEntryNotification {
                event: TIME_ENTRY_CREATED.to_string(),
                employee_id: employee_id.to_string(),
                entry_id: entry_id.to_string(),
                status: Some(EntryStatus::Active),
                deleted: false,
                occurred_at,
            },
        }
    }

    pub fn updated(
        employee_id: &str,
        entry_id: &str,
        status: Option<EntryStatus>,
        occurred_at: i64,
    ) -> Self {
        TimeEntryIntent::PublishTimeEntryUpdated {
            payload: TimeEntryNotification {
                event: TIME_ENTRY_UPDATED.to_string(),
                employee_id: employee_id.to_string(),
                entry_id: entry_id.to_string(),
                deleted: status.is_none(),
                status,
                occurred_at,
            },
        }
    }
}
