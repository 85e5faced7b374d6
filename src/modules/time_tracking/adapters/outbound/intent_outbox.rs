use crate::modules::time_tracking::core::intents::{
    TIME_ENTRY_CREATED, TIME_ENTRY_UPDATED, TimeEntryIntent,
};
use crate::shared::application::command_handler::OutboxIntent;
use crate::shared::infrastructure::intent_outbox::{OutboxError, OutboxRow};

/// Translate a time entry intent into an outbox row.
/// `stream_version` is the version of the event the intent belongs to.
impl OutboxIntent for TimeEntryIntent {
    fn into_outbox_row(
        self,
        topic: &str,
        stream_id: &str,
        stream_version: i64,
    ) -> Result<OutboxRow, OutboxError> {
        let (event_type, payload) = match self {
            TimeEntryIntent::PublishTimeEntryCreated { payload } => (TIME_ENTRY_CREATED, payload),
            TimeEntryIntent::PublishTimeEntryUpdated { payload } => (TIME_ENTRY_UPDATED, payload),
        };
        let occurred_at = payload.occurred_at;
        let payload = serde_json::to_value(payload)
            .map_err(|error| OutboxError::Validation(error.to_string()))?;
        Ok(OutboxRow {
            topic: topic.to_string(),
            event_type: event_type.to_string(),
            event_version: 1,
            stream_id: stream_id.to_string(),
            stream_version,
            occurred_at,
            payload,
        })
    }
}
