use async_graphql::{Context, Json, Object, Result as GqlResult, SimpleObject, Subscription};
use async_graphql::futures_util::stream::{self, Stream};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use tokio::sync::broadcast::error::RecvError;

use crate::modules::approval::core::workflow::ApprovalStatus;
use crate::modules::time_tracking::core::events::v1::time_entry::EntrySource;
use crate::modules::time_tracking::core::events::work_log_stream_id;
use crate::modules::time_tracking::core::state::EntryStatus;
use crate::modules::time_tracking::use_cases::list_work_log::projection::{
    TimeEntryView, TimesheetView,
};
use crate::shared::infrastructure::intent_outbox::OutboxRow;
use crate::shell::graphql::gql_error;
use crate::shell::state::AppState;

#[derive(SimpleObject, Clone)]
pub struct GqlTimeEntry {
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
    pub updated_at: i64,
}

impl From<TimeEntryView> for GqlTimeEntry {
    fn from(v: TimeEntryView) -> Self {
        Self {
            entry_id: v.entry_id,
            employee_id: v.employee_id,
            start_time: v.start_time,
            end_time: v.end_time,
            duration_seconds: v.duration_seconds,
            source: v.source,
            status: v.status,
            notes: v.notes,
            project_id: v.project_id,
            approved: v.approved,
            approval_status: v.approval_status,
            rejection_reason: v.rejection_reason,
            timesheet_id: v.timesheet_id,
            updated_at: v.updated_at,
        }
    }
}

#[derive(SimpleObject, Clone)]
pub struct GqlTimesheet {
    pub timesheet_id: String,
    pub employee_id: String,
    pub week_start: NaiveDate,
    pub week_end: NaiveDate,
    pub entry_ids: Vec<String>,
    pub total_hours: Decimal,
    pub billable_hours: Decimal,
    pub idle_hours: Decimal,
    pub status: ApprovalStatus,
    pub rejection_reason: Option<String>,
}

impl From<TimesheetView> for GqlTimesheet {
    fn from(v: TimesheetView) -> Self {
        Self {
            timesheet_id: v.timesheet_id,
            employee_id: v.employee_id,
            week_start: v.week_start,
            week_end: v.week_end,
            entry_ids: v.entry_ids,
            total_hours: v.total_hours,
            billable_hours: v.billable_hours,
            idle_hours: v.idle_hours,
            status: v.status,
            rejection_reason: v.rejection_reason,
        }
    }
}

/// Cache-invalidation hint relayed from the outbox.
#[derive(SimpleObject, Clone)]
pub struct GqlTimeEntryEvent {
    pub event_type: String,
    pub stream_id: String,
    pub stream_version: i64,
    pub occurred_at: i64,
    pub payload: Json<serde_json::Value>,
}

impl From<OutboxRow> for GqlTimeEntryEvent {
    fn from(row: OutboxRow) -> Self {
        Self {
            event_type: row.event_type,
            stream_id: row.stream_id,
            stream_version: row.stream_version,
            occurred_at: row.occurred_at,
            payload: Json(row.payload),
        }
    }
}

#[derive(Default)]
pub struct WorkLogQuery;

#[Object]
impl WorkLogQuery {
    async fn active_time_entry(
        &self,
        context: &Context<'_>,
        employee_id: String,
    ) -> GqlResult<Option<GqlTimeEntry>> {
        let state = context.data_unchecked::<AppState>();
        let active = state
            .work_log
            .active_entry(&employee_id)
            .await
            .map_err(gql_error)?;
        Ok(active.map(GqlTimeEntry::from))
    }

    async fn time_entries(
        &self,
        context: &Context<'_>,
        employee_id: String,
        offset: Option<i64>,
        limit: Option<i64>,
    ) -> GqlResult<Vec<GqlTimeEntry>> {
        let state = context.data_unchecked::<AppState>();
        let list = state
            .work_log
            .list_entries(
                &employee_id,
                offset.unwrap_or(0).max(0) as u64,
                limit.unwrap_or(50).max(0) as u64,
            )
            .await
            .map_err(gql_error)?;
        Ok(list.into_iter().map(GqlTimeEntry::from).collect())
    }

    async fn timesheets(
        &self,
        context: &Context<'_>,
        employee_id: String,
    ) -> GqlResult<Vec<GqlTimesheet>> {
        let state = context.data_unchecked::<AppState>();
        let list = state
            .work_log
            .list_timesheets(&employee_id)
            .await
            .map_err(gql_error)?;
        Ok(list.into_iter().map(GqlTimesheet::from).collect())
    }
}

pub struct TimeEntrySubscription;

#[Subscription]
impl TimeEntrySubscription {
    /// Every relayed notification, optionally narrowed to one employee's stream.
    async fn time_entry_events(
        &self,
        context: &Context<'_>,
        employee_id: Option<String>,
    ) -> impl Stream<Item = GqlTimeEntryEvent> {
        let receiver = context.data_unchecked::<AppState>().notifications.subscribe();
        let stream_id = employee_id.map(|id| work_log_stream_id(&id));
        stream::unfold(receiver, move |mut receiver| {
            let stream_id = stream_id.clone();
            async move {
                loop {
                    match receiver.recv().await {
                        Ok(row) if stream_id.as_ref().is_none_or(|id| *id == row.stream_id) => {
                            return Some((GqlTimeEntryEvent::from(row), receiver));
                        }
                        Ok(_) => continue,
                        Err(RecvError::Lagged(skipped)) => {
                            tracing::warn!(skipped, "subscriber lagged behind notifications");
                        }
                        Err(RecvError::Closed) => return None,
                    }
                }
            }
        })
    }
}
