use async_graphql::{Context, Object, Result as GqlResult};

use crate::modules::time_tracking::application::work_log_service::StartEntryInput;
use crate::modules::time_tracking::core::events::v1::time_entry::EntrySource;
use crate::modules::time_tracking::use_cases::list_work_log::inbound::graphql::GqlTimeEntry;
use crate::shell::graphql::gql_error;
use crate::shell::state::AppState;

pub struct MutationRoot;

#[Object]
impl MutationRoot {
    async fn start_time_entry(
        &self,
        context: &Context<'_>,
        employee_id: String,
        source: EntrySource,
        project_id: Option<String>,
        start_time: Option<i64>,
        notes: Option<String>,
    ) -> GqlResult<GqlTimeEntry> {
        let state = context.data_unchecked::<AppState>();
        let entry = state
            .work_log
            .start_entry(
                &employee_id,
                StartEntryInput {
                    source,
                    project_id,
                    start_time,
                    notes,
                },
            )
            .await
            .map_err(gql_error)?;
        Ok(entry.into())
    }

    async fn stop_time_entry(
        &self,
        context: &Context<'_>,
        employee_id: String,
        entry_id: String,
        end_time: Option<i64>,
    ) -> GqlResult<GqlTimeEntry> {
        let state = context.data_unchecked::<AppState>();
        let entry = state
            .work_log
            .stop_entry(&employee_id, &entry_id, end_time)
            .await
            .map_err(gql_error)?;
        Ok(entry.into())
    }
}
