use async_graphql::{ErrorExtensions, MergedObject, Schema};
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::{Extension, response::Html};

use crate::modules::payroll::use_cases::list_payroll::inbound::graphql::PayrollQuery;
use crate::modules::time_tracking::use_cases::list_work_log::inbound::graphql::{
    TimeEntrySubscription, WorkLogQuery,
};
use crate::shared::application::errors::ApplicationError;
use crate::shell::state::AppState;

pub use crate::modules::time_tracking::use_cases::time_entry_lifecycle::inbound::graphql::MutationRoot;

#[derive(MergedObject, Default)]
pub struct QueryRoot(WorkLogQuery, PayrollQuery);

pub type AppSchema = Schema<QueryRoot, MutationRoot, TimeEntrySubscription>;

pub fn build_schema(state: AppState) -> AppSchema {
    Schema::build(QueryRoot::default(), MutationRoot, TimeEntrySubscription)
        .data(state)
        .finish()
}

/// Carries the error kind as the `code` extension.
pub fn gql_error(error: ApplicationError) -> async_graphql::Error {
    let kind = error.kind();
    async_graphql::Error::new(error.to_string()).extend_with(|_, extensions| {
        extensions.set("code", kind);
    })
}

pub async fn graphql(Extension(schema): Extension<AppSchema>, req: GraphQLRequest) -> GraphQLResponse {
    schema.execute(req.into_inner()).await.into()
}

pub async fn graphiql() -> Html<String> {
    use async_graphql::http::GraphiQLSource;
    Html(
        GraphiQLSource::build()
            .endpoint("/gql")
            .subscription_endpoint("/gql/ws")
            .finish(),
    )
}
