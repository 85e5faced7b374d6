use async_graphql_axum::GraphQLSubscription;
use axum::{
    Extension, Json, Router,
    extract::{FromRequestParts, State, rejection::JsonRejection},
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use serde::Serialize;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::modules::payroll::use_cases::calculate_payroll::inbound::http as calculate_http;
use crate::modules::payroll::use_cases::list_payroll::inbound::http as payroll_queries_http;
use crate::modules::payroll::use_cases::process_payroll::inbound::http as process_http;
use crate::modules::time_tracking::use_cases::idle_periods::inbound::http as idle_http;
use crate::modules::time_tracking::use_cases::list_work_log::inbound::http as work_log_http;
use crate::modules::time_tracking::use_cases::time_entry_lifecycle::inbound::http as entry_http;
use crate::modules::time_tracking::use_cases::timesheets::inbound::http as timesheet_http;
use crate::shared::application::errors::ApplicationError;
use crate::shared::core::errors::DomainError;
use crate::shared::infrastructure::event_store::EventStoreError;
use crate::shell::config::TrackingPolicy;
use crate::shell::graphql::{AppSchema, graphiql, graphql};
use crate::shell::state::AppState;

pub const EMPLOYEE_HEADER: &str = "x-employee-id";

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    pub message: String,
}

#[derive(Debug)]
pub struct ApiError(pub ApplicationError);

impl From<ApplicationError> for ApiError {
    fn from(error: ApplicationError) -> Self {
        Self(error)
    }
}

impl From<DomainError> for ApiError {
    fn from(error: DomainError) -> Self {
        Self(error.into())
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            ApplicationError::Domain(DomainError::Validation(_))
            | ApplicationError::Domain(DomainError::Configuration(_)) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            ApplicationError::Domain(DomainError::Conflict(_))
            | ApplicationError::Domain(DomainError::InvalidState(_))
            | ApplicationError::EventStore(EventStoreError::VersionMismatch { .. }) => {
                StatusCode::CONFLICT
            }
            ApplicationError::Domain(DomainError::NotFound(_)) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self.0, kind = self.0.kind(), "request failed");
        }
        let body = ErrorBody {
            error: self.0.kind().to_string(),
            message: self.0.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

/// Malformed or mistyped JSON is a validation failure, reported as 422.
pub fn json_body<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    body.map(|Json(inner)| inner)
        .map_err(|rejection| DomainError::Validation(rejection.body_text()).into())
}

/// The employee on whose behalf the request runs, taken from `x-employee-id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeScope(pub String);

impl<S: Send + Sync> FromRequestParts<S> for EmployeeScope {
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let employee_id = parts
            .headers
            .get(EMPLOYEE_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty());

        match employee_id {
            Some(employee_id) => Ok(Self(employee_id.to_string())),
            None => {
                let body = ErrorBody {
                    error: "validation_error".into(),
                    message: format!("missing {EMPLOYEE_HEADER} header"),
                };
                Err((StatusCode::BAD_REQUEST, Json(body)).into_response())
            }
        }
    }
}

async fn tracking_policy(State(state): State<AppState>) -> Json<TrackingPolicy> {
    Json(state.tracking_policy)
}

pub fn router(state: AppState, schema: AppSchema) -> Router {
    Router::new()
        .route(
            "/time-entries",
            post(entry_http::start).get(work_log_http::list_entries),
        )
        .route("/time-entries/active", get(work_log_http::active_entry))
        .route(
            "/time-entries/{id}",
            get(work_log_http::entry)
                .put(entry_http::update)
                .delete(entry_http::delete),
        )
        .route("/time-entries/{id}/stop", post(entry_http::stop))
        .route("/time-entries/{id}/approve", put(entry_http::approve))
        .route("/time-entries/{id}/reject", put(entry_http::reject))
        .route(
            "/idle-periods",
            post(idle_http::start).get(work_log_http::list_idle_periods),
        )
        .route("/idle-periods/{id}/end", put(idle_http::end))
        .route("/timesheets", get(work_log_http::list_timesheets))
        .route("/timesheets/generate", post(timesheet_http::generate))
        .route("/timesheets/{id}", get(work_log_http::timesheet))
        .route("/timesheets/{id}/approve", put(timesheet_http::approve))
        .route("/timesheets/{id}/reject", put(timesheet_http::reject))
        .route(
            "/payroll-calculator/calculate",
            post(calculate_http::calculate),
        )
        .route(
            "/payroll-calculator/calculate-bulk",
            post(calculate_http::calculate_bulk),
        )
        .route(
            "/payroll-calculator/preview-and-create",
            post(calculate_http::preview_and_create),
        )
        .route("/payroll", get(payroll_queries_http::list_records))
        .route("/payroll/{id}", get(payroll_queries_http::record))
        .route("/payroll/{id}/process", put(process_http::process))
        .route("/tracking-policy", get(tracking_policy))
        .route("/gql", get(graphiql).post(graphql))
        .route_service("/gql/ws", GraphQLSubscription::new(schema.clone()))
        .layer(Extension(schema))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
