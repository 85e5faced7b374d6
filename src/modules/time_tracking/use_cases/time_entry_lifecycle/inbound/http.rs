use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;

use crate::modules::approval::core::workflow::ReviewDecision;
use crate::modules::time_tracking::application::work_log_service::StartEntryInput;
use crate::modules::time_tracking::core::events::v1::time_entry::EntrySource;
use crate::modules::time_tracking::use_cases::time_entry_lifecycle::command::TimeEntryChanges;
use crate::shell::http::{ApiError, EmployeeScope, json_body};
use crate::shell::state::AppState;

#[derive(Deserialize)]
pub struct StartTimeEntryBody {
    pub source: EntrySource,
    pub project_id: Option<String>,
    pub start_time: Option<i64>,
    pub notes: Option<String>,
}

#[derive(Deserialize, Default)]
pub struct StopTimeEntryBody {
    pub end_time: Option<i64>,
}

#[derive(Deserialize)]
pub struct UpdateTimeEntryBody {
    pub end_time: Option<i64>,
    pub notes: Option<String>,
    pub project_id: Option<String>,
    pub start_time: Option<i64>,
}

#[derive(Deserialize)]
pub struct RejectBody {
    pub reason: String,
}

pub async fn start(
    State(state): State<AppState>,
    EmployeeScope(employee_id): EmployeeScope,
    body: Result<Json<StartTimeEntryBody>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let body = json_body(body)?;
    let entry = state
        .work_log
        .start_entry(
            &employee_id,
            StartEntryInput {
                source: body.source,
                project_id: body.project_id,
                start_time: body.start_time,
                notes: body.notes,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

pub async fn stop(
    State(state): State<AppState>,
    EmployeeScope(employee_id): EmployeeScope,
    Path(entry_id): Path<String>,
    body: Result<Json<StopTimeEntryBody>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    // an empty body stops the timer now
    let body = match body {
        Err(JsonRejection::MissingJsonContentType(_)) => StopTimeEntryBody::default(),
        other => json_body(other)?,
    };
    let entry = state
        .work_log
        .stop_entry(&employee_id, &entry_id, body.end_time)
        .await?;
    Ok(Json(entry))
}

pub async fn update(
    State(state): State<AppState>,
    EmployeeScope(employee_id): EmployeeScope,
    Path(entry_id): Path<String>,
    body: Result<Json<UpdateTimeEntryBody>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let body = json_body(body)?;
    let changes = TimeEntryChanges {
        notes: body.notes,
        project_id: body.project_id,
        start_time: body.start_time,
        end_time: body.end_time,
    };
    let entry = state
        .work_log
        .update_entry(&employee_id, &entry_id, changes)
        .await?;
    Ok(Json(entry))
}

pub async fn delete(
    State(state): State<AppState>,
    EmployeeScope(employee_id): EmployeeScope,
    Path(entry_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    state.work_log.delete_entry(&employee_id, &entry_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn approve(
    State(state): State<AppState>,
    Path(entry_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let entry = state
        .work_log
        .review_entry(&entry_id, ReviewDecision::Approve)
        .await?;
    Ok(Json(entry))
}

pub async fn reject(
    State(state): State<AppState>,
    Path(entry_id): Path<String>,
    body: Result<Json<RejectBody>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let RejectBody { reason } = json_body(body)?;
    let entry = state
        .work_log
        .review_entry(&entry_id, ReviewDecision::Reject { reason })
        .await?;
    Ok(Json(entry))
}
