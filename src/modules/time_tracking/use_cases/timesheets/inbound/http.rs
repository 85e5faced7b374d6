use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::modules::approval::core::workflow::ReviewDecision;
use crate::modules::time_tracking::use_cases::time_entry_lifecycle::inbound::http::RejectBody;
use crate::shell::http::{ApiError, EmployeeScope, json_body};
use crate::shell::state::AppState;

#[derive(Deserialize)]
pub struct GenerateTimesheetBody {
    pub week_start: NaiveDate,
}

pub async fn generate(
    State(state): State<AppState>,
    EmployeeScope(employee_id): EmployeeScope,
    body: Result<Json<GenerateTimesheetBody>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let body = json_body(body)?;
    let timesheet = state
        .work_log
        .generate_timesheet(&employee_id, body.week_start)
        .await?;
    Ok((StatusCode::CREATED, Json(timesheet)))
}

pub async fn approve(
    State(state): State<AppState>,
    Path(timesheet_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let timesheet = state
        .work_log
        .review_timesheet(&timesheet_id, ReviewDecision::Approve)
        .await?;
    Ok(Json(timesheet))
}

pub async fn reject(
    State(state): State<AppState>,
    Path(timesheet_id): Path<String>,
    body: Result<Json<RejectBody>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let RejectBody { reason } = json_body(body)?;
    let timesheet = state
        .work_log
        .review_timesheet(&timesheet_id, ReviewDecision::Reject { reason })
        .await?;
    Ok(Json(timesheet))
}
