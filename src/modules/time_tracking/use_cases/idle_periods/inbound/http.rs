use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;

use crate::shell::http::{ApiError, EmployeeScope, json_body};
use crate::shell::state::AppState;

#[derive(Deserialize, Default)]
pub struct StartIdleBody {
    pub time_entry_id: Option<String>,
    pub start_time: Option<i64>,
}

#[derive(Deserialize, Default)]
pub struct EndIdleBody {
    pub end_time: Option<i64>,
}

pub async fn start(
    State(state): State<AppState>,
    EmployeeScope(employee_id): EmployeeScope,
    body: Result<Json<StartIdleBody>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let body = json_body(body)?;
    let idle = state
        .work_log
        .start_idle(&employee_id, body.time_entry_id, body.start_time)
        .await?;
    Ok((StatusCode::CREATED, Json(idle)))
}

pub async fn end(
    State(state): State<AppState>,
    EmployeeScope(employee_id): EmployeeScope,
    Path(idle_id): Path<String>,
    body: Result<Json<EndIdleBody>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let body = match body {
        Err(JsonRejection::MissingJsonContentType(_)) => EndIdleBody::default(),
        other => json_body(other)?,
    };
    let idle = state
        .work_log
        .end_idle(&employee_id, &idle_id, body.end_time)
        .await?;
    Ok(Json(idle))
}
