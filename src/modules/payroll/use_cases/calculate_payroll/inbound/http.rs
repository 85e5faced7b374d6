use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::shell::http::{ApiError, json_body};
use crate::shell::state::AppState;

#[derive(Deserialize)]
pub struct CalculateBody {
    pub employee_id: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

#[derive(Deserialize)]
pub struct CalculateBulkBody {
    pub employee_ids: Vec<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

pub async fn calculate(
    State(state): State<AppState>,
    body: Result<Json<CalculateBody>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let body = json_body(body)?;
    let preview = state
        .payroll
        .calculate(&body.employee_id, body.start_date, body.end_date)
        .await?;
    Ok(Json(preview))
}

pub async fn calculate_bulk(
    State(state): State<AppState>,
    body: Result<Json<CalculateBulkBody>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let body = json_body(body)?;
    let outcomes = state
        .payroll
        .calculate_bulk(&body.employee_ids, body.start_date, body.end_date)
        .await?;
    Ok(Json(outcomes))
}

pub async fn preview_and_create(
    State(state): State<AppState>,
    body: Result<Json<CalculateBulkBody>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let body = json_body(body)?;
    let outcomes = state
        .payroll
        .preview_and_create(&body.employee_ids, body.start_date, body.end_date)
        .await?;
    Ok((StatusCode::CREATED, Json(outcomes)))
}
