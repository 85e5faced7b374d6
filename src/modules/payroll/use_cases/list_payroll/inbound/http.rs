use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};

use crate::shell::http::{ApiError, EmployeeScope};
use crate::shell::state::AppState;

pub async fn record(
    State(state): State<AppState>,
    Path(payroll_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(state.payroll.record(&payroll_id).await?))
}

pub async fn list_records(
    State(state): State<AppState>,
    EmployeeScope(employee_id): EmployeeScope,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(state.payroll.list_records(&employee_id).await?))
}
