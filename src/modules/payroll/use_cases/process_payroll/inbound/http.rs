use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};

use crate::shell::http::ApiError;
use crate::shell::state::AppState;

pub async fn process(
    State(state): State<AppState>,
    Path(payroll_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(state.payroll.process(&payroll_id).await?))
}
