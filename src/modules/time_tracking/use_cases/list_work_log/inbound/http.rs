use axum::{
    Json,
    extract::{Path, Query, State},
    response::IntoResponse,
};
use serde::Deserialize;

use crate::shell::http::{ApiError, EmployeeScope};
use crate::shell::state::AppState;

#[derive(Deserialize)]
pub struct PageParams {
    pub offset: Option<u64>,
    pub limit: Option<u64>,
}

pub async fn list_entries(
    State(state): State<AppState>,
    EmployeeScope(employee_id): EmployeeScope,
    Query(params): Query<PageParams>,
) -> Result<impl IntoResponse, ApiError> {
    let entries = state
        .work_log
        .list_entries(
            &employee_id,
            params.offset.unwrap_or(0),
            params.limit.unwrap_or(50),
        )
        .await?;
    Ok(Json(entries))
}

pub async fn active_entry(
    State(state): State<AppState>,
    EmployeeScope(employee_id): EmployeeScope,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(state.work_log.active_entry(&employee_id).await?))
}

pub async fn entry(
    State(state): State<AppState>,
    EmployeeScope(employee_id): EmployeeScope,
    Path(entry_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(state.work_log.entry(&employee_id, &entry_id).await?))
}

pub async fn list_idle_periods(
    State(state): State<AppState>,
    EmployeeScope(employee_id): EmployeeScope,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(state.work_log.list_idle_periods(&employee_id).await?))
}

pub async fn list_timesheets(
    State(state): State<AppState>,
    EmployeeScope(employee_id): EmployeeScope,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(state.work_log.list_timesheets(&employee_id).await?))
}

pub async fn timesheet(
    State(state): State<AppState>,
    Path(timesheet_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(state.work_log.timesheet(&timesheet_id).await?))
}

#[cfg(test)]
mod list_work_log_http_inbound_tests {
    use axum::{
        Router,
        http::{Method, StatusCode},
        routing::get,
    };
    use tower::ServiceExt;

    use super::*;
    use crate::modules::time_tracking::application::work_log_service::StartEntryInput;
    use crate::modules::time_tracking::core::events::v1::time_entry::EntrySource;
    use crate::tests::fixtures::app::{make_state, read_json, request};
    use crate::tests::fixtures::events::work_log::{EMPLOYEE, MONDAY};

    fn app(state: AppState) -> Router {
        Router::new()
            .route("/time-entries", get(list_entries))
            .route("/time-entries/active", get(active_entry))
            .route("/time-entries/{id}", get(entry))
            .route("/idle-periods", get(list_idle_periods))
            .route("/timesheets", get(list_timesheets))
            .route("/timesheets/{id}", get(timesheet))
            .with_state(state)
    }

    async fn start(state: &AppState, employee_id: &str, start_time: i64) -> String {
        state
            .work_log
            .start_entry(
                employee_id,
                StartEntryInput {
                    source: EntrySource::Automatic,
                    project_id: None,
                    start_time: Some(start_time),
                    notes: None,
                },
            )
            .await
            .unwrap()
            .entry_id
    }

    #[tokio::test]
    async fn it_should_return_null_without_an_active_entry() {
        let response = app(make_state().await)
            .oneshot(request(Method::GET, "/time-entries/active", Some(EMPLOYEE), None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(read_json(response).await.is_null());
    }

    #[tokio::test]
    async fn it_should_return_the_running_entry() {
        let state = make_state().await;
        let entry_id = start(&state, EMPLOYEE, MONDAY).await;

        let response = app(state)
            .oneshot(request(Method::GET, "/time-entries/active", Some(EMPLOYEE), None))
            .await
            .unwrap();
        let json = read_json(response).await;
        assert_eq!(json["entry_id"], entry_id.as_str());
        assert_eq!(json["source"], "automatic");
    }

    #[tokio::test]
    async fn it_should_list_newest_entries_first_with_paging() {
        let state = make_state().await;
        for day in 0..3 {
            let start_time = MONDAY + day * 86_400;
            let entry_id = start(&state, EMPLOYEE, start_time).await;
            state
                .work_log
                .stop_entry(EMPLOYEE, &entry_id, Some(start_time + 3_600))
                .await
                .unwrap();
        }

        let response = app(state)
            .oneshot(request(Method::GET, "/time-entries?offset=0&limit=2", Some(EMPLOYEE), None))
            .await
            .unwrap();
        let json = read_json(response).await;
        let entries = json.as_array().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0]["start_time"], MONDAY + 2 * 86_400);
        assert_eq!(entries[1]["start_time"], MONDAY + 86_400);
    }

    #[tokio::test]
    async fn it_should_hide_entries_of_other_employees() {
        let state = make_state().await;
        let entry_id = start(&state, "emp-other", MONDAY).await;

        let response = app(state)
            .oneshot(request(
                Method::GET,
                &format!("/time-entries/{entry_id}"),
                Some(EMPLOYEE),
                None,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn it_should_return_404_for_an_unknown_timesheet() {
        let response = app(make_state().await)
            .oneshot(request(Method::GET, "/timesheets/ts-missing", None, None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn it_should_list_timesheets_of_the_caller() {
        let state = make_state().await;
        state
            .work_log
            .generate_timesheet(EMPLOYEE, chrono::NaiveDate::from_ymd_opt(2024, 1, 1).unwrap())
            .await
            .unwrap();

        let response = app(state)
            .oneshot(request(Method::GET, "/timesheets", Some(EMPLOYEE), None))
            .await
            .unwrap();
        let json = read_json(response).await;
        assert_eq!(json.as_array().unwrap().len(), 1);
        assert_eq!(json[0]["week_start"], "2024-01-01");
    }
}
