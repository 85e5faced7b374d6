// Approved time flows into a payroll record that is then processed.

use axum::{
    Router,
    http::{Method, StatusCode},
};
use tower::ServiceExt;

use crate::shell::graphql::build_schema;
use crate::shell::http::router;
use crate::tests::fixtures::app::{make_state, read_json, request};
use crate::tests::fixtures::events::work_log::{EMPLOYEE, MONDAY};

const HOUR: i64 = 3_600;
const DAY: i64 = 86_400;

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    employee_id: Option<&str>,
    body: Option<&str>,
) -> (StatusCode, serde_json::Value) {
    let response = app
        .clone()
        .oneshot(request(method, uri, employee_id, body))
        .await
        .unwrap();
    (response.status(), read_json(response).await)
}

fn decimal(value: &serde_json::Value) -> f64 {
    value.as_str().unwrap().parse().unwrap()
}

/// Six eight hour days, Monday to Saturday, approved through the weekly timesheet.
async fn approved_week_of_48_hours(app: &Router) {
    for day in 0..6 {
        let start_time = MONDAY + day * DAY + 8 * HOUR;
        let (status, entry) = send(
            app,
            Method::POST,
            "/time-entries",
            Some(EMPLOYEE),
            Some(&format!(r#"{{"source":"manual","start_time":{start_time}}}"#)),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let entry_id = entry["entry_id"].as_str().unwrap();
        let (status, _) = send(
            app,
            Method::POST,
            &format!("/time-entries/{entry_id}/stop"),
            Some(EMPLOYEE),
            Some(&format!(r#"{{"end_time":{}}}"#, start_time + 8 * HOUR)),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, timesheet) = send(
        app,
        Method::POST,
        "/timesheets/generate",
        Some(EMPLOYEE),
        Some(r#"{"week_start":"2024-01-01"}"#),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let timesheet_id = timesheet["timesheet_id"].as_str().unwrap();
    let (status, _) = send(
        app,
        Method::PUT,
        &format!("/timesheets/{timesheet_id}/approve"),
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn it_should_pay_overtime_and_commit_a_single_record() {
    let state = make_state().await;
    let app = router(state.clone(), build_schema(state));
    approved_week_of_48_hours(&app).await;

    let period = format!(
        r#"{{"employee_id":"{EMPLOYEE}","start_date":"2024-01-01","end_date":"2024-01-08"}}"#
    );
    let (status, preview) = send(&app, Method::POST, "/payroll-calculator/calculate", None, Some(&period)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(decimal(&preview["base_hours"]), 40.0);
    assert_eq!(decimal(&preview["overtime_hours"]), 8.0);
    assert_eq!(decimal(&preview["gross_pay"]), 1040.0);
    assert_eq!(preview["source_timesheet_ids"].as_array().unwrap().len(), 1);

    let bulk = format!(
        r#"{{"employee_ids":["{EMPLOYEE}"],"start_date":"2024-01-01","end_date":"2024-01-08"}}"#
    );
    let (status, created) = send(
        &app,
        Method::POST,
        "/payroll-calculator/preview-and-create",
        None,
        Some(&bulk),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created[0]["status"], "ok");
    let payroll_id = created[0]["result"]["payroll_id"].as_str().unwrap().to_string();

    let (_, again) = send(
        &app,
        Method::POST,
        "/payroll-calculator/preview-and-create",
        None,
        Some(&bulk),
    )
    .await;
    assert_eq!(again[0]["error"], "conflict_error");

    let (status, processed) = send(
        &app,
        Method::PUT,
        &format!("/payroll/{payroll_id}/process"),
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(processed["status"], "processed");

    let (_, records) = send(&app, Method::GET, "/payroll", Some(EMPLOYEE), None).await;
    assert_eq!(records.as_array().unwrap().len(), 1);
    assert_eq!(decimal(&records[0]["net_pay"]), 1040.0);
}

#[tokio::test]
async fn it_should_leave_unapproved_time_out_of_payroll() {
    let state = make_state().await;
    let app = router(state.clone(), build_schema(state));
    let (status, entry) = send(
        &app,
        Method::POST,
        "/time-entries",
        Some(EMPLOYEE),
        Some(&format!(r#"{{"source":"manual","start_time":{}}}"#, MONDAY + 8 * HOUR)),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let entry_id = entry["entry_id"].as_str().unwrap();
    send(
        &app,
        Method::POST,
        &format!("/time-entries/{entry_id}/stop"),
        Some(EMPLOYEE),
        Some(&format!(r#"{{"end_time":{}}}"#, MONDAY + 16 * HOUR)),
    )
    .await;

    let period = format!(
        r#"{{"employee_id":"{EMPLOYEE}","start_date":"2024-01-01","end_date":"2024-01-08"}}"#
    );
    let (status, preview) = send(&app, Method::POST, "/payroll-calculator/calculate", None, Some(&period)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(decimal(&preview["gross_pay"]), 0.0);
}
