// One employee's week through the full router: timer, idle overlay, timesheet review.

use axum::{
    Router,
    http::{Method, StatusCode},
};
use tower::ServiceExt;

use crate::shell::graphql::build_schema;
use crate::shell::http::router;
use crate::shell::workers::relay_once;
use crate::tests::fixtures::app::{make_state, read_json, request};
use crate::tests::fixtures::events::work_log::{EMPLOYEE, MONDAY};

async fn send(app: &Router, method: Method, uri: &str, body: Option<&str>) -> (StatusCode, serde_json::Value) {
    let response = app
        .clone()
        .oneshot(request(method, uri, Some(EMPLOYEE), body))
        .await
        .unwrap();
    let status = response.status();
    if status == StatusCode::NO_CONTENT {
        return (status, serde_json::Value::Null);
    }
    (status, read_json(response).await)
}

#[tokio::test]
async fn it_should_track_a_week_and_approve_its_timesheet() {
    let state = make_state().await;
    let app = router(state.clone(), build_schema(state.clone()));

    let (status, entry) = send(
        &app,
        Method::POST,
        "/time-entries",
        Some(&format!(
            r#"{{"source":"automatic","project_id":"proj-billable","start_time":{}}}"#,
            MONDAY + 9 * 3_600
        )),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let entry_id = entry["entry_id"].as_str().unwrap().to_string();

    let (status, idle) = send(
        &app,
        Method::POST,
        "/idle-periods",
        Some(&format!(
            r#"{{"time_entry_id":"{entry_id}","start_time":{}}}"#,
            MONDAY + 10 * 3_600
        )),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let idle_id = idle["idle_id"].as_str().unwrap().to_string();
    let (status, _) = send(
        &app,
        Method::PUT,
        &format!("/idle-periods/{idle_id}/end"),
        Some(&format!(r#"{{"end_time":{}}}"#, MONDAY + 10 * 3_600 + 900)),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, stopped) = send(
        &app,
        Method::POST,
        &format!("/time-entries/{entry_id}/stop"),
        Some(&format!(r#"{{"end_time":{}}}"#, MONDAY + 17 * 3_600)),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stopped["duration_seconds"], 8 * 3_600);

    let (_, active) = send(&app, Method::GET, "/time-entries/active", None).await;
    assert!(active.is_null());

    let (status, timesheet) = send(
        &app,
        Method::POST,
        "/timesheets/generate",
        Some(r#"{"week_start":"2024-01-01"}"#),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(timesheet["total_seconds"], 8 * 3_600);
    assert_eq!(timesheet["billable_seconds"], 8 * 3_600);
    // idle time is reported, never subtracted
    assert_eq!(timesheet["idle_seconds"], 900);
    let timesheet_id = timesheet["timesheet_id"].as_str().unwrap().to_string();

    // entries of a pending timesheet only accept note edits
    let (status, _) = send(
        &app,
        Method::PUT,
        &format!("/time-entries/{entry_id}"),
        Some(&format!(r#"{{"start_time":{}}}"#, MONDAY + 8 * 3_600)),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, approved) = send(
        &app,
        Method::PUT,
        &format!("/timesheets/{timesheet_id}/approve"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(approved["status"], "approved");

    let (_, fetched) = send(&app, Method::GET, &format!("/timesheets/{timesheet_id}"), None).await;
    assert_eq!(fetched["status"], "approved");

    let (status, _) = send(&app, Method::DELETE, &format!("/time-entries/{entry_id}"), None).await;
    assert_eq!(status, StatusCode::CONFLICT);

    // start and stop each queued one notification
    let relayed = relay_once(state.outbox.as_ref(), &state.notifications)
        .await
        .unwrap();
    assert_eq!(relayed, 2);
}

#[tokio::test]
async fn it_should_serve_the_tracking_policy() {
    let state = make_state().await;
    let app = router(state.clone(), build_schema(state));

    let (status, policy) = send(&app, Method::GET, "/tracking-policy", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(policy["idle_timeout_seconds"], 300);
    assert_eq!(policy["overtime_threshold_hours"], "40");
    assert_eq!(policy["overtime_multiplier"], "1.5");
}
