use std::sync::Arc;

use axum::{
    body::Body,
    http::{Method, Request, Response},
};
use chrono::NaiveDate;
use http_body_util::BodyExt;
use rust_decimal_macros::dec;

use crate::shared::core::reference_data::{Project, WageConfig, WageType};
use crate::shared::infrastructure::reference_data::in_memory::InMemoryReferenceData;
use crate::shell::config::Settings;
use crate::shell::http::EMPLOYEE_HEADER;
use crate::shell::state::AppState;
use crate::tests::fixtures::events::work_log::EMPLOYEE;

/// Application state over in-memory adapters, with one hourly employee paid 20/h
/// and one billable project.
pub async fn make_state() -> AppState {
    let reference = Arc::new(InMemoryReferenceData::new());
    reference
        .add_wage_config(WageConfig {
            employee_id: EMPLOYEE.into(),
            wage_type: WageType::Hourly,
            wage_amount: dec!(20),
            effective_date: NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
            employment_type: Some("full_time".into()),
        })
        .await;
    reference
        .add_project(Project {
            project_id: "proj-billable".into(),
            name: "Client work".into(),
            billable: true,
        })
        .await;
    AppState::in_memory(&Settings::default(), reference).unwrap()
}

pub fn request(method: Method, uri: &str, employee_id: Option<&str>, body: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(employee_id) = employee_id {
        builder = builder.header(EMPLOYEE_HEADER, employee_id);
    }
    builder
        .body(body.map(|b| Body::from(b.to_string())).unwrap_or_else(Body::empty))
        .unwrap()
}

pub async fn read_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
