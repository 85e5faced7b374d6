use std::sync::Arc;

use chrono::NaiveDate;
use rstest::rstest;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use time_payroll::modules::approval::core::workflow::ReviewDecision;
use time_payroll::modules::time_tracking::application::work_log_service::StartEntryInput;
use time_payroll::modules::time_tracking::core::events::v1::time_entry::EntrySource;
use time_payroll::shared::core::reference_data::{
    DeductionCalculation, DeductionTemplate, WageConfig, WageType,
};
use time_payroll::shared::infrastructure::reference_data::in_memory::InMemoryReferenceData;
use time_payroll::shell::config::Settings;
use time_payroll::shell::state::AppState;

const EMPLOYEE: &str = "emp-payroll-0001";
const HOUR: i64 = 3_600;
const DAY: i64 = 86_400;
// Monday 2024-01-01 00:00 UTC
const MONDAY: i64 = 1_704_067_200;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

async fn state_with(wage: WageConfig, templates: Vec<DeductionTemplate>) -> AppState {
    let reference = Arc::new(InMemoryReferenceData::new());
    reference.add_wage_config(wage).await;
    for template in templates {
        reference.add_deduction_template(template).await;
    }
    AppState::in_memory(&Settings::default(), reference).unwrap()
}

fn hourly(rate: Decimal) -> WageConfig {
    WageConfig {
        employee_id: EMPLOYEE.into(),
        wage_type: WageType::Hourly,
        wage_amount: rate,
        effective_date: date(2023, 1, 1),
        employment_type: None,
    }
}

/// Logs and approves one entry per day, `hours_per_day[i]` hours on day `i`.
async fn approved_days(state: &AppState, hours_per_day: &[i64]) {
    for (day, hours) in hours_per_day.iter().enumerate() {
        if *hours == 0 {
            continue;
        }
        let start_time = MONDAY + day as i64 * DAY + 7 * HOUR;
        let entry = state
            .work_log
            .start_entry(
                EMPLOYEE,
                StartEntryInput {
                    source: EntrySource::Manual,
                    project_id: None,
                    start_time: Some(start_time),
                    notes: None,
                },
            )
            .await
            .unwrap();
        state
            .work_log
            .stop_entry(EMPLOYEE, &entry.entry_id, Some(start_time + hours * HOUR))
            .await
            .unwrap();
        state
            .work_log
            .review_entry(&entry.entry_id, ReviewDecision::Approve)
            .await
            .unwrap();
    }
}

#[rstest]
#[case::forty_hours(&[8, 8, 8, 8, 8], dec!(40), dec!(0), dec!(800))]
#[case::forty_eight_hours(&[8, 8, 8, 8, 8, 8], dec!(40), dec!(8), dec!(1040))]
#[tokio::test]
async fn it_should_split_a_week_into_base_and_overtime(
    #[case] hours_per_day: &[i64],
    #[case] base_hours: Decimal,
    #[case] overtime_hours: Decimal,
    #[case] gross_pay: Decimal,
) {
    let state = state_with(hourly(dec!(20)), vec![]).await;
    approved_days(&state, hours_per_day).await;

    let preview = state
        .payroll
        .calculate(EMPLOYEE, date(2024, 1, 1), date(2024, 1, 8))
        .await
        .unwrap();

    assert_eq!(preview.base_hours, base_hours);
    assert_eq!(preview.overtime_hours, overtime_hours);
    assert_eq!(preview.gross_pay, gross_pay);
}

#[tokio::test]
async fn it_should_compute_overtime_per_week_across_two_weeks() {
    let state = state_with(hourly(dec!(20)), vec![]).await;
    // 45 h in each week, nine hours a day on weekdays
    approved_days(&state, &[9, 9, 9, 9, 9, 0, 0, 9, 9, 9, 9, 9]).await;

    let preview = state
        .payroll
        .calculate(EMPLOYEE, date(2024, 1, 1), date(2024, 1, 15))
        .await
        .unwrap();

    assert_eq!(preview.overtime_hours, dec!(10));
    assert_eq!(preview.base_hours, dec!(80));
    assert_eq!(preview.weekly.len(), 2);
}

#[tokio::test]
async fn it_should_refuse_deductions_that_exceed_gross_pay() {
    let state = state_with(
        hourly(dec!(20)),
        vec![DeductionTemplate {
            template_id: "dt-levy".into(),
            name: "Levy".into(),
            calculation: DeductionCalculation::Flat { amount: dec!(500) },
            applies_to: vec![],
        }],
    )
    .await;
    approved_days(&state, &[8]).await;

    let error = state
        .payroll
        .calculate(EMPLOYEE, date(2024, 1, 1), date(2024, 1, 8))
        .await
        .unwrap_err();
    assert_eq!(error.kind(), "validation_error");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn it_should_create_exactly_one_record_for_parallel_runs() {
    let state = state_with(hourly(dec!(20)), vec![]).await;
    approved_days(&state, &[8, 8]).await;

    let employees = vec![EMPLOYEE.to_string()];
    let first = {
        let payroll = state.payroll.clone();
        let employees = employees.clone();
        tokio::spawn(async move {
            payroll
                .preview_and_create(&employees, date(2024, 1, 1), date(2024, 1, 8))
                .await
        })
    };
    let second = {
        let payroll = state.payroll.clone();
        tokio::spawn(async move {
            payroll
                .preview_and_create(&employees, date(2024, 1, 1), date(2024, 1, 8))
                .await
        })
    };

    let outcomes: Vec<_> = [first.await.unwrap().unwrap(), second.await.unwrap().unwrap()]
        .into_iter()
        .flatten()
        .collect();
    assert_eq!(outcomes.iter().filter(|outcome| outcome.is_ok()).count(), 1);
    assert_eq!(state.payroll.list_records(EMPLOYEE).await.unwrap().len(), 1);
}
