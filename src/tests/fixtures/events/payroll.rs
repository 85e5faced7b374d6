// Shared payroll fixtures: 48 hours at 20/h in the week of 2024-01-01.

use crate::modules::payroll::core::calculation::{PayrollPreview, WeeklyHours};
use crate::modules::payroll::core::events::PayrollEvent;
use crate::modules::payroll::core::events::v1::payroll_record::PayrollRecordCreatedV1;
use crate::shared::core::reference_data::WageType;
use crate::tests::fixtures::events::work_log::{EMPLOYEE, MONDAY};
use rust_decimal_macros::dec;

/// `start` and `end` are YYYY-MM-DD.
pub fn make_preview(start: &str, end: &str) -> PayrollPreview {
    PayrollPreview {
        employee_id: EMPLOYEE.to_string(),
        period_start: start.parse().unwrap(),
        period_end: end.parse().unwrap(),
        wage_type: WageType::Hourly,
        wage_amount: dec!(20),
        employment_type: Some("full_time".to_string()),
        base_hours: dec!(40),
        overtime_hours: dec!(8),
        base_pay: dec!(800),
        overtime_pay: dec!(240),
        gross_pay: dec!(1040),
        deductions: vec![],
        total_deductions: dec!(0),
        net_pay: dec!(1040),
        weekly: vec![WeeklyHours {
            week: "2024-W01".to_string(),
            total_hours: dec!(48),
            base_hours: dec!(40),
            overtime_hours: dec!(8),
        }],
        source_timesheet_ids: vec!["ts-fixed-0001".to_string()],
    }
}

pub fn make_created_event(payroll_id: &str, start: &str, end: &str) -> PayrollEvent {
    PayrollEvent::PayrollRecordCreatedV1(PayrollRecordCreatedV1 {
        payroll_id: payroll_id.to_string(),
        calculation: make_preview(start, end),
        created_at: MONDAY + 14 * 86_400,
    })
}
