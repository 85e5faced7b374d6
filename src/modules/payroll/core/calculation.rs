// Pure payroll calculation.
//
// Purpose
// - Turn approved worked time, a pinned wage configuration and the deduction templates
//   into a payroll preview.
//
// Rules
// - Hours are bucketed per ISO week of the entry start; every week is split into base
//   hours (up to the threshold) and overtime hours before summing over the period.
// - Hourly: base pay = base hours x rate, overtime pay = overtime hours x rate x multiplier.
// - Salary: base pay = annual amount x period days / 365, overtime uses the derived hourly
//   rate annual / (52 x threshold).
// - Deductions are rounded to cents one by one. A negative net pay is refused.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::shared::core::errors::DomainError;
use crate::shared::core::primitives::{DateRange, iso_week_key, round_money, seconds_to_hours};
use crate::shared::core::reference_data::{
    DeductionTemplate, WageConfig, WageType, pin_wage_config,
};

pub const DEFAULT_OVERTIME_THRESHOLD_HOURS: Decimal = dec!(40);
pub const DEFAULT_OVERTIME_MULTIPLIER: Decimal = dec!(1.5);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollPolicy {
    pub overtime_threshold_hours: Decimal,
    pub overtime_multiplier: Decimal,
}

impl Default for PayrollPolicy {
    fn default() -> Self {
        Self {
            overtime_threshold_hours: DEFAULT_OVERTIME_THRESHOLD_HOURS,
            overtime_multiplier: DEFAULT_OVERTIME_MULTIPLIER,
        }
    }
}

impl PayrollPolicy {
    pub fn new(
        overtime_threshold_hours: Decimal,
        overtime_multiplier: Decimal,
    ) -> Result<Self, DomainError> {
        if overtime_threshold_hours <= Decimal::ZERO {
            return Err(DomainError::Configuration(format!(
                "overtime threshold must be positive, got {overtime_threshold_hours}"
            )));
        }
        if overtime_multiplier < Decimal::ONE {
            return Err(DomainError::Configuration(format!(
                "overtime multiplier must be at least 1, got {overtime_multiplier}"
            )));
        }
        Ok(Self {
            overtime_threshold_hours,
            overtime_multiplier,
        })
    }
}

/// One approved, completed time entry as payroll sees it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkedSpan {
    pub entry_id: String,
    pub start_time: i64,
    pub duration_seconds: i64,
    pub timesheet_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyHours {
    /// ISO week label, `2024-W01`.
    pub week: String,
    pub total_hours: Decimal,
    pub base_hours: Decimal,
    pub overtime_hours: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeductionLine {
    pub template_id: String,
    pub name: String,
    pub amount: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayrollPreview {
    pub employee_id: String,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    pub wage_type: WageType,
    pub wage_amount: Decimal,
    pub employment_type: Option<String>,
    pub base_hours: Decimal,
    pub overtime_hours: Decimal,
    pub base_pay: Decimal,
    pub overtime_pay: Decimal,
    pub gross_pay: Decimal,
    pub deductions: Vec<DeductionLine>,
    pub total_deductions: Decimal,
    pub net_pay: Decimal,
    pub weekly: Vec<WeeklyHours>,
    pub source_timesheet_ids: Vec<String>,
}

impl PayrollPreview {
    pub fn period(&self) -> DateRange {
        DateRange {
            start: self.period_start,
            end: self.period_end,
        }
    }
}

/// Everything one employee's calculation needs, loaded before the pure step runs.
#[derive(Debug, Clone)]
pub struct CalculationInput {
    pub employee_id: String,
    pub period: DateRange,
    pub spans: Vec<WorkedSpan>,
    pub wage_history: Vec<WageConfig>,
    pub templates: Vec<DeductionTemplate>,
}

pub fn weekly_hours(spans: &[WorkedSpan], policy: &PayrollPolicy) -> Vec<WeeklyHours> {
    let mut seconds_per_week: BTreeMap<(i32, u32), i64> = BTreeMap::new();
    for span in spans {
        if let Some(key) = iso_week_key(span.start_time) {
            *seconds_per_week.entry(key).or_default() += span.duration_seconds;
        }
    }

    seconds_per_week
        .into_iter()
        .map(|((year, week), seconds)| {
            let total_hours = seconds_to_hours(seconds);
            let base_hours = total_hours.min(policy.overtime_threshold_hours);
            WeeklyHours {
                week: format!("{year}-W{week:02}"),
                total_hours,
                base_hours,
                overtime_hours: total_hours - base_hours,
            }
        })
        .collect()
}

pub fn calculate(
    input: &CalculationInput,
    policy: &PayrollPolicy,
) -> Result<PayrollPreview, DomainError> {
    let wage = pin_wage_config(&input.wage_history, input.period.start)?;
    if wage.wage_amount < Decimal::ZERO {
        return Err(DomainError::Configuration(format!(
            "negative wage amount for employee {}",
            input.employee_id
        )));
    }

    let in_period: Vec<WorkedSpan> = input
        .spans
        .iter()
        .filter(|span| input.period.contains_instant(span.start_time))
        .cloned()
        .collect();
    let weekly = weekly_hours(&in_period, policy);

    let base_hours: Decimal = weekly.iter().map(|week| week.base_hours).sum();
    let overtime_hours: Decimal = weekly.iter().map(|week| week.overtime_hours).sum();

    let (base_pay, hourly_rate) = match wage.wage_type {
        WageType::Hourly => (round_money(base_hours * wage.wage_amount), wage.wage_amount),
        WageType::Salary => (
            round_money(wage.wage_amount * Decimal::from(input.period.days()) / dec!(365)),
            wage.wage_amount / (dec!(52) * policy.overtime_threshold_hours),
        ),
    };
    let overtime_pay = round_money(overtime_hours * hourly_rate * policy.overtime_multiplier);
    let gross_pay = base_pay + overtime_pay;

    let employment_type = wage.employment_type.as_deref();
    let deductions: Vec<DeductionLine> = input
        .templates
        .iter()
        .filter(|template| template.applies_to(employment_type))
        .map(|template| DeductionLine {
            template_id: template.template_id.clone(),
            name: template.name.clone(),
            amount: template.amount_for(gross_pay),
        })
        .collect();
    let total_deductions: Decimal = deductions.iter().map(|line| line.amount).sum();

    let net_pay = gross_pay - total_deductions;
    if net_pay < Decimal::ZERO {
        return Err(DomainError::Validation(format!(
            "deductions {total_deductions} exceed gross pay {gross_pay} for employee {}",
            input.employee_id
        )));
    }

    let source_timesheet_ids: BTreeSet<String> = in_period
        .iter()
        .filter_map(|span| span.timesheet_id.clone())
        .collect();

    Ok(PayrollPreview {
        employee_id: input.employee_id.clone(),
        period_start: input.period.start,
        period_end: input.period.end,
        wage_type: wage.wage_type,
        wage_amount: wage.wage_amount,
        employment_type: wage.employment_type.clone(),
        base_hours,
        overtime_hours,
        base_pay,
        overtime_pay,
        gross_pay,
        deductions,
        total_deductions,
        net_pay,
        weekly,
        source_timesheet_ids: source_timesheet_ids.into_iter().collect(),
    })
}
