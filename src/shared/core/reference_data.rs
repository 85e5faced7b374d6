// Reference data read by the payroll engine and the timesheet aggregator.
//
// Wage configurations are a per-employee history; a calculation pins the entry with
// the latest effective date on or before the period start. Deduction templates and
// projects are organisation-wide.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::shared::core::errors::DomainError;
use crate::shared::core::primitives::{percent_of, round_money};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WageType {
    Hourly,
    Salary,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WageConfig {
    pub employee_id: String,
    pub wage_type: WageType,
    /// Hourly rate, or annual salary.
    pub wage_amount: Decimal,
    pub effective_date: NaiveDate,
    #[serde(default)]
    pub employment_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DeductionCalculation {
    Flat { amount: Decimal },
    /// Percent of gross pay, `rate = 5` means 5 %.
    Percentage { rate: Decimal },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeductionTemplate {
    pub template_id: String,
    pub name: String,
    pub calculation: DeductionCalculation,
    #[serde(default)]
    pub applies_to: Vec<String>,
}

impl DeductionTemplate {
    /// An empty `applies_to` list applies to everyone.
    pub fn applies_to(&self, employment_type: Option<&str>) -> bool {
        if self.applies_to.is_empty() {
            return true;
        }
        employment_type.is_some_and(|kind| self.applies_to.iter().any(|t| t == kind))
    }

    pub fn amount_for(&self, gross_pay: Decimal) -> Decimal {
        match &self.calculation {
            DeductionCalculation::Flat { amount } => round_money(*amount),
            DeductionCalculation::Percentage { rate } => percent_of(gross_pay, *rate),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub project_id: String,
    pub name: String,
    pub billable: bool,
}

/// The configuration in force on `period_start`.
pub fn pin_wage_config<'a>(
    history: &'a [WageConfig],
    period_start: NaiveDate,
) -> Result<&'a WageConfig, DomainError> {
    let employee_id = history.first().map(|c| c.employee_id.as_str()).unwrap_or("?");
    history
        .iter()
        .filter(|config| config.effective_date <= period_start)
        .max_by_key(|config| config.effective_date)
        .ok_or_else(|| {
            DomainError::Configuration(format!(
                "no wage configuration effective on {period_start} for employee {employee_id}"
            ))
        })
}
