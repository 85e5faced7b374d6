// Loads calculation inputs and runs the pure payroll calculation.
//
// Purpose
// - Single previews for one employee.
// - Bulk previews: inputs are loaded per employee with the deduction templates
//   snapshotted once, then the computation fans out over rayon on a blocking thread.
//
// Failures of one employee never fail the batch; each employee gets a tagged outcome.

use std::sync::Arc;

use chrono::NaiveDate;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::modules::payroll::core::calculation::{
    CalculationInput, PayrollPolicy, PayrollPreview, WorkedSpan, calculate,
};
use crate::modules::time_tracking::application::work_log_service::WorkLogService;
use crate::modules::time_tracking::core::state::WorkLogState;
use crate::shared::application::errors::ApplicationError;
use crate::shared::core::primitives::DateRange;
use crate::shared::core::reference_data::DeductionTemplate;
use crate::shared::infrastructure::reference_data::{DeductionTemplateStore, WageConfigStore};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum EmployeeOutcome<T> {
    Ok {
        employee_id: String,
        result: T,
    },
    Error {
        employee_id: String,
        error: String,
        message: String,
    },
}

impl<T> EmployeeOutcome<T> {
    pub fn from_result(employee_id: String, result: Result<T, ApplicationError>) -> Self {
        match result {
            Ok(result) => EmployeeOutcome::Ok {
                employee_id,
                result,
            },
            Err(error) => EmployeeOutcome::Error {
                employee_id,
                error: error.kind().to_string(),
                message: error.to_string(),
            },
        }
    }

    pub fn employee_id(&self) -> &str {
        match self {
            EmployeeOutcome::Ok { employee_id, .. } | EmployeeOutcome::Error { employee_id, .. } => {
                employee_id
            }
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, EmployeeOutcome::Ok { .. })
    }
}

/// Completed, approved entries of the work log; unapproved time never reaches payroll.
pub fn approved_spans(state: &WorkLogState) -> Vec<WorkedSpan> {
    state
        .entries_by_start()
        .into_iter()
        .filter(|entry| entry.is_completed() && entry.is_approved())
        .filter_map(|entry| {
            entry.duration_seconds.map(|duration_seconds| WorkedSpan {
                entry_id: entry.entry_id.clone(),
                start_time: entry.start_time,
                duration_seconds,
                timesheet_id: entry.timesheet_id.clone(),
            })
        })
        .collect()
}

pub struct PayrollCalculator {
    work_log: Arc<WorkLogService>,
    wages: Arc<dyn WageConfigStore>,
    deductions: Arc<dyn DeductionTemplateStore>,
    policy: PayrollPolicy,
}

fn unexpected(error: anyhow::Error) -> ApplicationError {
    ApplicationError::Unexpected(error.to_string())
}

impl PayrollCalculator {
    pub fn new(
        work_log: Arc<WorkLogService>,
        wages: Arc<dyn WageConfigStore>,
        deductions: Arc<dyn DeductionTemplateStore>,
        policy: PayrollPolicy,
    ) -> Self {
        Self {
            work_log,
            wages,
            deductions,
            policy,
        }
    }

    pub fn policy(&self) -> &PayrollPolicy {
        &self.policy
    }

    async fn load_input(
        &self,
        employee_id: &str,
        period: DateRange,
        templates: Vec<DeductionTemplate>,
    ) -> Result<CalculationInput, ApplicationError> {
        let work_log = self.work_log.work_log(employee_id).await?;
        let wage_history = self.wages.history(employee_id).await.map_err(unexpected)?;
        Ok(CalculationInput {
            employee_id: employee_id.to_string(),
            period,
            spans: approved_spans(&work_log),
            wage_history,
            templates,
        })
    }

    #[tracing::instrument(skip(self), fields(employee_id = %employee_id))]
    pub async fn calculate(
        &self,
        employee_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<PayrollPreview, ApplicationError> {
        let period = DateRange::new(start, end)?;
        let templates = self.deductions.templates().await.map_err(unexpected)?;
        let input = self.load_input(employee_id, period, templates).await?;
        Ok(calculate(&input, &self.policy)?)
    }

    /// The period is validated for the whole batch; everything after that is per employee.
    #[tracing::instrument(skip(self, employee_ids), fields(employees = employee_ids.len()))]
    pub async fn calculate_bulk(
        &self,
        employee_ids: &[String],
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<EmployeeOutcome<PayrollPreview>>, ApplicationError> {
        let period = DateRange::new(start, end)?;
        let templates = self.deductions.templates().await.map_err(unexpected)?;

        let mut loaded = Vec::with_capacity(employee_ids.len());
        for employee_id in employee_ids {
            let input = self
                .load_input(employee_id, period, templates.clone())
                .await;
            loaded.push((employee_id.clone(), input));
        }

        let policy = self.policy;
        let outcomes = tokio::task::spawn_blocking(move || {
            loaded
                .into_par_iter()
                .map(|(employee_id, input)| {
                    let result = input.and_then(|input| {
                        calculate(&input, &policy).map_err(ApplicationError::from)
                    });
                    EmployeeOutcome::from_result(employee_id, result)
                })
                .collect::<Vec<_>>()
        })
        .await
        .map_err(|error| ApplicationError::Unexpected(error.to_string()))?;

        let failed = outcomes.iter().filter(|outcome| !outcome.is_ok()).count();
        tracing::info!(failed, "bulk payroll calculation finished");
        Ok(outcomes)
    }
}
