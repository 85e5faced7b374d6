// Application service over payroll records.
//
// Purpose
// - Preview then commit: recalculate every employee and append one record per employee
//   through the compare-and-swap on that employee's payroll stream.
// - Process records and answer record queries.

use std::sync::Arc;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::modules::payroll::application::payroll_calculator::{EmployeeOutcome, PayrollCalculator};
use crate::modules::payroll::core::calculation::PayrollPreview;
use crate::modules::payroll::core::events::payroll_stream_id;
use crate::modules::payroll::core::state::PayrollState;
use crate::modules::payroll::use_cases::create_payroll::command::CreatePayrollRecord;
use crate::modules::payroll::use_cases::create_payroll::decide::decide_create;
use crate::modules::payroll::use_cases::list_payroll::projection::PayrollRecordView;
use crate::modules::payroll::use_cases::list_payroll::queries_port::PayrollQueries;
use crate::modules::payroll::use_cases::process_payroll::command::ProcessPayrollRecord;
use crate::modules::payroll::use_cases::process_payroll::decide::decide_process;
use crate::shared::application::command_handler::{CommandHandler, NoIntent};
use crate::shared::application::errors::ApplicationError;
use crate::shared::core::errors::DomainError;
use crate::shared::core::primitives::now_epoch_seconds;

pub type PayrollCommandHandler = CommandHandler<PayrollState, NoIntent>;

pub struct PayrollService {
    calculator: PayrollCalculator,
    handler: PayrollCommandHandler,
    queries: Arc<dyn PayrollQueries>,
}

fn read_model(error: anyhow::Error) -> ApplicationError {
    ApplicationError::Projection(error.to_string())
}

impl PayrollService {
    pub fn new(
        calculator: PayrollCalculator,
        handler: PayrollCommandHandler,
        queries: Arc<dyn PayrollQueries>,
    ) -> Self {
        Self {
            calculator,
            handler,
            queries,
        }
    }

    pub fn calculator(&self) -> &PayrollCalculator {
        &self.calculator
    }

    pub async fn calculate(
        &self,
        employee_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<PayrollPreview, ApplicationError> {
        self.calculator.calculate(employee_id, start, end).await
    }

    pub async fn calculate_bulk(
        &self,
        employee_ids: &[String],
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<EmployeeOutcome<PayrollPreview>>, ApplicationError> {
        self.calculator.calculate_bulk(employee_ids, start, end).await
    }

    #[tracing::instrument(skip(self, employee_ids), fields(employees = employee_ids.len()))]
    pub async fn preview_and_create(
        &self,
        employee_ids: &[String],
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<EmployeeOutcome<PayrollRecordView>>, ApplicationError> {
        let previews = self.calculator.calculate_bulk(employee_ids, start, end).await?;

        let mut outcomes = Vec::with_capacity(previews.len());
        for outcome in previews {
            let committed = match outcome {
                EmployeeOutcome::Ok {
                    employee_id,
                    result,
                } => {
                    let created = self.create(&employee_id, result).await;
                    EmployeeOutcome::from_result(employee_id, created)
                }
                EmployeeOutcome::Error {
                    employee_id,
                    error,
                    message,
                } => EmployeeOutcome::Error {
                    employee_id,
                    error,
                    message,
                },
            };
            outcomes.push(committed);
        }
        Ok(outcomes)
    }

    async fn create(
        &self,
        employee_id: &str,
        preview: PayrollPreview,
    ) -> Result<PayrollRecordView, ApplicationError> {
        let command = CreatePayrollRecord {
            payroll_id: Uuid::now_v7().to_string(),
            preview,
            requested_at: now_epoch_seconds(),
        };
        let payroll_id = command.payroll_id.clone();
        let committed = self
            .handler
            .handle(&payroll_stream_id(employee_id), |state| {
                decide_create(state, command.clone())
            })
            .await?;
        tracing::info!(employee_id, payroll_id, "payroll record created");
        record_view(&committed.state, &payroll_id)
    }

    #[tracing::instrument(skip(self))]
    pub async fn process(&self, payroll_id: &str) -> Result<PayrollRecordView, ApplicationError> {
        let owner = self.record(payroll_id).await?.calculation.employee_id;
        let command = ProcessPayrollRecord {
            payroll_id: payroll_id.to_string(),
            employee_id: owner.clone(),
            requested_at: now_epoch_seconds(),
        };
        let committed = self
            .handler
            .handle(&payroll_stream_id(&owner), |state| {
                decide_process(state, command.clone())
            })
            .await?;
        record_view(&committed.state, payroll_id)
    }

    pub async fn record(&self, payroll_id: &str) -> Result<PayrollRecordView, ApplicationError> {
        self.queries
            .record(payroll_id)
            .await
            .map_err(read_model)?
            .ok_or_else(|| DomainError::NotFound(format!("payroll record {payroll_id}")).into())
    }

    pub async fn list_records(&self, employee_id: &str) -> Result<Vec<PayrollRecordView>, ApplicationError> {
        self.queries
            .list_records(employee_id)
            .await
            .map_err(read_model)
    }
}

fn record_view(state: &PayrollState, payroll_id: &str) -> Result<PayrollRecordView, ApplicationError> {
    state
        .record(payroll_id)
        .map(PayrollRecordView::from)
        .ok_or_else(|| {
            ApplicationError::Unexpected(format!("payroll record {payroll_id} missing after commit"))
        })
}
