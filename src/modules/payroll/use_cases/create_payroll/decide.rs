use crate::modules::payroll::core::events::PayrollEvent;
use crate::modules::payroll::core::events::v1::payroll_record::PayrollRecordCreatedV1;
use crate::modules::payroll::core::state::PayrollState;
use crate::modules::payroll::use_cases::create_payroll::command::CreatePayrollRecord;
use crate::shared::application::command_handler::NoIntent;
use crate::shared::core::decision::Decision;
use crate::shared::core::errors::DomainError;

pub type PayrollDecision = Decision<PayrollEvent, NoIntent>;

pub fn decide_create(state: &PayrollState, command: CreatePayrollRecord) -> PayrollDecision {
    let period = command.preview.period();
    if let Some(existing) = state.overlapping(&period) {
        return Decision::reject(DomainError::Conflict(format!(
            "payroll record {} already covers {} to {} for employee {}",
            existing.payroll_id,
            existing.calculation.period_start,
            existing.calculation.period_end,
            command.preview.employee_id
        )));
    }
    if state.record(&command.payroll_id).is_some() {
        return Decision::reject(DomainError::Conflict(format!(
            "payroll record {} already exists",
            command.payroll_id
        )));
    }

    let event = PayrollEvent::PayrollRecordCreatedV1(PayrollRecordCreatedV1 {
        payroll_id: command.payroll_id,
        calculation: command.preview,
        created_at: command.requested_at,
    });
    Decision::accept(vec![event], vec![])
}
