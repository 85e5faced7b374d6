use crate::modules::approval::core::workflow;
use crate::modules::payroll::core::events::PayrollEvent;
use crate::modules::payroll::core::events::v1::payroll_record::PayrollRecordProcessedV1;
use crate::modules::payroll::core::state::PayrollState;
use crate::modules::payroll::use_cases::create_payroll::decide::PayrollDecision;
use crate::modules::payroll::use_cases::process_payroll::command::ProcessPayrollRecord;
use crate::shared::core::decision::Decision;
use crate::shared::core::errors::DomainError;

pub fn decide_process(state: &PayrollState, command: ProcessPayrollRecord) -> PayrollDecision {
    let Some(record) = state.record(&command.payroll_id) else {
        return Decision::reject(DomainError::NotFound(format!(
            "payroll record {}",
            command.payroll_id
        )));
    };
    if let Err(reason) = workflow::process(record.status) {
        return Decision::reject(reason);
    }
    let event = PayrollEvent::PayrollRecordProcessedV1(PayrollRecordProcessedV1 {
        payroll_id: command.payroll_id,
        employee_id: command.employee_id,
        processed_at: command.requested_at,
    });
    Decision::accept(vec![event], vec![])
}
