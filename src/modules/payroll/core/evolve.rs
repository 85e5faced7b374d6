use crate::modules::approval::core::workflow::ApprovalStatus;
use crate::modules::payroll::core::events::PayrollEvent;
use crate::modules::payroll::core::state::{PayrollRecord, PayrollState};
use crate::shared::application::command_handler::Aggregate;

impl Aggregate for PayrollState {
    type Event = PayrollEvent;

    fn apply(self, event: PayrollEvent) -> Self {
        evolve(self, event)
    }
}

pub fn evolve(mut state: PayrollState, event: PayrollEvent) -> PayrollState {
    match event {
        PayrollEvent::PayrollRecordCreatedV1(e) => {
            state.records.insert(
                e.payroll_id.clone(),
                PayrollRecord {
                    payroll_id: e.payroll_id,
                    status: ApprovalStatus::Pending,
                    calculation: e.calculation,
                    created_at: e.created_at,
                    processed_at: None,
                },
            );
        }
        PayrollEvent::PayrollRecordProcessedV1(e) => {
            if let Some(record) = state.records.get_mut(&e.payroll_id) {
                record.status = ApprovalStatus::Processed;
                record.processed_at = Some(e.processed_at);
            }
        }
    }
    state
}
