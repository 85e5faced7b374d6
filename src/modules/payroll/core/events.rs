pub mod v1 {
    pub mod payroll_record;
}

use v1::payroll_record::{PayrollRecordCreatedV1, PayrollRecordProcessedV1};

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum PayrollEvent {
    PayrollRecordCreatedV1(PayrollRecordCreatedV1),
    PayrollRecordProcessedV1(PayrollRecordProcessedV1),
}

impl PayrollEvent {
    pub fn name(&self) -> &'static str {
        match self {
            PayrollEvent::PayrollRecordCreatedV1(_) => "PayrollRecordCreatedV1",
            PayrollEvent::PayrollRecordProcessedV1(_) => "PayrollRecordProcessedV1",
        }
    }
}

pub fn payroll_stream_id(employee_id: &str) -> String {
    format!("Payroll-{employee_id}")
}
