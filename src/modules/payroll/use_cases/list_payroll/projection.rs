use serde::{Deserialize, Serialize};

use crate::modules::approval::core::workflow::ApprovalStatus;
use crate::modules::payroll::core::calculation::PayrollPreview;
use crate::modules::payroll::core::state::PayrollRecord;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayrollRecordView {
    pub payroll_id: String,
    pub status: ApprovalStatus,
    #[serde(flatten)]
    pub calculation: PayrollPreview,
    pub created_at: i64,
    pub processed_at: Option<i64>,
}

impl From<&PayrollRecord> for PayrollRecordView {
    fn from(record: &PayrollRecord) -> Self {
        Self {
            payroll_id: record.payroll_id.clone(),
            status: record.status,
            calculation: record.calculation.clone(),
            created_at: record.created_at,
            processed_at: record.processed_at,
        }
    }
}
