// Event payloads for payroll records.
//
// Versioning and evolution
// - Prefer adding fields. For breaking changes, create a V2 struct in a new file and add a new variant.

use serde::{Deserialize, Serialize};

use crate::modules::payroll::core::calculation::PayrollPreview;

/// The full computed snapshot is frozen into the event; replaying never recalculates.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PayrollRecordCreatedV1 {
    pub payroll_id: String,
    pub calculation: PayrollPreview,
    pub created_at: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PayrollRecordProcessedV1 {
    pub payroll_id: String,
    pub employee_id: String,
    pub processed_at: i64,
}
