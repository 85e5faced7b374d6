// Folded state of one employee's payroll stream.
//
// Invariant kept by the decider: no two records have overlapping periods.

use std::collections::BTreeMap;

use crate::modules::approval::core::workflow::ApprovalStatus;
use crate::modules::payroll::core::calculation::PayrollPreview;
use crate::shared::core::primitives::DateRange;

#[derive(Debug, Clone, PartialEq)]
pub struct PayrollRecord {
    pub payroll_id: String,
    pub status: ApprovalStatus,
    pub calculation: PayrollPreview,
    pub created_at: i64,
    pub processed_at: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PayrollState {
    pub records: BTreeMap<String, PayrollRecord>,
}

impl PayrollState {
    pub fn record(&self, payroll_id: &str) -> Option<&PayrollRecord> {
        self.records.get(payroll_id)
    }

    pub fn overlapping(&self, period: &DateRange) -> Option<&PayrollRecord> {
        self.records
            .values()
            .find(|record| record.calculation.period().overlaps(period))
    }
}
