use crate::modules::payroll::core::calculation::PayrollPreview;

/// Commits a freshly recalculated preview as a pending payroll record.
#[derive(Debug, Clone, PartialEq)]
pub struct CreatePayrollRecord {
    pub payroll_id: String,
    pub preview: PayrollPreview,
    pub requested_at: i64,
}
