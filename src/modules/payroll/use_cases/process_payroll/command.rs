#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessPayrollRecord {
    pub payroll_id: String,
    pub employee_id: String,
    pub requested_at: i64,
}
