use chrono::NaiveDate;

use crate::modules::approval::core::workflow::ReviewDecision;

/// `billable_project_ids` is the project directory snapshot taken when the command
/// was received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateTimesheet {
    pub timesheet_id: String,
    pub employee_id: String,
    pub week_start: NaiveDate,
    pub billable_project_ids: Vec<String>,
    pub requested_at: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewTimesheet {
    pub timesheet_id: String,
    pub employee_id: String,
    pub decision: ReviewDecision,
    pub requested_at: i64,
}
