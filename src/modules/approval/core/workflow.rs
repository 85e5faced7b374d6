// Approval state machine shared by timesheets, individual time entries and
// payroll records.
//
//   pending --approve--> approved
//   pending --reject---> rejected   (reason required)
//   pending --process--> processed
//
// Every other transition is an InvalidState error.

use serde::{Deserialize, Serialize};

use crate::shared::core::errors::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, async_graphql::Enum)]
#[serde(rename_all = "snake_case")]
pub enum ApprovalStatus {
    Pending,
    Approved,
    Rejected,
    Processed,
}

impl ApprovalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApprovalStatus::Pending => "pending",
            ApprovalStatus::Approved => "approved",
            ApprovalStatus::Rejected => "rejected",
            ApprovalStatus::Processed => "processed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum ReviewDecision {
    Approve,
    Reject { reason: String },
}

pub fn review(current: ApprovalStatus, decision: &ReviewDecision) -> Result<ApprovalStatus, DomainError> {
    if current != ApprovalStatus::Pending {
        return Err(DomainError::InvalidState(format!(
            "cannot review a {} item, only pending items can be reviewed",
            current.as_str()
        )));
    }
    match decision {
        ReviewDecision::Approve => Ok(ApprovalStatus::Approved),
        ReviewDecision::Reject { reason } if reason.trim().is_empty() => Err(
            DomainError::Validation("a rejection needs a reason".into()),
        ),
        ReviewDecision::Reject { .. } => Ok(ApprovalStatus::Rejected),
    }
}

pub fn process(current: ApprovalStatus) -> Result<ApprovalStatus, DomainError> {
    match current {
        ApprovalStatus::Pending => Ok(ApprovalStatus::Processed),
        other => Err(DomainError::InvalidState(format!(
            "cannot process a {} item",
            other.as_str()
        ))),
    }
}

/// Whether a new item may be generated for a slot currently holding `existing`.
pub fn may_regenerate(existing: Option<ApprovalStatus>) -> bool {
    matches!(existing, None | Some(ApprovalStatus::Rejected))
}
