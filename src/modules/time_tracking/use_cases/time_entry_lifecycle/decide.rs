use crate::modules::approval::core::workflow::{self, ApprovalStatus, ReviewDecision};
use crate::modules::time_tracking::core::events::WorkLogEvent;
use crate::modules::time_tracking::core::evolve::evolve;
use crate::modules::time_tracking::core::events::v1::time_entry::{
    TimeEntryCorrectedV1, TimeEntryDeletedV1, TimeEntryReviewedV1, TimeEntryStartedV1,
    TimeEntryStoppedV1,
};
use crate::modules::time_tracking::core::intents::TimeEntryIntent;
use crate::modules::time_tracking::core::state::{EntryStatus, TimeEntry, WorkLogState};
use crate::modules::time_tracking::use_cases::time_entry_lifecycle::command::{
    DeleteTimeEntry, ReviewTimeEntry, StartTimeEntry, StopTimeEntry, UpdateTimeEntry,
};
use crate::shared::core::decision::Decision;
use crate::shared::core::errors::DomainError;
use crate::shared::core::primitives::{elapsed_seconds, valid_instant};

pub type WorkLogDecision = Decision<WorkLogEvent, TimeEntryIntent>;

type Outcome = Result<(Vec<WorkLogEvent>, Vec<TimeEntryIntent>), DomainError>;

pub(crate) fn find_entry<'a>(
    state: &'a WorkLogState,
    entry_id: &str,
) -> Result<&'a TimeEntry, DomainError> {
    state
        .entry(entry_id)
        .ok_or_else(|| DomainError::NotFound(format!("time entry {entry_id} not found")))
}

pub fn decide_start(state: &WorkLogState, command: StartTimeEntry) -> WorkLogDecision {
    Decision::from_result(start(state, command))
}

fn start(state: &WorkLogState, command: StartTimeEntry) -> Outcome {
    if let Some(active) = state.active_entry() {
        return Err(DomainError::Conflict(format!(
            "employee {} already has an active time entry {}",
            command.employee_id, active.entry_id
        )));
    }
    let start_time = valid_instant("start_time", command.start_time.unwrap_or(command.requested_at))?;
    if start_time > command.requested_at {
        return Err(DomainError::Validation(
            "start_time must not be in the future".into(),
        ));
    }
    let intent = TimeEntryIntent::created(&command.employee_id, &command.entry_id, command.requested_at);
    let event = WorkLogEvent::TimeEntryStartedV1(TimeEntryStartedV1 {
        entry_id: command.entry_id,
        employee_id: command.employee_id,
        start_time,
        source: command.source,
        project_id: command.project_id,
        notes: command.notes,
        created_at: command.requested_at,
    });
    Ok((vec![event], vec![intent]))
}

pub fn decide_stop(state: &WorkLogState, command: StopTimeEntry) -> WorkLogDecision {
    Decision::from_result(stop(state, command))
}

fn stop(state: &WorkLogState, command: StopTimeEntry) -> Outcome {
    let entry = find_entry(state, &command.entry_id)?;
    if entry.is_completed() {
        return Err(DomainError::InvalidState(format!(
            "time entry {} is already completed",
            entry.entry_id
        )));
    }
    let end_time = valid_instant("end_time", command.end_time.unwrap_or(command.requested_at))?;
    let duration_seconds = elapsed_seconds(entry.start_time, end_time)?;
    let event = WorkLogEvent::TimeEntryStoppedV1(TimeEntryStoppedV1 {
        entry_id: command.entry_id.clone(),
        employee_id: command.employee_id.clone(),
        end_time,
        duration_seconds,
        stopped_at: command.requested_at,
    });
    let intent = TimeEntryIntent::updated(
        &command.employee_id,
        &command.entry_id,
        Some(EntryStatus::Completed),
        command.requested_at,
    );
    Ok((vec![event], vec![intent]))
}

pub fn decide_update(state: &WorkLogState, command: UpdateTimeEntry) -> WorkLogDecision {
    Decision::from_result(update(state, command))
}

fn update(state: &WorkLogState, command: UpdateTimeEntry) -> Outcome {
    let entry = find_entry(state, &command.entry_id)?;
    let changes = command.changes;
    if changes.is_empty() {
        return Err(DomainError::Validation("no fields to update".into()));
    }
    match state.lock_of(entry) {
        Some(ApprovalStatus::Approved) | Some(ApprovalStatus::Processed) => {
            return Err(DomainError::InvalidState(format!(
                "time entry {} belongs to an approved timesheet",
                entry.entry_id
            )));
        }
        Some(ApprovalStatus::Pending) if changes.touches_more_than_notes() => {
            return Err(DomainError::InvalidState(format!(
                "time entry {} belongs to a pending timesheet, only notes may change",
                entry.entry_id
            )));
        }
        _ => {}
    }
    if entry.is_approved() && changes.touches_more_than_notes() {
        return Err(DomainError::InvalidState(format!(
            "time entry {} is approved, only notes may change",
            entry.entry_id
        )));
    }
    if entry.is_active() && changes.end_time.is_some() {
        return Err(DomainError::InvalidState(format!(
            "time entry {} is active, stop it to set an end time",
            entry.entry_id
        )));
    }

    let start_time = valid_instant("start_time", changes.start_time.unwrap_or(entry.start_time))?;
    if start_time > command.requested_at {
        return Err(DomainError::Validation(
            "start_time must not be in the future".into(),
        ));
    }
    let end_time = changes
        .end_time
        .or(entry.end_time)
        .map(|end_time| valid_instant("end_time", end_time))
        .transpose()?;
    let duration_seconds = end_time
        .map(|end_time| elapsed_seconds(start_time, end_time))
        .transpose()?;

    let event = WorkLogEvent::TimeEntryCorrectedV1(TimeEntryCorrectedV1 {
        entry_id: command.entry_id.clone(),
        employee_id: command.employee_id.clone(),
        start_time,
        end_time,
        duration_seconds,
        project_id: changes.project_id.or_else(|| entry.project_id.clone()),
        notes: changes.notes.or_else(|| entry.notes.clone()),
        corrected_at: command.requested_at,
    });
    let intent = TimeEntryIntent::updated(
        &command.employee_id,
        &command.entry_id,
        Some(entry.status),
        command.requested_at,
    );
    Ok((vec![event], vec![intent]))
}

/// Update as sent by a client: an `end_time` on an active entry stops it, and the
/// remaining changes are decided against the stopped entry. Both land in one append
/// or neither does.
pub fn decide_amend(state: &WorkLogState, command: UpdateTimeEntry) -> WorkLogDecision {
    Decision::from_result(amend(state, command))
}

fn amend(state: &WorkLogState, mut command: UpdateTimeEntry) -> Outcome {
    let entry = find_entry(state, &command.entry_id)?;
    if !(entry.is_active() && command.changes.end_time.is_some()) {
        return update(state, command);
    }
    let (mut events, mut intents) = stop(
        state,
        StopTimeEntry {
            entry_id: command.entry_id.clone(),
            employee_id: command.employee_id.clone(),
            end_time: command.changes.end_time.take(),
            requested_at: command.requested_at,
        },
    )?;
    if command.changes.is_empty() {
        return Ok((events, intents));
    }
    let stopped = events.iter().cloned().fold(state.clone(), evolve);
    let (corrected, notified) = update(&stopped, command)?;
    events.extend(corrected);
    intents.extend(notified);
    Ok((events, intents))
}

pub fn decide_delete(state: &WorkLogState, command: DeleteTimeEntry) -> WorkLogDecision {
    Decision::from_result(delete(state, command))
}

fn delete(state: &WorkLogState, command: DeleteTimeEntry) -> Outcome {
    let entry = find_entry(state, &command.entry_id)?;
    if let Some(status @ (ApprovalStatus::Pending | ApprovalStatus::Approved)) = state.lock_of(entry) {
        return Err(DomainError::InvalidState(format!(
            "time entry {} belongs to a {} timesheet",
            entry.entry_id,
            status.as_str()
        )));
    }
    if entry.is_approved() {
        return Err(DomainError::InvalidState(format!(
            "time entry {} is approved",
            entry.entry_id
        )));
    }
    let event = WorkLogEvent::TimeEntryDeletedV1(TimeEntryDeletedV1 {
        entry_id: command.entry_id.clone(),
        employee_id: command.employee_id.clone(),
        deleted_at: command.requested_at,
    });
    let intent = TimeEntryIntent::updated(
        &command.employee_id,
        &command.entry_id,
        None,
        command.requested_at,
    );
    Ok((vec![event], vec![intent]))
}

pub fn decide_review(state: &WorkLogState, command: ReviewTimeEntry) -> WorkLogDecision {
    Decision::from_result(review(state, command))
}

fn review(state: &WorkLogState, command: ReviewTimeEntry) -> Outcome {
    let entry = find_entry(state, &command.entry_id)?;
    if !entry.is_completed() {
        return Err(DomainError::InvalidState(format!(
            "time entry {} is still active",
            entry.entry_id
        )));
    }
    let status = workflow::review(entry.approval_status, &command.decision)?;
    let reason = match command.decision {
        ReviewDecision::Reject { reason } => Some(reason),
        ReviewDecision::Approve => None,
    };
    let event = WorkLogEvent::TimeEntryReviewedV1(TimeEntryReviewedV1 {
        entry_id: command.entry_id.clone(),
        employee_id: command.employee_id.clone(),
        status,
        reason,
        reviewed_at: command.requested_at,
    });
    let intent = TimeEntryIntent::updated(
        &command.employee_id,
        &command.entry_id,
        Some(entry.status),
        command.requested_at,
    );
    Ok((vec![event], vec![intent]))
}
