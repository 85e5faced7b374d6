// Idle periods are an informational overlay: deciding them never touches the
// referenced entry and never emits a time entry notification.

use crate::modules::time_tracking::core::events::WorkLogEvent;
use crate::modules::time_tracking::core::events::v1::idle_period::{
    IdlePeriodEndedV1, IdlePeriodStartedV1,
};
use crate::modules::time_tracking::core::state::WorkLogState;
use crate::modules::time_tracking::use_cases::idle_periods::command::{
    EndIdlePeriod, StartIdlePeriod,
};
use crate::modules::time_tracking::use_cases::time_entry_lifecycle::decide::{
    WorkLogDecision, find_entry,
};
use crate::shared::core::decision::Decision;
use crate::shared::core::errors::DomainError;
use crate::shared::core::primitives::{elapsed_seconds, valid_instant};

pub fn decide_start_idle(state: &WorkLogState, command: StartIdlePeriod) -> WorkLogDecision {
    if let Some(open) = &state.open_idle_id {
        return Decision::reject(DomainError::Conflict(format!(
            "idle period {open} is still open"
        )));
    }
    let start_time = match valid_instant("start_time", command.start_time.unwrap_or(command.requested_at)) {
        Ok(start_time) => start_time,
        Err(reason) => return Decision::reject(reason),
    };
    if start_time > command.requested_at {
        return Decision::reject(DomainError::Validation(
            "start_time must not be in the future".into(),
        ));
    }
    if let Some(entry_id) = &command.time_entry_id {
        let entry = match find_entry(state, entry_id) {
            Ok(entry) => entry,
            Err(reason) => return Decision::reject(reason),
        };
        if start_time < entry.start_time {
            return Decision::reject(DomainError::Validation(format!(
                "idle period cannot start before time entry {entry_id}"
            )));
        }
    }
    Decision::accept(
        vec![WorkLogEvent::IdlePeriodStartedV1(IdlePeriodStartedV1 {
            idle_id: command.idle_id,
            employee_id: command.employee_id,
            time_entry_id: command.time_entry_id,
            start_time,
        })],
        vec![],
    )
}

pub fn decide_end_idle(state: &WorkLogState, command: EndIdlePeriod) -> WorkLogDecision {
    let Some(idle) = state.idle_period(&command.idle_id) else {
        return Decision::reject(DomainError::NotFound(format!(
            "idle period {} not found",
            command.idle_id
        )));
    };
    if idle.end_time.is_some() {
        return Decision::reject(DomainError::InvalidState(format!(
            "idle period {} is already closed",
            command.idle_id
        )));
    }
    let end_time = command.end_time.unwrap_or(command.requested_at);
    let duration_seconds = match valid_instant("end_time", end_time)
        .and_then(|end_time| elapsed_seconds(idle.start_time, end_time))
    {
        Ok(duration_seconds) => duration_seconds,
        Err(reason) => return Decision::reject(reason),
    };
    Decision::accept(
        vec![WorkLogEvent::IdlePeriodEndedV1(IdlePeriodEndedV1 {
            idle_id: command.idle_id,
            employee_id: command.employee_id,
            end_time,
            duration_seconds,
        })],
        vec![],
    )
}
