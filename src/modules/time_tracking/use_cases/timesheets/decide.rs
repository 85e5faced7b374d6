use chrono::{Datelike, Weekday};
use std::collections::HashSet;

use crate::modules::approval::core::workflow::{self, ApprovalStatus, ReviewDecision};
use crate::modules::time_tracking::core::events::WorkLogEvent;
use crate::modules::time_tracking::core::events::v1::timesheet::{
    TimesheetApprovedV1, TimesheetGeneratedV1, TimesheetRejectedV1,
};
use crate::modules::time_tracking::core::intents::TimeEntryIntent;
use crate::modules::time_tracking::core::state::WorkLogState;
use crate::modules::time_tracking::use_cases::time_entry_lifecycle::decide::WorkLogDecision;
use crate::modules::time_tracking::use_cases::timesheets::command::{
    GenerateTimesheet, ReviewTimesheet,
};
use crate::shared::core::decision::Decision;
use crate::shared::core::errors::DomainError;
use crate::shared::core::primitives::DateRange;

pub fn decide_generate(state: &WorkLogState, command: GenerateTimesheet) -> WorkLogDecision {
    Decision::from_result(generate(state, command))
}

fn generate(
    state: &WorkLogState,
    command: GenerateTimesheet,
) -> Result<(Vec<WorkLogEvent>, Vec<TimeEntryIntent>), DomainError> {
    if command.week_start.weekday() != Weekday::Mon {
        return Err(DomainError::Validation(format!(
            "week_start {} is not a Monday",
            command.week_start
        )));
    }
    let week = DateRange::week_starting(command.week_start)?;

    let existing = state.timesheet_for_week(week.start);
    if !workflow::may_regenerate(existing.map(|timesheet| timesheet.status)) {
        return Err(DomainError::Conflict(format!(
            "a timesheet for the week of {} already exists",
            week.start
        )));
    }

    let billable: HashSet<&str> = command
        .billable_project_ids
        .iter()
        .map(String::as_str)
        .collect();
    let selected: Vec<_> = state
        .entries_by_start()
        .into_iter()
        .filter(|entry| entry.is_completed())
        .filter(|entry| entry.timesheet_id.is_none())
        .filter(|entry| week.contains_instant(entry.start_time))
        .collect();

    let total_seconds = selected
        .iter()
        .filter_map(|entry| entry.duration_seconds)
        .sum();
    let billable_seconds = selected
        .iter()
        .filter(|entry| {
            entry
                .project_id
                .as_deref()
                .is_some_and(|project_id| billable.contains(project_id))
        })
        .filter_map(|entry| entry.duration_seconds)
        .sum();
    let entry_ids: Vec<String> = selected.iter().map(|entry| entry.entry_id.clone()).collect();
    let idle_seconds = state
        .idle_periods
        .values()
        .filter(|idle| {
            idle.time_entry_id
                .as_ref()
                .is_some_and(|entry_id| entry_ids.contains(entry_id))
        })
        .filter_map(|idle| idle.duration_seconds)
        .sum();

    let event = WorkLogEvent::TimesheetGeneratedV1(TimesheetGeneratedV1 {
        timesheet_id: command.timesheet_id,
        employee_id: command.employee_id,
        week_start: week.start,
        week_end: week.end,
        entry_ids,
        total_seconds,
        billable_seconds,
        idle_seconds,
        replaces_timesheet_id: existing.map(|timesheet| timesheet.timesheet_id.clone()),
        generated_at: command.requested_at,
    });
    Ok((vec![event], vec![]))
}

pub fn decide_review_timesheet(state: &WorkLogState, command: ReviewTimesheet) -> WorkLogDecision {
    let Some(timesheet) = state.timesheet(&command.timesheet_id) else {
        return Decision::reject(DomainError::NotFound(format!(
            "timesheet {} not found",
            command.timesheet_id
        )));
    };
    let status = match workflow::review(timesheet.status, &command.decision) {
        Ok(status) => status,
        Err(reason) => return Decision::reject(reason),
    };
    let event = match (status, command.decision) {
        (ApprovalStatus::Approved, _) => WorkLogEvent::TimesheetApprovedV1(TimesheetApprovedV1 {
            timesheet_id: command.timesheet_id,
            employee_id: command.employee_id,
            reviewed_at: command.requested_at,
        }),
        (_, ReviewDecision::Reject { reason }) => {
            WorkLogEvent::TimesheetRejectedV1(TimesheetRejectedV1 {
                timesheet_id: command.timesheet_id,
                employee_id: command.employee_id,
                reason,
                reviewed_at: command.requested_at,
            })
        }
        (other, ReviewDecision::Approve) => {
            return Decision::reject(DomainError::InvalidState(format!(
                "unexpected review outcome {}",
                other.as_str()
            )));
        }
    };
    Decision::accept(vec![event], vec![])
}
