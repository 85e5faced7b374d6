use crate::modules::approval::core::workflow::ApprovalStatus;
use crate::modules::time_tracking::core::events::WorkLogEvent;
use crate::modules::time_tracking::core::state::{
    EntryStatus, IdlePeriod, TimeEntry, Timesheet, WorkLogState,
};
use crate::shared::application::command_handler::Aggregate;

impl Aggregate for WorkLogState {
    type Event = WorkLogEvent;

    fn apply(self, event: WorkLogEvent) -> Self {
        evolve(self, event)
    }
}

pub fn evolve(mut state: WorkLogState, event: WorkLogEvent) -> WorkLogState {
    match event {
        WorkLogEvent::TimeEntryStartedV1(e) => {
            state.active_entry_id = Some(e.entry_id.clone());
            state.entries.insert(
                e.entry_id.clone(),
                TimeEntry {
                    entry_id: e.entry_id,
                    employee_id: e.employee_id,
                    start_time: e.start_time,
                    end_time: None,
                    duration_seconds: None,
                    source: e.source,
                    status: EntryStatus::Active,
                    notes: e.notes,
                    project_id: e.project_id,
                    approval_status: ApprovalStatus::Pending,
                    rejection_reason: None,
                    timesheet_id: None,
                    created_at: e.created_at,
                    updated_at: e.created_at,
                },
            );
        }
        WorkLogEvent::TimeEntryStoppedV1(e) => {
            if let Some(entry) = state.entries.get_mut(&e.entry_id) {
                entry.end_time = Some(e.end_time);
                entry.duration_seconds = Some(e.duration_seconds);
                entry.status = EntryStatus::Completed;
                entry.updated_at = e.stopped_at;
            }
            if state.active_entry_id.as_deref() == Some(e.entry_id.as_str()) {
                state.active_entry_id = None;
            }
        }
        WorkLogEvent::TimeEntryCorrectedV1(e) => {
            if let Some(entry) = state.entries.get_mut(&e.entry_id) {
                entry.start_time = e.start_time;
                entry.end_time = e.end_time;
                entry.duration_seconds = e.duration_seconds;
                entry.project_id = e.project_id;
                entry.notes = e.notes;
                entry.updated_at = e.corrected_at;
                // a corrected entry goes back into review
                if entry.approval_status == ApprovalStatus::Rejected {
                    entry.approval_status = ApprovalStatus::Pending;
                    entry.rejection_reason = None;
                }
            }
        }
        WorkLogEvent::TimeEntryDeletedV1(e) => {
            state.entries.remove(&e.entry_id);
            if state.active_entry_id.as_deref() == Some(e.entry_id.as_str()) {
                state.active_entry_id = None;
            }
        }
        WorkLogEvent::TimeEntryReviewedV1(e) => {
            if let Some(entry) = state.entries.get_mut(&e.entry_id) {
                entry.approval_status = e.status;
                entry.rejection_reason = e.reason;
                entry.updated_at = e.reviewed_at;
            }
        }
        WorkLogEvent::IdlePeriodStartedV1(e) => {
            state.open_idle_id = Some(e.idle_id.clone());
            state.idle_periods.insert(
                e.idle_id.clone(),
                IdlePeriod {
                    idle_id: e.idle_id,
                    employee_id: e.employee_id,
                    time_entry_id: e.time_entry_id,
                    start_time: e.start_time,
                    end_time: None,
                    duration_seconds: None,
                },
            );
        }
        WorkLogEvent::IdlePeriodEndedV1(e) => {
            if let Some(idle) = state.idle_periods.get_mut(&e.idle_id) {
                idle.end_time = Some(e.end_time);
                idle.duration_seconds = Some(e.duration_seconds);
            }
            if state.open_idle_id.as_deref() == Some(e.idle_id.as_str()) {
                state.open_idle_id = None;
            }
        }
        WorkLogEvent::TimesheetGeneratedV1(e) => {
            if let Some(replaced) = &e.replaces_timesheet_id {
                state.timesheets.remove(replaced);
            }
            for entry_id in &e.entry_ids {
                if let Some(entry) = state.entries.get_mut(entry_id) {
                    entry.timesheet_id = Some(e.timesheet_id.clone());
                }
            }
            state.timesheets.insert(
                e.timesheet_id.clone(),
                Timesheet {
                    timesheet_id: e.timesheet_id,
                    employee_id: e.employee_id,
                    week_start: e.week_start,
                    week_end: e.week_end,
                    entry_ids: e.entry_ids,
                    total_seconds: e.total_seconds,
                    billable_seconds: e.billable_seconds,
                    idle_seconds: e.idle_seconds,
                    status: ApprovalStatus::Pending,
                    rejection_reason: None,
                    generated_at: e.generated_at,
                    reviewed_at: None,
                },
            );
        }
        WorkLogEvent::TimesheetApprovedV1(e) => {
            if let Some(timesheet) = state.timesheets.get_mut(&e.timesheet_id) {
                timesheet.status = ApprovalStatus::Approved;
                timesheet.reviewed_at = Some(e.reviewed_at);
                for entry_id in &timesheet.entry_ids {
                    if let Some(entry) = state.entries.get_mut(entry_id) {
                        entry.approval_status = ApprovalStatus::Approved;
                        entry.rejection_reason = None;
                        entry.updated_at = e.reviewed_at;
                    }
                }
            }
        }
        WorkLogEvent::TimesheetRejectedV1(e) => {
            if let Some(timesheet) = state.timesheets.get_mut(&e.timesheet_id) {
                timesheet.status = ApprovalStatus::Rejected;
                timesheet.rejection_reason = Some(e.reason);
                timesheet.reviewed_at = Some(e.reviewed_at);
                for entry_id in &timesheet.entry_ids {
                    if let Some(entry) = state.entries.get_mut(entry_id) {
                        entry.timesheet_id = None;
                        entry.updated_at = e.reviewed_at;
                    }
                }
            }
        }
    }
    state
}
