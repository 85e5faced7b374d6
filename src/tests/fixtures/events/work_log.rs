// Shared work log event fixtures. Every event belongs to EMPLOYEE.

use crate::modules::time_tracking::core::events::WorkLogEvent;
use crate::modules::time_tracking::core::events::v1::time_entry::{
    EntrySource, TimeEntryStartedV1, TimeEntryStoppedV1,
};
use crate::modules::time_tracking::core::events::v1::timesheet::TimesheetGeneratedV1;
use chrono::NaiveDate;

pub const EMPLOYEE: &str = "emp-fixed-0001";

/// 2024-01-01 00:00 UTC, the Monday opening ISO week 2024-W01.
pub const MONDAY: i64 = 1_704_067_200;

pub fn make_started_event(entry_id: &str, start: i64) -> WorkLogEvent {
    WorkLogEvent::TimeEntryStartedV1(TimeEntryStartedV1 {
        entry_id: entry_id.to_string(),
        employee_id: EMPLOYEE.to_string(),
        start_time: start,
        source: EntrySource::Manual,
        project_id: Some("proj-billable".to_string()),
        notes: None,
        created_at: start,
    })
}

pub fn make_stopped_event(entry_id: &str, start: i64, end: i64) -> WorkLogEvent {
    WorkLogEvent::TimeEntryStoppedV1(TimeEntryStoppedV1 {
        entry_id: entry_id.to_string(),
        employee_id: EMPLOYEE.to_string(),
        end_time: end,
        duration_seconds: end - start,
        stopped_at: end,
    })
}

/// Timesheet for the week of MONDAY with every second billable and no idle time.
pub fn make_generated_event(
    timesheet_id: &str,
    entry_ids: &[&str],
    total_seconds: i64,
    replaces: Option<&str>,
) -> WorkLogEvent {
    WorkLogEvent::TimesheetGeneratedV1(TimesheetGeneratedV1 {
        timesheet_id: timesheet_id.to_string(),
        employee_id: EMPLOYEE.to_string(),
        week_start: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        week_end: NaiveDate::from_ymd_opt(2024, 1, 8).unwrap(),
        entry_ids: entry_ids.iter().map(|id| id.to_string()).collect(),
        total_seconds,
        billable_seconds: total_seconds,
        idle_seconds: 0,
        replaces_timesheet_id: replaces.map(str::to_string),
        generated_at: MONDAY + 7 * 86_400,
    })
}
