pub mod v1 {
    pub mod idle_period;
    pub mod time_entry;
    pub mod timesheet;
}

use v1::idle_period::{IdlePeriodEndedV1, IdlePeriodStartedV1};
use v1::time_entry::{
    TimeEntryCorrectedV1, TimeEntryDeletedV1, TimeEntryReviewedV1, TimeEntryStartedV1,
    TimeEntryStoppedV1,
};
use v1::timesheet::{TimesheetApprovedV1, TimesheetGeneratedV1, TimesheetRejectedV1};

/// Every fact recorded on an employee's work log stream.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, PartialEq, Eq)]
#[serde(tag = "type")]
pub enum WorkLogEvent {
    TimeEntryStartedV1(TimeEntryStartedV1),
    TimeEntryStoppedV1(TimeEntryStoppedV1),
    TimeEntryCorrectedV1(TimeEntryCorrectedV1),
    TimeEntryDeletedV1(TimeEntryDeletedV1),
    TimeEntryReviewedV1(TimeEntryReviewedV1),
    IdlePeriodStartedV1(IdlePeriodStartedV1),
    IdlePeriodEndedV1(IdlePeriodEndedV1),
    TimesheetGeneratedV1(TimesheetGeneratedV1),
    TimesheetApprovedV1(TimesheetApprovedV1),
    TimesheetRejectedV1(TimesheetRejectedV1),
}

impl WorkLogEvent {
    pub fn name(&self) -> &'static str {
        match self {
            WorkLogEvent::TimeEntryStartedV1(_) => "TimeEntryStartedV1",
            WorkLogEvent::TimeEntryStoppedV1(_) => "TimeEntryStoppedV1",
            WorkLogEvent::TimeEntryCorrectedV1(_) => "TimeEntryCorrectedV1",
            WorkLogEvent::TimeEntryDeletedV1(_) => "TimeEntryDeletedV1",
            WorkLogEvent::TimeEntryReviewedV1(_) => "TimeEntryReviewedV1",
            WorkLogEvent::IdlePeriodStartedV1(_) => "IdlePeriodStartedV1",
            WorkLogEvent::IdlePeriodEndedV1(_) => "IdlePeriodEndedV1",
            WorkLogEvent::TimesheetGeneratedV1(_) => "TimesheetGeneratedV1",
            WorkLogEvent::TimesheetApprovedV1(_) => "TimesheetApprovedV1",
            WorkLogEvent::TimesheetRejectedV1(_) => "TimesheetRejectedV1",
        }
    }
}

pub fn work_log_stream_id(employee_id: &str) -> String {
    format!("WorkLog-{employee_id}")
}
