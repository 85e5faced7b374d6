// Application service over the employee work log.
//
// Purpose
// - Turn inbound requests into work log commands and run them through the command handler.
// - Answer read requests from the work log projections.
//
// Responsibilities
// - Mint entry, idle and timesheet ids (UUIDv7) and stamp `requested_at` with the server clock.
// - Resolve the owning employee of a timesheet or entry for supervisor reviews.
// - Snapshot the billable projects when a timesheet is generated.

use std::sync::Arc;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::modules::approval::core::workflow::ReviewDecision;
use crate::modules::time_tracking::core::events::v1::time_entry::EntrySource;
use crate::modules::time_tracking::core::events::work_log_stream_id;
use crate::modules::time_tracking::core::intents::TimeEntryIntent;
use crate::modules::time_tracking::core::state::WorkLogState;
use crate::modules::time_tracking::use_cases::idle_periods::command::{
    EndIdlePeriod, StartIdlePeriod,
};
use crate::modules::time_tracking::use_cases::idle_periods::decide::{
    decide_end_idle, decide_start_idle,
};
use crate::modules::time_tracking::use_cases::list_work_log::projection::{
    IdlePeriodView, TimeEntryView, TimesheetView,
};
use crate::modules::time_tracking::use_cases::list_work_log::queries_port::WorkLogQueries;
use crate::modules::time_tracking::use_cases::time_entry_lifecycle::command::{
    DeleteTimeEntry, ReviewTimeEntry, StartTimeEntry, StopTimeEntry, TimeEntryChanges,
    UpdateTimeEntry,
};
use crate::modules::time_tracking::use_cases::time_entry_lifecycle::decide::{
    decide_amend, decide_delete, decide_review, decide_start, decide_stop,
};
use crate::modules::time_tracking::use_cases::timesheets::command::{
    GenerateTimesheet, ReviewTimesheet,
};
use crate::modules::time_tracking::use_cases::timesheets::decide::{
    decide_generate, decide_review_timesheet,
};
use crate::shared::application::command_handler::{CommandHandler, Committed};
use crate::shared::application::errors::ApplicationError;
use crate::shared::core::errors::DomainError;
use crate::shared::core::primitives::now_epoch_seconds;
use crate::shared::infrastructure::reference_data::ProjectDirectory;

pub type WorkLogCommandHandler = CommandHandler<WorkLogState, TimeEntryIntent>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartEntryInput {
    pub source: EntrySource,
    pub project_id: Option<String>,
    pub start_time: Option<i64>,
    pub notes: Option<String>,
}

pub struct WorkLogService {
    handler: WorkLogCommandHandler,
    queries: Arc<dyn WorkLogQueries>,
    projects: Arc<dyn ProjectDirectory>,
}

fn unexpected(error: anyhow::Error) -> ApplicationError {
    ApplicationError::Unexpected(error.to_string())
}

fn read_model(error: anyhow::Error) -> ApplicationError {
    ApplicationError::Projection(error.to_string())
}

fn entry_view(committed: &Committed<WorkLogState>, entry_id: &str) -> Result<TimeEntryView, ApplicationError> {
    committed
        .state
        .entry(entry_id)
        .map(TimeEntryView::from)
        .ok_or_else(|| ApplicationError::Unexpected(format!("entry {entry_id} missing after commit")))
}

impl WorkLogService {
    pub fn new(
        handler: WorkLogCommandHandler,
        queries: Arc<dyn WorkLogQueries>,
        projects: Arc<dyn ProjectDirectory>,
    ) -> Self {
        Self {
            handler,
            queries,
            projects,
        }
    }

    /// Folded work log of one employee, straight from the event store.
    pub async fn work_log(&self, employee_id: &str) -> Result<WorkLogState, ApplicationError> {
        Ok(self.handler.load(&work_log_stream_id(employee_id)).await?.state)
    }

    #[tracing::instrument(skip(self, input), fields(employee_id = %employee_id))]
    pub async fn start_entry(
        &self,
        employee_id: &str,
        input: StartEntryInput,
    ) -> Result<TimeEntryView, ApplicationError> {
        let command = StartTimeEntry {
            entry_id: Uuid::now_v7().to_string(),
            employee_id: employee_id.to_string(),
            source: input.source,
            project_id: input.project_id,
            notes: input.notes,
            start_time: input.start_time,
            requested_at: now_epoch_seconds(),
        };
        let entry_id = command.entry_id.clone();
        let committed = self
            .handler
            .handle(&work_log_stream_id(employee_id), |state| {
                decide_start(state, command.clone())
            })
            .await?;
        entry_view(&committed, &entry_id)
    }

    #[tracing::instrument(skip(self), fields(employee_id = %employee_id))]
    pub async fn stop_entry(
        &self,
        employee_id: &str,
        entry_id: &str,
        end_time: Option<i64>,
    ) -> Result<TimeEntryView, ApplicationError> {
        let command = StopTimeEntry {
            entry_id: entry_id.to_string(),
            employee_id: employee_id.to_string(),
            end_time,
            requested_at: now_epoch_seconds(),
        };
        let committed = self
            .handler
            .handle(&work_log_stream_id(employee_id), |state| {
                decide_stop(state, command.clone())
            })
            .await?;
        entry_view(&committed, entry_id)
    }

    /// An `end_time` on an active entry stops it; the remaining fields are applied
    /// as a correction in the same append.
    #[tracing::instrument(skip(self, changes), fields(employee_id = %employee_id))]
    pub async fn update_entry(
        &self,
        employee_id: &str,
        entry_id: &str,
        changes: TimeEntryChanges,
    ) -> Result<TimeEntryView, ApplicationError> {
        let command = UpdateTimeEntry {
            entry_id: entry_id.to_string(),
            employee_id: employee_id.to_string(),
            changes,
            requested_at: now_epoch_seconds(),
        };
        let committed = self
            .handler
            .handle(&work_log_stream_id(employee_id), |state| {
                decide_amend(state, command.clone())
            })
            .await?;
        entry_view(&committed, entry_id)
    }

    #[tracing::instrument(skip(self), fields(employee_id = %employee_id))]
    pub async fn delete_entry(&self, employee_id: &str, entry_id: &str) -> Result<(), ApplicationError> {
        let command = DeleteTimeEntry {
            entry_id: entry_id.to_string(),
            employee_id: employee_id.to_string(),
            requested_at: now_epoch_seconds(),
        };
        self.handler
            .handle(&work_log_stream_id(employee_id), |state| {
                decide_delete(state, command.clone())
            })
            .await?;
        Ok(())
    }

    /// Supervisor review of one entry; the owner is resolved from the projections.
    #[tracing::instrument(skip(self, decision))]
    pub async fn review_entry(
        &self,
        entry_id: &str,
        decision: ReviewDecision,
    ) -> Result<TimeEntryView, ApplicationError> {
        let owner = self
            .queries
            .entry(entry_id)
            .await
            .map_err(read_model)?
            .map(|view| view.employee_id)
            .ok_or_else(|| DomainError::NotFound(format!("time entry {entry_id}")))?;

        let command = ReviewTimeEntry {
            entry_id: entry_id.to_string(),
            employee_id: owner.clone(),
            decision,
            requested_at: now_epoch_seconds(),
        };
        let committed = self
            .handler
            .handle(&work_log_stream_id(&owner), |state| {
                decide_review(state, command.clone())
            })
            .await?;
        entry_view(&committed, entry_id)
    }

    pub async fn active_entry(&self, employee_id: &str) -> Result<Option<TimeEntryView>, ApplicationError> {
        self.queries.active_entry(employee_id).await.map_err(read_model)
    }

    pub async fn list_entries(
        &self,
        employee_id: &str,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<TimeEntryView>, ApplicationError> {
        self.queries
            .list_entries(employee_id, offset, limit, true)
            .await
            .map_err(read_model)
    }

    /// Entries of other employees are reported as missing.
    pub async fn entry(&self, employee_id: &str, entry_id: &str) -> Result<TimeEntryView, ApplicationError> {
        self.queries
            .entry(entry_id)
            .await
            .map_err(read_model)?
            .filter(|view| view.employee_id == employee_id)
            .ok_or_else(|| DomainError::NotFound(format!("time entry {entry_id}")).into())
    }

    #[tracing::instrument(skip(self), fields(employee_id = %employee_id))]
    pub async fn start_idle(
        &self,
        employee_id: &str,
        time_entry_id: Option<String>,
        start_time: Option<i64>,
    ) -> Result<IdlePeriodView, ApplicationError> {
        let command = StartIdlePeriod {
            idle_id: Uuid::now_v7().to_string(),
            employee_id: employee_id.to_string(),
            time_entry_id,
            start_time,
            requested_at: now_epoch_seconds(),
        };
        let idle_id = command.idle_id.clone();
        let committed = self
            .handler
            .handle(&work_log_stream_id(employee_id), |state| {
                decide_start_idle(state, command.clone())
            })
            .await?;
        idle_view(&committed, &idle_id)
    }

    #[tracing::instrument(skip(self), fields(employee_id = %employee_id))]
    pub async fn end_idle(
        &self,
        employee_id: &str,
        idle_id: &str,
        end_time: Option<i64>,
    ) -> Result<IdlePeriodView, ApplicationError> {
        let command = EndIdlePeriod {
            idle_id: idle_id.to_string(),
            employee_id: employee_id.to_string(),
            end_time,
            requested_at: now_epoch_seconds(),
        };
        let committed = self
            .handler
            .handle(&work_log_stream_id(employee_id), |state| {
                decide_end_idle(state, command.clone())
            })
            .await?;
        idle_view(&committed, idle_id)
    }

    pub async fn list_idle_periods(&self, employee_id: &str) -> Result<Vec<IdlePeriodView>, ApplicationError> {
        self.queries
            .list_idle_periods(employee_id)
            .await
            .map_err(read_model)
    }

    #[tracing::instrument(skip(self), fields(employee_id = %employee_id))]
    pub async fn generate_timesheet(
        &self,
        employee_id: &str,
        week_start: NaiveDate,
    ) -> Result<TimesheetView, ApplicationError> {
        let billable_project_ids = self
            .projects
            .billable_project_ids()
            .await
            .map_err(unexpected)?;
        let command = GenerateTimesheet {
            timesheet_id: Uuid::now_v7().to_string(),
            employee_id: employee_id.to_string(),
            week_start,
            billable_project_ids,
            requested_at: now_epoch_seconds(),
        };
        let timesheet_id = command.timesheet_id.clone();
        let committed = self
            .handler
            .handle(&work_log_stream_id(employee_id), |state| {
                decide_generate(state, command.clone())
            })
            .await?;
        timesheet_view(&committed, &timesheet_id)
    }

    #[tracing::instrument(skip(self, decision))]
    pub async fn review_timesheet(
        &self,
        timesheet_id: &str,
        decision: ReviewDecision,
    ) -> Result<TimesheetView, ApplicationError> {
        let owner = self.timesheet(timesheet_id).await?.employee_id;
        let command = ReviewTimesheet {
            timesheet_id: timesheet_id.to_string(),
            employee_id: owner.clone(),
            decision,
            requested_at: now_epoch_seconds(),
        };
        let committed = self
            .handler
            .handle(&work_log_stream_id(&owner), |state| {
                decide_review_timesheet(state, command.clone())
            })
            .await?;
        timesheet_view(&committed, timesheet_id)
    }

    pub async fn timesheet(&self, timesheet_id: &str) -> Result<TimesheetView, ApplicationError> {
        self.queries
            .timesheet(timesheet_id)
            .await
            .map_err(read_model)?
            .ok_or_else(|| DomainError::NotFound(format!("timesheet {timesheet_id}")).into())
    }

    pub async fn list_timesheets(&self, employee_id: &str) -> Result<Vec<TimesheetView>, ApplicationError> {
        self.queries
            .list_timesheets(employee_id)
            .await
            .map_err(read_model)
    }
}

fn idle_view(committed: &Committed<WorkLogState>, idle_id: &str) -> Result<IdlePeriodView, ApplicationError> {
    committed
        .state
        .idle_period(idle_id)
        .map(IdlePeriodView::from)
        .ok_or_else(|| ApplicationError::Unexpected(format!("idle period {idle_id} missing after commit")))
}

fn timesheet_view(
    committed: &Committed<WorkLogState>,
    timesheet_id: &str,
) -> Result<TimesheetView, ApplicationError> {
    committed
        .state
        .timesheet(timesheet_id)
        .map(TimesheetView::from)
        .ok_or_else(|| {
            ApplicationError::Unexpected(format!("timesheet {timesheet_id} missing after commit"))
        })
}
