use crate::modules::time_tracking::core::events::WorkLogEvent;
use crate::modules::time_tracking::core::state::WorkLogState;
use crate::modules::time_tracking::use_cases::list_work_log::projection::{
    IdlePeriodView, TimeEntryView, TimesheetView,
};

#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    UpsertEntry(TimeEntryView),
    RemoveEntry { employee_id: String, entry_id: String },
    UpsertIdle(IdlePeriodView),
    UpsertTimesheet(TimesheetView),
    RemoveTimesheet { timesheet_id: String },
}

/// Read model mutations for `event`, taking row contents from `state`, the work
/// log after the whole committed batch. Rows gone from `state` are skipped.
pub fn apply(state: &WorkLogState, event: &WorkLogEvent) -> Vec<Mutation> {
    let upsert_entry = |entry_id: &str| {
        state
            .entry(entry_id)
            .map(|entry| Mutation::UpsertEntry(TimeEntryView::from(entry)))
    };
    let upsert_timesheet_with_entries = |timesheet_id: &str| -> Vec<Mutation> {
        let Some(timesheet) = state.timesheet(timesheet_id) else {
            return vec![];
        };
        let mut mutations = vec![Mutation::UpsertTimesheet(TimesheetView::from(timesheet))];
        mutations.extend(timesheet.entry_ids.iter().filter_map(|id| upsert_entry(id)));
        mutations
    };

    match event {
        WorkLogEvent::TimeEntryStartedV1(e) => upsert_entry(&e.entry_id).into_iter().collect(),
        WorkLogEvent::TimeEntryStoppedV1(e) => upsert_entry(&e.entry_id).into_iter().collect(),
        WorkLogEvent::TimeEntryCorrectedV1(e) => upsert_entry(&e.entry_id).into_iter().collect(),
        WorkLogEvent::TimeEntryReviewedV1(e) => upsert_entry(&e.entry_id).into_iter().collect(),
        WorkLogEvent::TimeEntryDeletedV1(e) => vec![Mutation::RemoveEntry {
            employee_id: e.employee_id.clone(),
            entry_id: e.entry_id.clone(),
        }],
        WorkLogEvent::IdlePeriodStartedV1(e) => state
            .idle_period(&e.idle_id)
            .map(|idle| Mutation::UpsertIdle(IdlePeriodView::from(idle)))
            .into_iter()
            .collect(),
        WorkLogEvent::IdlePeriodEndedV1(e) => state
            .idle_period(&e.idle_id)
            .map(|idle| Mutation::UpsertIdle(IdlePeriodView::from(idle)))
            .into_iter()
            .collect(),
        WorkLogEvent::TimesheetGeneratedV1(e) => {
            let mut mutations = Vec::new();
            if let Some(replaced) = &e.replaces_timesheet_id {
                mutations.push(Mutation::RemoveTimesheet {
                    timesheet_id: replaced.clone(),
                });
            }
            mutations.extend(upsert_timesheet_with_entries(&e.timesheet_id));
            mutations
        }
        WorkLogEvent::TimesheetApprovedV1(e) => upsert_timesheet_with_entries(&e.timesheet_id),
        WorkLogEvent::TimesheetRejectedV1(e) => upsert_timesheet_with_entries(&e.timesheet_id),
    }
}

#[cfg(test)]
mod work_log_projection_apply_tests {
    use super::*;
    use crate::modules::time_tracking::core::evolve::evolve;
    use crate::tests::fixtures::events::work_log::{
        MONDAY, make_generated_event, make_started_event, make_stopped_event,
    };
    use rstest::rstest;

    #[rstest]
    fn it_should_upsert_the_started_entry() {
        let event = make_started_event("te-1", MONDAY);
        let state = evolve(WorkLogState::default(), event.clone());
        let mutations = apply(&state, &event);
        assert_eq!(mutations.len(), 1);
        assert!(matches!(&mutations[0], Mutation::UpsertEntry(view) if view.entry_id == "te-1"));
    }

    #[rstest]
    fn it_should_upsert_the_timesheet_and_its_entries() {
        let generated = make_generated_event("ts-2", &["te-1"], 3_600, Some("ts-1"));
        let state = [
            make_started_event("te-1", MONDAY),
            make_stopped_event("te-1", MONDAY, MONDAY + 3_600),
            generated.clone(),
        ]
        .into_iter()
        .fold(WorkLogState::default(), evolve);

        let mutations = apply(&state, &generated);
        assert_eq!(mutations.len(), 3);
        assert!(matches!(&mutations[0], Mutation::RemoveTimesheet { timesheet_id } if timesheet_id == "ts-1"));
        assert!(matches!(&mutations[1], Mutation::UpsertTimesheet(view) if view.timesheet_id == "ts-2"));
        assert!(matches!(
            &mutations[2],
            Mutation::UpsertEntry(view) if view.timesheet_id.as_deref() == Some("ts-2")
        ));
    }

    #[rstest]
    fn it_should_skip_rows_missing_from_the_state() {
        let started = make_started_event("te-1", MONDAY);
        let mutations = apply(&WorkLogState::default(), &started);
        assert!(mutations.is_empty());
    }
}
