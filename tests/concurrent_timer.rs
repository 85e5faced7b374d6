use std::sync::Arc;

use time_payroll::modules::time_tracking::application::work_log_service::StartEntryInput;
use time_payroll::modules::time_tracking::core::events::v1::time_entry::EntrySource;
use time_payroll::shared::infrastructure::reference_data::in_memory::InMemoryReferenceData;
use time_payroll::shell::config::Settings;
use time_payroll::shell::state::AppState;

const PARALLEL_STARTS: usize = 8;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn it_should_let_exactly_one_parallel_start_win() {
    let state = AppState::in_memory(&Settings::default(), Arc::new(InMemoryReferenceData::new()))
        .unwrap();

    let mut handles = Vec::new();
    for _ in 0..PARALLEL_STARTS {
        let work_log = state.work_log.clone();
        handles.push(tokio::spawn(async move {
            work_log
                .start_entry(
                    "emp-race",
                    StartEntryInput {
                        source: EntrySource::Automatic,
                        project_id: None,
                        start_time: None,
                        notes: None,
                    },
                )
                .await
        }));
    }

    let mut started = 0;
    let mut conflicts = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => started += 1,
            Err(error) => {
                assert_eq!(error.kind(), "conflict_error", "{error}");
                conflicts += 1;
            }
        }
    }

    assert_eq!(started, 1);
    assert_eq!(conflicts, PARALLEL_STARTS - 1);
    assert!(state.work_log.active_entry("emp-race").await.unwrap().is_some());
    assert_eq!(state.work_log.work_log("emp-race").await.unwrap().entries.len(), 1);
}
