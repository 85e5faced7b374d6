// In memory work log read models and watermark repository.
//
// Purpose
// - Serve the work log queries without a database.
//
// Responsibilities
// - Store entry, idle period and timesheet views in maps keyed by id.
// - Track the last processed event per projector.

use crate::modules::time_tracking::adapters::outbound::projections::WorkLogProjectionRepository;
use crate::modules::time_tracking::core::state::EntryStatus;
use crate::modules::time_tracking::use_cases::list_work_log::projection::{
    IdlePeriodView, TimeEntryView, TimesheetView,
};
use crate::modules::time_tracking::use_cases::list_work_log::queries_port::WorkLogQueries;
use crate::shared::application::projector::WatermarkRepository;
use std::collections::HashMap;
use tokio::sync::RwLock;

#[derive(Default)]
pub struct InMemoryWorkLogProjections {
    entries: RwLock<HashMap<String, TimeEntryView>>,
    idle_periods: RwLock<HashMap<String, IdlePeriodView>>,
    timesheets: RwLock<HashMap<String, TimesheetView>>,
    watermark: RwLock<HashMap<String, String>>,
    is_offline: bool,
}

impl InMemoryWorkLogProjections {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle_offline(&mut self) {
        self.is_offline = !self.is_offline;
    }

    fn ensure_online(&self) -> anyhow::Result<()> {
        if self.is_offline {
            anyhow::bail!("Projections repository offline");
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl WorkLogProjectionRepository for InMemoryWorkLogProjections {
    async fn upsert_entry(&self, view: TimeEntryView) -> anyhow::Result<()> {
        self.ensure_online()?;
        self.entries
            .write()
            .await
            .insert(view.entry_id.clone(), view);
        Ok(())
    }

    async fn remove_entry(&self, employee_id: &str, entry_id: &str) -> anyhow::Result<()> {
        self.ensure_online()?;
        let mut guard = self.entries.write().await;
        if guard
            .get(entry_id)
            .is_some_and(|view| view.employee_id == employee_id)
        {
            guard.remove(entry_id);
        }
        Ok(())
    }

    async fn upsert_idle_period(&self, view: IdlePeriodView) -> anyhow::Result<()> {
        self.ensure_online()?;
        self.idle_periods
            .write()
            .await
            .insert(view.idle_id.clone(), view);
        Ok(())
    }

    async fn upsert_timesheet(&self, view: TimesheetView) -> anyhow::Result<()> {
        self.ensure_online()?;
        self.timesheets
            .write()
            .await
            .insert(view.timesheet_id.clone(), view);
        Ok(())
    }

    async fn remove_timesheet(&self, timesheet_id: &str) -> anyhow::Result<()> {
        self.ensure_online()?;
        self.timesheets.write().await.remove(timesheet_id);
        Ok(())
    }
}

#[async_trait::async_trait]
impl WatermarkRepository for InMemoryWorkLogProjections {
    async fn get(&self, name: &str) -> anyhow::Result<Option<String>> {
        if self.is_offline {
            return Err(anyhow::anyhow!("Watermark repository offline"));
        }
        Ok(self.watermark.read().await.get(name).cloned())
    }

    async fn set(&self, name: &str, last: &str) -> anyhow::Result<()> {
        if self.is_offline {
            return Err(anyhow::anyhow!("Watermark repository offline"));
        }
        self.watermark
            .write()
            .await
            .insert(name.to_string(), last.to_string());
        Ok(())
    }
}

#[async_trait::async_trait]
impl WorkLogQueries for InMemoryWorkLogProjections {
    async fn active_entry(&self, employee_id: &str) -> anyhow::Result<Option<TimeEntryView>> {
        self.ensure_online()?;
        Ok(self
            .entries
            .read()
            .await
            .values()
            .find(|view| view.employee_id == employee_id && view.status == EntryStatus::Active)
            .cloned())
    }

    async fn list_entries(
        &self,
        employee_id: &str,
        offset: u64,
        limit: u64,
        sort_by_start_time_desc: bool,
    ) -> anyhow::Result<Vec<TimeEntryView>> {
        self.ensure_online()?;
        let guard = self.entries.read().await;

        let mut items: Vec<TimeEntryView> = guard
            .values()
            .filter(|view| view.employee_id == employee_id)
            .cloned()
            .collect();

        items.sort_by(|a, b| (a.start_time, &a.entry_id).cmp(&(b.start_time, &b.entry_id)));
        if sort_by_start_time_desc {
            items.reverse();
        }

        let start = offset as usize;
        if start >= items.len() {
            return Ok(Vec::new());
        }
        let end = start.saturating_add(limit as usize).min(items.len());
        Ok(items[start..end].to_vec())
    }

    async fn entry(&self, entry_id: &str) -> anyhow::Result<Option<TimeEntryView>> {
        self.ensure_online()?;
        Ok(self.entries.read().await.get(entry_id).cloned())
    }

    async fn list_idle_periods(&self, employee_id: &str) -> anyhow::Result<Vec<IdlePeriodView>> {
        self.ensure_online()?;
        let mut items: Vec<IdlePeriodView> = self
            .idle_periods
            .read()
            .await
            .values()
            .filter(|view| view.employee_id == employee_id)
            .cloned()
            .collect();
        items.sort_by_key(|view| view.start_time);
        Ok(items)
    }

    async fn timesheet(&self, timesheet_id: &str) -> anyhow::Result<Option<TimesheetView>> {
        self.ensure_online()?;
        Ok(self.timesheets.read().await.get(timesheet_id).cloned())
    }

    async fn list_timesheets(&self, employee_id: &str) -> anyhow::Result<Vec<TimesheetView>> {
        self.ensure_online()?;
        let mut items: Vec<TimesheetView> = self
            .timesheets
            .read()
            .await
            .values()
            .filter(|view| view.employee_id == employee_id)
            .cloned()
            .collect();
        items.sort_by(|a, b| b.week_start.cmp(&a.week_start));
        Ok(items)
    }
}

#[cfg(test)]
pub mod work_log_in_memory_projections_tests {
    use super::*;
    use crate::modules::approval::core::workflow::ApprovalStatus;
    use crate::tests::fixtures::views::TimeEntryViewBuilder;
    use rstest::{fixture, rstest};

    #[fixture]
    fn before_each() -> (TimeEntryView, InMemoryWorkLogProjections) {
        let view = TimeEntryViewBuilder::new().build();
        (view, InMemoryWorkLogProjections::new())
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_add_the_entry_to_the_repository(
        before_each: (TimeEntryView, InMemoryWorkLogProjections),
    ) {
        let (view, repository) = before_each;
        repository.upsert_entry(view.clone()).await.unwrap();
        assert_eq!(repository.entry(&view.entry_id).await.unwrap(), Some(view));
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_find_the_active_entry(
        before_each: (TimeEntryView, InMemoryWorkLogProjections),
    ) {
        let (view, repository) = before_each;
        repository.upsert_entry(view.clone()).await.unwrap();
        let completed = TimeEntryViewBuilder::new()
            .entry_id("te-0002")
            .completed(view.start_time - 7_200, view.start_time - 3_600)
            .build();
        repository.upsert_entry(completed).await.unwrap();

        let active = repository.active_entry(&view.employee_id).await.unwrap();
        assert_eq!(active.map(|v| v.entry_id), Some(view.entry_id));
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_page_entries_by_start_time(
        before_each: (TimeEntryView, InMemoryWorkLogProjections),
    ) {
        let (_, repository) = before_each;
        for (index, start) in [1_000, 3_000, 2_000].into_iter().enumerate() {
            repository
                .upsert_entry(
                    TimeEntryViewBuilder::new()
                        .entry_id(format!("te-{index}"))
                        .completed(start, start + 60)
                        .build(),
                )
                .await
                .unwrap();
        }
        let page = repository
            .list_entries("emp-fixed-0001", 0, 2, true)
            .await
            .unwrap();
        assert_eq!(
            page.iter().map(|v| v.start_time).collect::<Vec<_>>(),
            vec![3_000, 2_000]
        );
        let rest = repository
            .list_entries("emp-fixed-0001", 2, 10, true)
            .await
            .unwrap();
        assert_eq!(rest.len(), 1);
        assert!(repository
            .list_entries("emp-fixed-0001", 5, 10, true)
            .await
            .unwrap()
            .is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_only_remove_entries_of_the_given_employee(
        before_each: (TimeEntryView, InMemoryWorkLogProjections),
    ) {
        let (view, repository) = before_each;
        repository.upsert_entry(view.clone()).await.unwrap();
        repository.remove_entry("emp-other", &view.entry_id).await.unwrap();
        assert!(repository.entry(&view.entry_id).await.unwrap().is_some());
        repository
            .remove_entry(&view.employee_id, &view.entry_id)
            .await
            .unwrap();
        assert!(repository.entry(&view.entry_id).await.unwrap().is_none());
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_list_timesheets_newest_first() {
        use crate::tests::fixtures::views::timesheet_view;
        let repository = InMemoryWorkLogProjections::new();
        repository
            .upsert_timesheet(timesheet_view("ts-1", "2024-01-01", ApprovalStatus::Approved))
            .await
            .unwrap();
        repository
            .upsert_timesheet(timesheet_view("ts-2", "2024-01-08", ApprovalStatus::Pending))
            .await
            .unwrap();
        let list = repository.list_timesheets("emp-fixed-0001").await.unwrap();
        assert_eq!(
            list.iter().map(|v| v.timesheet_id.as_str()).collect::<Vec<_>>(),
            vec!["ts-2", "ts-1"]
        );
        repository.remove_timesheet("ts-2").await.unwrap();
        assert!(repository.timesheet("ts-2").await.unwrap().is_none());
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_set_the_watermark_and_confirm_its_set() {
        let repository = InMemoryWorkLogProjections::new();
        repository.set("projector-name", "WorkLog-emp:3").await.unwrap();
        assert_eq!(
            repository.get("projector-name").await.unwrap(),
            Some(String::from("WorkLog-emp:3"))
        );
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_fail_if_the_projections_repository_is_offline(
        before_each: (TimeEntryView, InMemoryWorkLogProjections),
    ) {
        let (view, mut repository) = before_each;
        repository.toggle_offline();
        let result = repository.upsert_entry(view).await;
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("Projections repository offline")
        );
        assert!(
            repository
                .get("projector-name")
                .await
                .unwrap_err()
                .to_string()
                .contains("Watermark repository offline")
        );
    }
}
