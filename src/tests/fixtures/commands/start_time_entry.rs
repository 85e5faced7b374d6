// Shared test fixture for the StartTimeEntry command.
// Defaults come from json/start_time_entry.json.

use crate::modules::time_tracking::core::events::v1::time_entry::EntrySource;
use crate::modules::time_tracking::use_cases::time_entry_lifecycle::command::StartTimeEntry;
use serde::Deserialize;
use std::fs;

// JSON -> DTO (transport shape)
#[derive(Debug, Clone, Deserialize)]
pub struct StartTimeEntryDto {
    pub entry_id: String,
    pub employee_id: String,
    pub source: EntrySource,
    pub project_id: Option<String>,
    pub notes: Option<String>,
    pub start_time: Option<i64>,
}

pub struct StartTimeEntryBuilder {
    inner: StartTimeEntry,
}

impl Default for StartTimeEntryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[allow(dead_code)]
impl StartTimeEntryBuilder {
    pub fn new() -> Self {
        let json_str =
            fs::read_to_string("./src/tests/fixtures/commands/json/start_time_entry.json").unwrap();
        let dto: StartTimeEntryDto = serde_json::from_str(&json_str).unwrap();

        Self {
            inner: StartTimeEntry {
                entry_id: dto.entry_id,
                employee_id: dto.employee_id,
                source: dto.source,
                project_id: dto.project_id,
                notes: dto.notes,
                start_time: dto.start_time,
                // Monday 2024-01-01 04:00 UTC
                requested_at: 1_704_081_600,
            },
        }
    }

    pub fn entry_id(mut self, v: impl Into<String>) -> Self {
        self.inner.entry_id = v.into();
        self
    }

    pub fn employee_id(mut self, v: impl Into<String>) -> Self {
        self.inner.employee_id = v.into();
        self
    }

    pub fn source(mut self, v: EntrySource) -> Self {
        self.inner.source = v;
        self
    }

    pub fn project_id(mut self, v: Option<&str>) -> Self {
        self.inner.project_id = v.map(str::to_string);
        self
    }

    pub fn notes(mut self, v: Option<&str>) -> Self {
        self.inner.notes = v.map(str::to_string);
        self
    }

    pub fn start_time(mut self, v: Option<i64>) -> Self {
        self.inner.start_time = v;
        self
    }

    pub fn requested_at(mut self, v: i64) -> Self {
        self.inner.requested_at = v;
        self
    }

    pub fn build(self) -> StartTimeEntry {
        self.inner
    }
}

#[cfg(test)]
mod start_time_entry_builder_tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn default_delegates_to_new_and_parses_json() {
        let built = StartTimeEntryBuilder::default().build();
        assert_eq!(built.entry_id, "te-fixed-0001");
        assert_eq!(built.employee_id, "emp-fixed-0001");
        assert_eq!(built.source, EntrySource::Manual);
        assert_eq!(built.project_id.as_deref(), Some("proj-billable"));
        assert_eq!(built.start_time, Some(1_704_070_800));
        assert!(built.requested_at >= 1_704_070_800);
    }

    #[rstest]
    fn setters_override_all_fields_and_build_returns_inner() {
        let custom = StartTimeEntryBuilder::new()
            .entry_id("te-123")
            .employee_id("emp-456")
            .source(EntrySource::Automatic)
            .project_id(None)
            .notes(Some("desc"))
            .start_time(None)
            .requested_at(3333)
            .build();

        assert_eq!(custom.entry_id, "te-123");
        assert_eq!(custom.employee_id, "emp-456");
        assert_eq!(custom.source, EntrySource::Automatic);
        assert_eq!(custom.project_id, None);
        assert_eq!(custom.notes.as_deref(), Some("desc"));
        assert_eq!(custom.start_time, None);
        assert_eq!(custom.requested_at, 3333);
    }
}
