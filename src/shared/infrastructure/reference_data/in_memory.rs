// In memory reference data.
//
// Responsibilities
// - Hold wage histories, deduction templates and projects behind one RwLock each.
// - Seed from a JSON document (`ReferenceDataSeed`) for local runs.

use crate::shared::core::reference_data::{DeductionTemplate, Project, WageConfig};
use crate::shared::infrastructure::reference_data::{
    DeductionTemplateStore, ProjectDirectory, WageConfigStore,
};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::sync::RwLock;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReferenceDataSeed {
    #[serde(default)]
    pub wage_configs: Vec<WageConfig>,
    #[serde(default)]
    pub deduction_templates: Vec<DeductionTemplate>,
    #[serde(default)]
    pub projects: Vec<Project>,
}

#[derive(Debug, Default)]
pub struct InMemoryReferenceData {
    wage_configs: RwLock<Vec<WageConfig>>,
    deduction_templates: RwLock<Vec<DeductionTemplate>>,
    projects: RwLock<Vec<Project>>,
    is_offline: bool,
}

impl InMemoryReferenceData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_seed(seed: ReferenceDataSeed) -> Self {
        Self {
            wage_configs: RwLock::new(seed.wage_configs),
            deduction_templates: RwLock::new(seed.deduction_templates),
            projects: RwLock::new(seed.projects),
            is_offline: false,
        }
    }

    pub fn from_json_file(path: &Path) -> anyhow::Result<Self> {
        let data = std::fs::read_to_string(path)
            .with_context(|| format!("reading reference data from {}", path.display()))?;
        let seed: ReferenceDataSeed = serde_json::from_str(&data)
            .with_context(|| format!("parsing reference data in {}", path.display()))?;
        tracing::info!(
            wage_configs = seed.wage_configs.len(),
            deduction_templates = seed.deduction_templates.len(),
            projects = seed.projects.len(),
            "reference data loaded"
        );
        Ok(Self::from_seed(seed))
    }

    pub fn toggle_offline(&mut self) {
        self.is_offline = !self.is_offline;
    }

    pub async fn add_wage_config(&self, config: WageConfig) {
        self.wage_configs.write().await.push(config);
    }

    pub async fn add_deduction_template(&self, template: DeductionTemplate) {
        self.deduction_templates.write().await.push(template);
    }

    pub async fn add_project(&self, project: Project) {
        self.projects.write().await.push(project);
    }

    fn ensure_online(&self) -> anyhow::Result<()> {
        if self.is_offline {
            anyhow::bail!("Reference data offline");
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl WageConfigStore for InMemoryReferenceData {
    async fn history(&self, employee_id: &str) -> anyhow::Result<Vec<WageConfig>> {
        self.ensure_online()?;
        Ok(self
            .wage_configs
            .read()
            .await
            .iter()
            .filter(|config| config.employee_id == employee_id)
            .cloned()
            .collect())
    }
}

#[async_trait::async_trait]
impl DeductionTemplateStore for InMemoryReferenceData {
    async fn templates(&self) -> anyhow::Result<Vec<DeductionTemplate>> {
        self.ensure_online()?;
        Ok(self.deduction_templates.read().await.clone())
    }
}

#[async_trait::async_trait]
impl ProjectDirectory for InMemoryReferenceData {
    async fn billable_project_ids(&self) -> anyhow::Result<Vec<String>> {
        self.ensure_online()?;
        Ok(self
            .projects
            .read()
            .await
            .iter()
            .filter(|project| project.billable)
            .map(|project| project.project_id.clone())
            .collect())
    }
}

#[cfg(test)]
mod in_memory_reference_data_tests {
    use super::*;
    use crate::shared::core::reference_data::{DeductionCalculation, WageType};
    use chrono::NaiveDate;
    use rstest::{fixture, rstest};
    use rust_decimal_macros::dec;

    #[fixture]
    fn seed() -> ReferenceDataSeed {
        ReferenceDataSeed {
            wage_configs: vec![
                WageConfig {
                    employee_id: "emp-0001".into(),
                    wage_type: WageType::Hourly,
                    wage_amount: dec!(20),
                    effective_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                    employment_type: Some("full_time".into()),
                },
                WageConfig {
                    employee_id: "emp-0002".into(),
                    wage_type: WageType::Salary,
                    wage_amount: dec!(52000),
                    effective_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                    employment_type: None,
                },
            ],
            deduction_templates: vec![DeductionTemplate {
                template_id: "ded-0001".into(),
                name: "Health".into(),
                calculation: DeductionCalculation::Flat { amount: dec!(50) },
                applies_to: vec![],
            }],
            projects: vec![
                Project {
                    project_id: "proj-billable".into(),
                    name: "Client work".into(),
                    billable: true,
                },
                Project {
                    project_id: "proj-internal".into(),
                    name: "Internal".into(),
                    billable: false,
                },
            ],
        }
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_return_the_history_of_one_employee(seed: ReferenceDataSeed) {
        let store = InMemoryReferenceData::from_seed(seed);
        let history = store.history("emp-0001").await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].wage_amount, dec!(20));
        assert!(store.history("emp-9999").await.unwrap().is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_list_only_billable_projects(seed: ReferenceDataSeed) {
        let store = InMemoryReferenceData::from_seed(seed);
        assert_eq!(
            store.billable_project_ids().await.unwrap(),
            vec!["proj-billable".to_string()]
        );
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_fail_when_offline(seed: ReferenceDataSeed) {
        let mut store = InMemoryReferenceData::from_seed(seed);
        store.toggle_offline();
        let result = store.templates().await;
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("Reference data offline")
        );
    }

    #[rstest]
    fn it_should_load_a_seed_file(seed: ReferenceDataSeed) {
        let path = std::env::temp_dir().join(format!(
            "time_payroll_seed_{}.json",
            uuid::Uuid::now_v7()
        ));
        std::fs::write(&path, serde_json::to_string(&seed).unwrap()).unwrap();
        let store = InMemoryReferenceData::from_json_file(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(store.wage_configs.try_read().unwrap().len(), 2);
    }

    #[rstest]
    fn it_should_report_a_missing_seed_file() {
        let result = InMemoryReferenceData::from_json_file(Path::new("/nonexistent/seed.json"));
        assert!(result.unwrap_err().to_string().contains("reading reference data"));
    }
}
