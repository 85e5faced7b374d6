// Read-only ports over the organisation's reference data.

use async_trait::async_trait;

use crate::shared::core::reference_data::{DeductionTemplate, Project, WageConfig};

#[async_trait]
pub trait WageConfigStore: Send + Sync {
    /// Full configuration history of one employee, any order.
    async fn history(&self, employee_id: &str) -> anyhow::Result<Vec<WageConfig>>;
}

#[async_trait]
pub trait DeductionTemplateStore: Send + Sync {
    async fn templates(&self) -> anyhow::Result<Vec<DeductionTemplate>>;
}

#[async_trait]
pub trait ProjectDirectory: Send + Sync {
    async fn billable_project_ids(&self) -> anyhow::Result<Vec<String>>;
}

pub mod in_memory;
