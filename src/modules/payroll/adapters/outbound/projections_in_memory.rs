use crate::modules::payroll::adapters::outbound::projections::PayrollProjectionRepository;
use crate::modules::payroll::use_cases::list_payroll::projection::PayrollRecordView;
use crate::modules::payroll::use_cases::list_payroll::queries_port::PayrollQueries;
use crate::shared::application::projector::WatermarkRepository;
use std::collections::HashMap;
use tokio::sync::RwLock;

#[derive(Default)]
pub struct InMemoryPayrollProjections {
    records: RwLock<HashMap<String, PayrollRecordView>>,
    watermark: RwLock<HashMap<String, String>>,
    is_offline: bool,
}

impl InMemoryPayrollProjections {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle_offline(&mut self) {
        self.is_offline = !self.is_offline;
    }
}

#[async_trait::async_trait]
impl PayrollProjectionRepository for InMemoryPayrollProjections {
    async fn upsert_record(&self, view: PayrollRecordView) -> anyhow::Result<()> {
        if self.is_offline {
            anyhow::bail!("Projections repository offline");
        }
        self.records
            .write()
            .await
            .insert(view.payroll_id.clone(), view);
        Ok(())
    }
}

#[async_trait::async_trait]
impl WatermarkRepository for InMemoryPayrollProjections {
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
impl PayrollQueries for InMemoryPayrollProjections {
    async fn record(&self, payroll_id: &str) -> anyhow::Result<Option<PayrollRecordView>> {
        if self.is_offline {
            anyhow::bail!("Projections repository offline");
        }
        Ok(self.records.read().await.get(payroll_id).cloned())
    }

    async fn list_records(&self, employee_id: &str) -> anyhow::Result<Vec<PayrollRecordView>> {
        if self.is_offline {
            anyhow::bail!("Projections repository offline");
        }
        let mut items: Vec<PayrollRecordView> = self
            .records
            .read()
            .await
            .values()
            .filter(|view| view.calculation.employee_id == employee_id)
            .cloned()
            .collect();
        items.sort_by(|a, b| b.calculation.period_start.cmp(&a.calculation.period_start));
        Ok(items)
    }
}
