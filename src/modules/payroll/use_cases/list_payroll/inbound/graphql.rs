use async_graphql::{Context, Object, Result as GqlResult, SimpleObject};
use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::modules::approval::core::workflow::ApprovalStatus;
use crate::modules::payroll::use_cases::list_payroll::projection::PayrollRecordView;
use crate::shell::graphql::gql_error;
use crate::shell::state::AppState;

#[derive(SimpleObject, Clone)]
pub struct GqlPayrollRecord {
    pub payroll_id: String,
    pub employee_id: String,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    pub status: ApprovalStatus,
    pub base_hours: Decimal,
    pub overtime_hours: Decimal,
    pub gross_pay: Decimal,
    pub total_deductions: Decimal,
    pub net_pay: Decimal,
    pub created_at: i64,
    pub processed_at: Option<i64>,
}

impl From<PayrollRecordView> for GqlPayrollRecord {
    fn from(v: PayrollRecordView) -> Self {
        Self {
            payroll_id: v.payroll_id,
            employee_id: v.calculation.employee_id,
            period_start: v.calculation.period_start,
            period_end: v.calculation.period_end,
            status: v.status,
            base_hours: v.calculation.base_hours,
            overtime_hours: v.calculation.overtime_hours,
            gross_pay: v.calculation.gross_pay,
            total_deductions: v.calculation.total_deductions,
            net_pay: v.calculation.net_pay,
            created_at: v.created_at,
            processed_at: v.processed_at,
        }
    }
}

#[derive(Default)]
pub struct PayrollQuery;

#[Object]
impl PayrollQuery {
    async fn payroll_record(
        &self,
        context: &Context<'_>,
        payroll_id: String,
    ) -> GqlResult<GqlPayrollRecord> {
        let state = context.data_unchecked::<AppState>();
        let record = state.payroll.record(&payroll_id).await.map_err(gql_error)?;
        Ok(record.into())
    }

    async fn payroll_records(
        &self,
        context: &Context<'_>,
        employee_id: String,
    ) -> GqlResult<Vec<GqlPayrollRecord>> {
        let state = context.data_unchecked::<AppState>();
        let records = state
            .payroll
            .list_records(&employee_id)
            .await
            .map_err(gql_error)?;
        Ok(records.into_iter().map(GqlPayrollRecord::from).collect())
    }
}
