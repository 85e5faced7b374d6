use std::sync::Arc;

use tokio::sync::broadcast;

use crate::modules::payroll::adapters::outbound::projections_in_memory::InMemoryPayrollProjections;
use crate::modules::payroll::application::payroll_calculator::PayrollCalculator;
use crate::modules::payroll::application::payroll_service::PayrollService;
use crate::modules::payroll::core::events::PayrollEvent;
use crate::modules::payroll::use_cases::list_payroll::handler::PayrollProjector;
use crate::modules::time_tracking::adapters::outbound::projections_in_memory::InMemoryWorkLogProjections;
use crate::modules::time_tracking::application::work_log_service::WorkLogService;
use crate::modules::time_tracking::core::events::WorkLogEvent;
use crate::modules::time_tracking::use_cases::list_work_log::handler::WorkLogProjector;
use crate::shared::application::command_handler::CommandHandler;
use crate::shared::infrastructure::event_store::in_memory::InMemoryEventStore;
use crate::shared::infrastructure::intent_outbox::in_memory::InMemoryDomainOutbox;
use crate::shared::infrastructure::intent_outbox::{DomainOutbox, OutboxRow};
use crate::shared::infrastructure::reference_data::in_memory::InMemoryReferenceData;
use crate::shell::config::{Settings, TrackingPolicy};

pub const NOTIFICATION_CHANNEL_CAPACITY: usize = 1_024;

#[derive(Clone)]
pub struct AppState {
    pub work_log: Arc<WorkLogService>,
    pub payroll: Arc<PayrollService>,
    pub tracking_policy: TrackingPolicy,
    pub outbox: Arc<dyn DomainOutbox>,
    pub notifications: broadcast::Sender<OutboxRow>,
}

impl AppState {
    /// Wires every port to its in-memory adapter.
    pub fn in_memory(
        settings: &Settings,
        reference_data: Arc<InMemoryReferenceData>,
    ) -> anyhow::Result<Self> {
        let policy = settings.payroll_policy()?;
        let outbox = Arc::new(InMemoryDomainOutbox::new());

        let work_log_projections = Arc::new(InMemoryWorkLogProjections::new());
        let work_log_handler = CommandHandler::new(
            settings.notification_topic.clone(),
            Arc::new(InMemoryEventStore::<WorkLogEvent>::new()),
            outbox.clone(),
        )
        .with_projector(Arc::new(WorkLogProjector::new(
            "work_log",
            work_log_projections.clone(),
            work_log_projections.clone(),
        )))
        .with_max_retries(settings.max_append_retries);
        let work_log = Arc::new(WorkLogService::new(
            work_log_handler,
            work_log_projections,
            reference_data.clone(),
        ));

        let payroll_projections = Arc::new(InMemoryPayrollProjections::new());
        let payroll_handler = CommandHandler::new(
            settings.notification_topic.clone(),
            Arc::new(InMemoryEventStore::<PayrollEvent>::new()),
            outbox.clone(),
        )
        .with_projector(Arc::new(PayrollProjector::new(
            "payroll_records",
            payroll_projections.clone(),
            payroll_projections.clone(),
        )))
        .with_max_retries(settings.max_append_retries);
        let calculator = PayrollCalculator::new(
            work_log.clone(),
            reference_data.clone(),
            reference_data,
            policy,
        );
        let payroll = Arc::new(PayrollService::new(
            calculator,
            payroll_handler,
            payroll_projections,
        ));

        let (notifications, _) = broadcast::channel(NOTIFICATION_CHANNEL_CAPACITY);

        Ok(Self {
            work_log,
            payroll,
            tracking_policy: settings.tracking_policy(),
            outbox,
            notifications,
        })
    }
}
