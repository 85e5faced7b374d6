use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::sync::watch;
use tracing_subscriber::{EnvFilter, fmt};

use time_payroll::shared::infrastructure::reference_data::in_memory::InMemoryReferenceData;
use time_payroll::shell::config::Settings;
use time_payroll::shell::graphql::build_schema;
use time_payroll::shell::http::router;
use time_payroll::shell::state::AppState;
use time_payroll::shell::workers::run_outbox_relay;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let settings = Settings::from_env().context("reading configuration")?;
    let reference_data = match &settings.reference_data_path {
        Some(path) => InMemoryReferenceData::from_json_file(path)?,
        None => {
            tracing::warn!("no reference data configured, starting empty");
            InMemoryReferenceData::new()
        }
    };

    // In-memory deps for now
    let state = AppState::in_memory(&settings, Arc::new(reference_data))?;

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let relay = tokio::spawn(run_outbox_relay(
        state.outbox.clone(),
        state.notifications.clone(),
        Duration::from_millis(settings.relay_interval_ms),
        shutdown_rx,
    ));

    let schema = build_schema(state.clone());
    let app = router(state, schema);

    let addr: SocketAddr = settings
        .bind_addr
        .parse()
        .with_context(|| format!("invalid bind address {}", settings.bind_addr))?;
    tracing::info!(topic = %settings.notification_topic, "REST and GraphQL endpoint: http://{}/gql", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if let Err(error) = tokio::signal::ctrl_c().await {
                tracing::error!(%error, "failed to listen for shutdown signal");
            }
            tracing::info!("shutting down");
        })
        .await?;

    shutdown_tx.send(true).ok();
    relay.await?;
    Ok(())
}
