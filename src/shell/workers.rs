// Background workers.
//
// Outbox relay: drains unpublished outbox rows, publishes each one on the in-process
// notification channel and marks it published. Delivery is at-least-once and
// best-effort: failures are logged and retried on the next tick.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{broadcast, watch};

use crate::shared::infrastructure::intent_outbox::{DomainOutbox, OutboxError, OutboxRow};

pub const RELAY_BATCH_SIZE: usize = 100;

/// One relay pass. Returns how many rows were marked published.
pub async fn relay_once(
    outbox: &dyn DomainOutbox,
    notifications: &broadcast::Sender<OutboxRow>,
) -> Result<usize, OutboxError> {
    let rows = outbox.fetch_unpublished(RELAY_BATCH_SIZE).await?;
    let mut published = 0;
    for row in rows {
        let (stream_id, stream_version) = row.key();
        // no subscribers is not a failure, the hint is simply dropped
        if notifications.send(row).is_err() {
            tracing::debug!(stream_id, stream_version, "no notification subscribers");
        }
        outbox.mark_published(&stream_id, stream_version).await?;
        published += 1;
    }
    Ok(published)
}

pub async fn run_outbox_relay(
    outbox: Arc<dyn DomainOutbox>,
    notifications: broadcast::Sender<OutboxRow>,
    interval: Duration,
    mut shutdown: watch::Receiver<bool>,
) {
    let mut ticker = tokio::time::interval(interval);
    tracing::info!(interval_ms = interval.as_millis() as u64, "outbox relay started");
    loop {
        tokio::select! {
            changed = shutdown.changed() => {
                if changed.is_err() || *shutdown.borrow() {
                    break;
                }
            }
            _ = ticker.tick() => {
                match relay_once(outbox.as_ref(), &notifications).await {
                    Ok(0) => {}
                    Ok(published) => tracing::debug!(published, "outbox rows relayed"),
                    Err(error) => tracing::warn!(%error, "outbox relay pass failed"),
                }
            }
        }
    }
    tracing::info!("outbox relay stopped");
}
