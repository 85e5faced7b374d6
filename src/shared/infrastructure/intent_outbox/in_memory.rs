// Published rows are dropped; per stream only the highest published version is kept
// to refuse late duplicates.

use crate::shared::infrastructure::intent_outbox::{DomainOutbox, OutboxError, OutboxRow};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::Mutex;

#[derive(Default)]
pub struct InMemoryDomainOutbox {
    /// Unpublished rows in enqueue order.
    pub rows: Mutex<Vec<OutboxRow>>,
    pending: Mutex<HashSet<(String, i64)>>,
    published_up_to: Mutex<HashMap<String, i64>>,
    published: AtomicUsize,
    is_offline: bool,
}

impl InMemoryDomainOutbox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle_offline(&mut self) {
        self.is_offline = !self.is_offline;
    }

    pub async fn published_count(&self) -> usize {
        self.published.load(Ordering::SeqCst)
    }

    fn ensure_online(&self) -> Result<(), OutboxError> {
        if self.is_offline {
            return Err(OutboxError::Backend("Outbox offline".into()));
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl DomainOutbox for InMemoryDomainOutbox {
    async fn enqueue(&self, row: OutboxRow) -> Result<(), OutboxError> {
        self.ensure_online()?;
        if row.topic.is_empty() {
            return Err(OutboxError::Validation("topic must not be empty".into()));
        }
        {
            let already_published = self
                .published_up_to
                .lock()
                .await
                .get(&row.stream_id)
                .is_some_and(|version| row.stream_version <= *version);
            let mut pending = self.pending.lock().await;
            if already_published || !pending.insert(row.key()) {
                return Err(OutboxError::Duplicate {
                    stream_id: row.stream_id,
                    stream_version: row.stream_version,
                });
            }
        }
        self.rows.lock().await.push(row);
        Ok(())
    }

    async fn fetch_unpublished(&self, limit: usize) -> Result<Vec<OutboxRow>, OutboxError> {
        self.ensure_online()?;
        Ok(self.rows.lock().await.iter().take(limit).cloned().collect())
    }

    async fn mark_published(
        &self,
        stream_id: &str,
        stream_version: i64,
    ) -> Result<(), OutboxError> {
        self.ensure_online()?;
        let key = (stream_id.to_string(), stream_version);
        if !self.pending.lock().await.remove(&key) {
            return Ok(());
        }
        self.rows.lock().await.retain(|row| row.key() != key);
        let mut published_up_to = self.published_up_to.lock().await;
        let high = published_up_to.entry(key.0).or_insert(stream_version);
        *high = (*high).max(stream_version);
        self.published.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
