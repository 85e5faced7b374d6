// Generic command handler for event-sourced aggregates.
//
// Purpose
// - Run load -> fold -> decide -> append -> project -> dispatch for one stream.
//
// Responsibilities
// - Re-run the whole cycle when the append loses the compare-and-swap, so a racing
//   writer receives the decide function's typed answer instead of a storage error.
// - Translate intents to outbox rows as soon as the append succeeds. Enqueue failures
//   are logged, never returned.
// - Project committed events inline so reads right after a write see it. A failed
//   projection does not fail the committed command: the stream is remembered as lagging
//   and the next command on it re-projects from the first unprojected version.

use std::collections::HashMap;
use std::marker::PhantomData;
use std::sync::Arc;

use tokio::sync::Mutex;

use crate::shared::application::errors::ApplicationError;
use crate::shared::application::projector::EventProjector;
use crate::shared::core::decision::Decision;
use crate::shared::infrastructure::event_store::{EventStore, EventStoreError};
use crate::shared::infrastructure::intent_outbox::{DomainOutbox, OutboxError, OutboxRow};

pub const DEFAULT_MAX_RETRIES: u32 = 3;

pub trait Aggregate: Default + Send + Sync + 'static {
    type Event: Clone + Send + Sync + 'static;

    fn apply(self, event: Self::Event) -> Self;
}

pub trait OutboxIntent: Send + 'static {
    fn into_outbox_row(
        self,
        topic: &str,
        stream_id: &str,
        stream_version: i64,
    ) -> Result<OutboxRow, OutboxError>;
}

/// Intent type for aggregates that never notify anyone.
#[derive(Debug)]
pub enum NoIntent {}

impl OutboxIntent for NoIntent {
    fn into_outbox_row(self, _: &str, _: &str, _: i64) -> Result<OutboxRow, OutboxError> {
        match self {}
    }
}

#[derive(Debug, Clone)]
pub struct Committed<A> {
    pub state: A,
    pub version: i64,
}

pub struct CommandHandler<A: Aggregate, I: OutboxIntent> {
    topic: String,
    event_store: Arc<dyn EventStore<A::Event>>,
    outbox: Arc<dyn DomainOutbox>,
    projector: Option<Arc<dyn EventProjector<A>>>,
    max_retries: u32,
    /// stream id -> first version the projector has not seen
    lagging: Mutex<HashMap<String, i64>>,
    _intent: PhantomData<fn() -> I>,
}

impl<A: Aggregate, I: OutboxIntent> CommandHandler<A, I> {
    pub fn new(
        topic: impl Into<String>,
        event_store: Arc<dyn EventStore<A::Event>>,
        outbox: Arc<dyn DomainOutbox>,
    ) -> Self {
        Self {
            topic: topic.into(),
            event_store,
            outbox,
            projector: None,
            max_retries: DEFAULT_MAX_RETRIES,
            lagging: Mutex::new(HashMap::new()),
            _intent: PhantomData,
        }
    }

    pub fn with_projector(mut self, projector: Arc<dyn EventProjector<A>>) -> Self {
        self.projector = Some(projector);
        self
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Current state of a stream without deciding anything.
    pub async fn load(&self, stream_id: &str) -> Result<Committed<A>, ApplicationError> {
        let stream = self.event_store.load(stream_id).await?;
        let state = stream.events.into_iter().fold(A::default(), A::apply);
        Ok(Committed {
            state,
            version: stream.version,
        })
    }

    #[tracing::instrument(name = "command", skip(self, decide), fields(topic = %self.topic))]
    pub async fn handle<F>(
        &self,
        stream_id: &str,
        decide: F,
    ) -> Result<Committed<A>, ApplicationError>
    where
        F: Fn(&A) -> Decision<A::Event, I> + Send + Sync,
    {
        let mut attempt = 0;
        loop {
            let Committed { state, version } = self.load(stream_id).await?;

            let (events, intents) = match decide(&state) {
                Decision::Accepted { events, intents } => (events, intents),
                Decision::Rejected { reason } => {
                    tracing::debug!(%reason, "command rejected");
                    return Err(ApplicationError::Domain(reason));
                }
            };

            if events.is_empty() {
                return Ok(Committed { state, version });
            }

            match self.event_store.append(stream_id, version, &events).await {
                Ok(()) => {}
                Err(EventStoreError::VersionMismatch { expected, actual })
                    if attempt < self.max_retries =>
                {
                    attempt += 1;
                    tracing::debug!(expected, actual, attempt, "stream moved on, deciding again");
                    continue;
                }
                Err(error) => return Err(error.into()),
            }

            let new_version = version + events.len() as i64;
            let state = events.iter().cloned().fold(state, A::apply);
            tracing::info!(
                events = events.len(),
                version = new_version,
                "events appended"
            );

            self.dispatch_intents(stream_id, version, intents).await;
            self.project(stream_id, version + 1, new_version, &state, events)
                .await;

            return Ok(Committed {
                state,
                version: new_version,
            });
        }
    }

    /// Projects `events` (versions `first_version..=new_version`), first re-reading the
    /// stream when an earlier projection of it failed.
    async fn project(
        &self,
        stream_id: &str,
        first_version: i64,
        new_version: i64,
        state: &A,
        events: Vec<A::Event>,
    ) {
        let Some(projector) = &self.projector else {
            return;
        };
        let mut lagging = self.lagging.lock().await;
        let (from_version, events) = match lagging.remove(stream_id) {
            Some(from_version) => match self.event_store.load(stream_id).await {
                Ok(stream) => {
                    let skip = usize::try_from(from_version - 1).unwrap_or_default();
                    let take = usize::try_from(new_version - from_version + 1).unwrap_or_default();
                    let replay = stream.events.into_iter().skip(skip).take(take).collect();
                    tracing::info!(stream_id, from_version, "catching up lagging projection");
                    (from_version, replay)
                }
                Err(error) => {
                    tracing::error!(%error, stream_id, "failed to reload lagging stream");
                    lagging.insert(stream_id.to_string(), from_version);
                    return;
                }
            },
            None => (first_version, events),
        };
        if let Err(error) = projector
            .project(stream_id, new_version, state, &events)
            .await
        {
            tracing::error!(%error, stream_id, from_version, new_version, "projection failed");
            lagging.insert(stream_id.to_string(), from_version);
        }
    }

    /// Streams whose read models are behind the event store.
    pub async fn lagging_streams(&self) -> Vec<String> {
        self.lagging.lock().await.keys().cloned().collect()
    }

    /// Each intent takes the stream version of the event at the same position:
    /// `starting_version + index + 1`.
    async fn dispatch_intents(&self, stream_id: &str, starting_version: i64, intents: Vec<I>) {
        for (index, intent) in intents.into_iter().enumerate() {
            let stream_version = starting_version + index as i64 + 1;
            let result = match intent.into_outbox_row(&self.topic, stream_id, stream_version) {
                Ok(row) => self.outbox.enqueue(row).await,
                Err(error) => Err(error),
            };
            if let Err(error) = result {
                tracing::warn!(%error, stream_id, stream_version, "failed to enqueue notification");
            }
        }
    }
}
