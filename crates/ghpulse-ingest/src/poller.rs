//! The polling ingestor loop.
//!
//! One loop runs per live subscription:
//! `Fetching → Filtering → Dispatching → Sleeping → Fetching`. Upstream
//! failures are absorbed (the batch counts as empty) and the loop only ends
//! when the subscriber closes its channel.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use ghpulse_core::event::{EventParseError, GitHubEvent};
use ghpulse_core::source::{EventSource, FeedScope};
use ghpulse_store::domain::event_store::{EventStore, IngestOutcome};
use serde_json::Value;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tracing::{debug, info, instrument, trace, warn};
use uuid::Uuid;

use crate::stats::{IngestStats, IngestStatsSnapshot};

/// Pause between two upstream fetches of one loop.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);

/// Events buffered per subscription. Deliveries beyond a full buffer are
/// dropped, not waited on.
pub const SUBSCRIPTION_BUFFER: usize = 64;

/// Polls an [`EventSource`] and feeds the shared [`EventStore`].
///
/// Cheap to clone; clones share the source, store and counters.
#[derive(Clone)]
pub struct PollingIngestor {
    source: Arc<dyn EventSource>,
    store: Arc<EventStore>,
    stats: Arc<IngestStats>,
    interval: Duration,
}

impl fmt::Debug for PollingIngestor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PollingIngestor")
            .field("interval", &self.interval)
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}

impl PollingIngestor {
    /// Creates an ingestor polling `source` every [`DEFAULT_POLL_INTERVAL`].
    #[must_use]
    pub fn new(source: Arc<dyn EventSource>, store: Arc<EventStore>) -> Self {
        Self {
            source,
            store,
            stats: Arc::new(IngestStats::default()),
            interval: DEFAULT_POLL_INTERVAL,
        }
    }

    /// Overrides the pause between fetches.
    #[must_use]
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// The store this ingestor writes to.
    #[must_use]
    pub fn store(&self) -> &Arc<EventStore> {
        &self.store
    }

    /// Current ingestion counters, across every loop of this ingestor.
    #[must_use]
    pub fn stats(&self) -> IngestStatsSnapshot {
        self.stats.snapshot()
    }

    /// Starts a loop for `scope` on the current tokio runtime and returns
    /// the receiving end of its subscription. Dropping the receiver stops
    /// the loop.
    #[must_use]
    pub fn subscribe(&self, scope: FeedScope) -> mpsc::Receiver<GitHubEvent> {
        let (subscriber, receiver) = mpsc::channel(SUBSCRIPTION_BUFFER);
        tokio::spawn(self.clone().run(scope, subscriber));
        receiver
    }

    /// Runs the polling loop until `subscriber` is closed.
    ///
    /// Closure is observed while fetching and while sleeping.
    #[instrument(skip_all, fields(subscription_id = %Uuid::new_v4(), scope = %scope))]
    pub async fn run(self, scope: FeedScope, subscriber: mpsc::Sender<GitHubEvent>) {
        self.stats.subscription_opened();
        info!(interval = ?self.interval, "subscription started");

        loop {
            let fetched = tokio::select! {
                () = subscriber.closed() => break,
                fetched = self.source.fetch_batch(&scope) => fetched,
            };
            self.stats.record_poll();

            match fetched {
                Ok(batch) => self.dispatch(batch, &subscriber),
                Err(err) => {
                    self.stats.record_upstream_failure();
                    warn!(error = %err, "upstream fetch failed, treating batch as empty");
                }
            }

            tokio::select! {
                () = subscriber.closed() => break,
                () = tokio::time::sleep(self.interval) => {}
            }
        }

        self.stats.subscription_closed();
        info!("subscription closed");
    }

    /// Records each accepted event in the store, then offers it to the
    /// subscriber without waiting. A slow or gone subscriber never holds up
    /// recording.
    fn dispatch(&self, batch: Vec<Value>, subscriber: &mpsc::Sender<GitHubEvent>) {
        let accepted = self.filter(batch);
        debug!(accepted = accepted.len(), "dispatching batch");

        for event in accepted {
            if self.store.ingest(event.clone()) == IngestOutcome::Duplicate {
                self.stats.record_duplicate();
            }
            match subscriber.try_send(event) {
                Ok(()) => {}
                Err(TrySendError::Full(event)) => {
                    self.stats.record_undelivered();
                    debug!(event_id = event.id(), "subscriber buffer full, dropping delivery");
                }
                Err(TrySendError::Closed(_)) => {
                    trace!("subscriber gone, recording event only");
                }
            }
        }
    }

    /// Parses a raw batch, keeping arrival order and dropping records that
    /// are outside the allow-set or malformed.
    fn filter(&self, batch: Vec<Value>) -> Vec<GitHubEvent> {
        batch
            .into_iter()
            .filter_map(|raw| match GitHubEvent::from_value(raw) {
                Ok(event) => {
                    self.stats.record_accepted();
                    Some(event)
                }
                Err(EventParseError::UnsupportedCategory(category)) => {
                    self.stats.record_filtered();
                    trace!(%category, "filtered event");
                    None
                }
                Err(err) => {
                    self.stats.record_malformed();
                    debug!(error = %err, "ignoring malformed event");
                    None
                }
            })
            .collect()
    }
}
