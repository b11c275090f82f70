//! Shared application state.

use std::sync::Arc;

use ghpulse_core::clock::Clock;
use ghpulse_ingest::poller::PollingIngestor;
use ghpulse_store::domain::event_store::EventStore;

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// The process-wide event store.
    pub store: Arc<EventStore>,
    /// Starts one polling loop per stream subscription.
    pub ingestor: PollingIngestor,
    /// Time source for rolling-window queries.
    pub clock: Arc<dyn Clock + Send + Sync>,
}

impl AppState {
    /// Create new application state. The store is the one `ingestor`
    /// writes to.
    #[must_use]
    pub fn new(ingestor: PollingIngestor, clock: Arc<dyn Clock + Send + Sync>) -> Self {
        Self {
            store: Arc::clone(ingestor.store()),
            ingestor,
            clock,
        }
    }
}
