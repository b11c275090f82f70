//! Process-wide ingestion counters.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// Counters shared by every ingestor loop.
#[derive(Debug, Default)]
pub struct IngestStats {
    polls: AtomicU64,
    upstream_failures: AtomicU64,
    events_accepted: AtomicU64,
    events_filtered: AtomicU64,
    events_malformed: AtomicU64,
    events_duplicate: AtomicU64,
    events_undelivered: AtomicU64,
    active_subscriptions: AtomicU64,
}

/// Point-in-time copy of [`IngestStats`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IngestStatsSnapshot {
    /// Upstream fetches attempted.
    pub polls: u64,
    /// Fetches that failed or answered non-success.
    pub upstream_failures: u64,
    /// Events that passed the category filter.
    pub events_accepted: u64,
    /// Records discarded for being outside the allow-set.
    pub events_filtered: u64,
    /// Records discarded for not conforming to the event shape.
    pub events_malformed: u64,
    /// Accepted events skipped by id-based deduplication.
    pub events_duplicate: u64,
    /// Deliveries dropped because the subscriber's buffer was full.
    pub events_undelivered: u64,
    /// Ingestor loops currently running.
    pub active_subscriptions: u64,
}

impl IngestStats {
    pub(crate) fn record_poll(&self) {
        self.polls.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_upstream_failure(&self) {
        self.upstream_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_accepted(&self) {
        self.events_accepted.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_filtered(&self) {
        self.events_filtered.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_malformed(&self) {
        self.events_malformed.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_duplicate(&self) {
        self.events_duplicate.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_undelivered(&self) {
        self.events_undelivered.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn subscription_opened(&self) {
        self.active_subscriptions.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn subscription_closed(&self) {
        self.active_subscriptions.fetch_sub(1, Ordering::Relaxed);
    }

    /// Copies the current counter values.
    #[must_use]
    pub fn snapshot(&self) -> IngestStatsSnapshot {
        IngestStatsSnapshot {
            polls: self.polls.load(Ordering::Relaxed),
            upstream_failures: self.upstream_failures.load(Ordering::Relaxed),
            events_accepted: self.events_accepted.load(Ordering::Relaxed),
            events_filtered: self.events_filtered.load(Ordering::Relaxed),
            events_malformed: self.events_malformed.load(Ordering::Relaxed),
            events_duplicate: self.events_duplicate.load(Ordering::Relaxed),
            events_undelivered: self.events_undelivered.load(Ordering::Relaxed),
            active_subscriptions: self.active_subscriptions.load(Ordering::Relaxed),
        }
    }
}
