//! The shared event store owning every store component.

use std::collections::HashSet;
use std::sync::{Mutex, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use ghpulse_core::event::{EventCategory, GitHubEvent};
use tracing::debug;

use super::category_index::CategoryIndex;
use super::repository_timeline::RepositoryTimeline;
use super::timestamp_key::TimestampKey;
use super::timestamp_store::TimestampKeyedStore;

/// Result of handing one event to [`EventStore::ingest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IngestOutcome {
    /// The event was stored under the given key.
    Recorded(TimestampKey),
    /// Deduplication is enabled and an event with the same upstream id was
    /// stored before; nothing was written.
    Duplicate,
}

/// Process-wide store shared by every ingestor loop and query handler.
///
/// Each component sits behind its own lock: a single component's append is
/// atomic, but an event may become visible in one component slightly before
/// another.
#[derive(Debug, Default)]
pub struct EventStore {
    timestamps: RwLock<TimestampKeyedStore>,
    categories: RwLock<CategoryIndex>,
    timeline: RwLock<RepositoryTimeline>,
    seen_ids: Option<Mutex<HashSet<String>>>,
}

impl EventStore {
    /// Creates an empty store. Repeat deliveries are stored again, separated
    /// only by timestamp-collision nudging.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty store that skips events whose upstream id has
    /// already been stored. Events without an id are always stored.
    #[must_use]
    pub fn with_deduplication() -> Self {
        Self {
            seen_ids: Some(Mutex::new(HashSet::new())),
            ..Self::default()
        }
    }

    /// Whether id-based deduplication is enabled.
    #[must_use]
    pub fn deduplicates(&self) -> bool {
        self.seen_ids.is_some()
    }

    /// Appends `event` to the timestamp store and the category index, and to
    /// the repository timeline for pull-request events.
    pub fn ingest(&self, event: GitHubEvent) -> IngestOutcome {
        if let (Some(seen), Some(id)) = (&self.seen_ids, event.id()) {
            let first_sighting = seen
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .insert(id.to_owned());
            if !first_sighting {
                debug!(event_id = id, "skipping already stored event");
                return IngestOutcome::Duplicate;
            }
        }

        let key = write(&self.timestamps).insert(event.created_at(), event.clone());

        if event.category() == EventCategory::PullRequest {
            if let Some(repo) = event.repo() {
                write(&self.timeline).record(&repo.name, repo.id, key);
            }
        }

        write(&self.categories).record(event);

        IngestOutcome::Recorded(key)
    }

    /// Read access to the timestamp-keyed store.
    pub fn timestamps(&self) -> RwLockReadGuard<'_, TimestampKeyedStore> {
        read(&self.timestamps)
    }

    /// Read access to the category index.
    pub fn categories(&self) -> RwLockReadGuard<'_, CategoryIndex> {
        read(&self.categories)
    }

    /// Read access to the repository timeline.
    pub fn timeline(&self) -> RwLockReadGuard<'_, RepositoryTimeline> {
        read(&self.timeline)
    }
}

// Components are append-only, so a guard poisoned by a panicking writer
// still holds consistent data.
fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}
