//! Ordered mapping from unique timestamp keys to events.

use std::collections::BTreeMap;
use std::ops::Bound;

use chrono::{DateTime, Utc};
use ghpulse_core::event::GitHubEvent;

use super::timestamp_key::TimestampKey;

/// Events ordered by a collision-free timestamp key.
///
/// Append-only: there is no update or delete.
#[derive(Debug, Default)]
pub struct TimestampKeyedStore {
    entries: BTreeMap<TimestampKey, GitHubEvent>,
}

impl TimestampKeyedStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `event` under the first free key at or after `instant`.
    ///
    /// Colliding inserts are shifted forward one increment at a time, so
    /// events sharing an instant keep their insertion order.
    pub fn insert(&mut self, instant: DateTime<Utc>, event: GitHubEvent) -> TimestampKey {
        let mut key = TimestampKey::new(instant);
        for existing in self.entries.range(key..).map(|(k, _)| *k) {
            if existing != key {
                break;
            }
            key = key.next();
        }
        self.entries.insert(key, event);
        key
    }

    /// All entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&TimestampKey, &GitHubEvent)> {
        self.entries.iter()
    }

    /// Entries whose key is strictly greater than `cutoff`, in key order.
    pub fn after(&self, cutoff: TimestampKey) -> impl Iterator<Item = (&TimestampKey, &GitHubEvent)> {
        self.entries.range((Bound::Excluded(cutoff), Bound::Unbounded))
    }

    /// A copy of the full ordered mapping.
    #[must_use]
    pub fn snapshot(&self) -> BTreeMap<TimestampKey, GitHubEvent> {
        self.entries.clone()
    }

    /// Number of stored events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been stored yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;
    use ghpulse_core::event::EventCategory;
    use ghpulse_test_support::fixtures::{event, instant};

    fn watch(id: &str, at: DateTime<Utc>) -> GitHubEvent {
        event(id, EventCategory::Watch, at, 1, "octo/cat")
    }

    #[test]
    fn test_insert_keeps_distinct_instants_unchanged() {
        // Arrange
        let mut store = TimestampKeyedStore::new();
        let t0 = instant(10, 0, 0);
        let t1 = instant(10, 0, 5);

        // Act
        let k1 = store.insert(t1, watch("1", t1));
        let k0 = store.insert(t0, watch("0", t0));

        // Assert
        assert_eq!(k0.instant(), t0);
        assert_eq!(k1.instant(), t1);
        let ids: Vec<_> = store.iter().map(|(_, e)| e.id().unwrap()).collect();
        assert_eq!(ids, vec!["0", "1"]);
    }

    #[test]
    fn test_insert_nudges_colliding_instant_after_earlier_insert() {
        // Arrange
        let mut store = TimestampKeyedStore::new();
        let t0 = instant(10, 0, 0);

        // Act
        let first = store.insert(t0, watch("first", t0));
        let second = store.insert(t0, watch("second", t0));
        let third = store.insert(t0, watch("third", t0));

        // Assert
        assert!(first < second);
        assert!(second < third);
        assert_eq!(third.instant() - first.instant(), TimeDelta::nanoseconds(2));
        let ids: Vec<_> = store.iter().map(|(_, e)| e.id().unwrap()).collect();
        assert_eq!(ids, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_insert_skips_over_previously_nudged_keys() {
        // Arrange: occupy t0 and t0+1ns, then insert exactly at t0+1ns.
        let mut store = TimestampKeyedStore::new();
        let t0 = instant(10, 0, 0);
        store.insert(t0, watch("a", t0));
        let nudged = store.insert(t0, watch("b", t0));

        // Act
        let key = store.insert(nudged.instant(), watch("c", nudged.instant()));

        // Assert
        assert_eq!(key, nudged.next());
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_keys_are_unique_and_ordered_for_mixed_sequence() {
        // Arrange
        let mut store = TimestampKeyedStore::new();
        let instants = [
            instant(10, 0, 3),
            instant(10, 0, 1),
            instant(10, 0, 3),
            instant(10, 0, 2),
            instant(10, 0, 1),
            instant(10, 0, 3),
        ];

        // Act
        let keys: Vec<_> = instants
            .iter()
            .enumerate()
            .map(|(i, at)| store.insert(*at, watch(&i.to_string(), *at)))
            .collect();

        // Assert
        assert_eq!(store.len(), instants.len());
        let mut deduped = keys.clone();
        deduped.sort();
        deduped.dedup();
        assert_eq!(deduped.len(), keys.len());
        let ordered: Vec<_> = store.iter().map(|(k, _)| *k).collect();
        assert!(ordered.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_after_excludes_cutoff_key() {
        let mut store = TimestampKeyedStore::new();
        let t0 = instant(10, 0, 0);
        let t1 = instant(10, 1, 0);
        let k0 = store.insert(t0, watch("0", t0));
        store.insert(t1, watch("1", t1));

        let ids: Vec<_> = store.after(k0).map(|(_, e)| e.id().unwrap()).collect();

        assert_eq!(ids, vec!["1"]);
    }
}
