//! Pull-request timelines per repository.

use std::collections::HashMap;

use ghpulse_core::error::DomainError;

use super::timestamp_key::TimestampKey;

/// Instants at which pull-request events were recorded, per repository,
/// plus the repository id to name mapping.
///
/// Sequences are kept in arrival order. Consumers that need them sorted must
/// sort a copy.
#[derive(Debug, Default)]
pub struct RepositoryTimeline {
    instants: HashMap<String, Vec<TimestampKey>>,
    names: HashMap<u64, String>,
}

impl RepositoryTimeline {
    /// Creates an empty timeline.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `key` to `repo_name`'s sequence and maps `repo_id` to
    /// `repo_name`, replacing any earlier name for that id.
    pub fn record(&mut self, repo_name: &str, repo_id: u64, key: TimestampKey) {
        self.instants
            .entry(repo_name.to_owned())
            .or_default()
            .push(key);
        self.names.insert(repo_id, repo_name.to_owned());
    }

    /// Current repository name for `repo_id`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::UnknownRepositoryId` if the id was never seen
    /// on a pull-request event.
    pub fn lookup_name(&self, repo_id: u64) -> Result<&str, DomainError> {
        self.names
            .get(&repo_id)
            .map(String::as_str)
            .ok_or(DomainError::UnknownRepositoryId(repo_id))
    }

    /// Recorded instants for `repo_name`, in arrival order.
    #[must_use]
    pub fn instants(&self, repo_name: &str) -> Option<&[TimestampKey]> {
        self.instants.get(repo_name).map(Vec::as_slice)
    }

    /// Number of repositories with at least one recorded pull request.
    #[must_use]
    pub fn repository_count(&self) -> usize {
        self.instants.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ghpulse_test_support::fixtures::instant;

    #[test]
    fn test_lookup_name_fails_for_unseen_id() {
        let timeline = RepositoryTimeline::new();

        let result = timeline.lookup_name(42);

        assert_eq!(result.unwrap_err(), DomainError::UnknownRepositoryId(42));
    }

    #[test]
    fn test_record_appends_and_maps_id() {
        // Arrange
        let mut timeline = RepositoryTimeline::new();
        let first = TimestampKey::new(instant(10, 0, 30));
        let second = TimestampKey::new(instant(10, 0, 0));

        // Act
        timeline.record("octo/cat", 7, first);
        timeline.record("octo/cat", 7, second);

        // Assert: arrival order is preserved, not sorted.
        assert_eq!(timeline.instants("octo/cat").unwrap(), &[first, second]);
        assert_eq!(timeline.lookup_name(7).unwrap(), "octo/cat");
        assert_eq!(timeline.repository_count(), 1);
        assert!(timeline.instants("octo/dog").is_none());
    }

    #[test]
    fn test_record_overwrites_name_for_renamed_repository() {
        let mut timeline = RepositoryTimeline::new();
        let at = TimestampKey::new(instant(10, 0, 0));

        timeline.record("octo/cat", 7, at);
        timeline.record("octo/kitten", 7, at.next());

        assert_eq!(timeline.lookup_name(7).unwrap(), "octo/kitten");
        assert_eq!(timeline.repository_count(), 2);
    }
}
