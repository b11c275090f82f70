//! Query handlers for the event store.
//!
//! Each handler reads one store component under a single read guard and
//! returns owned, serializable views.

use std::collections::BTreeMap;

use chrono::TimeDelta;
use ghpulse_core::clock::Clock;
use ghpulse_core::error::DomainError;
use ghpulse_core::event::{EventCategory, GitHubEvent};
use serde::Serialize;

use crate::domain::event_store::EventStore;
use crate::domain::statistics;
use crate::domain::timestamp_key::TimestampKey;

/// Pull-request cadence of one repository.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PullRequestCadenceView {
    /// Repository name (`owner/repo`).
    pub repository: String,
    /// Number of recorded pull-request events.
    pub pull_requests: usize,
    /// Average spacing between pull requests, in seconds.
    pub average_interval_seconds: f64,
    /// Human-readable summary sentence.
    pub summary: String,
}

/// Sizes of the store components.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoreSummaryView {
    /// Events in the timestamp-keyed store.
    pub events: usize,
    /// Repositories with at least one recorded pull request.
    pub repositories: usize,
    /// Recorded events per category.
    pub categories: BTreeMap<EventCategory, usize>,
    /// Whether repeat deliveries are skipped by upstream id.
    pub deduplicating: bool,
}

/// Every event whose key is strictly after `now - minutes`, in key order.
///
/// `now` is read once per call. Negative durations select events keyed in
/// the future; durations too large to represent select everything (or
/// nothing, when negative).
pub fn events_since(store: &EventStore, minutes: i64, clock: &dyn Clock) -> Vec<GitHubEvent> {
    let now = clock.now();
    let cutoff = TimeDelta::try_minutes(minutes).and_then(|window| now.checked_sub_signed(window));

    let timestamps = store.timestamps();
    match cutoff {
        Some(cutoff) => timestamps
            .after(TimestampKey::new(cutoff))
            .map(|(_, event)| event.clone())
            .collect(),
        None if minutes >= 0 => timestamps.iter().map(|(_, event)| event.clone()).collect(),
        None => Vec::new(),
    }
}

/// The full key to event mapping.
pub fn snapshot(store: &EventStore) -> BTreeMap<TimestampKey, GitHubEvent> {
    store.timestamps().snapshot()
}

/// Every recorded event of `category`, in arrival order.
pub fn events_by_category(store: &EventStore, category: EventCategory) -> Vec<GitHubEvent> {
    store.categories().get(category).to_vec()
}

/// Pull-request cadence for the repository named `repo_name`.
///
/// # Errors
///
/// Returns `DomainError::RepositoryNotFound` if no pull request has been
/// recorded for the repository.
pub fn pull_request_cadence(
    store: &EventStore,
    repo_name: &str,
) -> Result<PullRequestCadenceView, DomainError> {
    let timeline = store.timeline();
    let interval = statistics::average_interval(&timeline, repo_name)?;
    let pull_requests = timeline.instants(repo_name).map_or(0, <[_]>::len);
    Ok(cadence_view(repo_name, pull_requests, interval))
}

/// Pull-request cadence for the repository with numeric id `repo_id`.
///
/// # Errors
///
/// Returns `DomainError::UnknownRepositoryId` if the id was never seen on a
/// pull-request event.
pub fn pull_request_cadence_by_id(
    store: &EventStore,
    repo_id: u64,
) -> Result<PullRequestCadenceView, DomainError> {
    let timeline = store.timeline();
    let repo_name = timeline.lookup_name(repo_id)?;
    let interval = statistics::average_interval(&timeline, repo_name)?;
    let pull_requests = timeline.instants(repo_name).map_or(0, <[_]>::len);
    Ok(cadence_view(repo_name, pull_requests, interval))
}

/// Sizes of every store component.
pub fn store_summary(store: &EventStore) -> StoreSummaryView {
    StoreSummaryView {
        events: store.timestamps().len(),
        repositories: store.timeline().repository_count(),
        categories: store.categories().counts(),
        deduplicating: store.deduplicates(),
    }
}

#[allow(clippy::cast_precision_loss)]
fn cadence_view(repo_name: &str, pull_requests: usize, interval: TimeDelta) -> PullRequestCadenceView {
    let seconds = interval.num_seconds() as f64 + f64::from(interval.subsec_nanos()) / 1e9;
    PullRequestCadenceView {
        repository: repo_name.to_owned(),
        pull_requests,
        average_interval_seconds: seconds,
        summary: format!(
            "Average time between pull requests for repository: '{repo_name}' is: {seconds:.2}s"
        ),
    }
}
