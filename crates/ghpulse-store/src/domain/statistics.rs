//! Pull-request interval statistics.

use chrono::TimeDelta;
use ghpulse_core::error::DomainError;

use super::repository_timeline::RepositoryTimeline;

/// Average spacing between the pull-request instants recorded for
/// `repo_name`: `(last - first) / max(count - 1, 1)` over the sorted
/// instants. A single recorded instant yields zero.
///
/// # Errors
///
/// Returns `DomainError::RepositoryNotFound` if no pull request has been
/// recorded for `repo_name`.
pub fn average_interval(timeline: &RepositoryTimeline, repo_name: &str) -> Result<TimeDelta, DomainError> {
    // Arrival order is usually chronological, but out-of-order delivery is
    // possible.
    let mut sorted = timeline.instants(repo_name).unwrap_or_default().to_vec();
    sorted.sort_unstable();

    let (Some(first), Some(last)) = (sorted.first(), sorted.last()) else {
        return Err(DomainError::RepositoryNotFound(repo_name.to_owned()));
    };
    let divisor = i32::try_from(sorted.len() - 1).unwrap_or(i32::MAX).max(1);

    Ok((last.instant() - first.instant()) / divisor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::timestamp_key::TimestampKey;
    use ghpulse_test_support::fixtures::instant;

    fn timeline_with(repo: &str, keys: &[TimestampKey]) -> RepositoryTimeline {
        let mut timeline = RepositoryTimeline::new();
        for key in keys {
            timeline.record(repo, 1, *key);
        }
        timeline
    }

    #[test]
    fn test_average_interval_fails_for_unknown_repository() {
        let timeline = RepositoryTimeline::new();

        let result = average_interval(&timeline, "octo/cat");

        assert_eq!(
            result.unwrap_err(),
            DomainError::RepositoryNotFound("octo/cat".into())
        );
    }

    #[test]
    fn test_average_interval_is_zero_for_single_pull_request() {
        let timeline = timeline_with("octo/cat", &[TimestampKey::new(instant(10, 0, 0))]);

        let interval = average_interval(&timeline, "octo/cat").unwrap();

        assert_eq!(interval, TimeDelta::zero());
    }

    #[test]
    fn test_average_interval_sorts_out_of_order_instants() {
        // Arrange: t0+30s, t0, t0+10s
        let keys = [
            TimestampKey::new(instant(10, 0, 30)),
            TimestampKey::new(instant(10, 0, 0)),
            TimestampKey::new(instant(10, 0, 10)),
        ];
        let timeline = timeline_with("octo/cat", &keys);

        // Act
        let interval = average_interval(&timeline, "octo/cat").unwrap();

        // Assert
        assert_eq!(interval, TimeDelta::seconds(15));
    }

    #[test]
    fn test_average_interval_for_two_pull_requests_is_their_gap() {
        let keys = [
            TimestampKey::new(instant(10, 0, 0)),
            TimestampKey::new(instant(10, 2, 0)),
        ];
        let timeline = timeline_with("octo/cat", &keys);

        let interval = average_interval(&timeline, "octo/cat").unwrap();

        assert_eq!(interval, TimeDelta::minutes(2));
    }
}
