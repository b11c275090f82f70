//! Upstream event source abstraction.

use std::fmt;

use async_trait::async_trait;

use crate::error::DomainError;

/// Which upstream feed an ingestor polls. Fixed for the lifetime of a loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedScope {
    /// The public timeline of all repositories.
    Global,
    /// The events of one repository.
    Repository {
        /// Repository owner (user or organisation).
        owner: String,
        /// Repository name.
        repo: String,
    },
}

impl FeedScope {
    /// Scope for a single repository.
    #[must_use]
    pub fn repository(owner: impl Into<String>, repo: impl Into<String>) -> Self {
        Self::Repository {
            owner: owner.into(),
            repo: repo.into(),
        }
    }
}

impl fmt::Display for FeedScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Global => f.write_str("global"),
            Self::Repository { owner, repo } => write!(f, "{owner}/{repo}"),
        }
    }
}

/// Source of candidate event batches.
///
/// Implementations keep no cursor: each call returns the current batch, so
/// the same record may be delivered by consecutive calls.
#[async_trait]
pub trait EventSource: Send + Sync {
    /// Fetch the most recent batch of raw event records for `scope`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::UpstreamUnavailable` when the request fails or
    /// the upstream answers with a non-success status.
    async fn fetch_batch(&self, scope: &FeedScope) -> Result<Vec<serde_json::Value>, DomainError>;
}
