//! Domain error types.

use thiserror::Error;

/// Top-level domain error type.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    /// The upstream feed could not be reached or answered with a non-success
    /// status. Absorbed by the ingestor; never reaches a subscriber.
    #[error("upstream unavailable: {0}")]
    UpstreamUnavailable(String),

    /// No pull-request events have been recorded for the repository.
    #[error("No records for repository '{0}'")]
    RepositoryNotFound(String),

    /// No repository name is known for the numeric repository id.
    #[error("unknown repository id: {0}")]
    UnknownRepositoryId(u64),

    /// A validation error in a query argument.
    #[error("validation error: {0}")]
    Validation(String),
}
