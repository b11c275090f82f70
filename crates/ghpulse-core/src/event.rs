//! GitHub event model and the category allow-set.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};
use serde_json::Value;
use thiserror::Error;

/// Event categories retained by the system.
///
/// Only the allow-set is representable: an upstream record of any other
/// `type` fails to parse and is never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum EventCategory {
    /// A user starred a repository.
    #[serde(rename = "WatchEvent")]
    Watch,
    /// Pull-request activity on a repository.
    #[serde(rename = "PullRequestEvent")]
    PullRequest,
    /// Issue activity on a repository.
    #[serde(rename = "IssuesEvent")]
    Issues,
}

impl EventCategory {
    /// Every retained category, in display order.
    pub const ALLOWED: [Self; 3] = [Self::Watch, Self::PullRequest, Self::Issues];

    /// Returns the upstream `type` name for this category.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Watch => "WatchEvent",
            Self::PullRequest => "PullRequestEvent",
            Self::Issues => "IssuesEvent",
        }
    }

    /// Maps an upstream `type` name onto the allow-set.
    #[must_use]
    pub fn from_type(name: &str) -> Option<Self> {
        Self::ALLOWED.into_iter().find(|c| c.as_str() == name)
    }
}

impl fmt::Display for EventCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventCategory {
    type Err = EventParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_type(s).ok_or_else(|| EventParseError::UnsupportedCategory(s.to_owned()))
    }
}

/// Reasons an upstream record is not turned into a [`GitHubEvent`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EventParseError {
    /// A required field is absent or has the wrong JSON type.
    #[error("missing or malformed field: {0}")]
    MissingField(&'static str),

    /// The record's `type` is outside the allow-set.
    #[error("unsupported event category: {0}")]
    UnsupportedCategory(String),

    /// `created_at` is not an RFC 3339 timestamp.
    #[error("invalid created_at timestamp: {0}")]
    InvalidTimestamp(String),
}

/// Repository an event refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoRef {
    /// Numeric repository id.
    pub id: u64,
    /// Canonical `owner/repo` name.
    pub name: String,
}

/// An accepted upstream event.
///
/// Holds the fields the engine indexes on next to the raw upstream record,
/// which is what consumers receive. Serializes as the raw record.
#[derive(Debug, Clone, PartialEq)]
pub struct GitHubEvent {
    id: Option<String>,
    category: EventCategory,
    created_at: DateTime<Utc>,
    repo: Option<RepoRef>,
    raw: Value,
}

impl GitHubEvent {
    /// Parses one upstream record.
    ///
    /// # Errors
    ///
    /// Returns `EventParseError::UnsupportedCategory` for records outside the
    /// allow-set, and `MissingField`/`InvalidTimestamp` for records that do
    /// not conform to the event shape. Pull-request events must carry a
    /// repository.
    pub fn from_value(raw: Value) -> Result<Self, EventParseError> {
        let type_name = raw
            .get("type")
            .and_then(Value::as_str)
            .ok_or(EventParseError::MissingField("type"))?;
        let category: EventCategory = type_name.parse()?;

        let created_at_text = raw
            .get("created_at")
            .and_then(Value::as_str)
            .ok_or(EventParseError::MissingField("created_at"))?;
        let created_at = DateTime::parse_from_rfc3339(created_at_text)
            .map_err(|_| EventParseError::InvalidTimestamp(created_at_text.to_owned()))?
            .with_timezone(&Utc);

        let id = raw.get("id").and_then(|v| match v {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        });

        let repo = parse_repo(&raw);
        if category == EventCategory::PullRequest && repo.is_none() {
            return Err(EventParseError::MissingField("repo"));
        }

        Ok(Self {
            id,
            category,
            created_at,
            repo,
            raw,
        })
    }

    /// Stable upstream identifier, when the record carries one.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// The event's category.
    #[must_use]
    pub fn category(&self) -> EventCategory {
        self.category
    }

    /// Source-provided creation instant.
    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Repository the event refers to, if any.
    #[must_use]
    pub fn repo(&self) -> Option<&RepoRef> {
        self.repo.as_ref()
    }

    /// The raw upstream record.
    #[must_use]
    pub fn raw(&self) -> &Value {
        &self.raw
    }
}

impl Serialize for GitHubEvent {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.raw.serialize(serializer)
    }
}

fn parse_repo(raw: &Value) -> Option<RepoRef> {
    let repo = raw.get("repo")?;
    let id = repo.get("id").and_then(Value::as_u64)?;
    let name = repo.get("name").and_then(Value::as_str)?;
    Some(RepoRef {
        id,
        name: name.to_owned(),
    })
}
