//! Upstream record and event builders.

use chrono::{DateTime, SecondsFormat, TimeZone, Utc};
use ghpulse_core::event::{EventCategory, GitHubEvent};
use serde_json::{Value, json};

/// An instant on the fixed test day, 2026-01-15 UTC.
///
/// # Panics
///
/// Panics if the time of day is out of range.
#[must_use]
pub fn instant(hour: u32, minute: u32, second: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 15, hour, minute, second)
        .single()
        .expect("valid fixture time of day")
}

/// A raw upstream record shaped like the GitHub events API.
#[must_use]
pub fn record(
    id: &str,
    type_name: &str,
    created_at: DateTime<Utc>,
    repo_id: u64,
    repo_name: &str,
) -> Value {
    json!({
        "id": id,
        "type": type_name,
        "actor": { "id": 1, "login": "octocat" },
        "repo": { "id": repo_id, "name": repo_name },
        "payload": {},
        "public": true,
        "created_at": created_at.to_rfc3339_opts(SecondsFormat::Secs, true),
    })
}

/// A parsed event of an allowed category.
///
/// # Panics
///
/// Panics if the generated record fails to parse, which would be a bug in
/// the fixture.
#[must_use]
pub fn event(
    id: &str,
    category: EventCategory,
    created_at: DateTime<Utc>,
    repo_id: u64,
    repo_name: &str,
) -> GitHubEvent {
    GitHubEvent::from_value(record(id, category.as_str(), created_at, repo_id, repo_name))
        .expect("fixture record parses")
}
