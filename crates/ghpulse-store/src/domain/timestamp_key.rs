//! Unique ordering keys for the timestamp-keyed store.

use std::fmt;

use chrono::{DateTime, SecondsFormat, TimeDelta, Utc};
use serde::{Serialize, Serializer};

/// A UTC instant used purely as a unique ordering key.
///
/// Derived from an event's source-provided creation instant, then nudged
/// forward one nanosecond at a time on collision. Not a trustworthy arrival
/// time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimestampKey(DateTime<Utc>);

impl TimestampKey {
    /// Wraps an instant without any collision adjustment.
    #[must_use]
    pub fn new(instant: DateTime<Utc>) -> Self {
        Self(instant)
    }

    /// The instant this key orders by.
    #[must_use]
    pub fn instant(self) -> DateTime<Utc> {
        self.0
    }

    /// The key one smallest representable increment later.
    #[must_use]
    pub fn next(self) -> Self {
        Self(self.0 + TimeDelta::nanoseconds(1))
    }
}

impl fmt::Display for TimestampKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.to_rfc3339_opts(SecondsFormat::AutoSi, true))
    }
}

impl Serialize for TimestampKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
