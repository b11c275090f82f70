//! ghpulse Store: the in-memory aggregation engine.
//!
//! Holds the timestamp-keyed event store, the per-category index and the
//! pull-request timelines, and answers the snapshot queries built on them.

pub mod application;
pub mod domain;
