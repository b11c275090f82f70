//! ghpulse Ingest: keeps the event store fed.
//!
//! A [`poller::PollingIngestor`] loop runs per live subscription, fetching
//! batches from an [`ghpulse_core::source::EventSource`], filtering them to
//! the category allow-set, streaming accepted events to its subscriber and
//! recording them in the shared store.

pub mod github;
pub mod poller;
pub mod stats;
