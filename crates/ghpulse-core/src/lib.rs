//! ghpulse Core: shared event model and abstractions.
//!
//! This crate defines the event types, the upstream source trait and the
//! error taxonomy that the store, ingest and API crates depend on. It
//! contains no infrastructure code.

pub mod clock;
pub mod error;
pub mod event;
pub mod source;
