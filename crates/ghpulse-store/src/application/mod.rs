//! Application layer: query handlers over a shared `EventStore`.

pub mod query_handlers;
