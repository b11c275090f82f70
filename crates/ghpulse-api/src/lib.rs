//! ghpulse API: HTTP surface over the ingestion engine.
//!
//! Exposes snapshot queries as JSON routes, the live feed as Server-Sent
//! Events, and the event chart as a PNG.

pub mod config;
pub mod error;
pub mod routes;
pub mod state;
pub mod telemetry;
