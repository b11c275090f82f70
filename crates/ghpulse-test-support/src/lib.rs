//! Shared test mocks and fixtures for the ghpulse workspace.

mod clock;
pub mod fixtures;
mod source;

pub use clock::FixedClock;
pub use source::{FailingEventSource, ScriptedEventSource};
