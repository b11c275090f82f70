//! Test sources: mock `EventSource` implementations for tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use ghpulse_core::error::DomainError;
use ghpulse_core::source::{EventSource, FeedScope};
use serde_json::Value;

/// A source that replays scripted fetch results in order and records every
/// scope it was asked for. Once the script is exhausted it keeps returning
/// empty batches.
#[derive(Debug, Default)]
pub struct ScriptedEventSource {
    script: Mutex<VecDeque<Result<Vec<Value>, DomainError>>>,
    requested: Mutex<Vec<FeedScope>>,
}

impl ScriptedEventSource {
    /// Create a source that returns each entry of `script` on successive
    /// calls.
    #[must_use]
    pub fn new(script: Vec<Result<Vec<Value>, DomainError>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            requested: Mutex::new(Vec::new()),
        }
    }

    /// Create a source whose first fetch returns `batch`.
    #[must_use]
    pub fn single_batch(batch: Vec<Value>) -> Self {
        Self::new(vec![Ok(batch)])
    }

    /// Returns every scope fetched so far.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn requested_scopes(&self) -> Vec<FeedScope> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait]
impl EventSource for ScriptedEventSource {
    async fn fetch_batch(&self, scope: &FeedScope) -> Result<Vec<Value>, DomainError> {
        self.requested.lock().unwrap().push(scope.clone());
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(Vec::new()))
    }
}

/// A source that always fails as if the upstream were down.
#[derive(Debug)]
pub struct FailingEventSource;

#[async_trait]
impl EventSource for FailingEventSource {
    async fn fetch_batch(&self, _scope: &FeedScope) -> Result<Vec<Value>, DomainError> {
        Err(DomainError::UpstreamUnavailable("503 Service Unavailable".into()))
    }
}
