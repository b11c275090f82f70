//! GitHub events API client.

use std::time::Duration;

use async_trait::async_trait;
use ghpulse_core::error::DomainError;
use ghpulse_core::source::{EventSource, FeedScope};
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue};
use serde_json::Value;
use thiserror::Error;

/// Public GitHub REST API root.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Errors building a [`GitHubEventSource`].
#[derive(Debug, Error)]
pub enum SourceBuildError {
    /// The token contains characters not allowed in an HTTP header.
    #[error("GitHub token is not a valid header value")]
    InvalidToken,

    /// The HTTP client could not be constructed.
    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),
}

/// [`EventSource`] backed by the GitHub events API.
///
/// `Global` polls `GET /events`; `Repository` polls
/// `GET /repos/{owner}/{repo}/events`. No pagination state is kept.
#[derive(Debug, Clone)]
pub struct GitHubEventSource {
    client: reqwest::Client,
    base_url: String,
}

impl GitHubEventSource {
    /// Creates a source rooted at `base_url`, optionally authenticating with
    /// `token`. `timeout` bounds each request.
    ///
    /// # Errors
    ///
    /// Returns `SourceBuildError` if the token is not header-safe or the
    /// client cannot be built.
    pub fn new(
        base_url: impl Into<String>,
        token: Option<&str>,
        timeout: Duration,
    ) -> Result<Self, SourceBuildError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github+json"));
        if let Some(token) = token {
            let mut value = HeaderValue::from_str(&format!("Bearer {token}"))
                .map_err(|_| SourceBuildError::InvalidToken)?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let client = reqwest::Client::builder()
            .user_agent(concat!("ghpulse/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_owned(),
        })
    }

    /// The URL polled for `scope`.
    #[must_use]
    pub fn url_for(&self, scope: &FeedScope) -> String {
        match scope {
            FeedScope::Global => format!("{}/events", self.base_url),
            FeedScope::Repository { owner, repo } => {
                format!("{}/repos/{owner}/{repo}/events", self.base_url)
            }
        }
    }
}

#[async_trait]
impl EventSource for GitHubEventSource {
    async fn fetch_batch(&self, scope: &FeedScope) -> Result<Vec<Value>, DomainError> {
        let url = self.url_for(scope);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| DomainError::UpstreamUnavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DomainError::UpstreamUnavailable(format!("{url} answered {status}")));
        }

        match response.json::<Value>().await {
            Ok(Value::Array(records)) => Ok(records),
            Ok(_) => Err(DomainError::UpstreamUnavailable(format!(
                "{url} did not return an event list"
            ))),
            Err(e) => Err(DomainError::UpstreamUnavailable(e.to_string())),
        }
    }
}
