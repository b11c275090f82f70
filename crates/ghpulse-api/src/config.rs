//! Environment-driven server configuration.

use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use ghpulse_ingest::github::DEFAULT_API_URL;

use crate::error::AppError;

/// Settings read once at startup.
#[derive(Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Interface to bind (`HOST`).
    pub host: String,
    /// Port to bind (`PORT`).
    pub port: u16,
    /// GitHub REST API root (`GITHUB_API_URL`).
    pub github_api_url: String,
    /// Optional upstream token (`GITHUB_TOKEN`).
    pub github_token: Option<String>,
    /// Pause between upstream fetches (`GHPULSE_POLL_INTERVAL_SECS`).
    pub poll_interval: Duration,
    /// Per-request upstream timeout (`GHPULSE_HTTP_TIMEOUT_SECS`).
    pub http_timeout: Duration,
    /// Skip repeat deliveries by upstream id (`GHPULSE_DEDUP_EVENTS`).
    pub dedup_events: bool,
    /// OTLP collector for span export (`OTEL_EXPORTER_OTLP_ENDPOINT`).
    pub otlp_endpoint: Option<String>,
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("github_api_url", &self.github_api_url)
            .field("github_token", &self.github_token.as_ref().map(|_| "<redacted>"))
            .field("poll_interval", &self.poll_interval)
            .field("http_timeout", &self.http_timeout)
            .field("dedup_events", &self.dedup_events)
            .field("otlp_endpoint", &self.otlp_endpoint)
            .finish()
    }
}

impl AppConfig {
    /// Reads the configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` naming the first invalid variable.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the configuration through `lookup`, which returns a variable's
    /// value or `None` when unset.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` naming the first invalid variable.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let poll_secs: u64 = parse_var(&lookup, "GHPULSE_POLL_INTERVAL_SECS", 5)?;
        if poll_secs == 0 {
            return Err(AppError::Config(
                "GHPULSE_POLL_INTERVAL_SECS must be at least 1".into(),
            ));
        }
        let timeout_secs: u64 = parse_var(&lookup, "GHPULSE_HTTP_TIMEOUT_SECS", 30)?;

        Ok(Self {
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parse_var(&lookup, "PORT", 3000)?,
            github_api_url: lookup("GITHUB_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            github_token: lookup("GITHUB_TOKEN").filter(|t| !t.is_empty()),
            poll_interval: Duration::from_secs(poll_secs),
            http_timeout: Duration::from_secs(timeout_secs),
            dedup_events: parse_flag(&lookup, "GHPULSE_DEDUP_EVENTS")?,
            otlp_endpoint: lookup("OTEL_EXPORTER_OTLP_ENDPOINT").filter(|e| !e.is_empty()),
        })
    }

    /// The socket address to listen on.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if `HOST:PORT` is not a socket address.
    pub fn bind_addr(&self) -> Result<SocketAddr, AppError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| AppError::Config(format!("invalid HOST:PORT combination: {e}")))
    }
}

fn parse_var<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T, AppError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| AppError::Config(format!("{key} is invalid: {e}"))),
        None => Ok(default),
    }
}

fn parse_flag(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<bool, AppError> {
    match lookup(key).as_deref().map(str::trim) {
        None | Some("") => Ok(false),
        Some(v) if ["1", "true", "yes", "on"].iter().any(|t| v.eq_ignore_ascii_case(t)) => Ok(true),
        Some(v) if ["0", "false", "no", "off"].iter().any(|f| v.eq_ignore_ascii_case(f)) => Ok(false),
        Some(v) => Err(AppError::Config(format!("{key} must be a boolean, got '{v}'"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<AppConfig, AppError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_when_environment_is_empty() {
        let config = config_from(&[]).unwrap();

        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 3000);
        assert_eq!(config.github_api_url, "https://api.github.com");
        assert_eq!(config.github_token, None);
        assert_eq!(config.poll_interval, Duration::from_secs(5));
        assert_eq!(config.http_timeout, Duration::from_secs(30));
        assert!(!config.dedup_events);
        assert_eq!(config.otlp_endpoint, None);
    }

    #[test]
    fn test_reads_overrides() {
        let config = config_from(&[
            ("HOST", "127.0.0.1"),
            ("PORT", "8080"),
            ("GITHUB_TOKEN", "s3cret"),
            ("GHPULSE_POLL_INTERVAL_SECS", "60"),
            ("GHPULSE_DEDUP_EVENTS", "TRUE"),
        ])
        .unwrap();

        assert_eq!(config.bind_addr().unwrap(), "127.0.0.1:8080".parse().unwrap());
        assert_eq!(config.github_token.as_deref(), Some("s3cret"));
        assert_eq!(config.poll_interval, Duration::from_secs(60));
        assert!(config.dedup_events);
    }

    #[test]
    fn test_rejects_invalid_port() {
        let err = config_from(&[("PORT", "http")]).unwrap_err();

        assert!(err.to_string().contains("PORT"));
    }

    #[test]
    fn test_rejects_zero_poll_interval() {
        let err = config_from(&[("GHPULSE_POLL_INTERVAL_SECS", "0")]).unwrap_err();

        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn test_rejects_non_boolean_flag() {
        let err = config_from(&[("GHPULSE_DEDUP_EVENTS", "maybe")]).unwrap_err();

        assert!(err.to_string().contains("GHPULSE_DEDUP_EVENTS"));
    }

    #[test]
    fn test_debug_redacts_token() {
        let config = config_from(&[("GITHUB_TOKEN", "s3cret")]).unwrap();

        assert!(!format!("{config:?}").contains("s3cret"));
    }
}
