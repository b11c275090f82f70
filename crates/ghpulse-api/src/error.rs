//! ghpulse: API error types.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use ghpulse_chart::ChartError;
use ghpulse_core::error::DomainError;
use ghpulse_ingest::github::SourceBuildError;
use serde::Serialize;
use thiserror::Error;

/// Startup and runtime errors for the API server.
#[derive(Debug, Error)]
pub enum AppError {
    /// An environment variable is invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// The tracing pipeline could not be installed.
    #[error("telemetry error: {0}")]
    Telemetry(String),

    /// The upstream client could not be built.
    #[error("upstream client error: {0}")]
    Upstream(#[from] SourceBuildError),

    /// Network binding or I/O error.
    #[error("server error: {0}")]
    Server(#[from] std::io::Error),
}

/// JSON body returned for error responses.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Machine-readable error code.
    pub error: &'static str,
    /// Human-readable error message.
    pub message: String,
}

/// HTTP-layer error that implements `IntoResponse`.
#[derive(Debug)]
pub enum ApiError {
    /// A query-time domain error.
    Domain(DomainError),
    /// The chart could not be rendered.
    Chart(ChartError),
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self::Domain(err)
    }
}

impl From<ChartError> for ApiError {
    fn from(err: ChartError) -> Self {
        Self::Chart(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match &self {
            Self::Domain(err) => {
                let (status, code) = match err {
                    DomainError::RepositoryNotFound(_) => {
                        (StatusCode::NOT_FOUND, "repository_not_found")
                    }
                    DomainError::UnknownRepositoryId(_) => {
                        (StatusCode::NOT_FOUND, "unknown_repository_id")
                    }
                    DomainError::Validation(_) => (StatusCode::BAD_REQUEST, "validation_error"),
                    DomainError::UpstreamUnavailable(_) => {
                        (StatusCode::BAD_GATEWAY, "upstream_unavailable")
                    }
                };
                (status, code, err.to_string())
            }
            Self::Chart(err) => (StatusCode::INTERNAL_SERVER_ERROR, "chart_error", err.to_string()),
        };

        let body = ErrorBody {
            error: error_code,
            message,
        };

        (status, Json(body)).into_response()
    }
}
