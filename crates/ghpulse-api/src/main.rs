//! ghpulse API server entry point.

use std::error::Error;
use std::sync::Arc;

use ghpulse_api::config::AppConfig;
use ghpulse_api::state::AppState;
use ghpulse_api::{routes, telemetry};
use ghpulse_core::clock::SystemClock;
use ghpulse_ingest::github::GitHubEventSource;
use ghpulse_ingest::poller::PollingIngestor;
use ghpulse_store::domain::event_store::EventStore;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = AppConfig::from_env()?;
    let tracer_provider = telemetry::init(config.otlp_endpoint.as_deref())?;

    tracing::info!(?config, "Starting ghpulse API server");

    let source = GitHubEventSource::new(
        config.github_api_url.as_str(),
        config.github_token.as_deref(),
        config.http_timeout,
    )?;
    let store = if config.dedup_events {
        EventStore::with_deduplication()
    } else {
        EventStore::new()
    };
    let ingestor = PollingIngestor::new(Arc::new(source), Arc::new(store))
        .with_interval(config.poll_interval);

    let app_state = AppState::new(ingestor, Arc::new(SystemClock));

    // TODO: Replace CorsLayer::permissive() with restricted origins for production.
    let app = routes::router()
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state);

    let addr = config.bind_addr()?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(provider) = tracer_provider {
        if let Err(e) = provider.shutdown() {
            tracing::warn!(error = %e, "tracer provider shutdown failed");
        }
    }

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }
    tracing::info!("Shutting down");
}
