//! Ingestion and store status.

use axum::extract::State;
use axum::{Json, Router, routing::get};
use ghpulse_ingest::stats::IngestStatsSnapshot;
use ghpulse_store::application::query_handlers::{self, StoreSummaryView};
use serde::Serialize;
use tracing::instrument;

use crate::state::AppState;

/// Status response.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    /// Counters across every ingestor loop since startup.
    pub ingest: IngestStatsSnapshot,
    /// Current store sizes.
    pub store: StoreSummaryView,
}

/// GET /status
#[instrument(skip(state))]
async fn status(State(state): State<AppState>) -> Json<StatusResponse> {
    Json(StatusResponse {
        ingest: state.ingestor.stats(),
        store: query_handlers::store_summary(&state.store),
    })
}

/// Returns the status router.
pub fn router() -> Router<AppState> {
    Router::new().route("/status", get(status))
}
