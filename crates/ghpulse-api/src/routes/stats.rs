//! Full store snapshot.

use std::collections::BTreeMap;

use axum::extract::State;
use axum::{Json, Router, routing::get};
use ghpulse_core::event::GitHubEvent;
use ghpulse_store::application::query_handlers;
use ghpulse_store::domain::timestamp_key::TimestampKey;
use tracing::instrument;

use crate::state::AppState;

/// GET /stats
#[instrument(skip(state))]
async fn stats(State(state): State<AppState>) -> Json<BTreeMap<TimestampKey, GitHubEvent>> {
    Json(query_handlers::snapshot(&state.store))
}

/// Returns the snapshot router.
pub fn router() -> Router<AppState> {
    Router::new().route("/stats", get(stats))
}
