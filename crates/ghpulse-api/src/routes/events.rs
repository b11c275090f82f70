//! Rolling-window event query.

use axum::extract::{Path, State};
use axum::{Json, Router, routing::get};
use ghpulse_core::event::GitHubEvent;
use ghpulse_store::application::query_handlers;
use tracing::instrument;

use crate::state::AppState;

/// GET /events/{minutes}
///
/// Events keyed strictly after `now - minutes`, oldest first.
#[instrument(skip(state))]
async fn events_since(
    State(state): State<AppState>,
    Path(minutes): Path<i64>,
) -> Json<Vec<GitHubEvent>> {
    Json(query_handlers::events_since(
        &state.store,
        minutes,
        state.clock.as_ref(),
    ))
}

/// Returns the rolling-window router.
pub fn router() -> Router<AppState> {
    Router::new().route("/events/{minutes}", get(events_since))
}
