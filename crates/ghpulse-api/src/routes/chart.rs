//! Events-per-minute chart.

use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;
use axum::{Router, routing::get};
use ghpulse_store::application::query_handlers;
use tracing::instrument;

use crate::error::ApiError;
use crate::state::AppState;

/// GET /chart
#[instrument(skip(state))]
async fn chart(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let snapshot = query_handlers::snapshot(&state.store);
    let png = ghpulse_chart::render_event_chart(&snapshot)?;

    Ok(([(header::CONTENT_TYPE, "image/png")], png))
}

/// Returns the chart router.
pub fn router() -> Router<AppState> {
    Router::new().route("/chart", get(chart))
}
