//! Category index query.

use axum::extract::{Path, State};
use axum::{Json, Router, routing::get};
use ghpulse_core::error::DomainError;
use ghpulse_core::event::{EventCategory, GitHubEvent};
use ghpulse_store::application::query_handlers;
use tracing::instrument;

use crate::error::ApiError;
use crate::state::AppState;

/// GET /categories/{category}
///
/// `category` is an upstream type name such as `WatchEvent`.
#[instrument(skip(state))]
async fn events_in_category(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> Result<Json<Vec<GitHubEvent>>, ApiError> {
    let category: EventCategory = category
        .parse::<EventCategory>()
        .map_err(|e| DomainError::Validation(e.to_string()))?;

    Ok(Json(query_handlers::events_by_category(&state.store, category)))
}

/// Returns the category index router.
pub fn router() -> Router<AppState> {
    Router::new().route("/categories/{category}", get(events_in_category))
}
