//! Pull-request cadence queries.

use axum::extract::{Path, State};
use axum::{Json, Router, routing::get};
use ghpulse_store::application::query_handlers::{self, PullRequestCadenceView};
use tracing::instrument;

use crate::error::ApiError;
use crate::state::AppState;

/// GET /pr-time/{repo_id}
#[instrument(skip(state))]
async fn cadence_by_id(
    State(state): State<AppState>,
    Path(repo_id): Path<u64>,
) -> Result<Json<PullRequestCadenceView>, ApiError> {
    Ok(Json(query_handlers::pull_request_cadence_by_id(
        &state.store,
        repo_id,
    )?))
}

/// GET /pr-time/{owner}/{repo}
#[instrument(skip(state))]
async fn cadence_by_name(
    State(state): State<AppState>,
    Path((owner, repo)): Path<(String, String)>,
) -> Result<Json<PullRequestCadenceView>, ApiError> {
    let repo_name = format!("{owner}/{repo}");
    Ok(Json(query_handlers::pull_request_cadence(
        &state.store,
        &repo_name,
    )?))
}

/// Returns the pull-request cadence router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/pr-time/{repo_id}", get(cadence_by_id))
        .route("/pr-time/{owner}/{repo}", get(cadence_by_name))
}
