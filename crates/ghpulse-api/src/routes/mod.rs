//! Route modules, one per resource.

use axum::Router;

use crate::state::AppState;

pub mod categories;
pub mod chart;
pub mod events;
pub mod health;
pub mod home;
pub mod pull_requests;
pub mod stats;
pub mod status;
pub mod stream;

/// Returns the full application router, without state or layers.
pub fn router() -> Router<AppState> {
    Router::new()
        .merge(home::router())
        .merge(health::router())
        .merge(events::router())
        .merge(stats::router())
        .merge(categories::router())
        .merge(pull_requests::router())
        .merge(chart::router())
        .merge(status::router())
        .merge(stream::router())
}
