//! Static landing page.

use axum::response::Html;
use axum::{Router, routing::get};

use crate::state::AppState;

const HOME_PAGE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>ghpulse</title>
</head>
<body>
  <h1>ghpulse</h1>
  <p>Live monitor for GitHub watch, pull request and issue activity.</p>
  <ul>
    <li><a href="/stats">/stats</a>: every recorded event keyed by timestamp</li>
    <li><a href="/chart">/chart</a>: events per minute</li>
    <li><code>/events/{minutes}</code>: events from the last N minutes</li>
    <li><code>/pr-time/{owner}/{repo}</code>: average time between pull requests</li>
    <li><code>/stream</code>: live event feed (Server-Sent Events)</li>
  </ul>
</body>
</html>
"#;

/// GET /
async fn home() -> Html<&'static str> {
    Html(HOME_PAGE)
}

/// Returns the home page router.
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(home))
}
