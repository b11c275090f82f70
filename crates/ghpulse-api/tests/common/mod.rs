//! Shared test helpers for API integration tests.
#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use ghpulse_core::clock::Clock;
use ghpulse_core::source::EventSource;
use ghpulse_ingest::poller::PollingIngestor;
use ghpulse_store::domain::event_store::EventStore;
use ghpulse_test_support::{FixedClock, fixtures};
use http_body_util::BodyExt;
use tower::ServiceExt;

use ghpulse_api::routes;
use ghpulse_api::state::AppState;

/// Poll interval used by every test ingestor.
pub const TEST_POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Fixed "now" used across all integration tests: 12:00:00 on the fixture day.
fn fixed_clock() -> Arc<dyn Clock + Send + Sync> {
    Arc::new(FixedClock(fixtures::instant(12, 0, 0)))
}

/// Build the full app router over `source` and a fresh store. Uses the same
/// route structure as `main.rs`.
pub fn build_test_app(source: Arc<dyn EventSource>) -> Router {
    build_test_app_with_store(source, Arc::new(EventStore::new()))
}

/// Build the full app router over `source` and the given `store`.
pub fn build_test_app_with_store(source: Arc<dyn EventSource>, store: Arc<EventStore>) -> Router {
    let ingestor = PollingIngestor::new(source, store).with_interval(TEST_POLL_INTERVAL);
    let app_state = AppState::new(ingestor, fixed_clock());

    routes::router().with_state(app_state)
}

/// Send a GET request and return the response.
pub async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

/// Open an SSE stream at `uri` and return its body.
pub async fn open_stream(app: Router, uri: &str) -> Body {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["content-type"], "text/event-stream");

    response.into_body()
}

/// Read the next SSE frame from `body`, failing after five seconds.
pub async fn next_sse_frame(body: &mut Body) -> String {
    let frame = tokio::time::timeout(Duration::from_secs(5), body.frame())
        .await
        .expect("SSE frame within timeout")
        .expect("stream still open")
        .unwrap();
    let data = frame.into_data().unwrap();

    String::from_utf8(data.to_vec()).unwrap()
}

/// The `data:` line of an SSE frame, parsed as JSON.
pub fn sse_data(frame: &str) -> serde_json::Value {
    let data = frame
        .lines()
        .find_map(|line| line.strip_prefix("data: "))
        .expect("frame has a data line");

    serde_json::from_str(data).unwrap()
}
