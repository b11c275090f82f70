//! Live event feed over Server-Sent Events.
//!
//! Each connection starts its own ingestor loop; closing the connection
//! drops the receiver, which stops the loop.

use std::convert::Infallible;

use axum::extract::{Path, State};
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::{Router, routing::get};
use ghpulse_core::event::GitHubEvent;
use ghpulse_core::source::FeedScope;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tokio_stream::{Stream, StreamExt};
use tracing::{info, instrument};

use crate::state::AppState;

/// GET /stream
#[instrument(skip(state))]
async fn global_stream(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    info!("opening global event stream");
    sse(state.ingestor.subscribe(FeedScope::Global))
}

/// GET /stream/{owner}/{repo}
#[instrument(skip(state))]
async fn repository_stream(
    State(state): State<AppState>,
    Path((owner, repo)): Path<(String, String)>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    info!("opening repository event stream");
    sse(state.ingestor.subscribe(FeedScope::repository(owner, repo)))
}

fn sse(events: mpsc::Receiver<GitHubEvent>) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let stream = ReceiverStream::new(events).map(|event| {
        Ok(Event::default()
            .event(event.category().as_str())
            .data(event.raw().to_string()))
    });

    Sse::new(stream).keep_alive(KeepAlive::default())
}

/// Returns the live stream router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/stream", get(global_stream))
        .route("/stream/{owner}/{repo}", get(repository_stream))
}
