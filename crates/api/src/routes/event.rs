//! Route definitions for event ingestion, mounted at `/events`.

use axum::routing::post;
use axum::Router;

use crate::handlers::event;
use crate::state::AppState;

/// ```text
/// POST   /                      -> ingest_event
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", post(event::ingest_event))
}
