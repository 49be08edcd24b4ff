pub mod category;
pub mod event;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /categories                          list with metrics, create
/// /categories/{name}                   delete
/// /categories/{name}/events            paginated, time-windowed events
/// /categories/{name}/has-events        existence poller
///
/// /events                              ingest
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/categories", category::router())
        .nest("/events", event::router())
}
