//! Route definitions for categories, mounted at `/categories`.

use axum::routing::{delete, get};
use axum::Router;

use crate::handlers::{category, event};
use crate::state::AppState;

/// ```text
/// GET    /                      -> list_categories
/// POST   /                      -> create_category
/// DELETE /{name}                -> delete_category
/// GET    /{name}/events         -> list_events
/// GET    /{name}/has-events     -> category_has_events
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(category::list_categories).post(category::create_category),
        )
        .route("/{name}", delete(category::delete_category))
        .route("/{name}/events", get(event::list_events))
        .route("/{name}/has-events", get(event::category_has_events))
}
