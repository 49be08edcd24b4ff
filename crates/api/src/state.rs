use std::sync::Arc;

use pingboard_analytics::EventStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheap to clone: everything is behind `Arc` or already reference-counted.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool, used for category and event writes.
    pub pool: pingboard_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Read side for the analytics operations.
    pub store: Arc<dyn EventStore>,
}
