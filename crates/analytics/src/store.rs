//! The storage seam used by every analytics operation.

use async_trait::async_trait;
use pingboard_core::types::{DbId, Timestamp};
use pingboard_db::models::category::CategoryWithCount;
use pingboard_db::models::event::{Event, EventFilter, EventOrder, FindEvents};

/// Failure reported by an [`EventStore`].
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Read-only queries over categories and their events.
///
/// Implementations must be safe to call concurrently from one task: the
/// analytics operations issue several reads at once and join them.
#[async_trait]
pub trait EventStore: Send + Sync {
    /// Matching events, ordered and sliced per `options`.
    async fn find_events(
        &self,
        filter: &EventFilter,
        options: &FindEvents,
    ) -> Result<Vec<Event>, StoreError>;

    /// Only the `fields` payloads of matching events. With `distinct`, the
    /// store drops payloads equal to one already returned.
    async fn find_payloads(
        &self,
        filter: &EventFilter,
        distinct: bool,
    ) -> Result<Vec<serde_json::Value>, StoreError>;

    async fn count_events(&self, filter: &EventFilter) -> Result<i64, StoreError>;

    /// `created_at` of the first matching event in `order`.
    async fn find_first_created_at(
        &self,
        filter: &EventFilter,
        order: EventOrder,
    ) -> Result<Option<Timestamp>, StoreError>;

    /// A user's category by name, with its all-time event count.
    async fn find_category(
        &self,
        name: &str,
        user_id: DbId,
    ) -> Result<Option<CategoryWithCount>, StoreError>;
}
