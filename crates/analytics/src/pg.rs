//! PostgreSQL-backed [`EventStore`].

use async_trait::async_trait;
use pingboard_core::types::{DbId, Timestamp};
use pingboard_db::models::category::CategoryWithCount;
use pingboard_db::models::event::{Event, EventFilter, EventOrder, FindEvents};
use pingboard_db::repositories::{CategoryRepo, EventRepo};
use pingboard_db::DbPool;

use crate::store::{EventStore, StoreError};

/// Delegates every read to the `pingboard-db` repositories. Cloning is
/// cheap; the pool is reference-counted.
#[derive(Debug, Clone)]
pub struct PgEventStore {
    pool: DbPool,
}

impl PgEventStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EventStore for PgEventStore {
    async fn find_events(
        &self,
        filter: &EventFilter,
        options: &FindEvents,
    ) -> Result<Vec<Event>, StoreError> {
        Ok(EventRepo::find(&self.pool, filter, options).await?)
    }

    async fn find_payloads(
        &self,
        filter: &EventFilter,
        distinct: bool,
    ) -> Result<Vec<serde_json::Value>, StoreError> {
        Ok(EventRepo::find_payloads(&self.pool, filter, distinct).await?)
    }

    async fn count_events(&self, filter: &EventFilter) -> Result<i64, StoreError> {
        Ok(EventRepo::count(&self.pool, filter).await?)
    }

    async fn find_first_created_at(
        &self,
        filter: &EventFilter,
        order: EventOrder,
    ) -> Result<Option<Timestamp>, StoreError> {
        Ok(EventRepo::first_created_at(&self.pool, filter, order).await?)
    }

    async fn find_category(
        &self,
        name: &str,
        user_id: DbId,
    ) -> Result<Option<CategoryWithCount>, StoreError> {
        Ok(CategoryRepo::find_by_name_with_count(&self.pool, user_id, name).await?)
    }
}
