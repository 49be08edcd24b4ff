//! Store wrappers for exercising failure and concurrency behaviour.

use async_trait::async_trait;
use pingboard_core::types::{DbId, Timestamp};
use pingboard_db::models::category::CategoryWithCount;
use pingboard_db::models::event::{Event, EventFilter, EventOrder, FindEvents};
use tokio::sync::Barrier;

use crate::memory::MemoryEventStore;
use crate::store::{EventStore, StoreError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreOp {
    FindEvents,
    FindPayloads,
    CountEvents,
    FirstCreatedAt,
    FindCategory,
}

/// Delegates to a memory store but fails one kind of read.
pub struct FailingStore {
    pub inner: MemoryEventStore,
    pub fail_on: StoreOp,
}

impl FailingStore {
    fn check(&self, op: StoreOp) -> Result<(), StoreError> {
        if op == self.fail_on {
            return Err(StoreError::Unavailable(format!("injected failure in {op:?}")));
        }
        Ok(())
    }
}

#[async_trait]
impl EventStore for FailingStore {
    async fn find_events(
        &self,
        filter: &EventFilter,
        options: &FindEvents,
    ) -> Result<Vec<Event>, StoreError> {
        self.check(StoreOp::FindEvents)?;
        self.inner.find_events(filter, options).await
    }

    async fn find_payloads(
        &self,
        filter: &EventFilter,
        distinct: bool,
    ) -> Result<Vec<serde_json::Value>, StoreError> {
        self.check(StoreOp::FindPayloads)?;
        self.inner.find_payloads(filter, distinct).await
    }

    async fn count_events(&self, filter: &EventFilter) -> Result<i64, StoreError> {
        self.check(StoreOp::CountEvents)?;
        self.inner.count_events(filter).await
    }

    async fn find_first_created_at(
        &self,
        filter: &EventFilter,
        order: EventOrder,
    ) -> Result<Option<Timestamp>, StoreError> {
        self.check(StoreOp::FirstCreatedAt)?;
        self.inner.find_first_created_at(filter, order).await
    }

    async fn find_category(
        &self,
        name: &str,
        user_id: DbId,
    ) -> Result<Option<CategoryWithCount>, StoreError> {
        self.check(StoreOp::FindCategory)?;
        self.inner.find_category(name, user_id).await
    }
}

/// Every event read blocks until `parties` reads are in flight at once.
/// Sequential callers deadlock, so tests wrap calls in a timeout.
pub struct RendezvousStore {
    pub inner: MemoryEventStore,
    barrier: Barrier,
}

impl RendezvousStore {
    pub fn new(inner: MemoryEventStore, parties: usize) -> Self {
        Self {
            inner,
            barrier: Barrier::new(parties),
        }
    }
}

#[async_trait]
impl EventStore for RendezvousStore {
    async fn find_events(
        &self,
        filter: &EventFilter,
        options: &FindEvents,
    ) -> Result<Vec<Event>, StoreError> {
        self.barrier.wait().await;
        self.inner.find_events(filter, options).await
    }

    async fn find_payloads(
        &self,
        filter: &EventFilter,
        distinct: bool,
    ) -> Result<Vec<serde_json::Value>, StoreError> {
        self.barrier.wait().await;
        self.inner.find_payloads(filter, distinct).await
    }

    async fn count_events(&self, filter: &EventFilter) -> Result<i64, StoreError> {
        self.barrier.wait().await;
        self.inner.count_events(filter).await
    }

    async fn find_first_created_at(
        &self,
        filter: &EventFilter,
        order: EventOrder,
    ) -> Result<Option<Timestamp>, StoreError> {
        self.barrier.wait().await;
        self.inner.find_first_created_at(filter, order).await
    }

    async fn find_category(
        &self,
        name: &str,
        user_id: DbId,
    ) -> Result<Option<CategoryWithCount>, StoreError> {
        self.inner.find_category(name, user_id).await
    }
}
