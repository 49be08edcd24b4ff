//! In-process [`EventStore`] with the same filter semantics as the
//! PostgreSQL adapter. Used by tests and local experiments.

use std::collections::HashSet;

use async_trait::async_trait;
use chrono::Utc;
use pingboard_core::error::CoreError;
use pingboard_core::types::{DbId, Timestamp};
use pingboard_db::models::category::{Category, CategoryWithCount};
use pingboard_db::models::event::{CategoryRef, Event, EventFilter, EventOrder, FindEvents};
use tokio::sync::RwLock;

use crate::store::{EventStore, StoreError};

#[derive(Debug, Default)]
struct Inner {
    categories: Vec<Category>,
    events: Vec<Event>,
    next_category_id: DbId,
    next_event_id: DbId,
}

impl Inner {
    fn resolve_category_id(&self, filter: &EventFilter) -> Option<DbId> {
        match &filter.category {
            CategoryRef::Id(id) => Some(*id),
            CategoryRef::Name(name) => self
                .categories
                .iter()
                .find(|c| c.user_id == filter.user_id && &c.name == name)
                .map(|c| c.id),
        }
    }

    /// Events matching `filter`, in insertion order.
    fn matching(&self, filter: &EventFilter) -> impl Iterator<Item = &Event> + '_ {
        let category_id = self.resolve_category_id(filter);
        let user_id = filter.user_id;
        let since = filter.created_since;
        self.events.iter().filter(move |e| {
            Some(e.category_id) == category_id
                && e.user_id == user_id
                && since.map_or(true, |start| e.created_at >= start)
        })
    }

    fn sorted(&self, filter: &EventFilter, order: EventOrder) -> Vec<&Event> {
        let mut events: Vec<&Event> = self.matching(filter).collect();
        events.sort_by_key(|e| (e.created_at, e.id));
        if order == EventOrder::NewestFirst {
            events.reverse();
        }
        events
    }
}

/// Thread-safe in-memory store.
#[derive(Debug, Default)]
pub struct MemoryEventStore {
    inner: RwLock<Inner>,
}

impl MemoryEventStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a category. `name` is stored as given.
    ///
    /// Fails with [`CoreError::Conflict`] if the user already owns `name`.
    pub async fn add_category(
        &self,
        user_id: DbId,
        name: &str,
        color: i32,
        emoji: Option<&str>,
    ) -> Result<Category, CoreError> {
        let mut inner = self.inner.write().await;
        if inner
            .categories
            .iter()
            .any(|c| c.user_id == user_id && c.name == name)
        {
            return Err(CoreError::Conflict(format!(
                "Category '{name}' already exists"
            )));
        }

        inner.next_category_id += 1;
        let now = Utc::now();
        let category = Category {
            id: inner.next_category_id,
            user_id,
            name: name.to_string(),
            color,
            emoji: emoji.map(str::to_string),
            created_at: now,
            updated_at: now,
        };
        inner.categories.push(category.clone());
        Ok(category)
    }

    /// Insert an event with an explicit timestamp. The owner is taken from
    /// the category.
    pub async fn add_event(
        &self,
        category_id: DbId,
        fields: serde_json::Value,
        created_at: Timestamp,
    ) -> Result<Event, CoreError> {
        let mut inner = self.inner.write().await;
        let user_id = inner
            .categories
            .iter()
            .find(|c| c.id == category_id)
            .map(|c| c.user_id)
            .ok_or_else(|| CoreError::category_not_found(category_id.to_string()))?;

        inner.next_event_id += 1;
        let event = Event {
            id: inner.next_event_id,
            category_id,
            user_id,
            fields,
            created_at,
        };
        inner.events.push(event.clone());
        Ok(event)
    }
}

#[async_trait]
impl EventStore for MemoryEventStore {
    async fn find_events(
        &self,
        filter: &EventFilter,
        options: &FindEvents,
    ) -> Result<Vec<Event>, StoreError> {
        let inner = self.inner.read().await;
        let skip = usize::try_from(options.skip.max(0)).unwrap_or(usize::MAX);
        let take = options
            .take
            .map(|t| usize::try_from(t.max(0)).unwrap_or(usize::MAX))
            .unwrap_or(usize::MAX);

        Ok(inner
            .sorted(filter, options.order)
            .into_iter()
            .skip(skip)
            .take(take)
            .cloned()
            .collect())
    }

    async fn find_payloads(
        &self,
        filter: &EventFilter,
        distinct: bool,
    ) -> Result<Vec<serde_json::Value>, StoreError> {
        let inner = self.inner.read().await;
        let payloads = inner.matching(filter).map(|e| e.fields.clone());
        if !distinct {
            return Ok(payloads.collect());
        }

        // serde_json::Value is not Hash; its canonical text is.
        let mut seen = HashSet::new();
        Ok(payloads.filter(|p| seen.insert(p.to_string())).collect())
    }

    async fn count_events(&self, filter: &EventFilter) -> Result<i64, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.matching(filter).count() as i64)
    }

    async fn find_first_created_at(
        &self,
        filter: &EventFilter,
        order: EventOrder,
    ) -> Result<Option<Timestamp>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.sorted(filter, order).first().map(|e| e.created_at))
    }

    async fn find_category(
        &self,
        name: &str,
        user_id: DbId,
    ) -> Result<Option<CategoryWithCount>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner
            .categories
            .iter()
            .find(|c| c.user_id == user_id && c.name == name)
            .map(|c| CategoryWithCount {
                category: c.clone(),
                event_count: inner.events.iter().filter(|e| e.category_id == c.id).count()
                    as i64,
            }))
    }
}
