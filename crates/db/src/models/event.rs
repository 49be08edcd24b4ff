//! Event entity model, DTO and the filter shared by every event read.

use pingboard_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `events` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Event {
    pub id: DbId,
    pub category_id: DbId,
    pub user_id: DbId,
    /// Schema-less key/value payload. Normally a JSON object, but readers
    /// must not assume so.
    pub fields: serde_json::Value,
    pub created_at: Timestamp,
}

/// DTO for inserting an event.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateEvent {
    pub category_id: DbId,
    pub user_id: DbId,
    pub fields: serde_json::Value,
}

/// How an event read identifies its category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryRef {
    Id(DbId),
    /// Lowercase name, resolved within the filter's user.
    Name(String),
}

/// Predicate applied by every event read: category, owner, and an optional
/// inclusive lower bound on `created_at`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventFilter {
    pub category: CategoryRef,
    pub user_id: DbId,
    pub created_since: Option<Timestamp>,
}

impl EventFilter {
    pub fn by_id(user_id: DbId, category_id: DbId) -> Self {
        Self {
            category: CategoryRef::Id(category_id),
            user_id,
            created_since: None,
        }
    }

    pub fn by_name(user_id: DbId, name: impl Into<String>) -> Self {
        Self {
            category: CategoryRef::Name(name.into()),
            user_id,
            created_since: None,
        }
    }

    /// Restrict to events created at or after `start`.
    pub fn since(mut self, start: Timestamp) -> Self {
        self.created_since = Some(start);
        self
    }
}

/// Sort order on `created_at`, ties broken by `id` in the same direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EventOrder {
    #[default]
    NewestFirst,
    OldestFirst,
}

impl EventOrder {
    pub fn sql(self) -> &'static str {
        match self {
            EventOrder::NewestFirst => "e.created_at DESC, e.id DESC",
            EventOrder::OldestFirst => "e.created_at ASC, e.id ASC",
        }
    }
}

/// Ordering and slicing for [`crate::repositories::EventRepo::find`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FindEvents {
    pub order: EventOrder,
    /// Matching rows to skip.
    pub skip: i64,
    /// Maximum rows to return; `None` means all.
    pub take: Option<i64>,
}
