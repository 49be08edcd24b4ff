//! Category entity model and DTOs.

use pingboard_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `categories` table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct Category {
    pub id: DbId,
    pub user_id: DbId,
    /// Lowercase, unique per user.
    pub name: String,
    /// Packed 24-bit RGB (`0xff6b6b`).
    pub color: i32,
    pub emoji: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A category together with the number of events it owns.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct CategoryWithCount {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub category: Category,
    pub event_count: i64,
}

/// DTO for inserting a category. `name` must already be normalized and
/// `color` already packed.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCategory {
    pub name: String,
    pub color: i32,
    pub emoji: Option<String>,
}
