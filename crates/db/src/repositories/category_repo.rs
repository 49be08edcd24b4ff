//! Repository for the `categories` table.

use pingboard_core::types::DbId;
use sqlx::PgPool;

use crate::models::category::{Category, CategoryWithCount, CreateCategory};

/// Column list for `categories` queries.
const COLUMNS: &str = "id, user_id, name, color, emoji, created_at, updated_at";

/// Provides create/read/delete operations for categories. Every lookup is
/// scoped to the owning user.
pub struct CategoryRepo;

impl CategoryRepo {
    /// Insert a new category.
    ///
    /// Fails with a unique violation on `uq_categories_user_id_name` if the
    /// user already owns a category with this name.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        input: &CreateCategory,
    ) -> Result<Category, sqlx::Error> {
        let query = format!(
            "INSERT INTO categories (user_id, name, color, emoji) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Category>(&query)
            .bind(user_id)
            .bind(&input.name)
            .bind(input.color)
            .bind(input.emoji.as_deref())
            .fetch_one(pool)
            .await
    }

    /// Find a user's category by name.
    pub async fn find_by_name(
        pool: &PgPool,
        user_id: DbId,
        name: &str,
    ) -> Result<Option<Category>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM categories WHERE user_id = $1 AND name = $2");
        sqlx::query_as::<_, Category>(&query)
            .bind(user_id)
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    /// Find a user's category by name along with its total event count.
    pub async fn find_by_name_with_count(
        pool: &PgPool,
        user_id: DbId,
        name: &str,
    ) -> Result<Option<CategoryWithCount>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS}, \
                    (SELECT COUNT(*) FROM events e WHERE e.category_id = categories.id) \
                        AS event_count \
             FROM categories \
             WHERE user_id = $1 AND name = $2"
        );
        sqlx::query_as::<_, CategoryWithCount>(&query)
            .bind(user_id)
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    /// List every category owned by a user, alphabetically.
    pub async fn list_by_user(pool: &PgPool, user_id: DbId) -> Result<Vec<Category>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM categories WHERE user_id = $1 ORDER BY name");
        sqlx::query_as::<_, Category>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Delete a user's category by name. Its events go with it
    /// (`ON DELETE CASCADE`).
    ///
    /// Returns `true` if a row was removed.
    pub async fn delete_by_name(
        pool: &PgPool,
        user_id: DbId,
        name: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM categories WHERE user_id = $1 AND name = $2")
            .bind(user_id)
            .bind(name)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
