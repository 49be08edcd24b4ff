//! Repository for the `events` table.
//!
//! Every read takes an [`EventFilter`]. Its four parameters always bind to
//! `$1..$4` in the same order, so the WHERE clause is a constant.

use pingboard_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::event::{CategoryRef, CreateEvent, Event, EventFilter, EventOrder, FindEvents};

/// Column list for `events` queries.
const EVENT_COLUMNS: &str = "e.id, e.category_id, e.user_id, e.fields, e.created_at";

/// Shared predicate. `$2` (category id) wins when set; otherwise the
/// category is resolved by `$3` (name) within user `$1`.
const FILTER_WHERE: &str = "\
    WHERE e.user_id = $1 \
      AND e.category_id = COALESCE( \
            $2::bigint, \
            (SELECT c.id FROM categories c WHERE c.user_id = $1 AND c.name = $3::text)) \
      AND ($4::timestamptz IS NULL OR e.created_at >= $4::timestamptz)";

/// Filter values in bind order.
fn filter_args(filter: &EventFilter) -> (DbId, Option<DbId>, Option<&str>, Option<Timestamp>) {
    let (id, name) = match &filter.category {
        CategoryRef::Id(id) => (Some(*id), None),
        CategoryRef::Name(name) => (None, Some(name.as_str())),
    };
    (filter.user_id, id, name, filter.created_since)
}

/// Provides insert and filtered read operations for events.
pub struct EventRepo;

impl EventRepo {
    /// Insert a new event row.
    pub async fn insert(pool: &PgPool, input: &CreateEvent) -> Result<Event, sqlx::Error> {
        sqlx::query_as::<_, Event>(
            "INSERT INTO events (category_id, user_id, fields) \
             VALUES ($1, $2, $3) \
             RETURNING id, category_id, user_id, fields, created_at",
        )
        .bind(input.category_id)
        .bind(input.user_id)
        .bind(&input.fields)
        .fetch_one(pool)
        .await
    }

    /// Matching events, ordered and sliced per `options`.
    pub async fn find(
        pool: &PgPool,
        filter: &EventFilter,
        options: &FindEvents,
    ) -> Result<Vec<Event>, sqlx::Error> {
        let (user_id, category_id, name, since) = filter_args(filter);
        let query = format!(
            "SELECT {EVENT_COLUMNS} FROM events e {FILTER_WHERE} \
             ORDER BY {order} \
             LIMIT $5 OFFSET $6",
            order = options.order.sql(),
        );
        sqlx::query_as::<_, Event>(&query)
            .bind(user_id)
            .bind(category_id)
            .bind(name)
            .bind(since)
            .bind(options.take)
            .bind(options.skip.max(0))
            .fetch_all(pool)
            .await
    }

    /// Only the `fields` payloads of matching events, optionally
    /// deduplicated by full JSONB equality.
    pub async fn find_payloads(
        pool: &PgPool,
        filter: &EventFilter,
        distinct: bool,
    ) -> Result<Vec<serde_json::Value>, sqlx::Error> {
        let (user_id, category_id, name, since) = filter_args(filter);
        let select = if distinct {
            "SELECT DISTINCT e.fields"
        } else {
            "SELECT e.fields"
        };
        let query = format!("{select} FROM events e {FILTER_WHERE}");
        sqlx::query_scalar::<_, serde_json::Value>(&query)
            .bind(user_id)
            .bind(category_id)
            .bind(name)
            .bind(since)
            .fetch_all(pool)
            .await
    }

    /// Count matching events.
    pub async fn count(pool: &PgPool, filter: &EventFilter) -> Result<i64, sqlx::Error> {
        let (user_id, category_id, name, since) = filter_args(filter);
        let query = format!("SELECT COUNT(*) FROM events e {FILTER_WHERE}");
        sqlx::query_scalar::<_, i64>(&query)
            .bind(user_id)
            .bind(category_id)
            .bind(name)
            .bind(since)
            .fetch_one(pool)
            .await
    }

    /// `created_at` of the first matching event in `order`, if any.
    pub async fn first_created_at(
        pool: &PgPool,
        filter: &EventFilter,
        order: EventOrder,
    ) -> Result<Option<Timestamp>, sqlx::Error> {
        let (user_id, category_id, name, since) = filter_args(filter);
        let query = format!(
            "SELECT e.created_at FROM events e {FILTER_WHERE} \
             ORDER BY {order} \
             LIMIT 1",
            order = order.sql(),
        );
        sqlx::query_scalar::<_, Timestamp>(&query)
            .bind(user_id)
            .bind(category_id)
            .bind(name)
            .bind(since)
            .fetch_optional(pool)
            .await
    }
}
