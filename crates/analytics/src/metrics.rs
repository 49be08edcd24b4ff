//! Per-category summary metrics.
//!
//! A snapshot is a read-time projection: recomputed on every call, never
//! cached, correct as of the moment its reads ran.

use futures::stream::{self, StreamExt, TryStreamExt};
use pingboard_core::field_set::distinct_field_count;
use pingboard_core::time_window::start_of_month;
use pingboard_core::types::Timestamp;
use pingboard_db::models::category::Category;
use pingboard_db::models::event::{EventFilter, EventOrder};
use serde::Serialize;

use crate::error::AnalyticsError;
use crate::store::EventStore;

/// Store reads [`compute_metrics`] keeps in flight for a single category.
pub const READS_PER_CATEGORY: usize = 3;

/// Summary of one category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricsSnapshot {
    pub category: Category,
    /// Distinct top-level field names across this month's events.
    pub unique_field_count: usize,
    /// Events created since the start of the current month.
    pub event_count: i64,
    /// `created_at` of the category's earliest event ever, if any.
    pub last_ping: Option<Timestamp>,
}

/// Compute the snapshot for one category.
///
/// Issues three reads concurrently and joins them; if any fails the whole
/// snapshot fails and the other reads are dropped.
pub async fn compute_metrics<S>(
    store: &S,
    category: &Category,
    now: Timestamp,
) -> Result<MetricsSnapshot, AnalyticsError>
where
    S: EventStore + ?Sized,
{
    let all_time = EventFilter::by_id(category.user_id, category.id);
    let this_month = all_time.clone().since(start_of_month(now));

    let (payloads, event_count, last_ping) = tokio::try_join!(
        store.find_payloads(&this_month, true),
        store.count_events(&this_month),
        store.find_first_created_at(&all_time, EventOrder::OldestFirst),
    )?;

    let unique_field_count = distinct_field_count(&payloads);

    tracing::debug!(
        category_id = category.id,
        category = %category.name,
        event_count,
        unique_field_count,
        "Computed category metrics",
    );

    Ok(MetricsSnapshot {
        category: category.clone(),
        unique_field_count,
        event_count,
        last_ping,
    })
}

/// Compute snapshots for many categories.
///
/// Categories are independent, so up to `concurrency` of them are in flight
/// at once (each with its own three-read fan-out). Results keep the input
/// order. The first failure aborts the rest.
pub async fn compute_metrics_for_categories<S>(
    store: &S,
    categories: &[Category],
    now: Timestamp,
    concurrency: usize,
) -> Result<Vec<MetricsSnapshot>, AnalyticsError>
where
    S: EventStore + ?Sized,
{
    stream::iter(categories)
        .map(|category| compute_metrics(store, category, now))
        .buffered(concurrency.max(1))
        .boxed()
        .try_collect()
        .await
}
