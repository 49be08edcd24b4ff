//! Paginated, time-windowed event listing for one category.

use pingboard_core::field_set::distinct_field_count;
use pingboard_core::pagination::PageRequest;
use pingboard_core::time_window::{self, TimeRange};
use pingboard_core::types::{DbId, Timestamp};
use pingboard_db::models::event::{Event, EventFilter, EventOrder, FindEvents};
use serde::Serialize;

use crate::error::AnalyticsError;
use crate::store::EventStore;

/// What to list. `page` is trusted to be within bounds; see
/// [`PageRequest::new`].
#[derive(Debug, Clone)]
pub struct EventQuery {
    pub user_id: DbId,
    /// Normalized category name.
    pub category: String,
    pub page: PageRequest,
    pub time_range: TimeRange,
}

/// One page of events plus totals over the whole window.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventPage {
    /// Newest first.
    pub events: Vec<Event>,
    /// Events in the window, regardless of page.
    pub total_count: i64,
    /// Distinct field names across every event in the window, not just
    /// this page.
    pub unique_field_count: usize,
}

/// Fetch a page of a category's events inside `query.time_range`.
///
/// The page slice, the total count and the payload scan for the field count
/// run concurrently over the same filter. An unknown category, an empty
/// window and a page past the end all yield an empty slice rather than an
/// error.
pub async fn query_events<S>(
    store: &S,
    query: &EventQuery,
    now: Timestamp,
) -> Result<EventPage, AnalyticsError>
where
    S: EventStore + ?Sized,
{
    let start = time_window::resolve(query.time_range, now);
    let filter = EventFilter::by_name(query.user_id, query.category.as_str()).since(start);
    let slice = FindEvents {
        order: EventOrder::NewestFirst,
        skip: query.page.offset(),
        take: Some(query.page.limit),
    };

    let (events, total_count, payloads) = tokio::try_join!(
        store.find_events(&filter, &slice),
        store.count_events(&filter),
        store.find_payloads(&filter, true),
    )?;

    let unique_field_count = distinct_field_count(&payloads);

    tracing::debug!(
        category = %query.category,
        page = query.page.page,
        limit = query.page.limit,
        time_range = %query.time_range,
        returned = events.len(),
        total_count,
        "Queried category events",
    );

    Ok(EventPage {
        events,
        total_count,
        unique_field_count,
    })
}
