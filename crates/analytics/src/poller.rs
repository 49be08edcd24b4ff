//! "Has anything arrived yet?" check used while onboarding a category.

use pingboard_core::error::CoreError;
use pingboard_core::types::DbId;

use crate::error::AnalyticsError;
use crate::store::EventStore;

/// Whether the user's category `name` has ever received an event.
///
/// Looks at all-time events; no time window applies. An unknown category is
/// a [`CoreError::NotFound`] keyed by `name`.
pub async fn has_events<S>(store: &S, name: &str, user_id: DbId) -> Result<bool, AnalyticsError>
where
    S: EventStore + ?Sized,
{
    let category = store
        .find_category(name, user_id)
        .await?
        .ok_or_else(|| CoreError::category_not_found(name))?;

    tracing::debug!(
        category = %name,
        event_count = category.event_count,
        "Polled category for events",
    );

    Ok(category.event_count > 0)
}
