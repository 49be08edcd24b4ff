//! Handlers for event ingestion, the paginated event listing and the
//! existence poller.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use pingboard_analytics::listing::{query_events, EventPage, EventQuery};
use pingboard_analytics::poller::has_events;
use pingboard_core::category_name::normalize_category_name;
use pingboard_core::error::CoreError;
use pingboard_core::pagination::PageRequest;
use pingboard_core::time_window::TimeRange;
use pingboard_db::models::event::CreateEvent;
use pingboard_db::repositories::{CategoryRepo, EventRepo};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Body of `POST /api/v1/events`.
#[derive(Debug, Deserialize)]
pub struct IngestEventRequest {
    /// Category name; matched case-insensitively.
    pub category: String,
    /// Must be a JSON object.
    pub fields: serde_json::Value,
}

/// Query string of the event listing. Missing values take the defaults of
/// [`PageRequest::new`] and [`TimeRange::default`].
#[derive(Debug, Deserialize)]
pub struct EventListParams {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub time_range: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct EventPageResponse {
    #[serde(flatten)]
    pub page: EventPage,
    pub page_number: i64,
    pub limit: i64,
    pub time_range: TimeRange,
}

#[derive(Debug, Serialize)]
pub struct HasEventsResponse {
    pub has_events: bool,
}

/// POST /api/v1/events
///
/// Record an event against one of the caller's categories.
pub async fn ingest_event(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<IngestEventRequest>,
) -> AppResult<impl IntoResponse> {
    if !input.fields.is_object() {
        return Err(AppError::Core(CoreError::Validation(
            "fields must be a JSON object".to_string(),
        )));
    }

    let name = normalize_category_name(&input.category);
    let category = CategoryRepo::find_by_name(&state.pool, auth.user_id, &name)
        .await?
        .ok_or_else(|| CoreError::category_not_found(name.as_str()))?;

    let event = EventRepo::insert(
        &state.pool,
        &CreateEvent {
            category_id: category.id,
            user_id: auth.user_id,
            fields: input.fields,
        },
    )
    .await?;

    tracing::info!(
        event_id = event.id,
        category = %category.name,
        user_id = auth.user_id,
        "Event ingested",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: event })))
}

/// GET /api/v1/categories/{name}/events
///
/// One page of the category's events inside `time_range`, newest first,
/// with the window's total count and distinct field count.
pub async fn list_events(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(name): Path<String>,
    Query(params): Query<EventListParams>,
) -> AppResult<impl IntoResponse> {
    let page = PageRequest::new(params.page, params.limit).map_err(AppError::BadRequest)?;
    let time_range = match params.time_range.as_deref() {
        Some(raw) => raw.parse::<TimeRange>().map_err(AppError::BadRequest)?,
        None => TimeRange::default(),
    };

    let query = EventQuery {
        user_id: auth.user_id,
        category: normalize_category_name(&name),
        page,
        time_range,
    };
    let result = query_events(state.store.as_ref(), &query, Utc::now()).await?;

    Ok(Json(DataResponse {
        data: EventPageResponse {
            page: result,
            page_number: page.page,
            limit: page.limit,
            time_range,
        },
    }))
}

/// GET /api/v1/categories/{name}/has-events
///
/// Whether the category has received any event yet. 404 if the caller owns
/// no such category.
pub async fn category_has_events(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> AppResult<impl IntoResponse> {
    let name = normalize_category_name(&name);
    let found = has_events(state.store.as_ref(), &name, auth.user_id).await?;

    Ok(Json(DataResponse {
        data: HasEventsResponse { has_events: found },
    }))
}
