//! Handlers for categories: create, delete, and the metrics listing.
//!
//! All endpoints require authentication via [`AuthUser`] and only ever see
//! the caller's own categories.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use pingboard_analytics::metrics::{compute_metrics_for_categories, MetricsSnapshot};
use pingboard_core::category_name::{normalize_category_name, validate_category_name, validate_emoji};
use pingboard_core::color::{format_hex_color, parse_hex_color};
use pingboard_core::error::CoreError;
use pingboard_core::types::{DbId, Timestamp};
use pingboard_db::models::category::{Category, CreateCategory};
use pingboard_db::repositories::CategoryRepo;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Body of `POST /api/v1/categories`.
#[derive(Debug, Deserialize)]
pub struct CreateCategoryRequest {
    pub name: String,
    /// `#RRGGBB`, case-insensitive.
    pub color: String,
    pub emoji: Option<String>,
}

/// A category as rendered over HTTP, with its color as `#rrggbb`.
#[derive(Debug, Serialize)]
pub struct CategoryResponse {
    pub id: DbId,
    pub name: String,
    pub color: String,
    pub emoji: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<Category> for CategoryResponse {
    fn from(category: Category) -> Self {
        Self {
            id: category.id,
            color: format_hex_color(category.color),
            name: category.name,
            emoji: category.emoji,
            created_at: category.created_at,
            updated_at: category.updated_at,
        }
    }
}

/// One entry of the category listing.
#[derive(Debug, Serialize)]
pub struct CategoryMetricsResponse {
    #[serde(flatten)]
    pub category: CategoryResponse,
    pub unique_field_count: usize,
    pub event_count: i64,
    pub last_ping: Option<Timestamp>,
}

impl From<MetricsSnapshot> for CategoryMetricsResponse {
    fn from(snapshot: MetricsSnapshot) -> Self {
        Self {
            category: snapshot.category.into(),
            unique_field_count: snapshot.unique_field_count,
            event_count: snapshot.event_count,
            last_ping: snapshot.last_ping,
        }
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/categories
///
/// List the caller's categories (alphabetically) with their metrics.
pub async fn list_categories(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let categories = CategoryRepo::list_by_user(&state.pool, auth.user_id).await?;

    let snapshots = compute_metrics_for_categories(
        state.store.as_ref(),
        &categories,
        Utc::now(),
        state.config.metrics_concurrency,
    )
    .await?;

    let data: Vec<CategoryMetricsResponse> = snapshots.into_iter().map(Into::into).collect();

    Ok(Json(DataResponse { data }))
}

/// POST /api/v1/categories
///
/// Create a category. The name is trimmed and lowercased first; a name the
/// caller already owns is a 409.
pub async fn create_category(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateCategoryRequest>,
) -> AppResult<impl IntoResponse> {
    let name = normalize_category_name(&input.name);
    validate_category_name(&name).map_err(CoreError::Validation)?;
    let color = parse_hex_color(&input.color).map_err(CoreError::Validation)?;
    if let Some(emoji) = input.emoji.as_deref() {
        validate_emoji(emoji).map_err(CoreError::Validation)?;
    }

    let category = CategoryRepo::create(
        &state.pool,
        auth.user_id,
        &CreateCategory {
            name,
            color,
            emoji: input.emoji,
        },
    )
    .await?;

    tracing::info!(
        category_id = category.id,
        category = %category.name,
        user_id = auth.user_id,
        "Category created",
    );

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: CategoryResponse::from(category),
        }),
    ))
}

/// DELETE /api/v1/categories/{name}
///
/// Delete a category and, by cascade, all of its events.
pub async fn delete_category(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> AppResult<impl IntoResponse> {
    let name = normalize_category_name(&name);
    let deleted = CategoryRepo::delete_by_name(&state.pool, auth.user_id, &name).await?;

    if !deleted {
        return Err(AppError::Core(CoreError::category_not_found(name)));
    }

    tracing::info!(category = %name, user_id = auth.user_id, "Category deleted");

    Ok(StatusCode::NO_CONTENT)
}
