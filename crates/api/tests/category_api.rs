//! HTTP integration tests for categories, event ingestion, the event listing
//! and the existence poller.

mod common;

use axum::http::StatusCode;
use common::{body_json, delete_as, get_as, post_as};
use serde_json::json;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

const USER: i64 = 1;
const OTHER_USER: i64 = 2;

async fn create_bug_category(app: &axum::Router) {
    let response = post_as(
        app.clone(),
        USER,
        "/api/v1/categories",
        json!({"name": "bug", "color": "#FF6B6B", "emoji": "🐛"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
}

/// Ingest an event and return its id.
async fn ingest(app: &axum::Router, category: &str, fields: serde_json::Value) -> i64 {
    let response = post_as(
        app.clone(),
        USER,
        "/api/v1/events",
        json!({"category": category, "fields": fields}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

// ---------------------------------------------------------------------------
// Categories
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn create_category_normalizes_name_and_color(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = post_as(
        app,
        USER,
        "/api/v1/categories",
        json!({"name": "  Deploy ", "color": "#00FF7F"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["name"], "deploy");
    assert_eq!(json["data"]["color"], "#00ff7f");
    assert!(json["data"]["emoji"].is_null());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn duplicate_category_returns_409(pool: PgPool) {
    let app = common::build_test_app(pool);
    create_bug_category(&app).await;

    let response = post_as(
        app,
        USER,
        "/api/v1/categories",
        json!({"name": "BUG", "color": "#000000"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(response).await["code"], "CONFLICT");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn invalid_category_input_returns_400(pool: PgPool) {
    let app = common::build_test_app(pool);

    for body in [
        json!({"name": "bug", "color": "red"}),
        json!({"name": "has space", "color": "#000000"}),
        json!({"name": "", "color": "#000000"}),
        json!({"name": "bug", "color": "#000000", "emoji": "abc"}),
    ] {
        let response = post_as(app.clone(), USER, "/api/v1/categories", body.clone()).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "accepted {body}");
        assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
    }
}

#[sqlx::test(migrations = "../db/migrations")]
async fn listing_reports_metrics_per_category(pool: PgPool) {
    let app = common::build_test_app(pool);
    create_bug_category(&app).await;
    post_as(
        app.clone(),
        USER,
        "/api/v1/categories",
        json!({"name": "quiet", "color": "#123456"}),
    )
    .await;
    ingest(&app, "bug", json!({"msg": "a"})).await;
    ingest(&app, "bug", json!({"msg": "b", "stack": "..."})).await;
    ingest(&app, "bug", json!({"msg": "c"})).await;

    let response = get_as(app, USER, "/api/v1/categories").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let data = json["data"].as_array().unwrap();
    assert_eq!(data.len(), 2);

    assert_eq!(data[0]["name"], "bug");
    assert_eq!(data[0]["color"], "#ff6b6b");
    assert_eq!(data[0]["event_count"], 3);
    assert_eq!(data[0]["unique_field_count"], 2);
    assert!(data[0]["last_ping"].is_string());

    assert_eq!(data[1]["name"], "quiet");
    assert_eq!(data[1]["event_count"], 0);
    assert_eq!(data[1]["unique_field_count"], 0);
    assert!(data[1]["last_ping"].is_null());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn categories_are_private_to_their_owner(pool: PgPool) {
    let app = common::build_test_app(pool);
    create_bug_category(&app).await;

    let listed = body_json(get_as(app.clone(), OTHER_USER, "/api/v1/categories").await).await;
    assert_eq!(listed["data"], json!([]));

    let poll = get_as(app.clone(), OTHER_USER, "/api/v1/categories/bug/has-events").await;
    assert_eq!(poll.status(), StatusCode::NOT_FOUND);

    // The same name is free for another user.
    let response = post_as(
        app,
        OTHER_USER,
        "/api/v1/categories",
        json!({"name": "bug", "color": "#000000"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn delete_category_removes_it(pool: PgPool) {
    let app = common::build_test_app(pool);
    create_bug_category(&app).await;
    ingest(&app, "bug", json!({"msg": "a"})).await;

    let response = delete_as(app.clone(), USER, "/api/v1/categories/bug").await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let again = delete_as(app.clone(), USER, "/api/v1/categories/bug").await;
    assert_eq!(again.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(again).await["error"], "Category 'bug' not found");

    let poll = get_as(app, USER, "/api/v1/categories/bug/has-events").await;
    assert_eq!(poll.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn ingest_into_unknown_category_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = post_as(
        app,
        USER,
        "/api/v1/events",
        json!({"category": "ghost", "fields": {"a": 1}}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["error"], "Category 'ghost' not found");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn ingest_requires_object_fields(pool: PgPool) {
    let app = common::build_test_app(pool);
    create_bug_category(&app).await;

    let response = post_as(
        app,
        USER,
        "/api/v1/events",
        json!({"category": "bug", "fields": [1, 2, 3]}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn event_listing_pages_newest_first(pool: PgPool) {
    let app = common::build_test_app(pool);
    create_bug_category(&app).await;
    let first = ingest(&app, "bug", json!({"msg": "a"})).await;
    let second = ingest(&app, "bug", json!({"msg": "b", "stack": "..."})).await;
    let third = ingest(&app, "bug", json!({"msg": "c"})).await;

    let page_one = body_json(
        get_as(app.clone(), USER, "/api/v1/categories/bug/events?page=1&limit=2").await,
    )
    .await;
    let ids: Vec<i64> = page_one["data"]["events"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![third, second]);
    assert_eq!(page_one["data"]["total_count"], 3);
    assert_eq!(page_one["data"]["unique_field_count"], 2);
    assert_eq!(page_one["data"]["time_range"], "month");

    let page_two = body_json(
        get_as(
            app,
            USER,
            "/api/v1/categories/BUG/events?page=2&limit=2&time_range=today",
        )
        .await,
    )
    .await;
    let events = page_two["data"]["events"].as_array().unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0]["id"], first);
    assert_eq!(page_two["data"]["total_count"], 3);
    assert_eq!(page_two["data"]["page_number"], 2);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn event_listing_of_unknown_category_is_empty(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get_as(app, USER, "/api/v1/categories/ghost/events").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["events"], json!([]));
    assert_eq!(json["data"]["total_count"], 0);
    assert_eq!(json["data"]["limit"], 50);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn event_listing_rejects_bad_query_values(pool: PgPool) {
    let app = common::build_test_app(pool);
    create_bug_category(&app).await;

    for query in ["page=0", "limit=0", "limit=51", "time_range=year"] {
        let uri = format!("/api/v1/categories/bug/events?{query}");
        let response = get_as(app.clone(), USER, &uri).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "accepted {query}");
        assert_eq!(body_json(response).await["code"], "BAD_REQUEST");
    }
}

// ---------------------------------------------------------------------------
// Poller
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn has_events_flips_after_first_ingest(pool: PgPool) {
    let app = common::build_test_app(pool);
    create_bug_category(&app).await;

    let before = body_json(get_as(app.clone(), USER, "/api/v1/categories/bug/has-events").await).await;
    assert_eq!(before["data"]["has_events"], false);

    ingest(&app, "bug", json!({"msg": "hello"})).await;

    let after = body_json(get_as(app, USER, "/api/v1/categories/bug/has-events").await).await;
    assert_eq!(after["data"]["has_events"], true);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn has_events_for_unknown_category_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get_as(app, USER, "/api/v1/categories/ghost/has-events").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["error"], "Category 'ghost' not found");
}
