#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use pingboard_analytics::pg::PgEventStore;
use pingboard_api::auth::jwt::{generate_access_token, JwtConfig};
use pingboard_api::config::ServerConfig;
use pingboard_api::router::build_app_router;
use pingboard_api::state::AppState;
use pingboard_core::types::DbId;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        metrics_concurrency: 4,
        db_max_connections: 5,
        jwt: JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            access_token_expiry_mins: 15,
        },
    }
}

/// Build the full application router, middleware included, over `pool`.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        store: Arc::new(PgEventStore::new(pool.clone())),
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

/// A valid Bearer header value for `user_id`.
pub fn bearer(user_id: DbId) -> String {
    let token = generate_access_token(user_id, &test_config().jwt).unwrap();
    format!("Bearer {token}")
}

/// Send an unauthenticated GET.
pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a request as `user_id`, with an optional JSON body.
pub async fn send_as(
    app: Router,
    user_id: DbId,
    method: Method,
    uri: &str,
    body: Option<serde_json::Value>,
) -> Response<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("authorization", bearer(user_id));
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get_as(app: Router, user_id: DbId, uri: &str) -> Response<Body> {
    send_as(app, user_id, Method::GET, uri, None).await
}

pub async fn post_as(
    app: Router,
    user_id: DbId,
    uri: &str,
    body: serde_json::Value,
) -> Response<Body> {
    send_as(app, user_id, Method::POST, uri, Some(body)).await
}

pub async fn delete_as(app: Router, user_id: DbId, uri: &str) -> Response<Body> {
    send_as(app, user_id, Method::DELETE, uri, None).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
