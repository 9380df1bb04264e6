//! Shared helpers for API integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::CONTENT_TYPE;
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use pulsewatch_api::config::ServerConfig;
use pulsewatch_api::router::build_app_router;
use pulsewatch_api::state::AppState;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool.
///
/// Uses the same [`build_app_router`] as `main.rs` so integration tests
/// exercise the middleware stack (CORS, request ID, timeout, tracing, panic
/// recovery) that production uses.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

/// Send a GET request to the app and return the response.
pub async fn get(app: Router, uri: &str) -> Response {
    app.oneshot(
        Request::builder()
            .method(Method::GET)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

/// Send a POST request with a JSON body and return the response.
pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    app.oneshot(
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
    .unwrap()
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Register a patient through the API; panics if registration fails.
pub async fn register_patient(app: Router, id: i64, email: &str, age: f64) {
    let response = post_json(
        app,
        "/api/new_patient",
        serde_json::json!({
            "patient_id": id,
            "attending_email": email,
            "user_age": age,
        }),
    )
    .await;
    assert!(
        response.status().is_success(),
        "test patient registration failed with {}",
        response.status()
    );
}

/// Submit a heart-rate reading through the API; panics on failure.
pub async fn submit_heart_rate(app: Router, id: i64, heart_rate: f64) {
    let response = post_json(
        app,
        "/api/heart_rate",
        serde_json::json!({
            "patient_id": id,
            "heart_rate": heart_rate,
        }),
    )
    .await;
    assert!(
        response.status().is_success(),
        "test heart-rate submission failed with {}",
        response.status()
    );
}
