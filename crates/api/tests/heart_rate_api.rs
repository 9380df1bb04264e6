//! Integration tests for heart-rate submission, history, and averages.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, post_json, register_patient, submit_heart_rate};
use serde_json::json;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Submission
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn submit_echoes_reading_with_timestamp(pool: PgPool) {
    let app = common::build_test_app(pool);
    register_patient(app.clone(), 4, "abg28@duke.edu", 25.0).await;

    let response = post_json(
        app,
        "/api/heart_rate",
        json!({"patient_id": 4, "heart_rate": 250}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["patient_id"], 4);
    assert_eq!(json["data"]["heart_rate"], 250.0);
    assert!(json["data"]["timestamp"].is_string());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn submit_for_unknown_patient_is_404(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = post_json(
        app,
        "/api/heart_rate",
        json!({"patient_id": 999, "heart_rate": 80}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["code"], "NOT_FOUND");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn submit_negative_reading_is_400(pool: PgPool) {
    let app = common::build_test_app(pool);
    register_patient(app.clone(), 4, "abg28@duke.edu", 25.0).await;

    let response = post_json(
        app,
        "/api/heart_rate",
        json!({"patient_id": 4, "heart_rate": -10}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "INVALID_VALUE");
}

// ---------------------------------------------------------------------------
// History
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn readings_round_trip_preserves_order(pool: PgPool) {
    let app = common::build_test_app(pool);
    register_patient(app.clone(), 4, "abg28@duke.edu", 25.0).await;
    submit_heart_rate(app.clone(), 4, 72.0).await;
    submit_heart_rate(app.clone(), 4, 250.0).await;

    let response = get(app, "/api/heart_rate/4").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let readings = json["data"].as_array().expect("data should be an array");
    assert_eq!(readings.len(), 2);
    assert_eq!(readings[1], 250.0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn empty_history_is_a_valid_200(pool: PgPool) {
    let app = common::build_test_app(pool);
    register_patient(app.clone(), 4, "abg28@duke.edu", 25.0).await;

    let response = get(app, "/api/heart_rate/4").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"], json!([]));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn history_of_unknown_patient_is_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/heart_rate/999").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Average
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn average_of_single_reading_is_that_reading(pool: PgPool) {
    let app = common::build_test_app(pool);
    register_patient(app.clone(), 4, "abg28@duke.edu", 25.0).await;
    submit_heart_rate(app.clone(), 4, 250.0).await;

    let response = get(app, "/api/heart_rate/average/4").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"], 250.0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn average_of_two_readings(pool: PgPool) {
    let app = common::build_test_app(pool);
    register_patient(app.clone(), 4, "abg28@duke.edu", 25.0).await;
    submit_heart_rate(app.clone(), 4, 100.0).await;
    submit_heart_rate(app.clone(), 4, 200.0).await;

    let response = get(app, "/api/heart_rate/average/4").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"], 150.0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn average_without_readings_is_400_no_readings(pool: PgPool) {
    let app = common::build_test_app(pool);
    register_patient(app.clone(), 4, "abg28@duke.edu", 25.0).await;

    let response = get(app, "/api/heart_rate/average/4").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "NO_READINGS");
}

// ---------------------------------------------------------------------------
// Interval average
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn interval_average_with_past_bound_covers_all_readings(pool: PgPool) {
    let app = common::build_test_app(pool);
    register_patient(app.clone(), 4, "abg28@duke.edu", 25.0).await;
    submit_heart_rate(app.clone(), 4, 100.0).await;
    submit_heart_rate(app.clone(), 4, 200.0).await;

    // A bound far in the past: no stored timestamp is older, so the window
    // defaults to the whole series.
    let response = post_json(
        app,
        "/api/heart_rate/interval_average",
        json!({
            "patient_id": 4,
            "heart_rate_average_since": "2018-03-09 11:00:36.372339",
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"], 150.0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn interval_average_with_future_bound_still_covers_all_readings(pool: PgPool) {
    let app = common::build_test_app(pool);
    register_patient(app.clone(), 4, "abg28@duke.edu", 25.0).await;
    submit_heart_rate(app.clone(), 4, 100.0).await;
    submit_heart_rate(app.clone(), 4, 200.0).await;

    // Every stored timestamp is older than a future bound, so the scan stops
    // at index 0 (first older match wins) and the whole series is averaged.
    let response = post_json(
        app,
        "/api/heart_rate/interval_average",
        json!({
            "patient_id": 4,
            "heart_rate_average_since": "2100-01-01 00:00:00.000000",
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"], 150.0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn interval_average_without_readings_is_400_no_readings(pool: PgPool) {
    let app = common::build_test_app(pool);
    register_patient(app.clone(), 4, "abg28@duke.edu", 25.0).await;

    let response = post_json(
        app,
        "/api/heart_rate/interval_average",
        json!({
            "patient_id": 4,
            "heart_rate_average_since": "2018-03-09 11:00:36.372339",
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "NO_READINGS");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn interval_average_with_unparseable_timestamp_is_400(pool: PgPool) {
    let app = common::build_test_app(pool);
    register_patient(app.clone(), 4, "abg28@duke.edu", 25.0).await;
    submit_heart_rate(app.clone(), 4, 100.0).await;

    // Shape check passes (has '-', ':', '.') but the strict parse fails.
    let response = post_json(
        app,
        "/api/heart_rate/interval_average",
        json!({
            "patient_id": 4,
            "heart_rate_average_since": "not-a:real.timestamp",
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "INVALID_VALUE");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn interval_average_for_unknown_patient_is_404(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = post_json(
        app,
        "/api/heart_rate/interval_average",
        json!({
            "patient_id": 999,
            "heart_rate_average_since": "2018-03-09 11:00:36.372339",
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
