pub mod health;

use axum::routing::{get, post};
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /new_patient                     register a patient (POST)
/// /heart_rate                      submit a reading (POST)
/// /heart_rate/{id}                 full reading history (GET)
/// /heart_rate/average/{id}         mean of all readings (GET)
/// /heart_rate/interval_average     mean of a time window (POST)
/// /status/{id}                     tachycardia status (GET)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/new_patient", post(handlers::patient::register_patient))
        .route("/status/{id}", get(handlers::patient::get_status))
        .route("/heart_rate", post(handlers::heart_rate::submit_heart_rate))
        .route("/heart_rate/{id}", get(handlers::heart_rate::get_heart_rates))
        .route(
            "/heart_rate/average/{id}",
            get(handlers::heart_rate::get_average),
        )
        .route(
            "/heart_rate/interval_average",
            post(handlers::heart_rate::get_interval_average),
        )
}
