//! Handlers for heart-rate submission and aggregation queries.

use axum::extract::{Path, State};
use axum::Json;
use chrono::Utc;
use pulsewatch_core::aggregation::{average, windowed_average};
use pulsewatch_core::error::CoreError;
use pulsewatch_core::types::{PatientId, Timestamp};
use pulsewatch_core::validation::{validate_heart_rate, validate_interval_query};
use pulsewatch_db::models::patient::AppendedReading;
use pulsewatch_db::repositories::PatientRepo;
use serde_json::{Map, Value};

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/heart_rate
///
/// Append a reading to the patient's history. The timestamp is assigned
/// server-side at submission time, and the append is a single UPDATE at the
/// repository layer, so concurrent submissions cannot lose readings.
pub async fn submit_heart_rate(
    State(state): State<AppState>,
    Json(payload): Json<Map<String, Value>>,
) -> AppResult<Json<DataResponse<AppendedReading>>> {
    let input = validate_heart_rate(&payload)?;
    let id = input.patient_id as PatientId;
    let timestamp = Utc::now();

    let patient = PatientRepo::append_reading(&state.pool, id, input.heart_rate, timestamp)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "patient",
            id,
        })?;

    tracing::info!(
        patient_id = patient.id,
        heart_rate = input.heart_rate,
        "Recorded heart rate"
    );
    Ok(Json(DataResponse {
        data: AppendedReading {
            patient_id: patient.id,
            heart_rate: input.heart_rate,
            timestamp,
        },
    }))
}

/// GET /api/heart_rate/{id}
///
/// Full reading history for a patient. An empty history is a valid 200.
pub async fn get_heart_rates(
    State(state): State<AppState>,
    Path(id): Path<PatientId>,
) -> AppResult<Json<DataResponse<Vec<f64>>>> {
    let patient = PatientRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "patient",
            id,
        })?;

    Ok(Json(DataResponse {
        data: patient.heart_rates,
    }))
}

/// GET /api/heart_rate/average/{id}
///
/// Mean of all readings for a patient.
pub async fn get_average(
    State(state): State<AppState>,
    Path(id): Path<PatientId>,
) -> AppResult<Json<DataResponse<f64>>> {
    let patient = PatientRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "patient",
            id,
        })?;

    let avg = average(&patient.heart_rates)?;
    Ok(Json(DataResponse { data: avg }))
}

/// POST /api/heart_rate/interval_average
///
/// Mean of the readings in the window anchored at `heart_rate_average_since`.
/// The validator only shape-checks the timestamp string; the strict parse
/// happens here so a well-shaped but unparseable timestamp is still a 400.
pub async fn get_interval_average(
    State(state): State<AppState>,
    Json(payload): Json<Map<String, Value>>,
) -> AppResult<Json<DataResponse<f64>>> {
    let input = validate_interval_query(&payload)?;
    let since = parse_since(&input.since_raw)?;
    let id = input.patient_id as PatientId;

    let patient = PatientRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "patient",
            id,
        })?;

    let avg = windowed_average(&patient.heart_rates, &patient.timestamps, since)?;
    Ok(Json(DataResponse { data: avg }))
}

/// Parse the interval bound as a timestamp.
///
/// Accepts RFC 3339 as well as `YYYY-MM-DD HH:MM:SS.ffffff`; naive
/// timestamps are taken as UTC.
fn parse_since(raw: &str) -> Result<Timestamp, CoreError> {
    if let Ok(ts) = chrono::DateTime::parse_from_rfc3339(raw) {
        return Ok(ts.with_timezone(&Utc));
    }
    chrono::NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f")
        .map(|naive| naive.and_utc())
        .map_err(|_| {
            CoreError::InvalidValue(format!(
                "heart_rate_average_since '{raw}' is not a valid timestamp"
            ))
        })
}
