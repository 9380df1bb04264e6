//! Handlers for patient registration and tachycardia status.

use axum::extract::{Path, State};
use axum::Json;
use pulsewatch_core::error::CoreError;
use pulsewatch_core::tachycardia::is_tachycardic;
use pulsewatch_core::types::{PatientId, Timestamp};
use pulsewatch_core::validation::validate_registration;
use pulsewatch_db::models::patient::{CreatePatient, PatientSummary};
use pulsewatch_db::repositories::PatientRepo;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Response body for the status endpoint.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    /// Whether the most recent reading is tachycardic for the patient's age.
    pub tachycardic: bool,
    /// Timestamp of the most recent reading.
    pub timestamp: Timestamp,
}

/// POST /api/new_patient
///
/// Register a patient. The payload is validated as a dynamic JSON object so
/// the error reported for a malformed payload is deterministic (presence,
/// then null, then boolean, then per-field checks).
pub async fn register_patient(
    State(state): State<AppState>,
    Json(payload): Json<Map<String, Value>>,
) -> AppResult<Json<DataResponse<PatientSummary>>> {
    let input = validate_registration(&payload)?;

    // Ids are coerced reals on the wire; the storage key is integral.
    let create = CreatePatient {
        id: input.patient_id as PatientId,
        attending_email: input.attending_email,
        age: input.user_age,
    };

    let patient = PatientRepo::insert(&state.pool, &create)
        .await
        .map_err(|err| duplicate_or_db(err, create.id))?;

    tracing::info!(patient_id = patient.id, "Registered new patient");
    Ok(Json(DataResponse {
        data: PatientSummary::from(&patient),
    }))
}

/// GET /api/status/{id}
///
/// Tachycardia status derived from the most recent reading, along with that
/// reading's timestamp.
pub async fn get_status(
    State(state): State<AppState>,
    Path(id): Path<PatientId>,
) -> AppResult<Json<DataResponse<StatusResponse>>> {
    let patient = PatientRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "patient",
            id,
        })?;

    let (last_hr, last_ts) = patient
        .heart_rates
        .last()
        .zip(patient.timestamps.last())
        .ok_or(CoreError::EmptySeries)?;

    Ok(Json(DataResponse {
        data: StatusResponse {
            tachycardic: is_tachycardic(*last_hr, patient.age),
            timestamp: *last_ts,
        },
    }))
}

/// Map a unique-constraint violation on the primary key to a domain
/// duplicate error; pass any other database error through unchanged.
fn duplicate_or_db(err: sqlx::Error, id: PatientId) -> AppError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.code().as_deref() == Some("23505") {
            return AppError::Core(CoreError::Duplicate {
                entity: "patient",
                id,
            });
        }
    }
    AppError::Database(err)
}
