//! Patient entity model and DTOs.

use pulsewatch_core::types::{PatientId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A registered patient with their full reading history.
///
/// `heart_rates` and `timestamps` are parallel arrays: entry `i` of each
/// describes the same reading. The repository appends to both in one
/// statement, so their lengths never diverge.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Patient {
    pub id: PatientId,
    pub attending_email: String,
    pub age: f64,
    pub heart_rates: Vec<f64>,
    pub timestamps: Vec<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for inserting a newly registered patient (empty reading history).
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePatient {
    pub id: PatientId,
    pub attending_email: String,
    pub age: f64,
}

/// Patient summary echoed by the registration endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct PatientSummary {
    pub patient_id: PatientId,
    pub attending_email: String,
    pub user_age: f64,
}

impl From<&Patient> for PatientSummary {
    fn from(patient: &Patient) -> Self {
        Self {
            patient_id: patient.id,
            attending_email: patient.attending_email.clone(),
            user_age: patient.age,
        }
    }
}

/// A single appended reading with its server-assigned timestamp, echoed by
/// the heart-rate submission endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct AppendedReading {
    pub patient_id: PatientId,
    pub heart_rate: f64,
    pub timestamp: Timestamp,
}
