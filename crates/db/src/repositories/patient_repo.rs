//! Repository for the `patients` table.

use pulsewatch_core::types::{PatientId, Timestamp};
use sqlx::PgPool;

use crate::models::patient::{CreatePatient, Patient};

/// Column list for `patients` queries.
const COLUMNS: &str = "\
    id, attending_email, age, heart_rates, timestamps, \
    created_at, updated_at";

/// Provides query operations for registered patients.
pub struct PatientRepo;

impl PatientRepo {
    /// Insert a newly registered patient with empty reading arrays.
    ///
    /// A duplicate id surfaces as a unique-constraint database error
    /// (code 23505), which callers map to their conflict error.
    pub async fn insert(pool: &PgPool, patient: &CreatePatient) -> Result<Patient, sqlx::Error> {
        let query = format!(
            "INSERT INTO patients (id, attending_email, age) \
             VALUES ($1, $2, $3) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Patient>(&query)
            .bind(patient.id)
            .bind(&patient.attending_email)
            .bind(patient.age)
            .fetch_one(pool)
            .await
    }

    /// Fetch a patient by id, or `None` if absent.
    pub async fn find_by_id(pool: &PgPool, id: PatientId) -> Result<Option<Patient>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM patients WHERE id = $1");
        sqlx::query_as::<_, Patient>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Append one (heart rate, timestamp) pair to a patient's history.
    ///
    /// Both arrays are extended in a single UPDATE, so concurrent
    /// submissions serialize at the row and the parallel-array invariant
    /// holds without an application-level lock. Returns `None` if no
    /// patient has the given id.
    pub async fn append_reading(
        pool: &PgPool,
        id: PatientId,
        heart_rate: f64,
        timestamp: Timestamp,
    ) -> Result<Option<Patient>, sqlx::Error> {
        let query = format!(
            "UPDATE patients \
             SET heart_rates = array_append(heart_rates, $2), \
                 timestamps = array_append(timestamps, $3), \
                 updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Patient>(&query)
            .bind(id)
            .bind(heart_rate)
            .bind(timestamp)
            .fetch_optional(pool)
            .await
    }
}
