//! Request payload validation for the three POST operations.
//!
//! Payloads arrive as dynamic JSON objects. Each validator enforces its rules
//! in a fixed order so that the reported error is deterministic when several
//! conditions are violated at once: key presence, then null values, then
//! boolean values, then per-field type/format/range checks. Extra keys beyond
//! the required set are tolerated with a warning. On success the numeric
//! fields are returned coerced to `f64` (numeric strings are accepted).

use serde_json::{Map, Value};

use crate::error::CoreError;

/// Validated payload for `POST /api/new_patient`.
#[derive(Debug, Clone, PartialEq)]
pub struct RegistrationInput {
    pub patient_id: f64,
    pub attending_email: String,
    pub user_age: f64,
}

/// Validated payload for `POST /api/heart_rate`.
#[derive(Debug, Clone, PartialEq)]
pub struct HeartRateInput {
    pub patient_id: f64,
    pub heart_rate: f64,
}

/// Validated payload for `POST /api/heart_rate/interval_average`.
///
/// The timestamp is only shape-checked here; the caller performs the strict
/// parse to an instant.
#[derive(Debug, Clone, PartialEq)]
pub struct IntervalQueryInput {
    pub patient_id: f64,
    pub since_raw: String,
}

/// Validate a registration payload.
///
/// Requires `patient_id`, `attending_email`, and `user_age`. The email must
/// be a string containing both `@` and `.`; the age must be a non-negative
/// number.
pub fn validate_registration(payload: &Map<String, Value>) -> Result<RegistrationInput, CoreError> {
    const REQUIRED: [&str; 3] = ["patient_id", "attending_email", "user_age"];
    check_common(payload, &REQUIRED)?;

    let patient_id = numeric_field(payload, "patient_id")?;

    let attending_email = string_field(payload, "attending_email")?;
    if !attending_email.contains('@') || !attending_email.contains('.') {
        tracing::error!("attending_email missing a special character ('@' or '.')");
        return Err(CoreError::InvalidValue(
            "attending_email must contain '@' and '.'".to_string(),
        ));
    }

    let user_age = numeric_field(payload, "user_age")?;
    if user_age < 0.0 {
        tracing::error!(user_age, "patient age out of range");
        return Err(CoreError::InvalidValue(
            "user_age must be non-negative".to_string(),
        ));
    }

    warn_extra_keys(payload, &REQUIRED);

    Ok(RegistrationInput {
        patient_id,
        attending_email: attending_email.to_string(),
        user_age,
    })
}

/// Validate a heart-rate submission payload.
///
/// Requires `patient_id` and a non-negative numeric `heart_rate`.
pub fn validate_heart_rate(payload: &Map<String, Value>) -> Result<HeartRateInput, CoreError> {
    const REQUIRED: [&str; 2] = ["patient_id", "heart_rate"];
    check_common(payload, &REQUIRED)?;

    let patient_id = numeric_field(payload, "patient_id")?;

    let heart_rate = numeric_field(payload, "heart_rate")?;
    if heart_rate < 0.0 {
        tracing::error!(heart_rate, "heart rate out of range");
        return Err(CoreError::InvalidValue(
            "heart_rate must be non-negative".to_string(),
        ));
    }

    warn_extra_keys(payload, &REQUIRED);

    Ok(HeartRateInput {
        patient_id,
        heart_rate,
    })
}

/// Validate an interval-average query payload.
///
/// Requires `patient_id` and a string `heart_rate_average_since` that looks
/// like a date-time with fractional seconds (contains `-`, `:`, and `.`).
/// This is a shape check only; the strict parse happens at the call site so
/// a well-shaped but unparseable timestamp is still rejected there.
pub fn validate_interval_query(
    payload: &Map<String, Value>,
) -> Result<IntervalQueryInput, CoreError> {
    const REQUIRED: [&str; 2] = ["patient_id", "heart_rate_average_since"];
    check_common(payload, &REQUIRED)?;

    let patient_id = numeric_field(payload, "patient_id")?;

    let since_raw = string_field(payload, "heart_rate_average_since")?;
    if !since_raw.contains('-') || !since_raw.contains(':') || !since_raw.contains('.') {
        tracing::error!("heart_rate_average_since not shaped like a timestamp");
        return Err(CoreError::InvalidValue(
            "heart_rate_average_since must be a timestamp with fractional seconds".to_string(),
        ));
    }

    warn_extra_keys(payload, &REQUIRED);

    Ok(IntervalQueryInput {
        patient_id,
        since_raw: since_raw.to_string(),
    })
}

/// Checks shared by all three validators, in mandatory order: every required
/// key present, then no null values anywhere, then no boolean values
/// anywhere. Null and boolean checks cover extra keys too.
fn check_common(payload: &Map<String, Value>, required: &[&str]) -> Result<(), CoreError> {
    for key in required {
        if !payload.contains_key(*key) {
            tracing::error!("required key '{key}' missing from request payload");
            return Err(CoreError::MissingField((*key).to_string()));
        }
    }

    for (key, value) in payload {
        if value.is_null() {
            tracing::error!("field '{key}' is null");
            return Err(CoreError::InvalidValue(format!("field '{key}' is null")));
        }
    }

    // Booleans must not be silently accepted as numeric 0/1.
    for (key, value) in payload {
        if value.is_boolean() {
            tracing::error!("field '{key}' is a boolean");
            return Err(CoreError::InvalidValue(format!(
                "field '{key}' must not be a boolean"
            )));
        }
    }

    Ok(())
}

/// Coerce a required field to `f64`, accepting numeric literals and numeric
/// strings.
fn numeric_field(payload: &Map<String, Value>, key: &str) -> Result<f64, CoreError> {
    let parsed = match &payload[key] {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.ok_or_else(|| {
        tracing::error!("field '{key}' is not parseable as a number");
        CoreError::InvalidValue(format!("field '{key}' must be a number"))
    })
}

/// Require a field to be a JSON string.
fn string_field<'a>(payload: &'a Map<String, Value>, key: &str) -> Result<&'a str, CoreError> {
    match &payload[key] {
        Value::String(s) => Ok(s),
        _ => {
            tracing::error!("field '{key}' is not a string");
            Err(CoreError::InvalidType(format!(
                "field '{key}' must be a string"
            )))
        }
    }
}

/// Log (but tolerate) keys beyond the required set.
fn warn_extra_keys(payload: &Map<String, Value>, required: &[&str]) {
    if payload.len() > required.len() {
        let extras: Vec<&str> = payload
            .keys()
            .map(String::as_str)
            .filter(|key| !required.contains(key))
            .collect();
        tracing::warn!(?extras, "ignoring extra keys in request payload");
    }
}
