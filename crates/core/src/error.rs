use crate::types::PatientId;

/// Closed error taxonomy for the domain layer.
///
/// Validation errors distinguish missing keys, bad values, and wrong JSON
/// types because each maps to a different user-visible message; the HTTP
/// status mapping lives in `pulsewatch-api`.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value: {0}")]
    InvalidValue(String),

    #[error("Invalid type: {0}")]
    InvalidType(String),

    #[error("No heart rates have been entered yet")]
    EmptySeries,

    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: PatientId },

    #[error("Duplicate {entity} with id {id}")]
    Duplicate { entity: &'static str, id: PatientId },

    #[error("Internal error: {0}")]
    Internal(String),
}
