/// Patient primary keys are BIGINT, externally assigned at registration.
pub type PatientId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
