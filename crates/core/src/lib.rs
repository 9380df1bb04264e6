//! Domain logic for the pulsewatch patient-monitoring service.
//!
//! Pure validation, classification, and aggregation rules. No I/O here:
//! persistence lives in `pulsewatch-db` and the HTTP surface in
//! `pulsewatch-api`.

pub mod aggregation;
pub mod error;
pub mod tachycardia;
pub mod types;
pub mod validation;
