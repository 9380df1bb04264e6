//! HTTP handlers: the orchestration layer between validation, the patient
//! repository, and the derived-value computations in `pulsewatch-core`.

pub mod heart_rate;
pub mod patient;
