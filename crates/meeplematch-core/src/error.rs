//! Error types for meeplematch-core.
//!
//! The engine's compute functions are total and never fail; validation errors
//! only arise from the checked constructors callers can opt into at the
//! boundary.

use thiserror::Error;

/// Validation errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Invalid minute-of-day interval
    #[error("Invalid interval: requires 0 <= start < end <= 1440, got [{start}, {end})")]
    InvalidInterval { start: u32, end: u32 },

    /// Score weight outside [0.0, 1.0]
    #[error("Weight '{field}' must be in [0.0, 1.0], got {value}")]
    InvalidWeight { field: &'static str, value: f64 },
}
