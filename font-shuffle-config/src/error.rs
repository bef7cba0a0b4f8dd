//! Typed error variants for the font-shuffle-config crate.
//!
//! These are produced by parameter validation. The render path never sees
//! them — out-of-range values are clamped on read — but hosts that validate
//! user input up front can match on specific failure modes instead of
//! opaque strings.

use thiserror::Error;

/// Errors produced when validating effect parameters.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A numeric field is outside its allowed range.
    ///
    /// Carries the field name and the offending value.
    #[error("value {value} for '{field}' is outside the allowed range {min}..={max}")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    /// A field value failed semantic validation.
    #[error("config validation error: {0}")]
    Validation(String),
}

impl ConfigError {
    /// Helper for the common out-of-range case.
    pub fn out_of_range(field: &'static str, value: f64, min: f64, max: f64) -> Self {
        ConfigError::OutOfRange {
            field,
            value,
            min,
            max,
        }
    }
}
