//! Input validation shared by every engine component
//!
//! The engine never coerces caller input. Out-of-range fractions,
//! non-positive magnitudes and non-finite numbers are surfaced immediately
//! as a [`ValidationError`] so that presentation-layer bugs show up early.
//!
//! Clamping only ever happens on *outputs* (the temperature floor, the
//! optimizer's [0, 1] coverage caps), never on inputs.

use thiserror::Error;

/// Errors raised when an input value is outside its physical domain
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    #[error("{field} must be a finite number")]
    NonFinite { field: &'static str },

    #[error("{field} must be a fraction in [0, 1], got {value}")]
    FractionOutOfRange { field: &'static str, value: f64 },

    #[error("{field} must be positive, got {value}")]
    NonPositive { field: &'static str, value: f64 },

    #[error("{field} must not be negative, got {value}")]
    Negative { field: &'static str, value: f64 },

    #[error("Sector name must not be empty")]
    EmptyName,

    /// Only reachable through a band table that skipped config validation
    #[error("{field} {value} is not covered by any configured band")]
    Unbanded { field: &'static str, value: f64 },
}

/// Require a finite value
pub fn finite(field: &'static str, value: f64) -> Result<f64, ValidationError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ValidationError::NonFinite { field })
    }
}

/// Require a finite value in the closed interval [0, 1]
///
/// # Example
/// ```
/// use heat_mitigation_core_rs::core::validation::fraction;
///
/// assert_eq!(fraction("humidity", 0.44), Ok(0.44));
/// assert!(fraction("humidity", 1.2).is_err());
/// ```
pub fn fraction(field: &'static str, value: f64) -> Result<f64, ValidationError> {
    let value = finite(field, value)?;
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(ValidationError::FractionOutOfRange { field, value })
    }
}

/// Require a finite, strictly positive value
pub fn positive(field: &'static str, value: f64) -> Result<f64, ValidationError> {
    let value = finite(field, value)?;
    if value > 0.0 {
        Ok(value)
    } else {
        Err(ValidationError::NonPositive { field, value })
    }
}

/// Require a finite value that is zero or greater
pub fn non_negative(field: &'static str, value: f64) -> Result<f64, ValidationError> {
    let value = finite(field, value)?;
    if value >= 0.0 {
        Ok(value)
    } else {
        Err(ValidationError::Negative { field, value })
    }
}
