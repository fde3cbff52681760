//! Error types for the math and value-type layer.
//!
//! [`CoreError`] covers the failure modes of the primitive layer: numerical
//! issues in vector/angle math and invalid calendar dates. Higher-level
//! coordinate errors live in the frames crate and wrap this type.

use thiserror::Error;

/// Classification of mathematical errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MathErrorKind {
    /// Attempted division by zero or near-zero value.
    DivisionByZero,
    /// Input value is invalid for the operation.
    InvalidInput,
    /// Value is NaN or infinity where a finite value is required.
    NotFinite,
    /// Value outside its valid domain (e.g. latitude beyond ±90°).
    OutOfRange,
}

/// Unified error type for the primitive layer.
///
/// Use the constructor methods ([`math_error`](Self::math_error),
/// [`invalid_date`](Self::invalid_date)) for consistent error creation.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Numerical computation failure.
    #[error("Math error in {operation} ({kind:?}): {message}")]
    MathError {
        operation: String,
        kind: MathErrorKind,
        message: String,
    },

    /// Invalid calendar date (e.g. February 30, month 13).
    #[error("Invalid date {year}-{month:02}-{day:02}: {message}")]
    InvalidDate {
        year: i32,
        month: u32,
        day: u32,
        message: String,
    },
}

/// Convenience alias for `Result<T, CoreError>`.
pub type CoreResult<T> = Result<T, CoreError>;

impl CoreError {
    /// Creates a [`MathError`](Self::MathError).
    pub fn math_error(operation: &str, kind: MathErrorKind, message: &str) -> Self {
        Self::MathError {
            operation: operation.to_string(),
            kind,
            message: message.to_string(),
        }
    }

    /// Creates an [`InvalidDate`](Self::InvalidDate) error.
    pub fn invalid_date(year: i32, month: u32, day: u32, message: &str) -> Self {
        Self::InvalidDate {
            year,
            month,
            day,
            message: message.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_math_error_display() {
        let err = CoreError::math_error(
            "validate_latitude",
            MathErrorKind::OutOfRange,
            "latitude 95° outside [-90°, +90°]",
        );
        let msg = err.to_string();
        assert!(msg.contains("validate_latitude"));
        assert!(msg.contains("OutOfRange"));
    }

    #[test]
    fn test_invalid_date_display() {
        let err = CoreError::invalid_date(2020, 2, 30, "day out of range for month");
        assert!(err.to_string().contains("2020-02-30"));
    }
}
