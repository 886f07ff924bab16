//! Framework error type.
//!
//! Sub-crates define their own error enums and wrap `PsError` as one variant
//! via `#[from]`.

use thiserror::Error;

/// The base error type for `ps-core` and a common variant for sub-crates.
#[derive(Debug, Error)]
pub enum PsError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("{what} must be finite and positive, got {value}")]
    NotPositive { what: &'static str, value: f64 },

    #[error("length mismatch: {what} has {got} elements, expected {expected}")]
    LengthMismatch {
        what:     &'static str,
        expected: usize,
        got:      usize,
    },
}

/// Shorthand result type for all `ps-*` crates.
pub type PsResult<T> = Result<T, PsError>;

/// Reject NaN, infinities, zero and negatives with a named error.
pub fn require_positive(what: &'static str, value: f64) -> PsResult<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(PsError::NotPositive { what, value })
    }
}

/// Reject NaN, infinities and negatives; zero is allowed.
pub fn require_non_negative(what: &'static str, value: f64) -> PsResult<f64> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(PsError::Config(format!(
            "{what} must be finite and non-negative, got {value}"
        )))
    }
}
