//! Calculator error types.

use thiserror::Error;

/// Errors raised while computing a value.
///
/// The engine never returns these to its caller. A failed computation is
/// turned into the error display instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalcError {
    /// Overflow, division by zero or an invalid domain (NaN).
    #[error("result is not a finite number")]
    NonFiniteResult,

    #[error("unknown operator: {0:?}")]
    UnknownOperator(String),
}

impl CalcError {
    /// Pass finite values through, reject the rest.
    pub fn check_finite(value: f64) -> Result<f64, Self> {
        if value.is_finite() {
            Ok(value)
        } else {
            Err(Self::NonFiniteResult)
        }
    }
}
