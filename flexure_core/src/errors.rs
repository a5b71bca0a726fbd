//! # Error Types
//!
//! Structured error types for flexure_core. These errors are designed to be
//! informative for both humans and LLMs, providing enough context to
//! understand and fix issues programmatically.
//!
//! ## Example
//!
//! ```rust
//! use flexure_core::errors::{CalcError, CalcResult};
//!
//! fn validate_depth(d_mm: f64) -> CalcResult<()> {
//!     if d_mm <= 0.0 {
//!         return Err(CalcError::InvalidInput {
//!             field: "d_mm".to_string(),
//!             value: d_mm.to_string(),
//!             reason: "Effective depth must be positive".to_string(),
//!         });
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for flexure_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for calculation operations.
///
/// None of these are retryable: the same inputs always produce the same error.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// An input value is invalid (non-positive, out of range, degenerate geometry)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// The equilibrium equations admit no physically valid neutral axis
    #[error("No valid section exists for these inputs: {stage} - {reason}")]
    NoRealSolution { stage: String, reason: String },

    /// A numerical procedure failed (bracketing, convergence)
    #[error("Calculation failed: {calculation_type} - {reason}")]
    CalculationFailed {
        calculation_type: String,
        reason: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },
}

impl CalcError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a NoRealSolution error
    pub fn no_real_solution(stage: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::NoRealSolution {
            stage: stage.into(),
            reason: reason.into(),
        }
    }

    /// Create a CalculationFailed error
    pub fn calculation_failed(calculation_type: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::CalculationFailed {
            calculation_type: calculation_type.into(),
            reason: reason.into(),
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::NoRealSolution { .. } => "NO_REAL_SOLUTION",
            CalcError::CalculationFailed { .. } => "CALCULATION_FAILED",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
        }
    }
}

impl From<serde_json::Error> for CalcError {
    fn from(err: serde_json::Error) -> Self {
        CalcError::SerializationError {
            reason: err.to_string(),
        }
    }
}

/// Reject non-finite or non-positive values for a required field.
pub(crate) fn require_positive(field: &str, value: f64, reason: &str) -> CalcResult<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(CalcError::invalid_input(field, value.to_string(), reason));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = CalcError::invalid_input("d_mm", "-550", "Effective depth must be positive");
        let json = serde_json::to_string(&error).unwrap();
        let roundtrip: CalcError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
        assert!(json.contains("InvalidInput"));
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(
            CalcError::no_real_solution("quadratic", "negative discriminant").error_code(),
            "NO_REAL_SOLUTION"
        );
        assert_eq!(
            CalcError::calculation_failed("bisection", "no bracket").error_code(),
            "CALCULATION_FAILED"
        );
    }

    #[test]
    fn test_no_real_solution_message() {
        let err = CalcError::no_real_solution("neutral axis", "discriminant < 0");
        assert!(err.to_string().starts_with("No valid section exists for these inputs"));
    }

    #[test]
    fn test_require_positive() {
        assert!(require_positive("b_mm", 300.0, "Width must be positive").is_ok());
        assert!(require_positive("b_mm", 0.0, "Width must be positive").is_err());
        assert!(require_positive("b_mm", f64::NAN, "Width must be positive").is_err());
    }
}
