//! # Error Types
//!
//! Structured error types for prestress_core. Every failure is classified so a
//! caller can tell a bad input apart from an evaluation outside a valid range
//! or a numerically degenerate section:
//!
//! - **Configuration** - an invalid or missing construction parameter
//!   (unknown cement class, non-positive strength, unordered geometry
//!   breakpoints, missing temperature history). Raised at construction.
//! - **Domain** - an evaluation requested outside its valid range (depth
//!   outside the section, non-positive homogenized area).
//! - **Numeric** - a degenerate combination that would otherwise produce
//!   NaN or Infinity (singular section determinant, negative inertia).
//!
//! ## Example
//!
//! ```rust
//! use prestress_core::errors::{CalcError, CalcResult};
//!
//! fn validate_height(h_mm: f64) -> CalcResult<()> {
//!     if h_mm <= 0.0 {
//!         return Err(CalcError::configuration(
//!             "h",
//!             h_mm.to_string(),
//!             "Section height must be positive",
//!         ));
//!     }
//!     Ok(())
//! }
//!
//! assert_eq!(validate_height(-1.0).unwrap_err().error_code(), "CONFIGURATION_ERROR");
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for prestress_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for section calculations and project persistence.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// A construction parameter is invalid or missing
    #[error("Invalid configuration for '{field}': {value} - {reason}")]
    Configuration {
        field: String,
        value: String,
        reason: String,
    },

    /// An evaluation was requested outside its valid range
    #[error("Out of domain: {quantity} = {value} - {reason}")]
    Domain {
        quantity: String,
        value: String,
        reason: String,
    },

    /// A numerically degenerate combination of inputs
    #[error("Numeric failure in {operation}: {reason}")]
    Numeric { operation: String, reason: String },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// File is locked by another user/process
    #[error("File locked: '{path}' is locked by {locked_by} since {locked_at}")]
    FileLocked {
        path: String,
        locked_by: String,
        locked_at: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Schema version mismatch
    #[error("Version mismatch: file version {file_version}, expected {expected_version}")]
    VersionMismatch {
        file_version: String,
        expected_version: String,
    },
}

impl CalcError {
    /// Create a Configuration error
    pub fn configuration(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::Configuration {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a Domain error
    pub fn domain(quantity: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::Domain {
            quantity: quantity.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a Numeric error
    pub fn numeric(operation: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::Numeric {
            operation: operation.into(),
            reason: reason.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a FileLocked error
    pub fn file_locked(path: impl Into<String>, locked_by: impl Into<String>, locked_at: impl Into<String>) -> Self {
        CalcError::FileLocked {
            path: path.into(),
            locked_by: locked_by.into(),
            locked_at: locked_at.into(),
        }
    }

    /// Check if this is a recoverable error (e.g., can retry)
    pub fn is_recoverable(&self) -> bool {
        matches!(self, CalcError::FileLocked { .. })
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::Configuration { .. } => "CONFIGURATION_ERROR",
            CalcError::Domain { .. } => "DOMAIN_ERROR",
            CalcError::Numeric { .. } => "NUMERIC_ERROR",
            CalcError::FileError { .. } => "FILE_ERROR",
            CalcError::FileLocked { .. } => "FILE_LOCKED",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
            CalcError::VersionMismatch { .. } => "VERSION_MISMATCH",
        }
    }
}

impl From<serde_json::Error> for CalcError {
    fn from(e: serde_json::Error) -> Self {
        CalcError::SerializationError {
            reason: e.to_string(),
        }
    }
}

/// Reject NaN and infinite values for a named input.
pub(crate) fn require_finite(field: &str, value: f64) -> CalcResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CalcError::configuration(field, value.to_string(), "Value must be finite"))
    }
}

/// Reject zero, negative, and non-finite values for a named input.
pub(crate) fn require_positive(field: &str, value: f64) -> CalcResult<f64> {
    require_finite(field, value)?;
    if value <= 0.0 {
        return Err(CalcError::configuration(field, value.to_string(), "Value must be positive"));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = CalcError::configuration("fck", "-5", "Value must be positive");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"type\":\"Configuration\""));
        let roundtrip: CalcError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(CalcError::domain("y", "1200", "outside").error_code(), "DOMAIN_ERROR");
        assert_eq!(CalcError::numeric("solve", "singular").error_code(), "NUMERIC_ERROR");
        assert!(CalcError::file_locked("a.psc", "me", "now").is_recoverable());
        assert!(!CalcError::numeric("solve", "singular").is_recoverable());
    }

    #[test]
    fn test_require_positive() {
        assert_eq!(require_positive("h", 10.0).unwrap(), 10.0);
        assert!(require_positive("h", 0.0).is_err());
        assert!(require_positive("h", f64::NAN).is_err());
        assert!(require_finite("n", f64::INFINITY).is_err());
        assert_eq!(require_finite("n", -3.0).unwrap(), -3.0);
    }
}
