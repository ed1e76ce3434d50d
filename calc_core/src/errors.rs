//! # Error Types
//!
//! Structured error types for calc_core. A form that is not ready to
//! calculate is reported through these errors by the validation layer, so the
//! shell can tell the user which field needs attention instead of just
//! greying out the Calculate button.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::errors::{CalcError, CalcResult};
//!
//! fn check_voltage(volts: f64) -> CalcResult<()> {
//!     if !(100.0..=1000.0).contains(&volts) {
//!         return Err(CalcError::invalid_input(
//!             "l1l2",
//!             volts.to_string(),
//!             "Voltage must be between 100 V and 1000 V",
//!         ));
//!     }
//!     Ok(())
//! }
//!
//! assert!(check_voltage(400.0).is_ok());
//! assert_eq!(check_voltage(99.0).unwrap_err().error_code(), "INVALID_INPUT");
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for calc_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for validation and schedule file operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// An input value is invalid (out of range, not a number, unknown option)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A required field is missing (no method selected, empty choice)
    #[error("Missing required field: {field}")]
    MissingField { field: String },

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
    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a MissingField error
    pub fn missing_field(field: impl Into<String>) -> Self {
        CalcError::MissingField {
            field: field.into(),
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

    /// Create a SerializationError
    pub fn serialization(reason: impl Into<String>) -> Self {
        CalcError::SerializationError {
            reason: reason.into(),
        }
    }

    /// True for the errors that mean "the form is not ready yet" rather
    /// than something going wrong.
    pub fn is_input_error(&self) -> bool {
        matches!(self, CalcError::InvalidInput { .. } | CalcError::MissingField { .. })
    }

    /// Check if this is a recoverable error (e.g., can retry)
    pub fn is_recoverable(&self) -> bool {
        matches!(self, CalcError::FileLocked { .. })
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::MissingField { .. } => "MISSING_FIELD",
            CalcError::FileError { .. } => "FILE_ERROR",
            CalcError::FileLocked { .. } => "FILE_LOCKED",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
            CalcError::VersionMismatch { .. } => "VERSION_MISMATCH",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_json_is_tagged() {
        let error = CalcError::invalid_input("l2l3", "1001", "Voltage must be between 100 V and 1000 V");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"type\":\"InvalidInput\""));
        assert!(json.contains("\"field\":\"l2l3\""));
        let back: CalcError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, back);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(CalcError::missing_field("method").error_code(), "MISSING_FIELD");
        assert_eq!(CalcError::serialization("bad json").error_code(), "SERIALIZATION_ERROR");
        assert_eq!(
            CalcError::file_locked("a.ems", "sam", "2025-01-01").error_code(),
            "FILE_LOCKED"
        );
    }

    #[test]
    fn test_input_error_classification() {
        assert!(CalcError::missing_field("reading").is_input_error());
        assert!(CalcError::invalid_input("l1l2", "abc", "Not a number").is_input_error());
        assert!(!CalcError::file_error("open", "x.ems", "not found").is_input_error());
        assert!(CalcError::file_locked("x.ems", "sam", "now").is_recoverable());
    }

    #[test]
    fn test_display_messages() {
        let err = CalcError::missing_field("direction");
        assert_eq!(err.to_string(), "Missing required field: direction");
    }
}
