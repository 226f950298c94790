//! # Error Types
//!
//! Structured error types for volt_core. Each variant carries enough context
//! to understand and fix the issue programmatically, and every error is
//! JSON-serializable for transport to upstream layers.
//!
//! ## Example
//!
//! ```rust
//! use volt_core::errors::{CalcError, CalcResult};
//!
//! fn validate_voltage(voltage: f64) -> CalcResult<()> {
//!     if voltage <= 0.0 {
//!         return Err(CalcError::invalid_input(
//!             "voltage",
//!             voltage.to_string(),
//!             "Voltage must be positive",
//!         ));
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for volt_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for calculation operations.
///
/// Kinds of failure, from the engine's point of view:
/// - configuration: [`CalcError::UnknownStandard`]
/// - invalid numeric input: [`CalcError::InvalidInput`]
/// - domain violations: [`CalcError::UnsupportedMaterial`],
///   [`CalcError::PowerFactorOutOfRange`]
/// - orchestration: [`CalcError::CalculationFailed`] wraps any of the above
///   with the failing load's identity
/// - persistence: the `File*`/`Serialization*`/`VersionMismatch` variants
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// Requested wiring standard is not one of IEC, IS, NEC
    #[error("Unknown wiring standard: '{name}' (expected IEC, IS or NEC)")]
    UnknownStandard { name: String },

    /// An input value is invalid (non-positive, out of range, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// Conductor material has no resistance data
    #[error("Unsupported conductor material: {material} (resistance data exists for copper only)")]
    UnsupportedMaterial { material: String },

    /// Power factor outside (0, 1] makes sin(phi) undefined
    #[error("Power factor {value} is outside (0, 1]")]
    PowerFactorOutOfRange { value: f64 },

    /// A calculation stage failed for a specific load
    #[error("Calculation failed for load '{load}': {source}")]
    CalculationFailed {
        load: String,
        #[source]
        source: Box<CalcError>,
    },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// Project file is locked by another user/process
    #[error("File locked: '{path}' is held by {locked_by} since {locked_at}")]
    FileLocked {
        path: String,
        locked_by: String,
        locked_at: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Project schema version mismatch
    #[error("Version mismatch: file version {file_version}, expected {expected_version}")]
    VersionMismatch {
        file_version: String,
        expected_version: String,
    },
}

impl CalcError {
    /// Create an UnknownStandard error
    pub fn unknown_standard(name: impl Into<String>) -> Self {
        CalcError::UnknownStandard { name: name.into() }
    }

    /// Create an InvalidInput error
    pub fn invalid_input(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create an UnsupportedMaterial error
    pub fn unsupported_material(material: impl Into<String>) -> Self {
        CalcError::UnsupportedMaterial {
            material: material.into(),
        }
    }

    /// Wrap an error with the identity of the load being calculated
    pub fn calculation_failed(load: impl Into<String>, source: CalcError) -> Self {
        CalcError::CalculationFailed {
            load: load.into(),
            source: Box::new(source),
        }
    }

    /// Create a FileError
    pub fn file_error(
        operation: impl Into<String>,
        path: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        CalcError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a SerializationError
    pub fn serialization(reason: impl Into<String>) -> Self {
        CalcError::SerializationError {
            reason: reason.into(),
        }
    }

    /// The innermost error, unwrapping any CalculationFailed layers
    pub fn root_cause(&self) -> &CalcError {
        match self {
            CalcError::CalculationFailed { source, .. } => source.root_cause(),
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CalcError::invalid_input("voltage", "-415", "Voltage must be positive");
        assert_eq!(
            err.to_string(),
            "Invalid input for 'voltage': -415 - Voltage must be positive"
        );

        let err = CalcError::unknown_standard("BS7671");
        assert!(err.to_string().contains("BS7671"));
    }

    #[test]
    fn test_calculation_failed_wraps_source() {
        let inner = CalcError::invalid_input("power_factor", "0", "Power factor must be positive");
        let wrapped = CalcError::calculation_failed("Pump P-101 (a1b2)", inner.clone());

        let msg = wrapped.to_string();
        assert!(msg.contains("Pump P-101"));
        assert!(msg.contains("power_factor"));
        assert_eq!(wrapped.root_cause(), &inner);
    }

    #[test]
    fn test_error_serialization() {
        let err = CalcError::invalid_input("efficiency", "0", "Efficiency must be positive");
        let json = serde_json::to_string(&err).unwrap();
        assert!(json.contains("\"type\":\"InvalidInput\""));

        let parsed: CalcError = serde_json::from_str(&json).unwrap();
        assert_eq!(err, parsed);
    }

    #[test]
    fn test_wrapped_error_serialization() {
        let err = CalcError::calculation_failed(
            "Chiller (deadbeef)",
            CalcError::PowerFactorOutOfRange { value: 1.2 },
        );
        let json = serde_json::to_string(&err).unwrap();
        let parsed: CalcError = serde_json::from_str(&json).unwrap();
        assert_eq!(err, parsed);
    }
}
