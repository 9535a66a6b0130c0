//! Error types for the shift pay engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while computing pay, estimating
//! tax, or persisting shift records.

use chrono::NaiveDate;
use thiserror::Error;

/// The main error type for the shift pay engine.
///
/// All fallible operations in the crate return this error type, making it
/// easy to handle errors consistently throughout an application.
///
/// # Example
///
/// ```
/// use shift_pay::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/pay.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/pay.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// Configuration parsed but its values are inconsistent.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// A description of the inconsistency.
        message: String,
    },

    /// Shift type code was not found in the configuration.
    #[error("Shift type not found: {code}")]
    ShiftTypeNotFound {
        /// The shift type code that was not found.
        code: String,
    },

    /// A clock time string could not be parsed as `HH:MM`.
    #[error("Invalid time '{value}': expected HH:MM")]
    InvalidTime {
        /// The rejected input.
        value: String,
    },

    /// A shift was invalid or contained inconsistent data.
    #[error("Invalid shift '{shift_id}': {message}")]
    InvalidShift {
        /// The ID of the invalid shift.
        shift_id: String,
        /// A description of what made the shift invalid.
        message: String,
    },

    /// Gross income input was missing, zero or negative.
    #[error("Invalid gross income: {message}")]
    InvalidIncome {
        /// A description of what made the income invalid.
        message: String,
    },

    /// No shift record or planned shift exists with the given identifier.
    #[error("Record not found: {id}")]
    RecordNotFound {
        /// The identifier that was looked up.
        id: String,
    },

    /// An actual shift record already exists for the date.
    #[error("A shift already exists for {date}")]
    DuplicateShift {
        /// The date that already has a shift.
        date: NaiveDate,
    },

    /// Reading or writing persisted state failed.
    #[error("Storage error at '{path}': {message}")]
    StorageError {
        /// The storage location.
        path: String,
        /// A description of the failure.
        message: String,
    },

    /// Persisted state was written with a schema this build does not understand.
    #[error("Unsupported schema version {found} (expected {expected})")]
    UnsupportedSchemaVersion {
        /// The version found in the persisted data.
        found: u32,
        /// The version this build reads and writes.
        expected: u32,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_not_found_displays_path() {
        let error = EngineError::ConfigNotFound {
            path: "/missing/pay.yaml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /missing/pay.yaml"
        );
    }

    #[test]
    fn test_config_parse_error_displays_path_and_message() {
        let error = EngineError::ConfigParseError {
            path: "/config/bad.yaml".to_string(),
            message: "invalid YAML syntax".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse configuration file '/config/bad.yaml': invalid YAML syntax"
        );
    }

    #[test]
    fn test_shift_type_not_found_displays_code() {
        let error = EngineError::ShiftTypeNotFound {
            code: "X999".to_string(),
        };
        assert_eq!(error.to_string(), "Shift type not found: X999");
    }

    #[test]
    fn test_invalid_time_displays_value() {
        let error = EngineError::InvalidTime {
            value: "25:99".to_string(),
        };
        assert_eq!(error.to_string(), "Invalid time '25:99': expected HH:MM");
    }

    #[test]
    fn test_invalid_income_displays_message() {
        let error = EngineError::InvalidIncome {
            message: "must be greater than zero".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid gross income: must be greater than zero"
        );
    }

    #[test]
    fn test_duplicate_shift_displays_date() {
        let error = EngineError::DuplicateShift {
            date: NaiveDate::from_ymd_opt(2025, 3, 4).unwrap(),
        };
        assert_eq!(error.to_string(), "A shift already exists for 2025-03-04");
    }

    #[test]
    fn test_unsupported_schema_version_displays_both_versions() {
        let error = EngineError::UnsupportedSchemaVersion {
            found: 7,
            expected: 1,
        };
        assert_eq!(
            error.to_string(),
            "Unsupported schema version 7 (expected 1)"
        );
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_not_found() -> EngineResult<()> {
            Err(EngineError::RecordNotFound {
                id: "missing".to_string(),
            })
        }

        fn propagates_error() -> EngineResult<()> {
            returns_not_found()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}
