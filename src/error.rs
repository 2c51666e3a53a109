//! Error types for the payroll engine.
//!
//! The calculators themselves never fail on numeric input; errors are raised
//! only at the configuration layer and at the validation boundary in front of
//! payslip generation.

use chrono::NaiveDate;
use thiserror::Error;

/// The main error type for the payroll engine.
///
/// # Example
///
/// ```
/// use payroll_engine::error::PayrollError;
///
/// let error = PayrollError::ConfigNotFound {
///     path: "/missing/jurisdiction.yaml".to_string(),
/// };
/// assert_eq!(
///     error.to_string(),
///     "Configuration file not found: /missing/jurisdiction.yaml"
/// );
/// ```
#[derive(Debug, Error)]
pub enum PayrollError {
    /// Configuration file or directory was not found at the specified path.
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

    /// A rate table parsed but its contents are inconsistent.
    #[error("Invalid rate table effective {effective_date}: {message}")]
    InvalidRateTable {
        /// The effective date of the offending table.
        effective_date: NaiveDate,
        /// What is wrong with the table.
        message: String,
    },

    /// No rate table is effective on the requested date.
    #[error("No rate table effective on {date}")]
    RateTableNotFound {
        /// The date for which rates were requested.
        date: NaiveDate,
    },

    /// A period string could not be interpreted as a calendar month.
    #[error("Invalid period: '{input}'")]
    InvalidPeriod {
        /// The raw period string.
        input: String,
    },

    /// An input value was rejected before calculation.
    #[error("Invalid value for '{field}': {message}")]
    Validation {
        /// The offending field.
        field: String,
        /// Why the value was rejected.
        message: String,
    },
}

/// A type alias for Results that return PayrollError.
pub type PayrollResult<T> = Result<T, PayrollError>;
