//! Response types for the payroll API.
//!
//! This module defines the success bodies that are not plain models, the
//! error body, and the mapping from [`PayrollError`] to HTTP status codes.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::calculation::PeriodSource;
use crate::config::{Jurisdiction, RateTable};
use crate::error::PayrollError;
use crate::models::{EmployerContribution, PayslipItem, PayslipTotals};

/// Response body for `POST /payslips/recalculate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecalculationResponse {
    /// Deductions with statutory lines recomputed.
    pub deductions: Vec<PayslipItem>,
    /// Employer contributions on the new gross.
    pub employer_contributions: Vec<EmployerContribution>,
    /// Totals over the submitted earnings and recomputed deductions.
    pub totals: PayslipTotals,
}

/// Response body for `GET /rates/{period}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RatesResponse {
    /// Jurisdiction the rates belong to.
    pub jurisdiction: Jurisdiction,
    /// The resolved period label.
    pub period: String,
    /// How the period string was read.
    pub period_source: PeriodSource,
    /// The rate table effective at the start of the period.
    pub rates: RateTable,
}

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// A 400 response.
    pub fn bad_request(error: ApiError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error,
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<PayrollError> for ApiErrorResponse {
    fn from(error: PayrollError) -> Self {
        let message = error.to_string();
        match error {
            PayrollError::ConfigNotFound { .. } | PayrollError::ConfigParseError { .. } => {
                ApiErrorResponse {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    error: ApiError::with_details("CONFIG_ERROR", "Configuration error", message),
                }
            }
            PayrollError::InvalidRateTable { .. } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details("CONFIG_ERROR", "Invalid rate table", message),
            },
            PayrollError::RateTableNotFound { date } => ApiErrorResponse::bad_request(
                ApiError::with_details(
                    "RATE_TABLE_NOT_FOUND",
                    message,
                    format!("No statutory rates are configured for periods starting {}", date),
                ),
            ),
            PayrollError::InvalidPeriod { .. } => {
                ApiErrorResponse::bad_request(ApiError::new("INVALID_PERIOD", message))
            }
            PayrollError::Validation { field, .. } => ApiErrorResponse::bad_request(
                ApiError::with_details("VALIDATION_ERROR", message, field),
            ),
        }
    }
}
