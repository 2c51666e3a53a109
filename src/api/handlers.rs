//! HTTP request handlers for the payroll API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{
    employer_contributions, generate_payslip_for_period, parse_period, recalculate_deductions,
    validate_items,
};
use crate::models::{ItemKind, PayrollInput, PayslipTotals, sum_amounts};

use super::request::{PayslipRequest, RecalculationRequest};
use super::response::{ApiError, ApiErrorResponse, RatesResponse, RecalculationResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/payslips", post(payslip_handler))
        .route("/payslips/recalculate", post(recalculate_handler))
        .route("/rates/:period", get(rates_handler))
        .with_state(state)
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

fn error_response(error: ApiErrorResponse) -> Response {
    json_response(error.status, error.error)
}

/// Maps a body extraction failure to a 400 error.
fn rejection_to_error(rejection: JsonRejection, correlation_id: Uuid) -> ApiErrorResponse {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    ApiErrorResponse::bad_request(error)
}

/// Handler for `POST /payslips`.
///
/// Generates a full payslip for one employee and period.
async fn payslip_handler(
    State(state): State<AppState>,
    payload: Result<Json<PayslipRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing payslip request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return error_response(rejection_to_error(rejection, correlation_id)),
    };

    let input: PayrollInput = request.into();
    let parsed = parse_period(&input.period);

    let rates = match state.rates_for(parsed.period.start) {
        Ok(rates) => rates,
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                period = %parsed.period,
                error = %err,
                "No rate table for period"
            );
            return error_response(err.into());
        }
    };

    let start_time = Instant::now();
    match generate_payslip_for_period(&input, parsed, rates) {
        Ok(payslip) => {
            info!(
                correlation_id = %correlation_id,
                employee_id = %payslip.employee_id,
                period = %payslip.period,
                gross_pay = %payslip.totals.gross_pay,
                net_pay = %payslip.totals.net_pay,
                warnings = payslip.audit_trace.warnings.len(),
                duration_us = start_time.elapsed().as_micros(),
                "Payslip generated"
            );
            json_response(StatusCode::OK, payslip)
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                employee_id = %input.employee.id,
                error = %err,
                "Payslip generation failed"
            );
            error_response(err.into())
        }
    }
}

/// Handler for `POST /payslips/recalculate`.
///
/// Recomputes statutory deductions after earnings were edited.
async fn recalculate_handler(
    State(state): State<AppState>,
    payload: Result<Json<RecalculationRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing recalculation request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return error_response(rejection_to_error(rejection, correlation_id)),
    };

    let validated = validate_items("earnings", &request.earnings, ItemKind::Earning)
        .and_then(|_| validate_items("deductions", &request.deductions, ItemKind::Deduction));
    if let Err(err) = validated {
        warn!(correlation_id = %correlation_id, error = %err, "Invalid recalculation items");
        return error_response(err.into());
    }

    let parsed = parse_period(&request.period);
    let rates = match state.rates_for(parsed.period.start) {
        Ok(rates) => rates,
        Err(err) => return error_response(err.into()),
    };

    let deductions = recalculate_deductions(&request.earnings, &request.deductions, rates);
    let employer = employer_contributions(sum_amounts(&request.earnings), rates);
    let totals = PayslipTotals::from_items(&request.earnings, &deductions, &employer);

    info!(
        correlation_id = %correlation_id,
        period = %parsed.period,
        gross_pay = %totals.gross_pay,
        net_pay = %totals.net_pay,
        "Deductions recalculated"
    );

    json_response(
        StatusCode::OK,
        RecalculationResponse {
            deductions,
            employer_contributions: employer,
            totals,
        },
    )
}

/// Handler for `GET /rates/{period}`.
///
/// Returns the rate table a payslip for the period would use.
async fn rates_handler(State(state): State<AppState>, Path(period): Path<String>) -> Response {
    let parsed = parse_period(&period);

    match state.rates_for(parsed.period.start) {
        Ok(rates) => json_response(
            StatusCode::OK,
            RatesResponse {
                jurisdiction: state.config().jurisdiction().clone(),
                period: parsed.period.to_string(),
                period_source: parsed.source,
                rates: rates.clone(),
            },
        ),
        Err(err) => error_response(err.into()),
    }
}
