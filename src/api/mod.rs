//! HTTP API for the payroll engine.
//!
//! Exposes payslip generation, deduction recalculation and rate lookup as
//! JSON endpoints.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{EmployeeRequest, OvertimeRequest, PayslipRequest, RecalculationRequest};
pub use response::{ApiError, ApiErrorResponse, RatesResponse, RecalculationResponse};
pub use state::AppState;
