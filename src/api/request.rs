//! Request types for the payroll API.
//!
//! This module defines the JSON request bodies for the `/payslips` and
//! `/payslips/recalculate` endpoints.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{Employee, OvertimeEntry, PayrollInput, PayslipItem};

/// Request body for `POST /payslips`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayslipRequest {
    /// The employee being paid.
    pub employee: EmployeeRequest,
    /// Period string, e.g. "December 2025".
    pub period: String,
    /// Overtime worked during the period.
    #[serde(default)]
    pub overtime: Vec<OvertimeRequest>,
    /// Extra earnings to include.
    #[serde(default)]
    pub additional_earnings: Vec<PayslipItem>,
    /// Extra deductions to include.
    #[serde(default)]
    pub additional_deductions: Vec<PayslipItem>,
}

/// Employee information in a payslip request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeRequest {
    /// Unique identifier for the employee.
    pub id: String,
    /// Monthly base salary.
    pub base_salary: Decimal,
    /// Hire date, `YYYY-MM-DD`.
    #[serde(default)]
    pub hire_date: Option<String>,
}

/// An overtime entry in a payslip request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OvertimeRequest {
    /// Hours of overtime.
    pub hours: Decimal,
    /// Premium multiplier; defaults to the rate table's.
    #[serde(default)]
    pub multiplier: Option<Decimal>,
}

/// Request body for `POST /payslips/recalculate`.
///
/// Carries a payslip's items after the caller edited them. Statutory
/// deductions are recomputed from the earnings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecalculationRequest {
    /// Period string; selects the rate table.
    pub period: String,
    /// Current earnings.
    pub earnings: Vec<PayslipItem>,
    /// Current deductions, statutory and caller-added.
    #[serde(default)]
    pub deductions: Vec<PayslipItem>,
}

impl From<EmployeeRequest> for Employee {
    fn from(req: EmployeeRequest) -> Self {
        Employee {
            id: req.id,
            base_salary: req.base_salary,
            hire_date: req.hire_date,
        }
    }
}

impl From<OvertimeRequest> for OvertimeEntry {
    fn from(req: OvertimeRequest) -> Self {
        OvertimeEntry {
            hours: req.hours,
            multiplier: req.multiplier,
        }
    }
}

impl From<PayslipRequest> for PayrollInput {
    fn from(req: PayslipRequest) -> Self {
        PayrollInput {
            employee: req.employee.into(),
            period: req.period,
            overtime: req.overtime.into_iter().map(Into::into).collect(),
            additional_earnings: req.additional_earnings,
            additional_deductions: req.additional_deductions,
        }
    }
}
