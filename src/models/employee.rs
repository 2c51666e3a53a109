//! Employee and payroll input models.
//!
//! These types carry the raw inputs a payroll run supplies for one employee.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::PayslipItem;

/// An employee as seen by the payroll engine.
///
/// `hire_date` is kept as the caller's raw string: an unparseable value is
/// treated as "employed for the whole period" rather than rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier for the employee.
    pub id: String,
    /// Monthly base salary.
    pub base_salary: Decimal,
    /// Hire date, ideally `YYYY-MM-DD`.
    #[serde(default)]
    pub hire_date: Option<String>,
}

/// Overtime worked during the period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OvertimeEntry {
    /// Hours of overtime.
    pub hours: Decimal,
    /// Premium multiplier; the rate table default applies when absent.
    #[serde(default)]
    pub multiplier: Option<Decimal>,
}

/// Everything needed to produce one employee's payslip.
///
/// # Example
///
/// ```
/// use payroll_engine::models::{Employee, PayrollInput};
/// use rust_decimal::Decimal;
///
/// let input = PayrollInput::new(
///     Employee {
///         id: "emp_001".to_string(),
///         base_salary: Decimal::from(6000),
///         hire_date: Some("2020-09-01".to_string()),
///     },
///     "December 2025",
/// );
/// assert!(input.overtime.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollInput {
    /// The employee being paid.
    pub employee: Employee,
    /// Period string, e.g. "December 2025".
    pub period: String,
    /// Overtime entries for the period.
    #[serde(default)]
    pub overtime: Vec<OvertimeEntry>,
    /// Extra earnings (bonuses, allowances) added by the caller.
    #[serde(default)]
    pub additional_earnings: Vec<PayslipItem>,
    /// Extra deductions (loans, advances, retirement) added by the caller.
    #[serde(default)]
    pub additional_deductions: Vec<PayslipItem>,
}

impl PayrollInput {
    /// Creates an input with no overtime or additional items.
    pub fn new(employee: Employee, period: impl Into<String>) -> Self {
        Self {
            employee,
            period: period.into(),
            overtime: vec![],
            additional_earnings: vec![],
            additional_deductions: vec![],
        }
    }
}
