//! Payslip models.
//!
//! This module contains the [`Payslip`] type and its associated structures
//! capturing everything produced for one employee and period: line items,
//! employer contributions, totals and the audit trace.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{ItemCategory, PayslipItem, sum_amounts};
use crate::calculation::calculate_taxable_income;

/// The fraction of a month's base salary owed given a hire date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProrationResult {
    /// Base salary owed for the period, rounded to cents.
    pub prorated_base: Decimal,
    /// Working days the employee was employed in the period.
    pub days_worked: u32,
    /// Working days in the whole period.
    pub total_days: u32,
}

/// An employer-side contribution. Informational: not deducted from net pay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployerContribution {
    /// Which contribution this is.
    pub category: ItemCategory,
    /// Human-readable description.
    pub label: String,
    /// The gross amount the rate applies to (after any ceiling).
    pub base: Decimal,
    /// The rate as a percentage.
    pub rate: Decimal,
    /// The contribution amount, rounded to cents.
    pub amount: Decimal,
}

/// Aggregated totals for a payslip.
///
/// # Example
///
/// ```
/// use payroll_engine::models::{ItemCategory, PayslipItem, PayslipTotals};
/// use rust_decimal::Decimal;
///
/// let earnings = vec![PayslipItem::earning("base", "Base", Decimal::from(1000), ItemCategory::Base)];
/// let deductions = vec![PayslipItem::deduction("loan", "Loan", Decimal::from(100), "loan".into())];
///
/// let totals = PayslipTotals::from_items(&earnings, &deductions, &[]);
/// assert_eq!(totals.net_pay, Decimal::from(900));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayslipTotals {
    /// Sum of all earnings.
    pub gross_pay: Decimal,
    /// Income the income tax was assessed on.
    pub taxable_income: Decimal,
    /// Sum of all deductions.
    pub total_deductions: Decimal,
    /// Gross pay minus total deductions.
    pub net_pay: Decimal,
    /// Sum of employer contributions.
    pub employer_contributions: Decimal,
    /// Gross pay plus employer contributions.
    pub employer_cost: Decimal,
}

impl PayslipTotals {
    /// Computes totals for a set of items.
    pub fn from_items(
        earnings: &[PayslipItem],
        deductions: &[PayslipItem],
        employer: &[EmployerContribution],
    ) -> Self {
        let gross_pay = sum_amounts(earnings);
        let total_deductions = sum_amounts(deductions);
        let employer_contributions: Decimal = employer.iter().map(|c| c.amount).sum();

        Self {
            gross_pay,
            taxable_income: calculate_taxable_income(earnings, deductions),
            total_deductions,
            net_pay: gross_pay - total_deductions,
            employer_contributions,
            employer_cost: gross_pay + employer_contributions,
        }
    }
}

/// A single step in the audit trace recording a calculation decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A warning generated during calculation.
///
/// Warnings flag inputs the engine degraded around instead of rejecting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level ("low", "medium", "high").
    pub severity: String,
}

/// The complete audit trace for a payslip.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of calculation steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during calculation.
    pub warnings: Vec<AuditWarning>,
    /// The total calculation duration in microseconds.
    pub duration_us: u64,
}

/// A complete payslip for one employee and period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payslip {
    /// Unique identifier for this payslip.
    pub payslip_id: Uuid,
    /// When the payslip was generated.
    pub generated_at: DateTime<Utc>,
    /// The version of the engine that produced it.
    pub engine_version: String,
    /// The employee paid.
    pub employee_id: String,
    /// Period label, e.g. "December 2025".
    pub period: String,
    /// First day of the period.
    pub period_start: NaiveDate,
    /// Last day of the period.
    pub period_end: NaiveDate,
    /// How the base salary was prorated.
    pub proration: ProrationResult,
    /// Earnings lines.
    pub earnings: Vec<PayslipItem>,
    /// Deduction lines.
    pub deductions: Vec<PayslipItem>,
    /// Employer contributions (not deducted from net pay).
    pub employer_contributions: Vec<EmployerContribution>,
    /// Aggregated totals.
    pub totals: PayslipTotals,
    /// Audit trace of the calculation.
    pub audit_trace: AuditTrace,
}
