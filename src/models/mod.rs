//! Core data models for the payroll engine.
//!
//! This module contains all the domain models used throughout the engine.

mod employee;
mod payslip;
mod payslip_item;
mod period;

pub use employee::{Employee, OvertimeEntry, PayrollInput};
pub use payslip::{
    AuditStep, AuditTrace, AuditWarning, EmployerContribution, Payslip, PayslipTotals,
    ProrationResult,
};
pub use payslip_item::{ItemCategory, ItemKind, PayslipItem, sum_amounts};
pub use period::{MONTH_NAMES, Period};
