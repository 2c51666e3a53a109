//! Payroll Calculation Engine for Moroccan payslips
//!
//! This crate computes monthly payslips: base salary prorated by hire date,
//! overtime, CNSS social security, AMO health insurance and progressive IR
//! income tax, driven by versioned rate tables and exposed over an HTTP API.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
