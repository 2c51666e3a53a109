//! Configuration loading and management for the payroll engine.
//!
//! Statutory rates are kept in effective-date-keyed YAML rate tables so that
//! a payroll run for a past period reproduces the rates in force at the time.
//!
//! # Example
//!
//! ```no_run
//! use payroll_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/morocco").unwrap();
//! println!("Loaded rates for: {}", config.jurisdiction().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    ContributionRate, Contributions, IncomeTaxSchedule, Jurisdiction, PayrollConfig, RateTable,
    TaxBracket,
};
