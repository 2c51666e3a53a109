//! Payroll period model.
//!
//! A [`Period`] is one calendar month, inclusive of its first and last day.
//! Periods are persisted only in their string form ("December 2025").

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::{PayrollError, PayrollResult};

/// English month names, January first.
pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// A calendar-month payroll period.
///
/// # Example
///
/// ```
/// use payroll_engine::models::Period;
/// use chrono::NaiveDate;
///
/// let period: Period = "February 2024".parse().unwrap();
/// assert_eq!(period.start, NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
/// assert_eq!(period.end, NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
/// assert_eq!(period.to_string(), "February 2024");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Period {
    /// First day of the month.
    pub start: NaiveDate,
    /// Last day of the month.
    pub end: NaiveDate,
}

impl Period {
    /// Builds the period for a given month, or `None` for an invalid month.
    pub fn from_month(year: i32, month: u32) -> Option<Self> {
        let start = NaiveDate::from_ymd_opt(year, month, 1)?;
        let next_month = if month == 12 {
            NaiveDate::from_ymd_opt(year + 1, 1, 1)?
        } else {
            NaiveDate::from_ymd_opt(year, month + 1, 1)?
        };
        let end = next_month.pred_opt()?;
        Some(Self { start, end })
    }

    /// Returns the month containing `date`.
    pub fn containing(date: NaiveDate) -> Self {
        let start = date.with_day(1).unwrap_or(date);
        let end = start
            .checked_add_months(chrono::Months::new(1))
            .and_then(|next| next.pred_opt())
            .unwrap_or(date);
        Self { start, end }
    }

    /// Parses "Month Year" with a full English month name, case-insensitively.
    ///
    /// Unlike [`crate::calculation::parse_period`], this never falls back.
    pub fn parse_strict(input: &str) -> PayrollResult<Self> {
        let invalid = || PayrollError::InvalidPeriod {
            input: input.to_string(),
        };

        let mut parts = input.split_whitespace();
        let (Some(month_name), Some(year), None) = (parts.next(), parts.next(), parts.next())
        else {
            return Err(invalid());
        };

        let month = MONTH_NAMES
            .iter()
            .position(|name| name.eq_ignore_ascii_case(month_name))
            .ok_or_else(invalid)?;
        let year: i32 = year.parse().map_err(|_| invalid())?;

        Self::from_month(year, month as u32 + 1).ok_or_else(invalid)
    }
}

impl FromStr for Period {
    type Err = PayrollError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_strict(s)
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.start.format("%B %Y"))
    }
}
