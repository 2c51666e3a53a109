//! Base salary proration by hire date.
//!
//! An employee hired part-way through a period is owed the share of the
//! month's working days (not calendar days) from their hire date onward.

use chrono::{DateTime, NaiveDate};
use rust_decimal::Decimal;

use crate::models::{Period, ProrationResult};

use super::period::{count_monthly_working_days, count_working_days};
use super::rounding::round2;

/// Parses a hire date given as `YYYY-MM-DD` or an RFC 3339 timestamp.
pub fn parse_hire_date(input: &str) -> Option<NaiveDate> {
    let trimmed = input.trim();
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(trimmed)
                .ok()
                .map(|dt| dt.date_naive())
        })
}

/// Prorates a monthly base salary by a raw hire-date string.
///
/// An absent or unparseable hire date counts as employed for the whole
/// period.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::calculate_prorated_base;
/// use payroll_engine::models::Period;
/// use rust_decimal::Decimal;
///
/// let march: Period = "March 2025".parse().unwrap();
///
/// let full = calculate_prorated_base(Decimal::from(6000), Some("2025-02-01"), &march);
/// assert_eq!(full.prorated_base, Decimal::from(6000));
/// assert_eq!(full.days_worked, 21);
///
/// let late = calculate_prorated_base(Decimal::from(6000), Some("2025-04-02"), &march);
/// assert_eq!(late.prorated_base, Decimal::ZERO);
/// assert_eq!(late.days_worked, 0);
/// ```
pub fn calculate_prorated_base(
    base_salary: Decimal,
    hire_date: Option<&str>,
    period: &Period,
) -> ProrationResult {
    prorate_from_date(base_salary, hire_date.and_then(parse_hire_date), period)
}

/// Prorates a monthly base salary by an already-parsed hire date.
pub fn prorate_from_date(
    base_salary: Decimal,
    hire_date: Option<NaiveDate>,
    period: &Period,
) -> ProrationResult {
    let total_days = count_monthly_working_days(period);
    let full_period = ProrationResult {
        prorated_base: round2(base_salary),
        days_worked: total_days,
        total_days,
    };

    let Some(hire_date) = hire_date else {
        return full_period;
    };

    if hire_date > period.end {
        return ProrationResult {
            prorated_base: round2(Decimal::ZERO),
            days_worked: 0,
            total_days,
        };
    }

    if hire_date <= period.start || total_days == 0 {
        return full_period;
    }

    let days_worked = count_working_days(hire_date, period.end);
    let prorated_base =
        round2(base_salary * Decimal::from(days_worked) / Decimal::from(total_days));

    ProrationResult {
        prorated_base,
        days_worked,
        total_days,
    }
}
