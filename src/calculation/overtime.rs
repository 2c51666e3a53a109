//! Overtime pay calculation.
//!
//! The hourly rate is the monthly base salary divided by the standard monthly
//! hours of the rate table (191 = 44h/week x 52/12). The premium multiplier
//! defaults to the table's value (1.25); callers pass 1.5 or 2.0 for night,
//! rest-day or holiday overtime. The multiplier is not validated here.

use chrono::Utc;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::config::RateTable;
use crate::models::{ItemCategory, PayslipItem};

use super::contributions::rate_as_percentage;
use super::rounding::round2;

/// Hourly rate derived from a monthly base salary, unrounded.
pub fn hourly_rate(base_salary: Decimal, rates: &RateTable) -> Decimal {
    base_salary / rates.standard_monthly_hours
}

/// Calculates overtime pay.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::calculate_overtime;
/// use payroll_engine::config::RateTable;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let rates = RateTable::morocco_2025();
/// let multiplier = Some(Decimal::from_str("1.25").unwrap());
///
/// // 19100 / 191 = 100 per hour; 10h at 125%
/// let amount = calculate_overtime(Decimal::from(19100), Decimal::from(10), multiplier, &rates);
/// assert_eq!(amount, Decimal::from_str("1250.00").unwrap());
/// ```
pub fn calculate_overtime(
    base_salary: Decimal,
    hours: Decimal,
    multiplier: Option<Decimal>,
    rates: &RateTable,
) -> Decimal {
    let multiplier = multiplier.unwrap_or(rates.default_overtime_multiplier);
    round2(hourly_rate(base_salary, rates) * hours * multiplier)
}

/// Builds an overtime earning line.
///
/// When `id` is `None`, one is generated from the current time with a random
/// suffix so several items created in the same instant stay distinct.
pub fn create_overtime_item(
    base_salary: Decimal,
    hours: Decimal,
    multiplier: Option<Decimal>,
    id: Option<String>,
    rates: &RateTable,
) -> PayslipItem {
    let multiplier = multiplier.unwrap_or(rates.default_overtime_multiplier);
    let amount = calculate_overtime(base_salary, hours, Some(multiplier), rates);
    let percentage = rate_as_percentage(multiplier);

    let id = id.unwrap_or_else(|| {
        let suffix = Uuid::new_v4().simple().to_string();
        format!("overtime-{}-{}", Utc::now().timestamp_millis(), &suffix[..8])
    });

    let mut item = PayslipItem::earning(
        id,
        format!("Overtime ({}h at {}%)", hours.normalize(), percentage),
        amount,
        ItemCategory::Overtime,
    )
    .with_rate(percentage);
    item.hours = Some(hours);
    item.hourly_rate = Some(round2(hourly_rate(base_salary, rates)));
    item
}
