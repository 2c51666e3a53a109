//! Monetary rounding.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds to two decimal places, half-up (midpoint away from zero).
///
/// Every monetary amount the engine produces passes through here.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::round2;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let d = |s: &str| Decimal::from_str(s).unwrap();
/// assert_eq!(round2(d("333.333")), d("333.33"));
/// assert_eq!(round2(d("0.005")), d("0.01"));
/// assert_eq!(round2(d("1250")), d("1250.00"));
/// ```
pub fn round2(value: Decimal) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    // keep cent scale on whole amounts so "1250" serializes as "1250.00"
    rounded.rescale(2);
    rounded
}
