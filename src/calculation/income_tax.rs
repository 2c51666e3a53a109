//! Progressive income tax (IR).
//!
//! ## Method
//!
//! Brackets are applied marginally: each bracket taxes only the slice of
//! income between the previous bracket's upper bound and its own, and the
//! slices are summed. The total is rounded to cents once, after summing, so
//! the result is monotone and continuous across bracket boundaries.
//!
//! | Upper bound (monthly) | Rate |
//! |---|---|
//! | 2 500.00 | 0% |
//! | 4 166.67 | 10% |
//! | 5 000.00 | 20% |
//! | 6 666.67 | 30% |
//! | 15 000.00 | 34% |
//! | above | 38% |

use rust_decimal::Decimal;

use crate::config::RateTable;
use crate::models::PayslipItem;

use super::rounding::round2;

/// Calculates income tax on a monthly taxable income.
///
/// Non-positive income yields zero.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::calculate_income_tax;
/// use payroll_engine::config::RateTable;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let rates = RateTable::morocco_2025();
///
/// // (4166.67 - 2500) * 10% + (5000 - 4166.67) * 20% = 333.333
/// let tax = calculate_income_tax(Decimal::from(5000), &rates);
/// assert_eq!(tax, Decimal::from_str("333.33").unwrap());
///
/// assert_eq!(calculate_income_tax(Decimal::from(2500), &rates), Decimal::ZERO);
/// ```
pub fn calculate_income_tax(taxable_income: Decimal, rates: &RateTable) -> Decimal {
    let mut tax = Decimal::ZERO;
    let mut lower = Decimal::ZERO;

    for bracket in &rates.income_tax.brackets {
        if taxable_income <= lower {
            break;
        }

        let upper = match bracket.upper_bound {
            Some(bound) if bound < taxable_income => bound,
            _ => taxable_income,
        };
        tax += (upper - lower) * bracket.rate;

        match bracket.upper_bound {
            Some(bound) => lower = bound,
            None => break,
        }
    }

    round2(tax)
}

/// Calculates the income tax is assessed on.
///
/// Sums taxable earnings and subtracts pre-tax deductions (social security,
/// health insurance, retirement). Other deductions, income tax included, are
/// not subtracted. The result is never negative.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::calculate_taxable_income;
/// use payroll_engine::models::{ItemCategory, PayslipItem};
/// use rust_decimal::Decimal;
///
/// let earnings = vec![
///     PayslipItem::earning("base", "Base", Decimal::from(6000), ItemCategory::Base),
///     PayslipItem::earning("meal", "Meal", Decimal::from(200), "meal".into()).non_taxable(),
/// ];
/// let deductions = vec![
///     PayslipItem::deduction("cnss", "CNSS", Decimal::from(257), ItemCategory::SocialSecurity),
///     PayslipItem::deduction("ir", "IR", Decimal::from(500), ItemCategory::IncomeTax),
/// ];
///
/// assert_eq!(calculate_taxable_income(&earnings, &deductions), Decimal::from(5743));
/// ```
pub fn calculate_taxable_income(earnings: &[PayslipItem], deductions: &[PayslipItem]) -> Decimal {
    (taxable_earnings(earnings) - pre_tax_deductions(deductions)).max(Decimal::ZERO)
}

/// Sums the earnings flagged taxable.
pub fn taxable_earnings(earnings: &[PayslipItem]) -> Decimal {
    earnings
        .iter()
        .filter(|item| item.taxable)
        .map(|item| item.amount)
        .sum()
}

/// Sums the deductions subtracted before income tax.
pub fn pre_tax_deductions(deductions: &[PayslipItem]) -> Decimal {
    deductions
        .iter()
        .filter(|item| item.category.is_pre_tax())
        .map(|item| item.amount)
        .sum()
}
