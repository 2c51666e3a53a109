//! Input validation in front of payslip generation.
//!
//! The calculators propagate whatever arithmetic they are given. Inputs are
//! checked here, once, before a payslip is assembled.

use rust_decimal::Decimal;
use std::collections::HashSet;

use crate::error::{PayrollError, PayrollResult};
use crate::models::{ItemCategory, ItemKind, PayrollInput, PayslipItem};

use super::payslip::{
    BASE_SALARY_ID, HEALTH_INSURANCE_ID, INCOME_TAX_ID, OVERTIME_ID_PREFIX, SOCIAL_SECURITY_ID,
};

fn reject(field: impl Into<String>, message: impl Into<String>) -> PayrollError {
    PayrollError::Validation {
        field: field.into(),
        message: message.into(),
    }
}

/// Largest monetary amount accepted for a salary or line item.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(1_000_000_000, 0, 0, false, 0);

/// Largest number of overtime hours accepted in one entry (a 31-day month).
pub const MAX_OVERTIME_HOURS: Decimal = Decimal::from_parts(744, 0, 0, false, 0);

/// Largest overtime multiplier accepted.
pub const MAX_OVERTIME_MULTIPLIER: Decimal = Decimal::from_parts(10, 0, 0, false, 0);

/// Rejects negative values.
pub fn validate_non_negative(field: &str, value: Decimal) -> PayrollResult<()> {
    if value < Decimal::ZERO {
        return Err(reject(field, format!("must not be negative (got {})", value)));
    }
    Ok(())
}

/// Rejects values outside `0..=max`.
pub fn validate_bounded(field: &str, value: Decimal, max: Decimal) -> PayrollResult<()> {
    validate_non_negative(field, value)?;
    if value > max {
        return Err(reject(field, format!("must not exceed {} (got {})", max, value)));
    }
    Ok(())
}

/// Checks a list of caller-supplied items.
///
/// Every item must be of `expected` kind with a non-empty id unique within
/// the list. Amounts must lie in `0..=MAX_AMOUNT` with at most two decimal
/// places.
pub fn validate_items(field: &str, items: &[PayslipItem], expected: ItemKind) -> PayrollResult<()> {
    let mut seen = HashSet::new();

    for (index, item) in items.iter().enumerate() {
        let item_field = format!("{}[{}]", field, index);

        if item.kind != expected {
            return Err(reject(
                item_field,
                format!("expected a {:?} item, got {:?}", expected, item.kind).to_lowercase(),
            ));
        }
        if item.id.trim().is_empty() {
            return Err(reject(item_field, "id must not be empty"));
        }
        if !seen.insert(item.id.as_str()) {
            return Err(reject(item_field, format!("duplicate id '{}'", item.id)));
        }
        let amount_field = format!("{}.amount", item_field);
        validate_bounded(&amount_field, item.amount, MAX_AMOUNT)?;
        if item.amount.normalize().scale() > 2 {
            return Err(reject(
                amount_field,
                format!("must have at most 2 decimal places (got {})", item.amount),
            ));
        }
    }

    Ok(())
}

/// Validates everything a payslip run is given.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::validate_input;
/// use payroll_engine::models::{Employee, PayrollInput};
/// use rust_decimal::Decimal;
///
/// let mut input = PayrollInput::new(
///     Employee { id: "emp_001".to_string(), base_salary: Decimal::from(6000), hire_date: None },
///     "December 2025",
/// );
/// assert!(validate_input(&input).is_ok());
///
/// input.employee.base_salary = Decimal::from(-1);
/// assert!(validate_input(&input).is_err());
/// ```
pub fn validate_input(input: &PayrollInput) -> PayrollResult<()> {
    if input.employee.id.trim().is_empty() {
        return Err(reject("employee.id", "must not be empty"));
    }
    validate_bounded("employee.base_salary", input.employee.base_salary, MAX_AMOUNT)?;

    for (index, entry) in input.overtime.iter().enumerate() {
        validate_bounded(
            &format!("overtime[{}].hours", index),
            entry.hours,
            MAX_OVERTIME_HOURS,
        )?;
        if let Some(multiplier) = entry.multiplier {
            let field = format!("overtime[{}].multiplier", index);
            if multiplier <= Decimal::ZERO {
                return Err(reject(field, format!("must be positive (got {})", multiplier)));
            }
            validate_bounded(&field, multiplier, MAX_OVERTIME_MULTIPLIER)?;
        }
    }

    validate_items(
        "additional_earnings",
        &input.additional_earnings,
        ItemKind::Earning,
    )?;
    for (index, item) in input.additional_earnings.iter().enumerate() {
        if item.id == BASE_SALARY_ID || item.id.starts_with(OVERTIME_ID_PREFIX) {
            return Err(reject(
                format!("additional_earnings[{}]", index),
                format!("id '{}' is reserved", item.id),
            ));
        }
    }

    validate_items(
        "additional_deductions",
        &input.additional_deductions,
        ItemKind::Deduction,
    )?;
    let statutory = [
        (SOCIAL_SECURITY_ID, ItemCategory::SocialSecurity),
        (HEALTH_INSURANCE_ID, ItemCategory::HealthInsurance),
        (INCOME_TAX_ID, ItemCategory::IncomeTax),
    ];
    for (index, item) in input.additional_deductions.iter().enumerate() {
        let clash = statutory
            .iter()
            .any(|(id, category)| item.id == *id && item.category != *category);
        if clash {
            return Err(reject(
                format!("additional_deductions[{}]", index),
                format!("id '{}' is reserved", item.id),
            ));
        }
    }

    Ok(())
}
