//! Calculation logic for the payroll engine.
//!
//! This module contains all the calculation functions for producing a
//! payslip: period parsing and working-day counting, hire-date proration,
//! social contributions, progressive income tax, overtime, and the assembler
//! that combines them into earnings and deductions.

mod contributions;
mod income_tax;
mod overtime;
mod payslip;
mod period;
mod proration;
mod rounding;
mod validation;

pub use contributions::{
    calculate_employer_health_insurance, calculate_employer_social_security,
    calculate_health_insurance, calculate_professional_training, calculate_social_security,
    employer_contributions, rate_as_percentage,
};
pub use income_tax::{
    calculate_income_tax, calculate_taxable_income, pre_tax_deductions, taxable_earnings,
};
pub use overtime::{calculate_overtime, create_overtime_item, hourly_rate};
pub use payslip::{
    BASE_SALARY_ID, HEALTH_INSURANCE_ID, INCOME_TAX_ID, OVERTIME_ID_PREFIX, PayslipItems,
    SOCIAL_SECURITY_ID, generate_default_payslip_items, generate_payslip,
    generate_payslip_for_period, recalculate_deductions,
};
pub use period::{
    ParsedPeriod, PeriodSource, count_monthly_working_days, count_working_days, is_working_day,
    parse_period, parse_period_at,
};
pub use proration::{calculate_prorated_base, parse_hire_date, prorate_from_date};
pub use rounding::round2;
pub use validation::{
    MAX_AMOUNT, MAX_OVERTIME_HOURS, MAX_OVERTIME_MULTIPLIER, validate_bounded, validate_input,
    validate_items, validate_non_negative,
};
