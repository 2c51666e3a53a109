//! Social contribution calculators.
//!
//! Employee-side amounts (CNSS social security, AMO health insurance) are
//! withheld from pay. Employer-side amounts are informational and only feed
//! the employer cost on a payslip.

use rust_decimal::Decimal;

use crate::config::{ContributionRate, RateTable};
use crate::models::{EmployerContribution, ItemCategory};

use super::rounding::round2;

fn employee_share(gross: Decimal, contribution: &ContributionRate) -> Decimal {
    round2(contribution.base(gross) * contribution.employee_rate)
}

fn employer_share(gross: Decimal, contribution: &ContributionRate) -> Decimal {
    round2(contribution.base(gross) * contribution.employer_rate)
}

/// Converts a fractional rate to the percentage shown on a payslip.
pub fn rate_as_percentage(rate: Decimal) -> Decimal {
    (rate * Decimal::ONE_HUNDRED).normalize()
}

/// Employee social security contribution on a capped base.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::calculate_social_security;
/// use payroll_engine::config::RateTable;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let rates = RateTable::morocco_2025();
/// let capped = calculate_social_security(Decimal::from(10000), &rates);
/// assert_eq!(capped, Decimal::from_str("257.40").unwrap());
/// assert_eq!(capped, calculate_social_security(Decimal::from(6000), &rates));
/// ```
pub fn calculate_social_security(gross_salary: Decimal, rates: &RateTable) -> Decimal {
    employee_share(gross_salary, &rates.contributions.social_security)
}

/// Employee health insurance contribution, uncapped.
pub fn calculate_health_insurance(gross_salary: Decimal, rates: &RateTable) -> Decimal {
    employee_share(gross_salary, &rates.contributions.health_insurance)
}

/// Employer social security contribution on the same capped base.
pub fn calculate_employer_social_security(gross_salary: Decimal, rates: &RateTable) -> Decimal {
    employer_share(gross_salary, &rates.contributions.social_security)
}

/// Employer health insurance contribution.
pub fn calculate_employer_health_insurance(gross_salary: Decimal, rates: &RateTable) -> Decimal {
    employer_share(gross_salary, &rates.contributions.health_insurance)
}

/// Employer professional training levy.
pub fn calculate_professional_training(gross_salary: Decimal, rates: &RateTable) -> Decimal {
    employer_share(gross_salary, &rates.contributions.professional_training)
}

/// All employer contributions on a gross amount, in payslip order.
pub fn employer_contributions(gross_salary: Decimal, rates: &RateTable) -> Vec<EmployerContribution> {
    let contributions = &rates.contributions;
    [
        (
            ItemCategory::SocialSecurity,
            "CNSS social security (employer)",
            &contributions.social_security,
        ),
        (
            ItemCategory::HealthInsurance,
            "AMO health insurance (employer)",
            &contributions.health_insurance,
        ),
        (
            ItemCategory::ProfessionalTraining,
            "Professional training levy",
            &contributions.professional_training,
        ),
    ]
    .into_iter()
    .map(|(category, label, contribution)| EmployerContribution {
        category,
        label: label.to_string(),
        base: round2(contribution.base(gross_salary)),
        rate: rate_as_percentage(contribution.employer_rate),
        amount: employer_share(gross_salary, contribution),
    })
    .collect()
}
