//! Configuration types for statutory payroll rates.
//!
//! This module contains the strongly-typed structures deserialized from the
//! YAML rate configuration, plus the compiled-in 2025 Moroccan table.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{PayrollError, PayrollResult};

/// Metadata about the jurisdiction the rates belong to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Jurisdiction {
    /// Short code (e.g., "MA").
    pub code: String,
    /// Human-readable name.
    pub name: String,
    /// ISO 4217 currency code amounts are expressed in.
    pub currency: String,
    /// URL to the official source of the rates.
    pub source_url: String,
}

impl Jurisdiction {
    /// The jurisdiction matching [`RateTable::morocco_2025`].
    pub fn morocco() -> Self {
        Self {
            code: "MA".to_string(),
            name: "Morocco".to_string(),
            currency: "MAD".to_string(),
            source_url: "https://www.cnss.ma".to_string(),
        }
    }
}

/// A single contribution rate pair.
///
/// Rates are fractions (`0.0429` for 4.29%). A `ceiling` caps the gross
/// amount the rates apply to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionRate {
    /// Rate withheld from the employee's pay.
    #[serde(default)]
    pub employee_rate: Decimal,
    /// Rate paid by the employer on top of gross pay.
    #[serde(default)]
    pub employer_rate: Decimal,
    /// Maximum gross amount subject to the contribution.
    #[serde(default)]
    pub ceiling: Option<Decimal>,
}

impl ContributionRate {
    /// Returns the portion of `gross` the rates apply to.
    pub fn base(&self, gross: Decimal) -> Decimal {
        match self.ceiling {
            Some(ceiling) if gross > ceiling => ceiling,
            _ => gross,
        }
    }
}

/// All statutory contributions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contributions {
    /// CNSS social security.
    pub social_security: ContributionRate,
    /// AMO mandatory health insurance.
    pub health_insurance: ContributionRate,
    /// Professional training levy (employer only).
    pub professional_training: ContributionRate,
}

/// One bracket of the progressive income tax schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    /// Inclusive monthly upper bound; `None` for the top bracket.
    #[serde(default)]
    pub upper_bound: Option<Decimal>,
    /// Marginal rate as a fraction.
    pub rate: Decimal,
}

/// The progressive income tax schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomeTaxSchedule {
    /// Brackets in ascending order of upper bound.
    pub brackets: Vec<TaxBracket>,
}

/// Statutory rates effective from a given date.
///
/// # Example
///
/// ```
/// use payroll_engine::config::RateTable;
/// use rust_decimal::Decimal;
///
/// let rates = RateTable::morocco_2025();
/// assert_eq!(rates.standard_monthly_hours, Decimal::from(191));
/// assert_eq!(rates.income_tax.brackets.len(), 6);
/// assert!(rates.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateTable {
    /// The first date these rates apply to.
    pub effective_date: NaiveDate,
    /// Standard monthly working hours used to derive an hourly rate.
    pub standard_monthly_hours: Decimal,
    /// Overtime multiplier used when the caller supplies none.
    pub default_overtime_multiplier: Decimal,
    /// Social contributions.
    pub contributions: Contributions,
    /// Income tax schedule.
    pub income_tax: IncomeTaxSchedule,
}

impl RateTable {
    /// The compiled-in 2025 Moroccan rate table.
    pub fn morocco_2025() -> Self {
        let bracket = |upper: Option<Decimal>, rate: Decimal| TaxBracket {
            upper_bound: upper,
            rate,
        };

        Self {
            effective_date: NaiveDate::from_ymd_opt(2025, 1, 1).expect("Valid effective date"),
            standard_monthly_hours: Decimal::new(191, 0),
            default_overtime_multiplier: Decimal::new(125, 2),
            contributions: Contributions {
                social_security: ContributionRate {
                    employee_rate: Decimal::new(429, 4),
                    employer_rate: Decimal::new(1289, 4),
                    ceiling: Some(Decimal::new(6000, 0)),
                },
                health_insurance: ContributionRate {
                    employee_rate: Decimal::new(226, 4),
                    employer_rate: Decimal::new(411, 4),
                    ceiling: None,
                },
                professional_training: ContributionRate {
                    employee_rate: Decimal::ZERO,
                    employer_rate: Decimal::new(16, 3),
                    ceiling: None,
                },
            },
            income_tax: IncomeTaxSchedule {
                brackets: vec![
                    bracket(Some(Decimal::new(2500, 0)), Decimal::ZERO),
                    bracket(Some(Decimal::new(416667, 2)), Decimal::new(10, 2)),
                    bracket(Some(Decimal::new(5000, 0)), Decimal::new(20, 2)),
                    bracket(Some(Decimal::new(666667, 2)), Decimal::new(30, 2)),
                    bracket(Some(Decimal::new(15000, 0)), Decimal::new(34, 2)),
                    bracket(None, Decimal::new(38, 2)),
                ],
            },
        }
    }

    /// Checks the table for internal consistency.
    ///
    /// Brackets must be strictly ascending with only the last one unbounded,
    /// every rate must lie within `[0, 1]`, and standard hours must be positive.
    pub fn validate(&self) -> PayrollResult<()> {
        let invalid = |message: String| PayrollError::InvalidRateTable {
            effective_date: self.effective_date,
            message,
        };

        if self.standard_monthly_hours <= Decimal::ZERO {
            return Err(invalid("standard_monthly_hours must be positive".to_string()));
        }
        if self.default_overtime_multiplier <= Decimal::ZERO {
            return Err(invalid(
                "default_overtime_multiplier must be positive".to_string(),
            ));
        }

        let contributions = [
            ("social_security", &self.contributions.social_security),
            ("health_insurance", &self.contributions.health_insurance),
            ("professional_training", &self.contributions.professional_training),
        ];
        for (name, contribution) in contributions {
            for rate in [contribution.employee_rate, contribution.employer_rate] {
                if !is_fraction(rate) {
                    return Err(invalid(format!("{} rate {} is outside [0, 1]", name, rate)));
                }
            }
            if contribution.ceiling.is_some_and(|c| c <= Decimal::ZERO) {
                return Err(invalid(format!("{} ceiling must be positive", name)));
            }
        }

        let brackets = &self.income_tax.brackets;
        if brackets.is_empty() {
            return Err(invalid("income tax schedule has no brackets".to_string()));
        }

        let mut previous = Decimal::ZERO;
        for (index, bracket) in brackets.iter().enumerate() {
            if !is_fraction(bracket.rate) {
                return Err(invalid(format!(
                    "bracket {} rate {} is outside [0, 1]",
                    index + 1,
                    bracket.rate
                )));
            }
            let is_last = index == brackets.len() - 1;
            match (bracket.upper_bound, is_last) {
                (Some(upper), false) => {
                    if upper <= previous {
                        return Err(invalid(format!(
                            "bracket {} upper bound {} is not above {}",
                            index + 1,
                            upper,
                            previous
                        )));
                    }
                    previous = upper;
                }
                (None, true) => {}
                (Some(_), true) => {
                    return Err(invalid("last bracket must be unbounded".to_string()));
                }
                (None, false) => {
                    return Err(invalid(format!(
                        "bracket {} is unbounded but not last",
                        index + 1
                    )));
                }
            }
        }

        Ok(())
    }
}

impl Default for RateTable {
    fn default() -> Self {
        Self::morocco_2025()
    }
}

fn is_fraction(rate: Decimal) -> bool {
    rate >= Decimal::ZERO && rate <= Decimal::ONE
}

/// The complete payroll configuration: jurisdiction plus dated rate tables.
#[derive(Debug, Clone)]
pub struct PayrollConfig {
    jurisdiction: Jurisdiction,
    /// Rate tables sorted oldest first.
    rates: Vec<RateTable>,
}

impl PayrollConfig {
    /// Creates a new PayrollConfig, sorting the rate tables by effective date.
    pub fn new(jurisdiction: Jurisdiction, rates: Vec<RateTable>) -> Self {
        let mut sorted_rates = rates;
        sorted_rates.sort_by(|a, b| a.effective_date.cmp(&b.effective_date));
        Self {
            jurisdiction,
            rates: sorted_rates,
        }
    }

    /// Returns the jurisdiction metadata.
    pub fn jurisdiction(&self) -> &Jurisdiction {
        &self.jurisdiction
    }

    /// Returns all rate tables, oldest first.
    pub fn rates(&self) -> &[RateTable] {
        &self.rates
    }

    /// Returns the most recent rate table effective on or before `date`.
    pub fn rates_for(&self, date: NaiveDate) -> PayrollResult<&RateTable> {
        self.rates
            .iter()
            .rfind(|r| r.effective_date <= date)
            .ok_or(PayrollError::RateTableNotFound { date })
    }
}
