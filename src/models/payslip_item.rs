//! Payslip line items.
//!
//! This module contains the [`PayslipItem`] type shared by earnings and
//! deductions, along with its [`ItemKind`] and [`ItemCategory`] tags.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Whether an item adds to or subtracts from pay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    /// Adds to gross pay.
    Earning,
    /// Withheld from gross pay.
    Deduction,
}

/// The category an item is matched by during recalculation.
///
/// Serialized as a plain snake_case string; unknown strings round-trip
/// through [`ItemCategory::Custom`].
///
/// # Example
///
/// ```
/// use payroll_engine::models::ItemCategory;
///
/// let category: ItemCategory = serde_json::from_str("\"social_security\"").unwrap();
/// assert_eq!(category, ItemCategory::SocialSecurity);
///
/// let custom: ItemCategory = serde_json::from_str("\"transport_allowance\"").unwrap();
/// assert_eq!(custom, ItemCategory::Custom("transport_allowance".to_string()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ItemCategory {
    /// Monthly base salary (possibly prorated).
    Base,
    /// Overtime pay.
    Overtime,
    /// CNSS social security contribution.
    SocialSecurity,
    /// AMO health insurance contribution.
    HealthInsurance,
    /// IR income tax.
    IncomeTax,
    /// Retirement contribution (pre-tax).
    Retirement,
    /// Professional training levy (employer side only).
    ProfessionalTraining,
    /// Any caller-defined category.
    Custom(String),
}

impl ItemCategory {
    /// Returns the wire name of the category.
    pub fn as_str(&self) -> &str {
        match self {
            ItemCategory::Base => "base",
            ItemCategory::Overtime => "overtime",
            ItemCategory::SocialSecurity => "social_security",
            ItemCategory::HealthInsurance => "health_insurance",
            ItemCategory::IncomeTax => "income_tax",
            ItemCategory::Retirement => "retirement",
            ItemCategory::ProfessionalTraining => "professional_training",
            ItemCategory::Custom(name) => name,
        }
    }

    /// Returns true for deductions subtracted before income tax is assessed.
    pub fn is_pre_tax(&self) -> bool {
        matches!(
            self,
            ItemCategory::SocialSecurity | ItemCategory::HealthInsurance | ItemCategory::Retirement
        )
    }
}

impl From<String> for ItemCategory {
    fn from(value: String) -> Self {
        match value.as_str() {
            "base" => ItemCategory::Base,
            "overtime" => ItemCategory::Overtime,
            "social_security" => ItemCategory::SocialSecurity,
            "health_insurance" => ItemCategory::HealthInsurance,
            "income_tax" => ItemCategory::IncomeTax,
            "retirement" => ItemCategory::Retirement,
            "professional_training" => ItemCategory::ProfessionalTraining,
            _ => ItemCategory::Custom(value),
        }
    }
}

impl From<&str> for ItemCategory {
    fn from(value: &str) -> Self {
        ItemCategory::from(value.to_string())
    }
}

impl From<ItemCategory> for String {
    fn from(value: ItemCategory) -> Self {
        match value {
            ItemCategory::Custom(name) => name,
            other => other.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for ItemCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

fn default_taxable() -> bool {
    true
}

/// One line entry on a payslip.
///
/// `amount` is never negative and always carries cent precision.
///
/// # Example
///
/// ```
/// use payroll_engine::models::{ItemCategory, ItemKind, PayslipItem};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let item = PayslipItem::earning(
///     "bonus-1",
///     "Performance bonus",
///     Decimal::from_str("500.00").unwrap(),
///     ItemCategory::Custom("bonus".to_string()),
/// );
/// assert_eq!(item.kind, ItemKind::Earning);
/// assert!(item.taxable);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayslipItem {
    /// Identifier, unique within a payslip.
    pub id: String,
    /// Human-readable description.
    pub label: String,
    /// Monetary value, rounded to 2 decimal places.
    pub amount: Decimal,
    /// Earning or deduction.
    pub kind: ItemKind,
    /// Category used for recalculation matching.
    pub category: ItemCategory,
    /// Whether an earning counts toward taxable income.
    #[serde(default = "default_taxable")]
    pub taxable: bool,
    /// Percentage used to derive `amount`, for audit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rate: Option<Decimal>,
    /// Hours worked (overtime items only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hours: Option<Decimal>,
    /// Hourly rate (overtime items only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hourly_rate: Option<Decimal>,
}

impl PayslipItem {
    /// Creates a taxable earning.
    pub fn earning(
        id: impl Into<String>,
        label: impl Into<String>,
        amount: Decimal,
        category: ItemCategory,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            amount,
            kind: ItemKind::Earning,
            category,
            taxable: true,
            rate: None,
            hours: None,
            hourly_rate: None,
        }
    }

    /// Creates a deduction.
    pub fn deduction(
        id: impl Into<String>,
        label: impl Into<String>,
        amount: Decimal,
        category: ItemCategory,
    ) -> Self {
        Self {
            kind: ItemKind::Deduction,
            taxable: false,
            ..Self::earning(id, label, amount, category)
        }
    }

    /// Sets the percentage the amount was derived from.
    pub fn with_rate(mut self, rate: Decimal) -> Self {
        self.rate = Some(rate);
        self
    }

    /// Marks an earning as excluded from taxable income.
    pub fn non_taxable(mut self) -> Self {
        self.taxable = false;
        self
    }
}

/// Sums the amounts of a list of items.
pub fn sum_amounts(items: &[PayslipItem]) -> Decimal {
    items.iter().map(|item| item.amount).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_category_serializes_as_plain_string() {
        let json = serde_json::to_string(&ItemCategory::HealthInsurance).unwrap();
        assert_eq!(json, "\"health_insurance\"");

        let json = serde_json::to_string(&ItemCategory::Custom("meal".to_string())).unwrap();
        assert_eq!(json, "\"meal\"");
    }

    #[test]
    fn test_known_category_names_are_not_custom() {
        for name in [
            "base",
            "overtime",
            "social_security",
            "health_insurance",
            "income_tax",
            "retirement",
            "professional_training",
        ] {
            let category = ItemCategory::from(name);
            assert!(
                !matches!(category, ItemCategory::Custom(_)),
                "{} parsed as custom",
                name
            );
            assert_eq!(category.as_str(), name);
        }
    }

    #[test]
    fn test_pre_tax_categories() {
        assert!(ItemCategory::SocialSecurity.is_pre_tax());
        assert!(ItemCategory::HealthInsurance.is_pre_tax());
        assert!(ItemCategory::Retirement.is_pre_tax());
        assert!(!ItemCategory::IncomeTax.is_pre_tax());
        assert!(!ItemCategory::Custom("loan".to_string()).is_pre_tax());
    }

    #[test]
    fn test_deserialize_item_defaults_taxable_to_true() {
        let json = r#"{
            "id": "bonus-1",
            "label": "Bonus",
            "amount": "250.00",
            "kind": "earning",
            "category": "bonus"
        }"#;

        let item: PayslipItem = serde_json::from_str(json).unwrap();
        assert!(item.taxable);
        assert_eq!(item.amount, dec("250.00"));
        assert_eq!(item.category, ItemCategory::Custom("bonus".to_string()));
        assert!(item.rate.is_none());
    }

    #[test]
    fn test_serialize_item_skips_absent_optionals() {
        let item = PayslipItem::deduction(
            "cnss",
            "CNSS",
            dec("257.40"),
            ItemCategory::SocialSecurity,
        )
        .with_rate(dec("4.29"));

        let json = serde_json::to_string(&item).unwrap();
        assert!(json.contains("\"kind\":\"deduction\""));
        assert!(json.contains("\"category\":\"social_security\""));
        assert!(json.contains("\"amount\":\"257.40\""));
        assert!(json.contains("\"rate\":\"4.29\""));
        assert!(!json.contains("hours"));
        assert!(!json.contains("hourly_rate"));
    }

    #[test]
    fn test_deduction_constructor_is_not_taxable() {
        let item = PayslipItem::deduction("ir", "IR", dec("10"), ItemCategory::IncomeTax);
        assert_eq!(item.kind, ItemKind::Deduction);
        assert!(!item.taxable);
    }

    #[test]
    fn test_sum_amounts() {
        let items = vec![
            PayslipItem::earning("a", "A", dec("100.10"), ItemCategory::Base),
            PayslipItem::earning("b", "B", dec("0.25"), ItemCategory::Overtime),
        ];
        assert_eq!(sum_amounts(&items), dec("100.35"));
        assert_eq!(sum_amounts(&[]), Decimal::ZERO);
    }
}
