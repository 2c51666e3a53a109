//! Payslip assembly.
//!
//! Combines proration, overtime and the statutory deduction calculators into
//! payslip line items, and recomputes statutory deductions after a caller
//! edits the earnings.

use std::time::Instant;

use chrono::Utc;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::config::RateTable;
use crate::error::PayrollResult;
use crate::models::{
    AuditStep, AuditTrace, AuditWarning, ItemCategory, ItemKind, Payslip, PayrollInput,
    PayslipItem, PayslipTotals, sum_amounts,
};

use super::contributions::{
    calculate_health_insurance, calculate_social_security, employer_contributions,
    rate_as_percentage,
};
use super::income_tax::{
    calculate_income_tax, calculate_taxable_income, pre_tax_deductions, taxable_earnings,
};
use super::overtime::create_overtime_item;
use super::period::{ParsedPeriod, PeriodSource, parse_period};
use super::proration::{parse_hire_date, prorate_from_date};
use super::rounding::round2;
use super::validation::validate_input;

/// Id of the base salary earning.
pub const BASE_SALARY_ID: &str = "base";
/// Id prefix of overtime earnings generated by [`generate_payslip`].
pub const OVERTIME_ID_PREFIX: &str = "overtime-";
/// Id of a newly created social security deduction.
pub const SOCIAL_SECURITY_ID: &str = "cnss";
/// Id of a newly created health insurance deduction.
pub const HEALTH_INSURANCE_ID: &str = "amo";
/// Id of a newly created income tax deduction.
pub const INCOME_TAX_ID: &str = "ir";

/// Earnings and deductions of a payslip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayslipItems {
    /// Earning lines.
    pub earnings: Vec<PayslipItem>,
    /// Deduction lines.
    pub deductions: Vec<PayslipItem>,
}

fn base_salary_item(amount: Decimal) -> PayslipItem {
    PayslipItem::earning(BASE_SALARY_ID, "Base salary", round2(amount), ItemCategory::Base)
}

fn social_security_item(amount: Decimal, rates: &RateTable) -> PayslipItem {
    PayslipItem::deduction(
        SOCIAL_SECURITY_ID,
        "CNSS social security",
        amount,
        ItemCategory::SocialSecurity,
    )
    .with_rate(rate_as_percentage(
        rates.contributions.social_security.employee_rate,
    ))
}

fn health_insurance_item(amount: Decimal, rates: &RateTable) -> PayslipItem {
    PayslipItem::deduction(
        HEALTH_INSURANCE_ID,
        "AMO health insurance",
        amount,
        ItemCategory::HealthInsurance,
    )
    .with_rate(rate_as_percentage(
        rates.contributions.health_insurance.employee_rate,
    ))
}

fn income_tax_item(amount: Decimal) -> PayslipItem {
    PayslipItem::deduction(INCOME_TAX_ID, "Income tax (IR)", amount, ItemCategory::IncomeTax)
}

/// Builds the items of a payslip with no overtime or extras.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::generate_default_payslip_items;
/// use payroll_engine::config::RateTable;
/// use rust_decimal::Decimal;
///
/// let items = generate_default_payslip_items(Decimal::from(6000), &RateTable::morocco_2025());
///
/// let amounts: Vec<String> = items.deductions.iter().map(|d| d.amount.to_string()).collect();
/// assert_eq!(amounts, ["257.40", "135.60", "515.43"]);
/// ```
pub fn generate_default_payslip_items(base_salary: Decimal, rates: &RateTable) -> PayslipItems {
    let earnings = vec![base_salary_item(base_salary)];
    let deductions = recalculate_deductions(&earnings, &[], rates);
    PayslipItems {
        earnings,
        deductions,
    }
}

/// Recomputes statutory deductions for a set of earnings.
///
/// Social security, health insurance and income tax lines are matched by
/// category and updated in place, keeping their id, label and position.
/// Missing lines are appended. Other deductions pass through untouched and
/// still count toward taxable income when their category is pre-tax.
///
/// When a caller supplies several lines of one statutory category, the first
/// is kept and the rest are dropped. An income tax line is removed once no tax
/// is owed.
pub fn recalculate_deductions(
    earnings: &[PayslipItem],
    existing: &[PayslipItem],
    rates: &RateTable,
) -> Vec<PayslipItem> {
    let gross = sum_amounts(earnings);
    let mut deductions = existing.to_vec();

    upsert_statutory(
        &mut deductions,
        social_security_item(calculate_social_security(gross, rates), rates),
    );
    upsert_statutory(
        &mut deductions,
        health_insurance_item(calculate_health_insurance(gross, rates), rates),
    );

    let taxable_income = calculate_taxable_income(earnings, &deductions);
    let income_tax = calculate_income_tax(taxable_income, rates);

    if income_tax > Decimal::ZERO {
        upsert_statutory(&mut deductions, income_tax_item(income_tax));
    } else {
        deductions.retain(|item| item.category != ItemCategory::IncomeTax);
    }

    deductions
}

fn upsert_statutory(deductions: &mut Vec<PayslipItem>, computed: PayslipItem) {
    let Some(position) = deductions
        .iter()
        .position(|item| item.category == computed.category)
    else {
        deductions.push(computed);
        return;
    };

    let mut index = 0;
    deductions.retain(|item| {
        let keep = index <= position || item.category != computed.category;
        index += 1;
        keep
    });

    let slot = &mut deductions[position];
    slot.amount = computed.amount;
    slot.rate = computed.rate;
    slot.kind = ItemKind::Deduction;
    slot.taxable = false;
}

/// Generates a complete payslip.
///
/// The period string is parsed with [`parse_period`]; see
/// [`generate_payslip_for_period`] to supply an already-parsed period.
pub fn generate_payslip(input: &PayrollInput, rates: &RateTable) -> PayrollResult<Payslip> {
    let parsed = parse_period(&input.period);
    generate_payslip_for_period(input, parsed, rates)
}

/// Generates a complete payslip for a resolved period.
///
/// Input is validated first. The base salary is prorated by hire date,
/// overtime is paid on the full monthly base, and deductions are recomputed
/// over the caller's additional deductions. Fallbacks taken along the way are
/// reported as audit warnings.
pub fn generate_payslip_for_period(
    input: &PayrollInput,
    parsed: ParsedPeriod,
    rates: &RateTable,
) -> PayrollResult<Payslip> {
    let start_time = Instant::now();
    validate_input(input)?;

    let employee = &input.employee;
    let period = parsed.period;
    let mut steps: Vec<AuditStep> = Vec::new();
    let mut warnings: Vec<AuditWarning> = Vec::new();
    let mut step_number: u32 = 1;

    match parsed.source {
        PeriodSource::MonthName => {}
        PeriodSource::Generic => warnings.push(AuditWarning {
            code: "PERIOD_FALLBACK".to_string(),
            message: format!(
                "Period '{}' is not in 'Month Year' form; read as {}",
                input.period, period
            ),
            severity: "medium".to_string(),
        }),
        PeriodSource::CurrentMonthFallback => warnings.push(AuditWarning {
            code: "PERIOD_FALLBACK".to_string(),
            message: format!(
                "Period '{}' could not be parsed; the current month ({}) was used",
                input.period, period
            ),
            severity: "high".to_string(),
        }),
    }

    // Proration
    let hire_date = match employee.hire_date.as_deref() {
        Some(raw) => {
            let parsed_date = parse_hire_date(raw);
            if parsed_date.is_none() {
                warnings.push(AuditWarning {
                    code: "HIRE_DATE_UNPARSEABLE".to_string(),
                    message: format!(
                        "Hire date '{}' could not be parsed; paid for the full period",
                        raw
                    ),
                    severity: "medium".to_string(),
                });
            }
            parsed_date
        }
        None => None,
    };

    let proration = prorate_from_date(employee.base_salary, hire_date, &period);
    if proration.days_worked == 0 {
        warnings.push(AuditWarning {
            code: "NOT_EMPLOYED_IN_PERIOD".to_string(),
            message: format!("No working days employed in {}; base salary is zero", period),
            severity: "low".to_string(),
        });
    }

    steps.push(AuditStep {
        step_number,
        rule_id: "proration".to_string(),
        rule_name: "Base Salary Proration".to_string(),
        input: serde_json::json!({
            "base_salary": employee.base_salary.normalize().to_string(),
            "hire_date": employee.hire_date,
            "period_start": period.start.to_string(),
            "period_end": period.end.to_string()
        }),
        output: serde_json::json!({
            "prorated_base": proration.prorated_base.to_string(),
            "days_worked": proration.days_worked,
            "total_days": proration.total_days
        }),
        reasoning: if proration.days_worked == proration.total_days {
            format!("Employed all {} working days; full base salary", proration.total_days)
        } else {
            format!(
                "Employed {} of {} working days: {} x {} / {} = {}",
                proration.days_worked,
                proration.total_days,
                employee.base_salary.normalize(),
                proration.days_worked,
                proration.total_days,
                proration.prorated_base
            )
        },
    });
    step_number += 1;

    let mut earnings = vec![base_salary_item(proration.prorated_base)];

    // Overtime
    for (index, entry) in input.overtime.iter().enumerate() {
        let item = create_overtime_item(
            employee.base_salary,
            entry.hours,
            entry.multiplier,
            Some(format!("{}{}", OVERTIME_ID_PREFIX, index + 1)),
            rates,
        );

        steps.push(AuditStep {
            step_number,
            rule_id: "overtime".to_string(),
            rule_name: "Overtime Pay".to_string(),
            input: serde_json::json!({
                "base_salary": employee.base_salary.normalize().to_string(),
                "hours": entry.hours.normalize().to_string(),
                "multiplier": entry
                    .multiplier
                    .unwrap_or(rates.default_overtime_multiplier)
                    .normalize()
                    .to_string(),
                "standard_monthly_hours": rates.standard_monthly_hours.normalize().to_string()
            }),
            output: serde_json::json!({
                "hourly_rate": item.hourly_rate.map(|rate| rate.to_string()),
                "amount": item.amount.to_string()
            }),
            reasoning: format!(
                "{}h at {}% of the hourly rate ({} / {} hours)",
                entry.hours.normalize(),
                item.rate.unwrap_or_default(),
                employee.base_salary.normalize(),
                rates.standard_monthly_hours.normalize()
            ),
        });
        step_number += 1;

        earnings.push(item);
    }

    earnings.extend(input.additional_earnings.iter().cloned());

    // Statutory deductions
    let deductions = recalculate_deductions(&earnings, &input.additional_deductions, rates);
    let gross_pay = sum_amounts(&earnings);
    let statutory_amount = |category: ItemCategory| {
        deductions
            .iter()
            .find(|item| item.category == category)
            .map(|item| item.amount)
            .unwrap_or(Decimal::ZERO)
    };
    let social_security = statutory_amount(ItemCategory::SocialSecurity);
    let health_insurance = statutory_amount(ItemCategory::HealthInsurance);
    let income_tax = statutory_amount(ItemCategory::IncomeTax);
    let taxable_income = calculate_taxable_income(&earnings, &deductions);

    let social_security_rate = &rates.contributions.social_security;
    steps.push(AuditStep {
        step_number,
        rule_id: "social_security".to_string(),
        rule_name: "CNSS Social Security".to_string(),
        input: serde_json::json!({
            "gross_pay": gross_pay.to_string(),
            "ceiling": social_security_rate.ceiling.map(|c| c.normalize().to_string()),
            "rate": rate_as_percentage(social_security_rate.employee_rate).to_string()
        }),
        output: serde_json::json!({ "amount": social_security.to_string() }),
        reasoning: format!(
            "{}% of {}",
            rate_as_percentage(social_security_rate.employee_rate),
            round2(social_security_rate.base(gross_pay))
        ),
    });
    step_number += 1;

    let health_insurance_rate = rates.contributions.health_insurance.employee_rate;
    steps.push(AuditStep {
        step_number,
        rule_id: "health_insurance".to_string(),
        rule_name: "AMO Health Insurance".to_string(),
        input: serde_json::json!({
            "gross_pay": gross_pay.to_string(),
            "rate": rate_as_percentage(health_insurance_rate).to_string()
        }),
        output: serde_json::json!({ "amount": health_insurance.to_string() }),
        reasoning: format!(
            "{}% of {}",
            rate_as_percentage(health_insurance_rate),
            gross_pay
        ),
    });
    step_number += 1;

    steps.push(AuditStep {
        step_number,
        rule_id: "taxable_income".to_string(),
        rule_name: "Taxable Income".to_string(),
        input: serde_json::json!({
            "taxable_earnings": taxable_earnings(&earnings).to_string(),
            "pre_tax_deductions": pre_tax_deductions(&deductions).to_string()
        }),
        output: serde_json::json!({ "taxable_income": taxable_income.to_string() }),
        reasoning: "Taxable earnings less social security, health insurance and retirement"
            .to_string(),
    });
    step_number += 1;

    steps.push(AuditStep {
        step_number,
        rule_id: "income_tax".to_string(),
        rule_name: "Progressive Income Tax".to_string(),
        input: serde_json::json!({ "taxable_income": taxable_income.to_string() }),
        output: serde_json::json!({ "amount": income_tax.to_string() }),
        reasoning: if income_tax > Decimal::ZERO {
            "Marginal brackets applied to taxable income".to_string()
        } else {
            "Taxable income within the exempt band; no income tax line".to_string()
        },
    });
    step_number += 1;

    // Employer side
    let employer = employer_contributions(gross_pay, rates);
    steps.push(AuditStep {
        step_number,
        rule_id: "employer_contributions".to_string(),
        rule_name: "Employer Contributions".to_string(),
        input: serde_json::json!({ "gross_pay": gross_pay.to_string() }),
        output: serde_json::json!(
            employer
                .iter()
                .map(|c| (c.category.to_string(), serde_json::Value::from(c.amount.to_string())))
                .collect::<serde_json::Map<String, serde_json::Value>>()
        ),
        reasoning: "Employer contributions are informational and not deducted from net pay"
            .to_string(),
    });

    let totals = PayslipTotals::from_items(&earnings, &deductions, &employer);

    debug!(
        employee_id = %employee.id,
        period = %period,
        gross_pay = %totals.gross_pay,
        taxable_income = %totals.taxable_income,
        net_pay = %totals.net_pay,
        warnings = warnings.len(),
        "Payslip calculated"
    );

    Ok(Payslip {
        payslip_id: Uuid::new_v4(),
        generated_at: Utc::now(),
        engine_version: env!("CARGO_PKG_VERSION").to_string(),
        employee_id: employee.id.clone(),
        period: period.to_string(),
        period_start: period.start,
        period_end: period.end,
        proration,
        earnings,
        deductions,
        employer_contributions: employer,
        totals,
        audit_trace: AuditTrace {
            steps,
            warnings,
            duration_us: start_time.elapsed().as_micros() as u64,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Employee, OvertimeEntry};
    use chrono::NaiveDate;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn rates() -> RateTable {
        RateTable::morocco_2025()
    }

    fn input(base: &str, hire_date: Option<&str>, period: &str) -> PayrollInput {
        PayrollInput::new(
            Employee {
                id: "emp_001".to_string(),
                base_salary: dec(base),
                hire_date: hire_date.map(str::to_string),
            },
            period,
        )
    }

    fn find<'a>(items: &'a [PayslipItem], category: ItemCategory) -> Option<&'a PayslipItem> {
        items.iter().find(|item| item.category == category)
    }

    #[test]
    fn test_default_items_for_6000() {
        let items = generate_default_payslip_items(dec("6000"), &rates());

        assert_eq!(items.earnings.len(), 1);
        assert_eq!(items.earnings[0].id, BASE_SALARY_ID);
        assert_eq!(items.earnings[0].amount, dec("6000.00"));

        let ids: Vec<&str> = items.deductions.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, [SOCIAL_SECURITY_ID, HEALTH_INSURANCE_ID, INCOME_TAX_ID]);

        assert_eq!(items.deductions[0].amount, dec("257.40"));
        assert_eq!(items.deductions[0].rate, Some(dec("4.29")));
        assert_eq!(items.deductions[1].amount, dec("135.60"));
        assert_eq!(items.deductions[1].rate, Some(dec("2.26")));
        // taxable 5607.00
        assert_eq!(items.deductions[2].amount, dec("515.43"));
    }

    #[test]
    fn test_default_items_in_zero_band_have_no_income_tax() {
        let items = generate_default_payslip_items(dec("2500"), &rates());

        assert_eq!(items.deductions.len(), 2);
        assert!(find(&items.deductions, ItemCategory::IncomeTax).is_none());
        let totals = PayslipTotals::from_items(&items.earnings, &items.deductions, &[]);
        assert_eq!(totals.net_pay, dec("2336.25"));
    }

    #[test]
    fn test_default_items_above_ceiling() {
        let items = generate_default_payslip_items(dec("10000"), &rates());
        let totals = PayslipTotals::from_items(&items.earnings, &items.deductions, &[]);

        assert_eq!(items.deductions[0].amount, dec("257.40"));
        assert_eq!(items.deductions[1].amount, dec("226.00"));
        assert_eq!(totals.taxable_income, dec("9516.60"));
        assert_eq!(items.deductions[2].amount, dec("1802.31"));
        assert_eq!(totals.net_pay, dec("7714.29"));
    }

    #[test]
    fn test_default_items_are_deterministic() {
        let a = generate_default_payslip_items(dec("7345.55"), &rates());
        let b = generate_default_payslip_items(dec("7345.55"), &rates());
        assert_eq!(a, b);
    }

    #[test]
    fn test_recalculate_after_adding_overtime() {
        let mut items = generate_default_payslip_items(dec("6000"), &rates());
        items.earnings.push(create_overtime_item(
            dec("6000"),
            dec("10"),
            None,
            Some("overtime-1".to_string()),
            &rates(),
        ));

        let deductions = recalculate_deductions(&items.earnings, &items.deductions, &rates());

        assert_eq!(deductions.len(), 3);
        assert_eq!(deductions[0].amount, dec("257.40"));
        assert_eq!(deductions[1].amount, dec("144.47"));
        // taxable 6392.67 - 257.40 - 144.47 = 5990.80
        assert_eq!(deductions[2].amount, dec("630.57"));
    }

    #[test]
    fn test_recalculate_preserves_ids_labels_and_custom_lines() {
        let earnings = vec![base_salary_item(dec("6000"))];
        let existing = vec![
            PayslipItem::deduction("loan-7", "Salary advance", dec("500"), "advance".into()),
            PayslipItem::deduction(
                "soc-sec",
                "Sécurité sociale",
                dec("1"),
                ItemCategory::SocialSecurity,
            ),
        ];

        let deductions = recalculate_deductions(&earnings, &existing, &rates());

        assert_eq!(deductions[0].id, "loan-7");
        assert_eq!(deductions[0].amount, dec("500"));
        assert_eq!(deductions[1].id, "soc-sec");
        assert_eq!(deductions[1].label, "Sécurité sociale");
        assert_eq!(deductions[1].amount, dec("257.40"));
        assert_eq!(deductions[2].id, HEALTH_INSURANCE_ID);
        assert_eq!(deductions[3].id, INCOME_TAX_ID);
    }

    #[test]
    fn test_recalculate_removes_stale_income_tax() {
        let items = generate_default_payslip_items(dec("6000"), &rates());
        assert!(find(&items.deductions, ItemCategory::IncomeTax).is_some());

        let reduced = vec![base_salary_item(dec("2000"))];
        let deductions = recalculate_deductions(&reduced, &items.deductions, &rates());

        assert!(find(&deductions, ItemCategory::IncomeTax).is_none());
        assert_eq!(deductions.len(), 2);
    }

    #[test]
    fn test_recalculate_drops_duplicate_statutory_lines() {
        let earnings = vec![base_salary_item(dec("6000"))];
        let existing = vec![
            PayslipItem::deduction("amo-a", "AMO", dec("1"), ItemCategory::HealthInsurance),
            PayslipItem::deduction("loan", "Loan", dec("100"), "loan".into()),
            PayslipItem::deduction("amo-b", "AMO again", dec("2"), ItemCategory::HealthInsurance),
        ];

        let deductions = recalculate_deductions(&earnings, &existing, &rates());
        let health: Vec<&PayslipItem> = deductions
            .iter()
            .filter(|d| d.category == ItemCategory::HealthInsurance)
            .collect();

        assert_eq!(health.len(), 1);
        assert_eq!(health[0].id, "amo-a");
        assert_eq!(health[0].amount, dec("135.60"));
        assert!(deductions.iter().any(|d| d.id == "loan"));
    }

    #[test]
    fn test_recalculate_is_idempotent() {
        let earnings = vec![
            base_salary_item(dec("8200")),
            PayslipItem::earning("bonus", "Bonus", dec("750"), "bonus".into()),
        ];
        let existing = vec![PayslipItem::deduction(
            "cimr",
            "CIMR retirement",
            dec("250"),
            ItemCategory::Retirement,
        )];

        let once = recalculate_deductions(&earnings, &existing, &rates());
        let twice = recalculate_deductions(&earnings, &once, &rates());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_retirement_lowers_income_tax() {
        let earnings = vec![base_salary_item(dec("6000"))];
        let without = recalculate_deductions(&earnings, &[], &rates());
        let with = recalculate_deductions(
            &earnings,
            &[PayslipItem::deduction(
                "cimr",
                "CIMR",
                dec("300"),
                ItemCategory::Retirement,
            )],
            &rates(),
        );

        let tax = |items: &[PayslipItem]| find(items, ItemCategory::IncomeTax).unwrap().amount;
        // taxable drops from 5607.00 to 5307.00: 300 at the 30% margin
        assert_eq!(tax(&without) - tax(&with), dec("90.00"));
    }

    #[test]
    fn test_generate_payslip_full_month() {
        let payslip = generate_payslip(&input("6000", Some("2020-09-01"), "December 2025"), &rates())
            .unwrap();

        assert_eq!(payslip.period, "December 2025");
        assert_eq!(payslip.period_start, NaiveDate::from_ymd_opt(2025, 12, 1).unwrap());
        assert_eq!(payslip.period_end, NaiveDate::from_ymd_opt(2025, 12, 31).unwrap());
        assert_eq!(payslip.proration.days_worked, 23);
        assert_eq!(payslip.totals.gross_pay, dec("6000.00"));
        assert_eq!(payslip.totals.taxable_income, dec("5607.00"));
        assert_eq!(payslip.totals.total_deductions, dec("908.43"));
        assert_eq!(payslip.totals.net_pay, dec("5091.57"));
        assert!(payslip.audit_trace.warnings.is_empty());
    }

    #[test]
    fn test_generate_payslip_employer_cost() {
        let payslip = generate_payslip(&input("6000", None, "December 2025"), &rates()).unwrap();

        // 773.40 + 246.60 + 96.00
        assert_eq!(payslip.totals.employer_contributions, dec("1116.00"));
        assert_eq!(payslip.totals.employer_cost, dec("7116.00"));
        assert_eq!(payslip.totals.net_pay, dec("5091.57"));
    }

    #[test]
    fn test_generate_payslip_with_overtime() {
        let mut request = input("6000", None, "December 2025");
        request.overtime = vec![
            OvertimeEntry {
                hours: dec("10"),
                multiplier: None,
            },
            OvertimeEntry {
                hours: dec("2"),
                multiplier: Some(dec("2")),
            },
        ];

        let payslip = generate_payslip(&request, &rates()).unwrap();
        let ids: Vec<&str> = payslip.earnings.iter().map(|e| e.id.as_str()).collect();

        assert_eq!(ids, ["base", "overtime-1", "overtime-2"]);
        assert_eq!(payslip.earnings[1].amount, dec("392.67"));
        // 6000 / 191 * 2 * 2
        assert_eq!(payslip.earnings[2].amount, dec("125.65"));
        assert_eq!(payslip.totals.gross_pay, dec("6518.32"));
    }

    #[test]
    fn test_generate_payslip_prorated_hire() {
        let payslip =
            generate_payslip(&input("6000", Some("2025-03-17"), "March 2025"), &rates()).unwrap();

        assert_eq!(payslip.proration.days_worked, 11);
        assert_eq!(payslip.earnings[0].amount, dec("3142.86"));
        assert_eq!(payslip.totals.gross_pay, dec("3142.86"));
    }

    #[test]
    fn test_overtime_uses_full_base_when_prorated() {
        let mut request = input("19100", Some("2025-03-17"), "March 2025");
        request.overtime = vec![OvertimeEntry {
            hours: dec("10"),
            multiplier: None,
        }];

        let payslip = generate_payslip(&request, &rates()).unwrap();
        assert_eq!(payslip.earnings[1].amount, dec("1250.00"));
    }

    #[test]
    fn test_hire_after_period_keeps_zero_base_line() {
        let payslip =
            generate_payslip(&input("6000", Some("2026-01-05"), "December 2025"), &rates())
                .unwrap();

        assert_eq!(payslip.earnings.len(), 1);
        assert_eq!(payslip.earnings[0].amount, Decimal::ZERO);
        assert_eq!(payslip.totals.net_pay, Decimal::ZERO);
        assert!(find(&payslip.deductions, ItemCategory::IncomeTax).is_none());
        assert!(
            payslip
                .audit_trace
                .warnings
                .iter()
                .any(|w| w.code == "NOT_EMPLOYED_IN_PERIOD")
        );
    }

    #[test]
    fn test_unparseable_hire_date_warns_and_pays_in_full() {
        let payslip =
            generate_payslip(&input("6000", Some("last spring"), "December 2025"), &rates())
                .unwrap();

        assert_eq!(payslip.totals.gross_pay, dec("6000.00"));
        let warning = &payslip.audit_trace.warnings[0];
        assert_eq!(warning.code, "HIRE_DATE_UNPARSEABLE");
        assert_eq!(warning.severity, "medium");
    }

    #[test]
    fn test_generic_period_is_flagged() {
        let payslip = generate_payslip(&input("6000", None, "2025-12"), &rates()).unwrap();

        assert_eq!(payslip.period, "December 2025");
        assert_eq!(payslip.audit_trace.warnings[0].code, "PERIOD_FALLBACK");
        assert_eq!(payslip.audit_trace.warnings[0].severity, "medium");
    }

    #[test]
    fn test_current_month_fallback_is_flagged_high() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
        let parsed = crate::calculation::parse_period_at("payday", today);
        let payslip =
            generate_payslip_for_period(&input("6000", None, "payday"), parsed, &rates()).unwrap();

        assert_eq!(payslip.period, "October 2026");
        assert_eq!(payslip.audit_trace.warnings[0].severity, "high");
    }

    #[test]
    fn test_additional_items_flow_through() {
        let mut request = input("6000", None, "December 2025");
        request.additional_earnings = vec![
            PayslipItem::earning("transport", "Transport", dec("300"), "transport".into())
                .non_taxable(),
        ];
        request.additional_deductions = vec![PayslipItem::deduction(
            "advance",
            "Salary advance",
            dec("1000"),
            "advance".into(),
        )];

        let payslip = generate_payslip(&request, &rates()).unwrap();

        assert_eq!(payslip.totals.gross_pay, dec("6300.00"));
        // AMO on 6300 is 142.38; the advance is not pre-tax
        assert_eq!(payslip.totals.taxable_income, dec("5600.22"));
        assert_eq!(payslip.deductions[0].id, "advance");
        assert_eq!(
            payslip.totals.net_pay,
            payslip.totals.gross_pay - payslip.totals.total_deductions
        );
    }

    #[test]
    fn test_generate_payslip_rejects_invalid_input() {
        let result = generate_payslip(&input("-1", None, "December 2025"), &rates());
        assert!(matches!(
            result,
            Err(crate::error::PayrollError::Validation { .. })
        ));
    }

    #[test]
    fn test_oversized_salary_with_mid_month_hire_is_rejected() {
        let mut request = input("6000", Some("2025-12-15"), "December 2025");
        request.employee.base_salary = Decimal::from_scientific("1e28").unwrap();

        let result = generate_payslip(&request, &rates());
        assert!(matches!(
            result,
            Err(crate::error::PayrollError::Validation { ref field, .. })
                if field == "employee.base_salary"
        ));
    }

    #[test]
    fn test_largest_accepted_inputs_compute() {
        let mut request = input("6000", Some("2025-12-15"), "December 2025");
        request.employee.base_salary = crate::calculation::MAX_AMOUNT;
        request.overtime = vec![OvertimeEntry {
            hours: crate::calculation::MAX_OVERTIME_HOURS,
            multiplier: Some(crate::calculation::MAX_OVERTIME_MULTIPLIER),
        }];
        request.additional_earnings = vec![PayslipItem::earning(
            "bonus",
            "Bonus",
            crate::calculation::MAX_AMOUNT,
            "bonus".into(),
        )];

        let payslip = generate_payslip(&request, &rates()).unwrap();
        assert!(payslip.totals.gross_pay > crate::calculation::MAX_AMOUNT);
        assert_eq!(
            payslip.totals.net_pay,
            payslip.totals.gross_pay - payslip.totals.total_deductions
        );
    }

    #[test]
    fn test_sub_cent_additional_item_is_rejected() {
        let mut request = input("6000", None, "December 2025");
        request.additional_earnings = vec![PayslipItem::earning(
            "bonus",
            "Bonus",
            dec("100.005"),
            "bonus".into(),
        )];

        let result = generate_payslip(&request, &rates());
        assert!(matches!(
            result,
            Err(crate::error::PayrollError::Validation { ref field, .. })
                if field == "additional_earnings[0].amount"
        ));
    }

    #[test]
    fn test_audit_steps_are_sequential() {
        let mut request = input("6000", None, "December 2025");
        request.overtime = vec![OvertimeEntry {
            hours: dec("4"),
            multiplier: None,
        }];

        let payslip = generate_payslip(&request, &rates()).unwrap();
        let rule_ids: Vec<&str> = payslip
            .audit_trace
            .steps
            .iter()
            .map(|s| s.rule_id.as_str())
            .collect();

        assert_eq!(
            rule_ids,
            [
                "proration",
                "overtime",
                "social_security",
                "health_insurance",
                "taxable_income",
                "income_tax",
                "employer_contributions"
            ]
        );
        for (index, step) in payslip.audit_trace.steps.iter().enumerate() {
            assert_eq!(step.step_number, index as u32 + 1);
        }
    }

    #[test]
    fn test_taxable_income_step_matches_totals() {
        let mut request = input("6000", None, "December 2025");
        request.additional_earnings = vec![
            PayslipItem::earning("transport", "Transport", dec("300"), "transport".into())
                .non_taxable(),
        ];
        request.additional_deductions = vec![PayslipItem::deduction(
            "cimr",
            "CIMR retirement",
            dec("300"),
            ItemCategory::Retirement,
        )];

        let payslip = generate_payslip(&request, &rates()).unwrap();
        let step = payslip
            .audit_trace
            .steps
            .iter()
            .find(|s| s.rule_id == "taxable_income")
            .unwrap();

        assert_eq!(step.input["taxable_earnings"], "6000.00");
        // CNSS 257.40 + AMO 142.38 + CIMR 300
        assert_eq!(step.input["pre_tax_deductions"], "699.78");
        assert_eq!(payslip.totals.taxable_income, dec("5300.22"));
        assert_eq!(
            step.output["taxable_income"],
            payslip.totals.taxable_income.to_string()
        );
    }

    #[test]
    fn test_generate_payslip_numbers_are_deterministic() {
        let request = input("7345.55", Some("2025-12-10"), "December 2025");
        let a = generate_payslip(&request, &rates()).unwrap();
        let b = generate_payslip(&request, &rates()).unwrap();

        assert_ne!(a.payslip_id, b.payslip_id);
        assert_eq!(a.earnings, b.earnings);
        assert_eq!(a.deductions, b.deductions);
        assert_eq!(a.totals, b.totals);
    }
}
