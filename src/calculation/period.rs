//! Period parsing and working-day counting.
//!
//! Payroll must never hard-fail on a badly typed period string, so
//! [`parse_period`] degrades in two steps: first to a generic date parse, then
//! to the current calendar month. The [`PeriodSource`] it returns says which
//! path was taken so callers can surface the fallback.
//!
//! Working days follow the Moroccan five-day week: Monday to Friday. No
//! holiday calendar is consulted.

use chrono::{DateTime, Datelike, Local, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::models::Period;

/// How a period string was interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PeriodSource {
    /// Parsed as "Month Year".
    MonthName,
    /// Parsed by the generic date fallback.
    Generic,
    /// Unparseable; the current calendar month was used.
    CurrentMonthFallback,
}

/// The outcome of [`parse_period`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedPeriod {
    /// The resolved calendar month.
    pub period: Period,
    /// Which parsing path produced it.
    pub source: PeriodSource,
}

impl ParsedPeriod {
    /// Returns true if the input was not read as "Month Year".
    pub fn is_fallback(&self) -> bool {
        self.source != PeriodSource::MonthName
    }
}

/// Parses a period string, falling back to the current month.
///
/// See [`parse_period_at`] for the parsing rules.
pub fn parse_period(input: &str) -> ParsedPeriod {
    parse_period_at(input, Local::now().date_naive())
}

/// Parses a period string, falling back to the month containing `today`.
///
/// Accepted, in order:
/// 1. "Month Year" with a full English month name ("December 2025").
/// 2. Generic dates, whose month is taken: `2025-12-15`, `2025/12/15`,
///    `15/12/2025`, RFC 3339 timestamps, `2025-12`, `12/2025`, and
///    abbreviated month names ("Dec 2025").
/// 3. Anything else resolves to the month containing `today`.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::{PeriodSource, parse_period_at};
/// use chrono::NaiveDate;
///
/// let today = NaiveDate::from_ymd_opt(2026, 4, 10).unwrap();
///
/// let parsed = parse_period_at("December 2025", today);
/// assert_eq!(parsed.source, PeriodSource::MonthName);
/// assert_eq!(parsed.period.end, NaiveDate::from_ymd_opt(2025, 12, 31).unwrap());
///
/// let parsed = parse_period_at("Dec 2025", today);
/// assert_eq!(parsed.source, PeriodSource::Generic);
///
/// let parsed = parse_period_at("not a period", today);
/// assert_eq!(parsed.source, PeriodSource::CurrentMonthFallback);
/// assert_eq!(parsed.period.start, NaiveDate::from_ymd_opt(2026, 4, 1).unwrap());
/// ```
pub fn parse_period_at(input: &str, today: NaiveDate) -> ParsedPeriod {
    if let Ok(period) = Period::parse_strict(input) {
        return ParsedPeriod {
            period,
            source: PeriodSource::MonthName,
        };
    }

    if let Some(period) = parse_generic(input) {
        warn!(input = %input, period = %period, "Period parsed by generic date fallback");
        return ParsedPeriod {
            period,
            source: PeriodSource::Generic,
        };
    }

    let period = Period::containing(today);
    warn!(input = %input, period = %period, "Unparseable period, using current month");
    ParsedPeriod {
        period,
        source: PeriodSource::CurrentMonthFallback,
    }
}

fn parse_generic(input: &str) -> Option<Period> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }

    const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%Y/%m/%d", "%d/%m/%Y", "%d-%m-%Y"];
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return Some(Period::containing(date));
        }
    }

    if let Ok(datetime) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(Period::containing(datetime.date_naive()));
    }

    // month-only forms, anchored to the first of the month
    let anchored = [
        (format!("{}-01", trimmed), "%Y-%m-%d"),
        (format!("{}/01", trimmed), "%Y/%m/%d"),
        (format!("01/{}", trimmed), "%d/%m/%Y"),
        (format!("1 {}", trimmed), "%d %B %Y"),
        (format!("1 {}", trimmed), "%d %B, %Y"),
    ];
    anchored.iter().find_map(|(candidate, format)| {
        NaiveDate::parse_from_str(candidate, format)
            .ok()
            .map(Period::containing)
    })
}

/// Returns true for Monday through Friday.
pub fn is_working_day(date: NaiveDate) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Counts Monday-to-Friday days between two dates, both inclusive.
///
/// Returns 0 when `start` is after `end`.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::count_working_days;
/// use chrono::NaiveDate;
///
/// // Monday 2025-12-01 through Sunday 2025-12-07
/// let start = NaiveDate::from_ymd_opt(2025, 12, 1).unwrap();
/// let end = NaiveDate::from_ymd_opt(2025, 12, 7).unwrap();
/// assert_eq!(count_working_days(start, end), 5);
/// ```
pub fn count_working_days(start: NaiveDate, end: NaiveDate) -> u32 {
    if start > end {
        return 0;
    }

    start
        .iter_days()
        .take_while(|day| *day <= end)
        .filter(|day| is_working_day(*day))
        .count() as u32
}

/// Counts the working days in a whole period.
pub fn count_monthly_working_days(period: &Period) -> u32 {
    count_working_days(period.start, period.end)
}
