//! Maps the configured billing day and a reference date to concrete period
//! bounds. For a fixed billing day the computed periods tile the calendar:
//! every date falls in exactly one period and consecutive periods touch
//! without overlapping.

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::config::{Settings, LAST_DAY_SENTINEL};
use crate::errors::{BudgetError, Result};

/// How the caller picks the period to resolve: the one containing a
/// reference date (usually "today"), or an explicit historical month for
/// backfilling.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum PeriodSelector {
    Current(NaiveDate),
    Month { year: i32, month: u32 },
}

/// Resolves a selector against the configured billing day.
pub fn compute_period_bounds(
    settings: &Settings,
    selector: PeriodSelector,
) -> Result<(NaiveDate, NaiveDate)> {
    settings.validate()?;
    match selector {
        PeriodSelector::Current(reference) => compute_period(settings.billing_day, reference),
        PeriodSelector::Month { year, month } => {
            compute_period_for_month(settings.billing_day, year, month)
        }
    }
}

/// Computes the inclusive `[start, end]` period containing `reference`.
///
/// Billing days 1-28 anchor the period on that day of month; a reference
/// date on the billing day itself starts a new period. Billing days 29 and
/// above are the "last calendar day" sentinel: the period is the calendar
/// month of the reference date, so it always ends on a month's last day
/// regardless of month length.
pub fn compute_period(billing_day: u8, reference: NaiveDate) -> Result<(NaiveDate, NaiveDate)> {
    validate_billing_day(billing_day)?;
    if billing_day >= LAST_DAY_SENTINEL {
        let start = reference.with_day(1).expect("day 1 always exists");
        let end = last_day_of_month(reference.year(), reference.month());
        return Ok((start, end));
    }

    let day = u32::from(billing_day);
    let anchor = NaiveDate::from_ymd_opt(reference.year(), reference.month(), day)
        .expect("billing day <= 28 exists in every month");
    let start = if reference.day() >= day {
        anchor
    } else {
        shift_month(anchor, -1)
    };
    let end = shift_month(start, 1) - Duration::days(1);
    Ok((start, end))
}

/// Computes the period anchored in an explicit `(year, month)`, used when
/// backfilling historical periods.
pub fn compute_period_for_month(
    billing_day: u8,
    year: i32,
    month: u32,
) -> Result<(NaiveDate, NaiveDate)> {
    validate_billing_day(billing_day)?;
    if !(1..=12).contains(&month) {
        return Err(BudgetError::InvalidPeriodBounds(format!(
            "month {} is outside 1-12",
            month
        )));
    }
    if billing_day >= LAST_DAY_SENTINEL {
        let start = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| {
            BudgetError::InvalidPeriodBounds(format!("invalid year {}", year))
        })?;
        return Ok((start, last_day_of_month(year, month)));
    }
    let start = NaiveDate::from_ymd_opt(year, month, u32::from(billing_day)).ok_or_else(|| {
        BudgetError::InvalidPeriodBounds(format!("invalid year {}", year))
    })?;
    Ok((start, shift_month(start, 1) - Duration::days(1)))
}

/// Inclusive range test, used to locate the period containing "today" or a
/// debt's due date.
pub fn is_within(date: NaiveDate, start: NaiveDate, end: NaiveDate) -> bool {
    date >= start && date <= end
}

/// Display name for a period, derived from its start date.
pub fn period_name(start: NaiveDate) -> String {
    start.format("%B %Y").to_string()
}

fn validate_billing_day(billing_day: u8) -> Result<()> {
    if billing_day == 0 || billing_day > 31 {
        return Err(BudgetError::InvalidPeriodBounds(format!(
            "billing day {} is outside 1-31",
            billing_day
        )));
    }
    Ok(())
}

pub(crate) fn shift_month(date: NaiveDate, months: i32) -> NaiveDate {
    let mut year = date.year();
    let mut month = date.month() as i32 + months;
    let mut day = date.day();
    while month > 12 {
        month -= 12;
        year += 1;
    }
    while month < 1 {
        month += 12;
        year -= 1;
    }
    day = day.min(days_in_month(year, month as u32));
    NaiveDate::from_ymd_opt(year, month as u32, day).expect("clamped day is valid")
}

fn last_day_of_month(year: i32, month: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, days_in_month(year, month))
        .expect("last day of month is valid")
}

fn days_in_month(year: i32, month: u32) -> u32 {
    let next_month = if month == 12 { 1 } else { month + 1 };
    let next_year = if month == 12 { year + 1 } else { year };
    let first_next = NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .expect("first of month is valid");
    (first_next - Duration::days(1)).day()
}
