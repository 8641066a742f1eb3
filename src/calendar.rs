//! Calendar-month arithmetic.
//!
//! Monthly production records represent their entire month, keyed to the
//! first day of that month. Everything here works on that normalized form:
//! day-spans are counted over actual month lengths (leap years included),
//! and month ranges are always gapless and chronological.

use chrono::{Datelike, Duration, NaiveDate};

/// Normalize a date to the first day of its month.
pub fn month_floor(date: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(date.year(), date.month(), 1).unwrap_or(date)
}

/// First day of the month after the one containing `date`.
pub fn next_month(date: NaiveDate) -> NaiveDate {
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(date)
}

/// Last day of the month containing `date`.
pub fn month_end(date: NaiveDate) -> NaiveDate {
    next_month(month_floor(date)) - Duration::days(1)
}

/// Number of days in the month containing `date` (28..=31).
pub fn days_in_month(date: NaiveDate) -> i64 {
    (next_month(month_floor(date)) - month_floor(date)).num_days()
}

/// Inclusive count of calendar months from `start` to `end`.
///
/// Both inputs are normalized to month boundaries first; a same-month
/// pair counts as 1. Returns 0 if `end` precedes `start`.
pub fn month_count(start: NaiveDate, end: NaiveDate) -> i64 {
    let diff = (end.year() as i64 - start.year() as i64) * 12
        + (end.month() as i64 - start.month() as i64)
        + 1;
    diff.max(0)
}

/// Every month-start from `first` to `last` inclusive, chronological.
pub fn month_range(first: NaiveDate, last: NaiveDate) -> Vec<NaiveDate> {
    let mut out = Vec::new();
    let mut current = month_floor(first);
    let last = month_floor(last);
    while current <= last {
        out.push(current);
        current = next_month(current);
    }
    out
}
