//! Conversion between day-of-year numbers and calendar dates.

use anyhow::{anyhow, Result};
use chrono::{Datelike, NaiveDate};

/// Number of days in `month` of `year`, leap years included.
///
/// Returns 0 for a month outside 1..=12.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
        return 0;
    };
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };

    next.map(|n| (n - first).num_days() as u32).unwrap_or(0)
}

/// Maps a 1-based day-of-year to `(year, month, day)`.
///
/// Month lengths are subtracted starting from January while the remainder
/// is longer than the current month. The input is not validated: a day
/// beyond the end of the year walks past December and comes back with
/// month 13.
pub fn day_of_year_to_ymd(year: i32, day_of_year: u32) -> (i32, u32, u32) {
    let mut month = 1;
    let mut day = day_of_year;

    while month <= 12 && day > days_in_month(year, month) {
        day -= days_in_month(year, month);
        month += 1;
    }

    (year, month, day)
}

/// 1-based day-of-year of a calendar date.
pub fn day_of_year(date: NaiveDate) -> u32 {
    date.ordinal()
}

/// Day-of-year of a `(month, day)` pair in `year`.
pub fn month_day_to_day_of_year(year: i32, month: u32, day: u32) -> Result<u32> {
    let date = NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| anyhow!("Invalid date {year}-{month:02}-{day:02}"))?;

    Ok(day_of_year(date))
}

/// Calendar date for a day-of-year, failing if it lies outside the year.
pub fn to_date(year: i32, day_of_year: u32) -> Result<NaiveDate> {
    let (y, m, d) = day_of_year_to_ymd(year, day_of_year);

    NaiveDate::from_ymd_opt(y, m, d)
        .ok_or_else(|| anyhow!("Day {day_of_year} is not within year {year}"))
}

/// Formats a date the way the feed and store name it: `YYYY_MM_DD`.
pub fn date_label(date: NaiveDate) -> String {
    date.format("%Y_%m_%d").to_string()
}

/// Parses a `YYYY_MM_DD` label back to a date.
pub fn parse_date_label(label: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(label, "%Y_%m_%d")
        .map_err(|e| anyhow!("Invalid date label `{label}`: {e}"))
}

// -- Tests -------------------------------------------------------------------
