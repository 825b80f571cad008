//! Mapping calendar dates onto the rotating menu.
//!
//! Day 0 of the menu is the configured start date and is read as the first
//! week's Monday, whatever weekday it falls on.

use chrono::{Datelike, Duration, Month, NaiveDate};
use regex::Regex;
use std::sync::LazyLock;

use crate::error::MenuError;
use crate::schedule::{DayName, DayResult, Schedule};

static WEEK_COMMENCING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:week\s+commencing|w/c)\s+\w+\s+(\d+)(?:st|nd|rd|th)?\s+(\w+)\s+(\d{4})")
        .expect("week commencing regex")
});

/// Finds a start date printed in the menu itself, such as
/// "Week Commencing Monday 26th January 2026" or "w/c Monday 26 January 2026".
pub fn parse_week_commencing(text: &str) -> Option<NaiveDate> {
    let caps = WEEK_COMMENCING.captures(text)?;

    let day = caps.get(1)?.as_str().parse::<u32>().ok()?;
    let month = caps.get(2)?.as_str().parse::<Month>().ok()?;
    let year = caps.get(3)?.as_str().parse::<i32>().ok()?;

    NaiveDate::from_ymd_opt(year, month.number_from_month(), day)
}

pub fn parse_date_param(input: &str) -> Result<NaiveDate, MenuError> {
    let invalid = || MenuError::InvalidDate(input.to_string());
    let parts: Vec<_> = input.trim().split(['-', '/']).collect();
    if parts.len() != 3 || parts.iter().any(|p| p.is_empty()) {
        return Err(invalid());
    }
    let year = parts[0].parse::<i32>().map_err(|_| invalid())?;
    let month = parts[1].parse::<u32>().map_err(|_| invalid())?;
    let day = parts[2].parse::<u32>().map_err(|_| invalid())?;
    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(invalid)
}

pub fn format_date(date: NaiveDate) -> String {
    format!("{:04}-{:02}-{:02}", date.year(), date.month(), date.day())
}

/// `today` moved by a signed number of days, or `None` when the result
/// falls outside chrono's date range.
pub fn target_date(today: NaiveDate, offset_days: i64) -> Option<NaiveDate> {
    Duration::try_days(offset_days).and_then(|delta| today.checked_add_signed(delta))
}

/// Outcome of looking a date up in a schedule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup<'a> {
    /// Before the start date or past the last week.
    OutOfRange { diff_days: i64 },
    /// Inside the menu's range, but the PDF had no row for that day.
    Missing { week_number: usize, day: DayName },
    Found {
        week_number: usize,
        diff_days: i64,
        day: &'a DayResult,
    },
}

pub fn locate(schedule: &Schedule, start: NaiveDate, target: NaiveDate) -> Lookup<'_> {
    let diff_days = (target - start).num_days();
    let total = schedule.total_days() as i64;
    if diff_days < 0 || diff_days >= total {
        return Lookup::OutOfRange { diff_days };
    }

    let week_idx = (diff_days / 7) as usize;
    let day = DayName::ALL[(diff_days % 7) as usize];
    let week_number = week_idx + 1;

    match schedule.weeks[week_idx].day(day) {
        Some(found) => Lookup::Found {
            week_number,
            diff_days,
            day: found,
        },
        None => Lookup::Missing { week_number, day },
    }
}

/// Whether stepping one day back or forward stays inside the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct Navigation {
    pub has_previous: bool,
    pub has_next: bool,
}

pub fn navigation(diff_days: i64, total_days: usize) -> Navigation {
    Navigation {
        has_previous: diff_days > 0,
        has_next: diff_days < total_days as i64 - 1,
    }
}
