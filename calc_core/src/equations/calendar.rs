//! # Calendar Arithmetic
//!
//! Gregorian calendar rules on top of `chrono::NaiveDate`. Date arithmetic
//! that could leave chrono's supported range returns `None`.
//!
//! ## ISO 8601 Weeks
//!
//! Weeks start on Monday, and a week belongs to the year that contains its
//! Thursday. Early-January dates can therefore fall in week 52 or 53 of the
//! previous ISO year, and late-December dates in week 1 of the next.

use chrono::{Datelike, Duration, Months, NaiveDate, Weekday};

/// Minutes in a day
pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// Gregorian leap year: divisible by 4 and not by 100, unless divisible by 400
#[inline]
pub fn is_leap_year(year: i64) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Days in the given year (365 or 366)
#[inline]
pub fn days_in_year(year: i64) -> u32 {
    if is_leap_year(year) {
        366
    } else {
        365
    }
}

/// Days in `month` (1–12) of `year`
pub fn days_in_month(year: i64, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        _ => 28,
    }
}

/// ISO week-numbering year and week (1–53) of `date`.
///
/// # Algorithm
/// 1. Shift the date to the Thursday of its Monday-based week
/// 2. The ISO year is that Thursday's calendar year
/// 3. Week = ⌊(day-of-year₀ of the Thursday) / 7⌋ + 1
pub fn iso_week(date: NaiveDate) -> Option<(i32, u32)> {
    let thursday = week_thursday(date)?;
    Some((thursday.year(), thursday.ordinal0() / 7 + 1))
}

/// Thursday of the Monday-based week containing `date`
fn week_thursday(date: NaiveDate) -> Option<NaiveDate> {
    let weekday = date.weekday().number_from_monday() as i64;
    date.checked_add_signed(Duration::days(4 - weekday))
}

/// Number of ISO weeks (52 or 53) in ISO year `iso_year`.
///
/// December 28 always falls in the last ISO week of its year.
pub fn iso_weeks_in_year(iso_year: i32) -> Option<u32> {
    let dec_28 = NaiveDate::from_ymd_opt(iso_year, 12, 28)?;
    iso_week(dec_28).map(|(_, week)| week)
}

/// Monday and Sunday bounding the week that contains `date`
pub fn week_bounds(date: NaiveDate) -> Option<(NaiveDate, NaiveDate)> {
    let offset = date.weekday().num_days_from_monday() as i64;
    let monday = date.checked_add_signed(Duration::days(-offset))?;
    let sunday = monday.checked_add_signed(Duration::days(6))?;
    Some((monday, sunday))
}

/// Date of the `month`/`day` anniversary in `year`.
///
/// February 29 falls back to February 28 when `year` is not a leap year.
pub fn anniversary_in_year(month: u32, day: u32, year: i32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day).or_else(|| {
        if month == 2 && day == 29 {
            NaiveDate::from_ymd_opt(year, 2, 28)
        } else {
            None
        }
    })
}

/// First anniversary of `origin` on or after `from`
pub fn next_anniversary(origin: NaiveDate, from: NaiveDate) -> Option<NaiveDate> {
    let this_year = anniversary_in_year(origin.month(), origin.day(), from.year())?;
    if this_year >= from {
        Some(this_year)
    } else {
        anniversary_in_year(origin.month(), origin.day(), from.year() + 1)
    }
}

/// Whole anniversaries of `origin` reached by `on` (age in completed years)
pub fn completed_years(origin: NaiveDate, on: NaiveDate) -> Option<i32> {
    let years = on.year() - origin.year();
    let anniversary = anniversary_in_year(origin.month(), origin.day(), on.year())?;
    Some(if on < anniversary { years - 1 } else { years })
}

/// Calendar difference from `start` to `end` as (years, months, days).
///
/// Whole months are counted first; a month-end start that has no matching day
/// in the anchor month clamps to that month's last day. `None` if `end`
/// precedes `start`.
pub fn years_months_days(start: NaiveDate, end: NaiveDate) -> Option<(u32, u32, u32)> {
    if end < start {
        return None;
    }
    let mut months = (end.year() - start.year()) * 12 + end.month() as i32 - start.month() as i32;
    if end.day() < start.day() {
        months -= 1;
    }
    let months = u32::try_from(months).ok()?;
    let anchor = start.checked_add_months(Months::new(months))?;
    let days = u32::try_from((end - anchor).num_days()).ok()?;
    Some((months / 12, months % 12, days))
}

/// Count Monday–Friday dates in the half-open range `[start, end)`
pub fn weekdays_between(start: NaiveDate, end: NaiveDate) -> i64 {
    if end <= start {
        return 0;
    }
    let total = (end - start).num_days();
    let full_weeks = total / 7;
    let mut count = full_weeks * 5;

    let mut day = start + Duration::days(full_weeks * 7);
    while day < end {
        if !matches!(day.weekday(), Weekday::Sat | Weekday::Sun) {
            count += 1;
        }
        day += Duration::days(1);
    }
    count
}

/// Minutes from `start` to `end` on a 24-hour clock.
///
/// When `end` precedes `start`, or `crosses_midnight` is set, the end time is
/// taken on the following day.
pub fn clock_span_minutes(start: u32, end: u32, crosses_midnight: bool) -> u32 {
    let end = if crosses_midnight || end < start {
        end + MINUTES_PER_DAY
    } else {
        end
    };
    end - start
}
