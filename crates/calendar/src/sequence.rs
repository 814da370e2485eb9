//! Day stepping and date sequence generation.

use chrono::{Days, NaiveDate};

use crate::grid::{YearLength, is_leap_day};

/// Returns the day after `date` under `year_length`.
///
/// On a 365-day grid, 28 February is followed by 1 March.
pub fn next_day(date: NaiveDate, year_length: YearLength) -> NaiveDate {
    let next = date + Days::new(1);
    if year_length == YearLength::NoLeap && is_leap_day(next) {
        next + Days::new(1)
    } else {
        next
    }
}

/// Generates `n_days` consecutive grid dates starting at `start`.
///
/// # Example
///
/// ```ignore
/// let start = NaiveDate::from_ymd_opt(2000, 2, 27).unwrap();
/// let dates = date_sequence(start, 3, YearLength::NoLeap);
/// // Feb 27, Feb 28, Mar 1
/// ```
pub fn date_sequence(start: NaiveDate, n_days: usize, year_length: YearLength) -> Vec<NaiveDate> {
    let mut dates = Vec::with_capacity(n_days);
    if n_days == 0 {
        return dates;
    }
    dates.push(start);
    let mut current = start;
    for _ in 1..n_days {
        current = next_day(current, year_length);
        dates.push(current);
    }
    dates
}
