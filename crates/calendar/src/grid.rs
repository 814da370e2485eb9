//! Year-length conventions and conversion between grid steps and dates.

use chrono::{Datelike, Days, NaiveDate};

use crate::error::CalendarError;
use crate::season::Season;

/// Any non-leap year works here; it only supplies the month/day layout of a
/// 365-day year.
const NOLEAP_REFERENCE_YEAR: i32 = 2001;

const DAYS_PER_NOLEAP_YEAR: i64 = 365;

/// How many days a year has on the time grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum YearLength {
    /// Gregorian calendar: leap years carry 29 February.
    #[default]
    Calendar,
    /// Every year has 365 days; 29 February never occurs.
    NoLeap,
}

impl YearLength {
    /// Returns `true` if `date` exists under this convention.
    pub fn contains(self, date: NaiveDate) -> bool {
        !(self == Self::NoLeap && is_leap_day(date))
    }
}

pub(crate) fn is_leap_day(date: NaiveDate) -> bool {
    date.month() == 2 && date.day() == 29
}

/// 0-based position of `date` within a 365-day year.
fn noleap_ordinal0(date: NaiveDate) -> Result<i64, CalendarError> {
    if is_leap_day(date) {
        return Err(CalendarError::LeapDay { date });
    }
    let reference = NaiveDate::from_ymd_opt(NOLEAP_REFERENCE_YEAR, date.month(), date.day())
        .ok_or(CalendarError::InvalidDate {
            year: date.year(),
            month: date.month(),
            day: date.day(),
        })?;
    Ok(i64::from(reference.ordinal0()))
}

fn noleap_from_ordinal0(year: i32, ordinal0: i64) -> NaiveDate {
    debug_assert!((0..DAYS_PER_NOLEAP_YEAR).contains(&ordinal0));
    let reference = NaiveDate::from_yo_opt(NOLEAP_REFERENCE_YEAR, ordinal0 as u32 + 1)
        .expect("ordinal is within 1..=365");
    NaiveDate::from_ymd_opt(year, reference.month(), reference.day())
        .expect("a non-leap month/day exists in every year")
}

/// Number of grid days from `from` to `to` (negative if `to` is earlier).
///
/// # Errors
///
/// Returns [`CalendarError::LeapDay`] if either date is 29 February and
/// `year_length` is [`YearLength::NoLeap`].
pub fn days_between(
    from: NaiveDate,
    to: NaiveDate,
    year_length: YearLength,
) -> Result<i64, CalendarError> {
    match year_length {
        YearLength::Calendar => Ok((to - from).num_days()),
        YearLength::NoLeap => {
            let years = i64::from(to.year() - from.year());
            Ok(years * DAYS_PER_NOLEAP_YEAR + noleap_ordinal0(to)? - noleap_ordinal0(from)?)
        }
    }
}

/// A daily time grid anchored at an epoch date.
///
/// Step 0 is the epoch; step `n` is the `n`-th day after it under the
/// grid's [`YearLength`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeGrid {
    epoch: NaiveDate,
    year_length: YearLength,
    epoch_ordinal0: i64,
}

impl TimeGrid {
    /// Creates a new grid.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::LeapDay`] if the epoch is 29 February on a
    /// 365-day grid.
    pub fn new(epoch: NaiveDate, year_length: YearLength) -> Result<Self, CalendarError> {
        let epoch_ordinal0 = match year_length {
            YearLength::Calendar => i64::from(epoch.ordinal0()),
            YearLength::NoLeap => noleap_ordinal0(epoch)?,
        };
        Ok(Self {
            epoch,
            year_length,
            epoch_ordinal0,
        })
    }

    /// Returns the epoch date (step 0).
    pub fn epoch(&self) -> NaiveDate {
        self.epoch
    }

    /// Returns the year-length convention.
    pub fn year_length(&self) -> YearLength {
        self.year_length
    }

    /// Returns the calendar date at `step`.
    pub fn date_at(&self, step: usize) -> NaiveDate {
        match self.year_length {
            YearLength::Calendar => self.epoch + Days::new(step as u64),
            YearLength::NoLeap => {
                let total = self.epoch_ordinal0 + step as i64;
                let year = self.epoch.year() + (total / DAYS_PER_NOLEAP_YEAR) as i32;
                noleap_from_ordinal0(year, total % DAYS_PER_NOLEAP_YEAR)
            }
        }
    }

    /// Returns the month (1..=12) at `step`.
    pub fn month_at(&self, step: usize) -> u8 {
        self.date_at(step).month() as u8
    }

    /// Returns the meteorological season at `step`.
    pub fn season_at(&self, step: usize) -> Season {
        Season::of(self.date_at(step))
    }

    /// Returns the step index of `date`.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::BeforeEpoch`] if `date` precedes the epoch,
    /// or [`CalendarError::LeapDay`] for 29 February on a 365-day grid.
    pub fn step_of(&self, date: NaiveDate) -> Result<usize, CalendarError> {
        let days = days_between(self.epoch, date, self.year_length)?;
        if days < 0 {
            return Err(CalendarError::BeforeEpoch {
                date,
                epoch: self.epoch,
            });
        }
        Ok(days as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn calendar_grid_crosses_leap_day() {
        let grid = TimeGrid::new(ymd(2000, 2, 28), YearLength::Calendar).unwrap();
        assert_eq!(grid.date_at(0), ymd(2000, 2, 28));
        assert_eq!(grid.date_at(1), ymd(2000, 2, 29));
        assert_eq!(grid.date_at(2), ymd(2000, 3, 1));
    }

    #[test]
    fn noleap_grid_skips_leap_day() {
        let grid = TimeGrid::new(ymd(2000, 2, 28), YearLength::NoLeap).unwrap();
        assert_eq!(grid.date_at(1), ymd(2000, 3, 1));
    }

    #[test]
    fn noleap_grid_year_wrap() {
        let grid = TimeGrid::new(ymd(1999, 12, 31), YearLength::NoLeap).unwrap();
        assert_eq!(grid.date_at(1), ymd(2000, 1, 1));
        // 365 steps later is always the same month/day.
        assert_eq!(grid.date_at(365), ymd(2000, 12, 31));
        assert_eq!(grid.date_at(365 * 4), ymd(2003, 12, 31));
    }

    #[test]
    fn calendar_year_has_366_days_in_leap_year() {
        let grid = TimeGrid::new(ymd(2000, 1, 1), YearLength::Calendar).unwrap();
        assert_eq!(grid.date_at(365), ymd(2000, 12, 31));
        assert_eq!(grid.date_at(366), ymd(2001, 1, 1));
    }

    #[test]
    fn noleap_epoch_on_leap_day_rejected() {
        assert_eq!(
            TimeGrid::new(ymd(2000, 2, 29), YearLength::NoLeap).unwrap_err(),
            CalendarError::LeapDay {
                date: ymd(2000, 2, 29)
            }
        );
    }

    #[test]
    fn step_of_inverts_date_at() {
        for year_length in [YearLength::Calendar, YearLength::NoLeap] {
            let grid = TimeGrid::new(ymd(1961, 1, 1), year_length).unwrap();
            for step in [0usize, 1, 58, 59, 364, 365, 1460, 10_000] {
                let date = grid.date_at(step);
                assert_eq!(grid.step_of(date).unwrap(), step, "{year_length:?} step {step}");
            }
        }
    }

    #[test]
    fn step_of_before_epoch() {
        let grid = TimeGrid::new(ymd(1961, 1, 1), YearLength::Calendar).unwrap();
        assert!(matches!(
            grid.step_of(ymd(1960, 12, 31)),
            Err(CalendarError::BeforeEpoch { .. })
        ));
    }

    #[test]
    fn month_and_season_at() {
        let grid = TimeGrid::new(ymd(1961, 1, 1), YearLength::Calendar).unwrap();
        assert_eq!(grid.month_at(0), 1);
        assert_eq!(grid.season_at(0), Season::Winter);
        assert_eq!(grid.month_at(59), 3);
        assert_eq!(grid.season_at(59), Season::Spring);
        assert_eq!(grid.season_at(334), Season::Winter); // 1 Dec
    }

    #[test]
    fn days_between_conventions() {
        let a = ymd(2000, 1, 1);
        let b = ymd(2001, 1, 1);
        assert_eq!(days_between(a, b, YearLength::Calendar).unwrap(), 366);
        assert_eq!(days_between(a, b, YearLength::NoLeap).unwrap(), 365);
        assert_eq!(days_between(b, a, YearLength::NoLeap).unwrap(), -365);
    }

    #[test]
    fn contains_leap_day() {
        let leap = ymd(2004, 2, 29);
        assert!(YearLength::Calendar.contains(leap));
        assert!(!YearLength::NoLeap.contains(leap));
    }
}
