//! Meteorological seasons.

use std::fmt;

use chrono::{Datelike, NaiveDate};

use crate::error::CalendarError;

/// Three-month meteorological season.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Season {
    /// December, January, February.
    Winter,
    /// March, April, May.
    Spring,
    /// June, July, August.
    Summer,
    /// September, October, November.
    Autumn,
}

impl Season {
    /// All four seasons in calendar order starting with winter.
    pub const ALL: [Season; 4] = [Self::Winter, Self::Spring, Self::Summer, Self::Autumn];

    /// Returns the season containing `month`.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidMonth`] if `month` is outside 1..=12.
    pub fn from_month(month: u8) -> Result<Self, CalendarError> {
        match month {
            12 | 1 | 2 => Ok(Self::Winter),
            3..=5 => Ok(Self::Spring),
            6..=8 => Ok(Self::Summer),
            9..=11 => Ok(Self::Autumn),
            _ => Err(CalendarError::InvalidMonth { month }),
        }
    }

    /// Returns the season containing `date`.
    pub fn of(date: NaiveDate) -> Self {
        Self::from_month(date.month() as u8).expect("chrono months are always 1..=12")
    }

    /// Returns the three months of the season.
    pub fn months(self) -> [u8; 3] {
        match self {
            Self::Winter => [12, 1, 2],
            Self::Spring => [3, 4, 5],
            Self::Summer => [6, 7, 8],
            Self::Autumn => [9, 10, 11],
        }
    }

    /// Lower-case season name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Winter => "winter",
            Self::Spring => "spring",
            Self::Summer => "summer",
            Self::Autumn => "autumn",
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
