//! Data-period filters: which days of the year an analysis keeps.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};

use crate::error::CalendarError;
use crate::season::Season;

const MONTH_NAMES: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

/// Selects the days retained in the filtered view of a series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PeriodFilter {
    /// Every day of the year.
    #[default]
    Annual,
    /// A single calendar month (1..=12).
    Month(u8),
    /// A meteorological season.
    Season(Season),
}

impl PeriodFilter {
    /// Creates a single-month filter.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidMonth`] if `month` is outside 1..=12.
    pub fn month(month: u8) -> Result<Self, CalendarError> {
        if !(1..=12).contains(&month) {
            return Err(CalendarError::InvalidMonth { month });
        }
        Ok(Self::Month(month))
    }

    /// Returns `true` if `date` belongs to the period.
    pub fn matches(&self, date: NaiveDate) -> bool {
        match *self {
            Self::Annual => true,
            Self::Month(m) => date.month() == u32::from(m),
            Self::Season(s) => Season::of(date) == s,
        }
    }
}

impl fmt::Display for PeriodFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Annual => f.write_str("annual"),
            Self::Month(m) => match MONTH_NAMES.get(usize::from(m).wrapping_sub(1)) {
                Some(name) => f.write_str(name),
                None => write!(f, "month {m}"),
            },
            Self::Season(s) => write!(f, "{s}"),
        }
    }
}

impl FromStr for PeriodFilter {
    type Err = CalendarError;

    /// Parses `annual`, a month (name, three-letter abbreviation or number)
    /// or a season (name or `djf`/`mam`/`jja`/`son`), case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        match lower.as_str() {
            "annual" | "year" | "all" => return Ok(Self::Annual),
            "winter" | "djf" => return Ok(Self::Season(Season::Winter)),
            "spring" | "mam" => return Ok(Self::Season(Season::Spring)),
            "summer" | "jja" => return Ok(Self::Season(Season::Summer)),
            "autumn" | "fall" | "son" => return Ok(Self::Season(Season::Autumn)),
            _ => {}
        }
        if let Ok(m) = lower.parse::<u8>() {
            return Self::month(m);
        }
        MONTH_NAMES
            .iter()
            .position(|name| *name == lower || (lower.len() == 3 && name.starts_with(&lower)))
            .map(|idx| Self::Month(idx as u8 + 1))
            .ok_or(CalendarError::UnknownPeriod {
                name: s.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn annual_matches_everything() {
        assert!(PeriodFilter::Annual.matches(ymd(2000, 2, 29)));
        assert!(PeriodFilter::Annual.matches(ymd(2000, 7, 1)));
    }

    #[test]
    fn month_filter() {
        let june = PeriodFilter::month(6).unwrap();
        assert!(june.matches(ymd(1990, 6, 30)));
        assert!(!june.matches(ymd(1990, 7, 1)));
    }

    #[test]
    fn month_filter_rejects_out_of_range() {
        assert_eq!(
            PeriodFilter::month(0).unwrap_err(),
            CalendarError::InvalidMonth { month: 0 }
        );
        assert_eq!(
            PeriodFilter::month(13).unwrap_err(),
            CalendarError::InvalidMonth { month: 13 }
        );
    }

    #[test]
    fn season_filter() {
        let winter = PeriodFilter::Season(Season::Winter);
        assert!(winter.matches(ymd(1990, 12, 1)));
        assert!(winter.matches(ymd(1991, 2, 28)));
        assert!(!winter.matches(ymd(1991, 3, 1)));
    }

    #[test]
    fn parse_names() {
        assert_eq!("Annual".parse::<PeriodFilter>().unwrap(), PeriodFilter::Annual);
        assert_eq!("jul".parse::<PeriodFilter>().unwrap(), PeriodFilter::Month(7));
        assert_eq!("July".parse::<PeriodFilter>().unwrap(), PeriodFilter::Month(7));
        assert_eq!("7".parse::<PeriodFilter>().unwrap(), PeriodFilter::Month(7));
        assert_eq!(
            "DJF".parse::<PeriodFilter>().unwrap(),
            PeriodFilter::Season(Season::Winter)
        );
        assert_eq!(
            "autumn".parse::<PeriodFilter>().unwrap(),
            PeriodFilter::Season(Season::Autumn)
        );
    }

    #[test]
    fn parse_rejects_unknown() {
        assert!(matches!(
            "monsoon".parse::<PeriodFilter>(),
            Err(CalendarError::UnknownPeriod { .. })
        ));
        assert!(matches!(
            "13".parse::<PeriodFilter>(),
            Err(CalendarError::InvalidMonth { month: 13 })
        ));
    }

    #[test]
    fn display_round_trips_through_parse() {
        for filter in [
            PeriodFilter::Annual,
            PeriodFilter::Month(1),
            PeriodFilter::Month(12),
            PeriodFilter::Season(Season::Summer),
        ] {
            let text = filter.to_string();
            assert_eq!(text.parse::<PeriodFilter>().unwrap(), filter, "{text}");
        }
    }
}
