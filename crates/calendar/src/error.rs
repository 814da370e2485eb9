//! Error types for the nimbus-calendar crate.

use chrono::NaiveDate;

/// Error type for all fallible operations in the nimbus-calendar crate.
///
/// This enum covers invalid month numbers, impossible dates, dates that fall
/// outside the time grid, and unparseable period names.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CalendarError {
    /// Returned when a month number is outside the valid range 1..=12.
    #[error("invalid month: {month} (must be 1..=12)")]
    InvalidMonth {
        /// The invalid month number that was provided.
        month: u8,
    },

    /// Returned when a year/month/day triple does not name a real date.
    #[error("invalid date: {year:04}-{month:02}-{day:02}")]
    InvalidDate {
        /// Calendar year.
        year: i32,
        /// Month number.
        month: u32,
        /// Day of month.
        day: u32,
    },

    /// Returned when a date precedes the epoch of the time grid.
    #[error("date {date} precedes the grid epoch {epoch}")]
    BeforeEpoch {
        /// The offending date.
        date: NaiveDate,
        /// The epoch of the grid.
        epoch: NaiveDate,
    },

    /// Returned when 29 February is used with the 365-day calendar.
    #[error("date {date} does not exist in the 365-day calendar")]
    LeapDay {
        /// The 29 February date that was supplied.
        date: NaiveDate,
    },

    /// Returned when a period name cannot be parsed.
    #[error("unknown data period: '{name}'")]
    UnknownPeriod {
        /// The unparseable name.
        name: String,
    },
}
