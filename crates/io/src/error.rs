//! Error types for nimbus-io.

use std::path::PathBuf;

use chrono::NaiveDate;

/// Error type for all fallible operations in the nimbus-io crate.
///
/// Structural input problems (bad paths, inverted or uncovered date ranges,
/// truncated files) surface here. Unparseable values are not errors: the
/// reader logs them and records the day as missing.
#[derive(Debug, thiserror::Error)]
pub enum IoError {
    /// Returned when a required file does not exist on disk.
    #[error("file not found: {}", path.display())]
    FileNotFound {
        /// Path that could not be found.
        path: PathBuf,
    },

    /// Wraps an operating-system error raised while opening or reading a file.
    #[error("i/o error on {}: {source}", path.display())]
    Io {
        /// Path being read.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },

    /// Returned when the requested range is inverted, precedes the file's
    /// epoch, or starts beyond the end of the file.
    #[error("invalid date range: {reason}")]
    DateRange {
        /// Description of the range problem.
        reason: String,
    },

    /// Returned when the file ends before the last requested day.
    #[error("file ended after {read} of {expected} days (next day: {next_date})")]
    ShortFile {
        /// Number of days requested.
        expected: usize,
        /// Number of day lines actually read.
        read: usize,
        /// First requested day that had no line.
        next_date: NaiveDate,
    },

    /// Wraps an error originating from the nimbus-calendar crate.
    #[error("calendar error: {reason}")]
    Calendar {
        /// Description of the underlying calendar failure.
        reason: String,
    },

    /// Returned when one or more validation checks fail.
    #[error("{count} validation error(s): {details}")]
    Validation {
        /// Number of accumulated validation failures.
        count: usize,
        /// Human-readable summary of the failures.
        details: String,
    },
}

impl From<nimbus_calendar::CalendarError> for IoError {
    fn from(e: nimbus_calendar::CalendarError) -> Self {
        IoError::Calendar {
            reason: e.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_file_not_found() {
        let err = IoError::FileNotFound {
            path: PathBuf::from("/tmp/missing.txt"),
        };
        assert_eq!(err.to_string(), "file not found: /tmp/missing.txt");
    }

    #[test]
    fn display_io() {
        let err = IoError::Io {
            path: PathBuf::from("/data/obs.txt"),
            source: std::io::Error::other("device not ready"),
        };
        assert_eq!(
            err.to_string(),
            "i/o error on /data/obs.txt: device not ready"
        );
    }

    #[test]
    fn display_date_range() {
        let err = IoError::DateRange {
            reason: "end 1990-01-01 precedes start 1991-01-01".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid date range: end 1990-01-01 precedes start 1991-01-01"
        );
    }

    #[test]
    fn display_short_file() {
        let err = IoError::ShortFile {
            expected: 365,
            read: 200,
            next_date: NaiveDate::from_ymd_opt(1961, 7, 20).unwrap(),
        };
        assert_eq!(
            err.to_string(),
            "file ended after 200 of 365 days (next day: 1961-07-20)"
        );
    }

    #[test]
    fn display_calendar() {
        let err = IoError::Calendar {
            reason: "invalid month 13".to_string(),
        };
        assert_eq!(err.to_string(), "calendar error: invalid month 13");
    }

    #[test]
    fn display_validation() {
        let err = IoError::Validation {
            count: 2,
            details: "members must be >= 1; width must be >= 1".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "2 validation error(s): members must be >= 1; width must be >= 1"
        );
    }

    #[test]
    fn from_calendar_error() {
        let cal_err = nimbus_calendar::CalendarError::InvalidMonth { month: 13 };
        let err: IoError = cal_err.into();
        assert!(matches!(err, IoError::Calendar { .. }));
        assert!(err.to_string().contains("calendar error"));
    }

    #[test]
    fn error_is_send_sync_and_std_error() {
        fn assert_bounds<T: Send + Sync + std::error::Error>() {}
        assert_bounds::<IoError>();
    }
}
