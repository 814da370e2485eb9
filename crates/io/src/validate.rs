//! Accumulated validation utilities.
//!
//! Provides [`ValidationCollector`] for gathering multiple validation errors
//! into a single [`IoError::Validation`], plus standalone helpers that check
//! the invariants of daily series.

use chrono::NaiveDate;

use crate::error::IoError;

// ---------------------------------------------------------------------------
// ValidationCollector
// ---------------------------------------------------------------------------

/// Accumulates validation errors and converts them into a single
/// [`IoError::Validation`].
///
/// Create a collector, push zero or more error messages, then call
/// [`finish`](Self::finish) to obtain `Ok(())` when everything is valid or a
/// single `Err` that summarises every violation.
pub(crate) struct ValidationCollector {
    errors: Vec<String>,
}

impl ValidationCollector {
    /// Create an empty collector.
    pub(crate) fn new() -> Self {
        Self { errors: Vec::new() }
    }

    /// Record one validation error.
    pub(crate) fn push(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
    }

    /// Returns `true` when no errors have been recorded.
    #[cfg(test)]
    pub(crate) fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns the number of recorded errors.
    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.errors.len()
    }

    /// Consume the collector and return `Ok(())` if no errors were recorded,
    /// or `Err(IoError::Validation { count, details })` otherwise.
    ///
    /// The `details` string joins all messages with `"; "`.
    pub(crate) fn finish(self) -> Result<(), IoError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(IoError::Validation {
                count: self.errors.len(),
                details: self.errors.join("; "),
            })
        }
    }
}

// ---------------------------------------------------------------------------
// Standalone validation helpers
// ---------------------------------------------------------------------------

/// Check that every member has one value per date.
pub(crate) fn validate_member_lengths(dates_len: usize, member_lens: &[usize]) -> ValidationCollector {
    let mut c = ValidationCollector::new();

    if member_lens.is_empty() {
        c.push("ensemble must have at least one member");
    }

    for (m, &len) in member_lens.iter().enumerate() {
        if len != dates_len {
            c.push(format!(
                "member {m} length {len} != dates length {dates_len}"
            ));
        }
    }

    c
}

/// Check that dates are strictly increasing.
///
/// Records one message per out-of-order pair.
pub(crate) fn validate_dates_increasing(dates: &[NaiveDate]) -> ValidationCollector {
    let mut c = ValidationCollector::new();

    for (i, pair) in dates.windows(2).enumerate() {
        if pair[1] <= pair[0] {
            c.push(format!(
                "date {} at index {} does not follow {}",
                pair[1],
                i + 1,
                pair[0]
            ));
        }
    }

    c
}

/// Check that no present value is NaN or infinite.
pub(crate) fn validate_finite(values: &[Option<f64>]) -> ValidationCollector {
    let mut c = ValidationCollector::new();

    for (i, v) in values.iter().enumerate() {
        if let Some(v) = v
            && !v.is_finite()
        {
            c.push(format!("non-finite value at index {i}: {v}"));
        }
    }

    c
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    // -- ValidationCollector -------------------------------------------------

    #[test]
    fn collector_empty_is_ok() {
        let c = ValidationCollector::new();
        assert!(c.is_empty());
        assert_eq!(c.len(), 0);
        assert!(c.finish().is_ok());
    }

    #[test]
    fn collector_non_empty_is_err_with_correct_count() {
        let mut c = ValidationCollector::new();
        c.push("error one");
        c.push("error two");
        assert!(!c.is_empty());
        assert_eq!(c.len(), 2);

        match c.finish().unwrap_err() {
            IoError::Validation { count, details } => {
                assert_eq!(count, 2);
                assert_eq!(details, "error one; error two");
            }
            other => panic!("expected IoError::Validation, got {other:?}"),
        }
    }

    // -- validate_member_lengths ---------------------------------------------

    #[test]
    fn member_lengths_match() {
        assert!(validate_member_lengths(10, &[10, 10, 10]).finish().is_ok());
    }

    #[test]
    fn member_lengths_empty_ensemble() {
        let c = validate_member_lengths(10, &[]);
        assert_eq!(c.len(), 1);
    }

    #[test]
    fn member_lengths_mismatch() {
        let c = validate_member_lengths(10, &[10, 9, 11]);
        assert_eq!(c.len(), 2);
        match c.finish().unwrap_err() {
            IoError::Validation { details, .. } => {
                assert!(details.contains("member 1 length 9 != dates length 10"));
                assert!(details.contains("member 2 length 11 != dates length 10"));
            }
            other => panic!("expected IoError::Validation, got {other:?}"),
        }
    }

    // -- validate_dates_increasing -------------------------------------------

    #[test]
    fn dates_increasing_with_gaps_is_ok() {
        let dates = [ymd(2000, 6, 30), ymd(2001, 6, 1), ymd(2001, 6, 2)];
        assert!(validate_dates_increasing(&dates).finish().is_ok());
    }

    #[test]
    fn dates_repeated_or_reversed() {
        let dates = [ymd(2000, 1, 2), ymd(2000, 1, 2), ymd(2000, 1, 1)];
        let c = validate_dates_increasing(&dates);
        assert_eq!(c.len(), 2);
    }

    // -- validate_finite -----------------------------------------------------

    #[test]
    fn finite_values_and_missing_are_ok() {
        assert!(validate_finite(&[Some(1.0), None, Some(0.0)]).finish().is_ok());
    }

    #[test]
    fn nan_is_rejected() {
        let c = validate_finite(&[Some(1.0), Some(f64::NAN), Some(f64::INFINITY)]);
        assert_eq!(c.len(), 2);
    }
}
