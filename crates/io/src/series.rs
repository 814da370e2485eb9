//! Daily and ensemble series containers.

use chrono::NaiveDate;

use crate::error::IoError;
use crate::validate;

/// A daily series: one optional value per date.
///
/// `None` marks a missing day. After period filtering the dates need not be
/// contiguous, but they are always strictly increasing.
#[derive(Debug, Clone, PartialEq)]
pub struct DailySeries {
    dates: Vec<NaiveDate>,
    values: Vec<Option<f64>>,
}

impl DailySeries {
    /// Creates a new `DailySeries` after validating inputs.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::Validation`] if the lengths differ, the dates are
    /// not strictly increasing, or a present value is not finite.
    pub fn new(dates: Vec<NaiveDate>, values: Vec<Option<f64>>) -> Result<Self, IoError> {
        validate::validate_member_lengths(dates.len(), &[values.len()]).finish()?;
        validate::validate_dates_increasing(&dates).finish()?;
        validate::validate_finite(&values).finish()?;
        Ok(Self { dates, values })
    }

    /// Builds a series from `(date, value)` pairs.
    ///
    /// # Errors
    ///
    /// Same as [`DailySeries::new`].
    pub fn from_points(points: impl IntoIterator<Item = (NaiveDate, Option<f64>)>) -> Result<Self, IoError> {
        let (dates, values) = points.into_iter().unzip();
        Self::new(dates, values)
    }

    /// Returns the dates.
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// Returns the values; `None` is missing.
    pub fn values(&self) -> &[Option<f64>] {
        &self.values
    }

    /// Number of days (valid or missing).
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// Returns `true` if the series has no days.
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Number of non-missing days.
    pub fn n_valid(&self) -> usize {
        self.values.iter().filter(|v| v.is_some()).count()
    }

    /// The non-missing values, in date order.
    pub fn valid_values(&self) -> Vec<f64> {
        self.values.iter().flatten().copied().collect()
    }

    /// Iterates over `(date, value)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, Option<f64>)> + '_ {
        self.dates.iter().copied().zip(self.values.iter().copied())
    }
}

/// `M >= 1` daily series sharing one date axis.
#[derive(Debug, Clone, PartialEq)]
pub struct EnsembleSeries {
    dates: Vec<NaiveDate>,
    members: Vec<Vec<Option<f64>>>,
}

impl EnsembleSeries {
    /// Creates a new `EnsembleSeries` after validating inputs.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::Validation`] if there are no members, a member's
    /// length differs from the date axis, the dates are not strictly
    /// increasing, or a present value is not finite.
    pub fn new(dates: Vec<NaiveDate>, members: Vec<Vec<Option<f64>>>) -> Result<Self, IoError> {
        let lens: Vec<usize> = members.iter().map(Vec::len).collect();
        validate::validate_member_lengths(dates.len(), &lens).finish()?;
        validate::validate_dates_increasing(&dates).finish()?;
        for member in &members {
            validate::validate_finite(member).finish()?;
        }
        Ok(Self { dates, members })
    }

    /// Returns the shared date axis.
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// Number of members.
    pub fn n_members(&self) -> usize {
        self.members.len()
    }

    /// Number of days on the date axis.
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// Returns `true` if the date axis is empty.
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Returns the raw values of member `index`.
    pub fn member_values(&self, index: usize) -> Option<&[Option<f64>]> {
        self.members.get(index).map(Vec::as_slice)
    }

    /// Returns member `index` as a standalone [`DailySeries`].
    pub fn member(&self, index: usize) -> Option<DailySeries> {
        self.members.get(index).map(|values| DailySeries {
            dates: self.dates.clone(),
            values: values.clone(),
        })
    }

    /// Splits the ensemble into one [`DailySeries`] per member.
    pub fn into_members(self) -> Vec<DailySeries> {
        let dates = self.dates;
        self.members
            .into_iter()
            .map(|values| DailySeries {
                dates: dates.clone(),
                values,
            })
            .collect()
    }
}

impl From<DailySeries> for EnsembleSeries {
    fn from(series: DailySeries) -> Self {
        Self {
            dates: series.dates,
            members: vec![series.values],
        }
    }
}
