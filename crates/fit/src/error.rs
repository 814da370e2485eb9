//! Error types for the nimbus-fit crate.

/// Why a frequency fit produced no table.
///
/// Every variant is a routine outcome of analysing short or degenerate
/// records; callers report it and move on. No partial table is ever returned
/// alongside a failure.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FitFailure {
    /// Returned when neither an observed nor a modelled series was supplied.
    #[error("no observed or modelled series to fit")]
    NoSeries,

    /// Returned when a series has fewer annual maxima than the distribution needs.
    #[error("{series}: {found} years of annual maxima, at least {required} required")]
    InsufficientYears {
        /// Which series failed (`observed` or `member N`).
        series: String,
        /// Number of years available.
        found: usize,
        /// Minimum number of years.
        required: usize,
    },

    /// Returned when a series has too few exceedances for the stretched fit.
    #[error("{series}: {found} exceedances above the fit threshold, at least {required} required")]
    InsufficientExceedances {
        /// Which series failed.
        series: String,
        /// Number of exceedances available.
        found: usize,
        /// Minimum number of exceedances.
        required: usize,
    },

    /// Returned when ensemble members differ in length beyond the tolerance.
    #[error("ensemble members have {shortest}..={longest} years (tolerance {tolerance})")]
    EnsembleLengthMismatch {
        /// Years in the shortest member.
        shortest: usize,
        /// Years in the longest member.
        longest: usize,
        /// Allowed difference.
        tolerance: usize,
    },

    /// Returned when a logarithm, division or gamma evaluation is undefined.
    #[error("{series}: numeric domain error: {reason}")]
    NumericDomain {
        /// Which series failed.
        series: String,
        /// What was undefined.
        reason: String,
    },

    /// Returned when a configuration parameter is invalid.
    #[error("invalid fit options: {reason}")]
    InvalidOptions {
        /// Description of the problem.
        reason: String,
    },
}

/// Why a single sample could not be fitted.
///
/// Sample-level fitters report this; the multi-series fits attach the series
/// name with [`SampleError::for_series`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SampleError {
    /// Returned when the sample is shorter than the fit needs.
    #[error("{found} values, at least {required} required")]
    TooShort {
        /// Sample size.
        found: usize,
        /// Minimum sample size.
        required: usize,
    },

    /// Returned when too few wet days exceed the fit threshold.
    #[error("{found} exceedances, at least {required} required")]
    TooFewExceedances {
        /// Number of exceedances.
        found: usize,
        /// Minimum number of exceedances.
        required: usize,
    },

    /// Returned when a logarithm, division or gamma evaluation is undefined.
    #[error("numeric domain error: {reason}")]
    NumericDomain {
        /// What was undefined.
        reason: String,
    },
}

impl SampleError {
    pub(crate) fn domain(reason: impl Into<String>) -> Self {
        Self::NumericDomain {
            reason: reason.into(),
        }
    }

    /// Converts into a [`FitFailure`] naming `series`.
    pub fn for_series(self, series: impl Into<String>) -> FitFailure {
        let series = series.into();
        match self {
            Self::TooShort { found, required } => FitFailure::InsufficientYears {
                series,
                found,
                required,
            },
            Self::TooFewExceedances { found, required } => FitFailure::InsufficientExceedances {
                series,
                found,
                required,
            },
            Self::NumericDomain { reason } => FitFailure::NumericDomain { series, reason },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_no_series() {
        assert_eq!(
            FitFailure::NoSeries.to_string(),
            "no observed or modelled series to fit"
        );
    }

    #[test]
    fn error_insufficient_years() {
        let e = FitFailure::InsufficientYears {
            series: "observed".to_string(),
            found: 5,
            required: 10,
        };
        assert_eq!(
            e.to_string(),
            "observed: 5 years of annual maxima, at least 10 required"
        );
    }

    #[test]
    fn error_insufficient_exceedances() {
        let e = FitFailure::InsufficientExceedances {
            series: "member 2".to_string(),
            found: 4,
            required: 10,
        };
        assert_eq!(
            e.to_string(),
            "member 2: 4 exceedances above the fit threshold, at least 10 required"
        );
    }

    #[test]
    fn error_ensemble_length_mismatch() {
        let e = FitFailure::EnsembleLengthMismatch {
            shortest: 28,
            longest: 30,
            tolerance: 0,
        };
        assert_eq!(
            e.to_string(),
            "ensemble members have 28..=30 years (tolerance 0)"
        );
    }

    #[test]
    fn error_numeric_domain() {
        let e = FitFailure::NumericDomain {
            series: "observed".to_string(),
            reason: "zero L-scale".to_string(),
        };
        assert_eq!(e.to_string(), "observed: numeric domain error: zero L-scale");
    }

    #[test]
    fn error_invalid_options() {
        let e = FitFailure::InvalidOptions {
            reason: "percentile_wanted must be in 0..=100, got 120".to_string(),
        };
        assert_eq!(
            e.to_string(),
            "invalid fit options: percentile_wanted must be in 0..=100, got 120"
        );
    }

    #[test]
    fn sample_error_display() {
        let e = SampleError::TooShort {
            found: 2,
            required: 3,
        };
        assert_eq!(e.to_string(), "2 values, at least 3 required");
        assert_eq!(
            SampleError::domain("zero L-scale").to_string(),
            "numeric domain error: zero L-scale"
        );
    }

    #[test]
    fn sample_error_names_series() {
        let e = SampleError::TooShort {
            found: 2,
            required: 3,
        }
        .for_series("member 4");
        assert_eq!(
            e,
            FitFailure::InsufficientYears {
                series: "member 4".to_string(),
                found: 2,
                required: 3,
            }
        );
        let e = SampleError::domain("c <= 0").for_series("observed");
        assert!(matches!(e, FitFailure::NumericDomain { .. }));
    }

    #[test]
    fn error_is_std_error() {
        fn assert_impl<T: std::error::Error>() {}
        assert_impl::<FitFailure>();
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync>() {}
        assert_impl::<FitFailure>();
        assert_impl::<SampleError>();
    }
}
