//! Error types for the nimbus-idf crate.

/// Why an IDF table could not be built.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum IdfError {
    /// Returned when no annual maxima were supplied for any window.
    #[error("no duration windows to scale")]
    NoWindows,

    /// Returned when the moment-scaling method has no 1-day window to anchor
    /// the 24-hour intensities.
    #[error("intensity scaling needs the 1-day window")]
    MissingDailyWindow,

    /// Returned when fewer windows are available than a regression needs.
    #[error("{found} duration window(s), at least {required} required")]
    TooFewWindows {
        /// Number of windows supplied.
        found: usize,
        /// Minimum number of windows.
        required: usize,
    },

    /// Returned when a window's AMS is too short to estimate moments.
    #[error("{window}-day window: {found} years of annual maxima, at least {required} required")]
    InsufficientYears {
        /// Window length in days.
        window: usize,
        /// Number of years available.
        found: usize,
        /// Minimum number of years.
        required: usize,
    },

    /// Returned when a logarithm or regression is undefined.
    #[error("numeric domain error: {reason}")]
    NumericDomain {
        /// What was undefined.
        reason: String,
    },

    /// Returned when neither an observed nor a modelled series was supplied.
    #[error("no observed or modelled series to scale")]
    NoSeries,

    /// Returned when a configuration parameter is invalid.
    #[error("invalid IDF configuration: {reason}")]
    InvalidConfig {
        /// Description of the problem.
        reason: String,
    },

    /// Wraps the failure of one series in a multi-series analysis.
    #[error("{series}: {source}")]
    Series {
        /// `observed` or `member N`.
        series: String,
        /// Underlying failure.
        source: Box<IdfError>,
    },
}

impl IdfError {
    pub(crate) fn domain(reason: impl Into<String>) -> Self {
        Self::NumericDomain {
            reason: reason.into(),
        }
    }

    pub(crate) fn in_series(self, series: impl Into<String>) -> Self {
        Self::Series {
            series: series.into(),
            source: Box::new(self),
        }
    }
}
