//! Fit options and distribution selection.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::FitFailure;

/// The four interchangeable frequency fits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Distribution {
    /// Ranked annual maxima with `N / rank` return periods.
    Empirical,
    /// Generalized Extreme Value fitted by L-moments.
    Gev,
    /// Gumbel fitted by frequency factors on mean and standard deviation.
    Gumbel,
    /// Stretched exponential fitted to daily exceedances.
    Stretched,
}

impl Distribution {
    /// All distributions in menu order.
    pub const ALL: [Distribution; 4] = [Self::Empirical, Self::Gev, Self::Gumbel, Self::Stretched];

    /// Lower-case name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Empirical => "empirical",
            Self::Gev => "gev",
            Self::Gumbel => "gumbel",
            Self::Stretched => "stretched",
        }
    }
}

impl fmt::Display for Distribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Distribution {
    type Err = FitFailure;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "empirical" => Ok(Self::Empirical),
            "gev" => Ok(Self::Gev),
            "gumbel" => Ok(Self::Gumbel),
            "stretched" | "stretched-exponential" | "stretched_exponential" => Ok(Self::Stretched),
            other => Err(FitFailure::InvalidOptions {
                reason: format!("unknown distribution '{other}'"),
            }),
        }
    }
}

/// Options shared by all fitters.
///
/// # Example
///
/// ```
/// use nimbus_fit::FitOptions;
///
/// let options = FitOptions::new()
///     .with_percentile_wanted(80.0)
///     .with_year_tolerance(Some(2));
/// assert!(options.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct FitOptions {
    percentile_wanted: f64,
    year_tolerance: Option<usize>,
    wet_threshold: f64,
    fit_threshold: f64,
    extended_return_periods: bool,
    window: usize,
}

impl FitOptions {
    /// Creates options with defaults.
    ///
    /// Defaults: `percentile_wanted = 90`, `year_tolerance = None`,
    /// `wet_threshold = 0.3`, `fit_threshold = 0.0`,
    /// `extended_return_periods = true`, `window = 1`.
    pub fn new() -> Self {
        Self {
            percentile_wanted: 90.0,
            year_tolerance: None,
            wet_threshold: 0.3,
            fit_threshold: 0.0,
            extended_return_periods: true,
            window: 1,
        }
    }

    // --- Builder methods ---

    /// Sets the width of the ensemble band in percent (90 gives 5..95).
    pub fn with_percentile_wanted(mut self, p: f64) -> Self {
        self.percentile_wanted = p;
        self
    }

    /// Sets how many years ensemble members may differ by in the parametric
    /// fits, or `None` to skip the check.
    pub fn with_year_tolerance(mut self, tolerance: Option<usize>) -> Self {
        self.year_tolerance = tolerance;
        self
    }

    /// Sets the wet-day threshold of the stretched fit.
    pub fn with_wet_threshold(mut self, v: f64) -> Self {
        self.wet_threshold = v;
        self
    }

    /// Sets the threshold above which wet days enter the stretched regression.
    pub fn with_fit_threshold(mut self, v: f64) -> Self {
        self.fit_threshold = v;
        self
    }

    /// Sets whether GEV adds the 500- and 1000-year periods for long records.
    pub fn with_extended_return_periods(mut self, b: bool) -> Self {
        self.extended_return_periods = b;
        self
    }

    /// Sets the AMS duration in days.
    pub fn with_window(mut self, days: usize) -> Self {
        self.window = days;
        self
    }

    // --- Accessors ---

    /// Returns the ensemble band width in percent.
    pub fn percentile_wanted(&self) -> f64 {
        self.percentile_wanted
    }

    /// Returns the lower band percentile, `percentile_wanted / 2`.
    pub fn lower_percentile(&self) -> f64 {
        self.percentile_wanted / 2.0
    }

    /// Returns the upper band percentile, `100 - percentile_wanted / 2`.
    pub fn upper_percentile(&self) -> f64 {
        100.0 - self.percentile_wanted / 2.0
    }

    /// Returns the ensemble year tolerance.
    pub fn year_tolerance(&self) -> Option<usize> {
        self.year_tolerance
    }

    /// Returns the wet-day threshold.
    pub fn wet_threshold(&self) -> f64 {
        self.wet_threshold
    }

    /// Returns the regression threshold of the stretched fit.
    pub fn fit_threshold(&self) -> f64 {
        self.fit_threshold
    }

    /// Returns whether long records get the 500- and 1000-year periods.
    pub fn extended_return_periods(&self) -> bool {
        self.extended_return_periods
    }

    /// Returns the AMS duration in days.
    pub fn window(&self) -> usize {
        self.window
    }

    /// Validates these options.
    ///
    /// # Errors
    ///
    /// Returns [`FitFailure::InvalidOptions`] if `percentile_wanted` is not a
    /// finite value in 0..=100, a threshold is negative or not finite, or
    /// `window` is zero.
    pub fn validate(&self) -> Result<(), FitFailure> {
        if !self.percentile_wanted.is_finite() || !(0.0..=100.0).contains(&self.percentile_wanted) {
            return Err(FitFailure::InvalidOptions {
                reason: format!(
                    "percentile_wanted must be in 0..=100, got {}",
                    self.percentile_wanted
                ),
            });
        }
        if !self.wet_threshold.is_finite() || self.wet_threshold < 0.0 {
            return Err(FitFailure::InvalidOptions {
                reason: format!(
                    "wet_threshold must be finite and >= 0, got {}",
                    self.wet_threshold
                ),
            });
        }
        if !self.fit_threshold.is_finite() || self.fit_threshold < 0.0 {
            return Err(FitFailure::InvalidOptions {
                reason: format!(
                    "fit_threshold must be finite and >= 0, got {}",
                    self.fit_threshold
                ),
            });
        }
        if self.window == 0 {
            return Err(FitFailure::InvalidOptions {
                reason: "window must be >= 1 day".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for FitOptions {
    fn default() -> Self {
        Self::new()
    }
}
