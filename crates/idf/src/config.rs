//! Configuration of a multi-series IDF analysis.

use nimbus_fit::STANDARD_RETURN_PERIODS;

use crate::error::IdfError;
use crate::method::IdfMethod;

/// Default window lengths, in days.
pub const DEFAULT_WINDOWS: [usize; 5] = [1, 2, 3, 5, 10];

/// Default table durations, in hours.
pub const DEFAULT_DURATIONS: [f64; 9] = [1.0, 2.0, 3.0, 6.0, 12.0, 24.0, 48.0, 72.0, 120.0];

/// Which windows to extract, where to evaluate the table, and how to
/// summarise ensemble members.
///
/// # Example
///
/// ```
/// use nimbus_idf::{IdfConfig, IdfMethod};
///
/// let config = IdfConfig::new()
///     .with_method(IdfMethod::Power)
///     .with_windows(vec![1, 2, 4]);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct IdfConfig {
    method: IdfMethod,
    windows: Vec<usize>,
    durations: Vec<f64>,
    return_periods: Vec<f64>,
    percentile_wanted: f64,
}

impl IdfConfig {
    /// Creates a configuration with defaults.
    ///
    /// Defaults: `method = Intensity`, `windows = [1, 2, 3, 5, 10]` days,
    /// `durations = [1, 2, 3, 6, 12, 24, 48, 72, 120]` hours, the standard
    /// return periods, `percentile_wanted = 90`.
    pub fn new() -> Self {
        Self {
            method: IdfMethod::Intensity,
            windows: DEFAULT_WINDOWS.to_vec(),
            durations: DEFAULT_DURATIONS.to_vec(),
            return_periods: STANDARD_RETURN_PERIODS.to_vec(),
            percentile_wanted: 90.0,
        }
    }

    // --- Builder methods ---

    /// Sets the scaling method.
    pub fn with_method(mut self, method: IdfMethod) -> Self {
        self.method = method;
        self
    }

    /// Sets the running-sum windows in days.
    pub fn with_windows(mut self, windows: Vec<usize>) -> Self {
        self.windows = windows;
        self
    }

    /// Sets the table durations in hours.
    pub fn with_durations(mut self, durations: Vec<f64>) -> Self {
        self.durations = durations;
        self
    }

    /// Sets the table return periods in years.
    pub fn with_return_periods(mut self, return_periods: Vec<f64>) -> Self {
        self.return_periods = return_periods;
        self
    }

    /// Sets the width of the ensemble band in percent.
    pub fn with_percentile_wanted(mut self, p: f64) -> Self {
        self.percentile_wanted = p;
        self
    }

    // --- Accessors ---

    /// Returns the scaling method.
    pub fn method(&self) -> IdfMethod {
        self.method
    }

    /// Returns the windows in days.
    pub fn windows(&self) -> &[usize] {
        &self.windows
    }

    /// Returns the durations in hours.
    pub fn durations(&self) -> &[f64] {
        &self.durations
    }

    /// Returns the return periods in years.
    pub fn return_periods(&self) -> &[f64] {
        &self.return_periods
    }

    /// Returns the ensemble band width in percent.
    pub fn percentile_wanted(&self) -> f64 {
        self.percentile_wanted
    }

    /// Validates this configuration.
    ///
    /// # Errors
    ///
    /// Returns [`IdfError::InvalidConfig`] listing every problem found.
    pub fn validate(&self) -> Result<(), IdfError> {
        let mut errors: Vec<String> = Vec::new();

        if self.windows.is_empty() {
            errors.push("windows must not be empty".to_string());
        }
        if self.windows.contains(&0) {
            errors.push("windows must be >= 1 day".to_string());
        }
        let mut sorted = self.windows.clone();
        sorted.sort_unstable();
        sorted.dedup();
        if sorted.len() != self.windows.len() {
            errors.push("windows must be distinct".to_string());
        }
        if self.durations.is_empty() {
            errors.push("durations must not be empty".to_string());
        }
        if let Some(h) = self.durations.iter().find(|h| !h.is_finite() || **h <= 0.0) {
            errors.push(format!("durations must be finite and > 0, got {h}"));
        }
        if self.return_periods.is_empty() {
            errors.push("return_periods must not be empty".to_string());
        }
        if let Some(t) = self.return_periods.iter().find(|t| !t.is_finite() || **t <= 0.0) {
            errors.push(format!("return periods must be finite and > 0, got {t}"));
        }
        if !self.percentile_wanted.is_finite() || !(0.0..=100.0).contains(&self.percentile_wanted) {
            errors.push(format!(
                "percentile_wanted must be in 0..=100, got {}",
                self.percentile_wanted
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(IdfError::InvalidConfig {
                reason: errors.join("; "),
            })
        }
    }
}

impl Default for IdfConfig {
    fn default() -> Self {
        Self::new()
    }
}
