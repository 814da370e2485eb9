//! Stretched-exponential fit to daily exceedances.
//!
//! Wet days follow `P(X > x | wet) = exp(-(x / R0)^c)`. Ranking the wet days
//! in descending order gives exceedance probabilities `p_i = i / (n + 1)`,
//! and `ln(-ln p)` regressed on `ln(x / R0)` has slope `c`. The level
//! exceeded once every `T` years solves
//! `p_wet · exp(-(x / R0)^c) · 365.25 = 1 / T`.

use nimbus_extremes::{WetDays, wet_day_values};
use nimbus_io::DailySeries;
use nimbus_stats::{linear_regression, mean};
use serde::Serialize;
use tracing::{debug, info};

use crate::common::{STANDARD_RETURN_PERIODS, ensure_any, levels_per_series, tabulate};
use crate::error::{FitFailure, SampleError};
use crate::options::{Distribution, FitOptions};
use crate::table::FrequencyTable;

/// Fewest exceedances the regression accepts.
pub const MIN_EXCEEDANCES: usize = 10;

/// Mean days per year in the return-level formula.
pub const DAYS_PER_YEAR: f64 = 365.25;

/// Stretched-exponential shape, scale and wet-day fraction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StretchedParams {
    /// Shape `c`.
    pub c: f64,
    /// Scale `R0`: mean wet-day value.
    pub r0: f64,
    /// Fraction of valid days that were wet.
    pub p_wet: f64,
}

impl StretchedParams {
    /// Fits the wet days of one series, regressing only values above
    /// `fit_threshold`.
    ///
    /// # Errors
    ///
    /// [`SampleError::TooFewExceedances`] with fewer than ten values above
    /// the threshold; [`SampleError::NumericDomain`] for non-positive values,
    /// a degenerate regression or a non-positive shape.
    pub fn fit(wet: &WetDays, fit_threshold: f64) -> Result<Self, SampleError> {
        let (Some(p_wet), Some(r0)) = (wet.p_wet(), mean(&wet.values)) else {
            return Err(SampleError::TooFewExceedances {
                found: 0,
                required: MIN_EXCEEDANCES,
            });
        };
        if r0 <= 0.0 {
            return Err(SampleError::domain(format!("non-positive mean wet-day value {r0}")));
        }

        let mut ranked = wet.values.clone();
        ranked.sort_by(|a, b| b.total_cmp(a));
        let denom = (ranked.len() + 1) as f64;

        let mut x = Vec::new();
        let mut y = Vec::new();
        for (i, &v) in ranked.iter().enumerate().take_while(|&(_, &v)| v > fit_threshold) {
            if v <= 0.0 {
                return Err(SampleError::domain(format!("log of non-positive value {v}")));
            }
            let p = (i + 1) as f64 / denom;
            x.push((v / r0).ln());
            y.push((-p.ln()).ln());
        }
        if x.len() < MIN_EXCEEDANCES {
            return Err(SampleError::TooFewExceedances {
                found: x.len(),
                required: MIN_EXCEEDANCES,
            });
        }

        let line = linear_regression(&x, &y).ok_or_else(|| SampleError::domain("exceedances are all equal"))?;
        if !line.slope.is_finite() || line.slope <= 0.0 {
            return Err(SampleError::domain(format!("non-positive shape c = {}", line.slope)));
        }
        Ok(Self {
            c: line.slope,
            r0,
            p_wet,
        })
    }

    /// Return level `(ln(p_wet · T · 365.25))^(1/c) · R0`.
    ///
    /// # Errors
    ///
    /// [`SampleError::NumericDomain`] when `p_wet · T · 365.25 <= 1`, i.e.
    /// wet days are too rare for an event every `T` years.
    pub fn return_level(&self, t: f64) -> Result<f64, SampleError> {
        let events = self.p_wet * t * DAYS_PER_YEAR;
        if events <= 1.0 {
            return Err(SampleError::domain(format!(
                "p_wet * T * {DAYS_PER_YEAR} = {events} <= 1 at T={t}"
            )));
        }
        Ok(events.ln().powf(1.0 / self.c) * self.r0)
    }
}

fn stretched_levels(series: &DailySeries, options: &FitOptions) -> Result<Vec<f64>, SampleError> {
    let wet = wet_day_values(series, options.wet_threshold());
    let params = StretchedParams::fit(&wet, options.fit_threshold())?;
    debug!(?params, wet_days = wet.values.len(), "stretched exponential");
    STANDARD_RETURN_PERIODS.iter().map(|&t| params.return_level(t)).collect()
}

/// Fits the stretched exponential to the observed series and to each member
/// through the same path.
///
/// # Errors
///
/// See [`FitFailure`].
pub fn fit_stretched(
    observed: Option<&DailySeries>,
    modelled: &[DailySeries],
    options: &FitOptions,
) -> Result<FrequencyTable, FitFailure> {
    options.validate()?;
    ensure_any(observed, modelled)?;

    let (obs, members) = levels_per_series(observed, modelled, |s| stretched_levels(s, options))?;
    let table = tabulate(
        Distribution::Stretched,
        &STANDARD_RETURN_PERIODS,
        obs.as_deref(),
        &members,
        options.percentile_wanted(),
    );
    info!(rows = table.return_period_count(), members = members.len(), "stretched fit complete");
    Ok(table)
}
