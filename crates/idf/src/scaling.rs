//! Intensity-duration scaling of multi-window annual maxima.
//!
//! Windows are in days, durations in hours, intensities in depth per hour.
//! A `w`-day window has duration `24 w` hours and its annual maxima become
//! intensities by dividing by that duration.

use std::collections::BTreeMap;

use nimbus_extremes::AnnualMaxima;
use nimbus_fit::{GumbelParams, PARAMETRIC_MIN_YEARS};
use nimbus_stats::{LinearFit, linear_regression, mean, reduced_variate, sd, slope_through_origin};
use tracing::{debug, info};

use crate::error::IdfError;
use crate::method::IdfMethod;
use crate::table::IdfTable;

/// Exponents of the non-central moments used by moment scaling.
pub const MOMENT_ORDERS: [f64; 6] = [0.5, 1.0, 1.5, 2.0, 2.5, 3.0];

/// Frequency-factor offset of the 24-hour Gumbel quantile.
pub const DAILY_LOCATION_FACTOR: f64 = -0.45;

/// Frequency-factor slope of the 24-hour Gumbel quantile.
pub const DAILY_SCALE_FACTOR: f64 = 0.7797;

/// Hours per day.
pub const HOURS_PER_DAY: f64 = 24.0;

/// Fewest windows any scaling regression accepts.
pub const MIN_WINDOWS: usize = 2;

/// Builds the return-period by duration intensity table for one series.
///
/// `ams_by_window` maps each window length in days to its annual maxima.
///
/// # Errors
///
/// [`IdfError::NoWindows`] for an empty map, [`IdfError::TooFewWindows`]
/// with a single window, [`IdfError::MissingDailyWindow`] for
/// [`IdfMethod::Intensity`] without the 1-day window,
/// [`IdfError::InsufficientYears`] for a window under three years and
/// [`IdfError::NumericDomain`] when a logarithm or regression is undefined.
pub fn scale_idf(
    ams_by_window: &BTreeMap<usize, AnnualMaxima>,
    return_periods: &[f64],
    durations: &[f64],
    method: IdfMethod,
) -> Result<IdfTable, IdfError> {
    let windows = window_intensities(ams_by_window)?;
    let table = match method {
        IdfMethod::Intensity => {
            let daily = ams_by_window.get(&1).ok_or(IdfError::MissingDailyWindow)?;
            let curve = MomentScaling::fit(&windows, &daily.values())?;
            IdfTable::tabulate(return_periods, durations, |t, h| curve.intensity(t, h))
        }
        IdfMethod::Power => {
            let curve = GumbelScaling::fit(&windows, DurationLaw::Power)?;
            IdfTable::tabulate(return_periods, durations, |t, h| curve.intensity(t, h))
        }
        IdfMethod::Linear => {
            let curve = GumbelScaling::fit(&windows, DurationLaw::Linear)?;
            IdfTable::tabulate(return_periods, durations, |t, h| curve.intensity(t, h))
        }
    };
    if !table.is_finite() {
        return Err(IdfError::domain(format!("{method} scaling produced a non-finite intensity")));
    }
    info!(
        %method,
        windows = windows.len(),
        return_periods = return_periods.len(),
        durations = durations.len(),
        "idf table built"
    );
    Ok(table)
}

// ---------------------------------------------------------------------------
// Window intensities
// ---------------------------------------------------------------------------

/// Annual maximum intensities of one window.
struct WindowIntensities {
    hours: f64,
    values: Vec<f64>,
}

fn window_intensities(ams_by_window: &BTreeMap<usize, AnnualMaxima>) -> Result<Vec<WindowIntensities>, IdfError> {
    if ams_by_window.is_empty() {
        return Err(IdfError::NoWindows);
    }
    if ams_by_window.len() < MIN_WINDOWS {
        return Err(IdfError::TooFewWindows {
            found: ams_by_window.len(),
            required: MIN_WINDOWS,
        });
    }
    ams_by_window
        .iter()
        .map(|(&window, ams)| {
            if window == 0 {
                return Err(IdfError::InvalidConfig {
                    reason: "window must be >= 1 day".to_string(),
                });
            }
            if ams.len() < PARAMETRIC_MIN_YEARS {
                return Err(IdfError::InsufficientYears {
                    window,
                    found: ams.len(),
                    required: PARAMETRIC_MIN_YEARS,
                });
            }
            let hours = window as f64 * HOURS_PER_DAY;
            Ok(WindowIntensities {
                hours,
                values: ams.values().into_iter().map(|v| v / hours).collect(),
            })
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Moment scaling
// ---------------------------------------------------------------------------

/// Daily Gumbel moments plus one duration exponent.
#[derive(Debug, Clone, Copy, PartialEq)]
struct MomentScaling {
    daily_mean: f64,
    daily_sd: f64,
    beta: f64,
}

impl MomentScaling {
    fn fit(windows: &[WindowIntensities], daily_ams: &[f64]) -> Result<Self, IdfError> {
        let log_hours: Vec<f64> = windows.iter().map(|w| w.hours.ln()).collect();

        let mut growth = Vec::with_capacity(MOMENT_ORDERS.len());
        for q in MOMENT_ORDERS {
            let log_moments = windows
                .iter()
                .map(|w| {
                    let moment = mean(&w.values.iter().map(|v| v.powf(q)).collect::<Vec<_>>())
                        .filter(|m| m.is_finite() && *m > 0.0)
                        .ok_or_else(|| {
                            IdfError::domain(format!("moment of order {q} at {} h is not positive", w.hours))
                        })?;
                    Ok(moment.ln())
                })
                .collect::<Result<Vec<f64>, IdfError>>()?;
            let line = linear_regression(&log_hours, &log_moments)
                .ok_or_else(|| IdfError::domain(format!("moment regression of order {q} is undefined")))?;
            debug!(q, k = line.slope, "moment growth");
            growth.push(line.slope);
        }

        let beta = slope_through_origin(&MOMENT_ORDERS, &growth)
            .ok_or_else(|| IdfError::domain("scaling exponent is undefined"))?;
        let (Some(daily_mean), Some(daily_sd)) = (mean(daily_ams), sd(daily_ams)) else {
            return Err(IdfError::domain("undefined moments of the 1-day maxima"));
        };
        debug!(beta, daily_mean, daily_sd, "moment scaling");
        Ok(Self {
            daily_mean,
            daily_sd,
            beta,
        })
    }

    /// 24-hour intensity from the daily Gumbel quantile, carried to `hours`.
    fn intensity(&self, t: f64, hours: f64) -> f64 {
        let depth = self.daily_mean
            + DAILY_LOCATION_FACTOR * self.daily_sd
            + DAILY_SCALE_FACTOR * self.daily_sd * reduced_variate(t);
        depth / HOURS_PER_DAY * (hours / HOURS_PER_DAY).powf(self.beta)
    }
}

// ---------------------------------------------------------------------------
// Gumbel parameter scaling
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DurationLaw {
    /// `p(h) = a + b h`
    Linear,
    /// `ln p(h) = a + b ln h`
    Power,
}

/// Location and scale as functions of duration.
#[derive(Debug, Clone, Copy, PartialEq)]
struct GumbelScaling {
    law: DurationLaw,
    location: LinearFit,
    scale: LinearFit,
}

impl GumbelScaling {
    fn fit(windows: &[WindowIntensities], law: DurationLaw) -> Result<Self, IdfError> {
        let mut hours = Vec::with_capacity(windows.len());
        let mut locations = Vec::with_capacity(windows.len());
        let mut scales = Vec::with_capacity(windows.len());
        for w in windows {
            let params = GumbelParams::fit(&w.values)
                .map_err(|e| IdfError::domain(format!("gumbel fit at {} h: {e}", w.hours)))?;
            debug!(hours = w.hours, location = params.location, scale = params.scale, "window gumbel");
            hours.push(w.hours);
            locations.push(params.location);
            scales.push(params.scale);
        }

        let (location, scale) = match law {
            DurationLaw::Linear => (
                linear_regression(&hours, &locations),
                linear_regression(&hours, &scales),
            ),
            DurationLaw::Power => {
                let log_hours: Vec<f64> = hours.iter().map(|h| h.ln()).collect();
                (
                    linear_regression(&log_hours, &positive_logs("location", &locations)?),
                    linear_regression(&log_hours, &positive_logs("scale", &scales)?),
                )
            }
        };
        let (Some(location), Some(scale)) = (location, scale) else {
            return Err(IdfError::domain(format!("{law:?} regression on duration is undefined")));
        };
        Ok(Self {
            law,
            location,
            scale,
        })
    }

    fn intensity(&self, t: f64, hours: f64) -> f64 {
        let (location, scale) = match self.law {
            DurationLaw::Linear => (self.location.predict(hours), self.scale.predict(hours)),
            DurationLaw::Power => (
                self.location.predict(hours.ln()).exp(),
                self.scale.predict(hours.ln()).exp(),
            ),
        };
        location + scale * reduced_variate(t)
    }
}

fn positive_logs(name: &str, values: &[f64]) -> Result<Vec<f64>, IdfError> {
    values
        .iter()
        .map(|&v| {
            if v > 0.0 {
                Ok(v.ln())
            } else {
                Err(IdfError::domain(format!("log of non-positive {name} {v}")))
            }
        })
        .collect()
}
