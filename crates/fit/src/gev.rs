//! Generalized Extreme Value fit by L-moments.
//!
//! The shape comes from Hosking's rational approximation in the L-skewness
//! `τ3 = λ3 / λ2`:
//!
//! ```text
//! z = 2 / (3 + τ3) - ln 2 / ln 3
//! κ = 7.859 z + 2.9554 z²
//! ```
//!
//! Near `κ = 0` the general quantile is numerically unstable, so shapes with
//! `|κ| <= 0.005` use the Gumbel closed form instead.

use std::f64::consts::LN_2;

use nimbus_extremes::AnnualMaxima;
use nimbus_stats::{effective_return_period, gamma_approx, l_moment};
use serde::Serialize;
use tracing::{debug, info};

use crate::common::{
    STANDARD_RETURN_PERIODS, check_member_lengths, ensure_any, finite_level, levels_per_series, tabulate,
};
use crate::error::{FitFailure, SampleError};
use crate::gumbel::{EULER_GAMMA, GumbelParams, PARAMETRIC_MIN_YEARS};
use crate::options::{Distribution, FitOptions};
use crate::table::FrequencyTable;

/// Shapes within this distance of zero use the Gumbel limit.
pub const GUMBEL_LIMIT_BAND: f64 = 0.005;

/// Return periods appended for records longer than [`EXTENDED_MIN_YEARS`].
pub const EXTENDED_RETURN_PERIODS: [f64; 2] = [500.0, 1000.0];

/// The shortest member (or the observed record without members) must have
/// more years than this to get the extension.
pub const EXTENDED_MIN_YEARS: usize = 100;

/// GEV location `η`, scale `β` and shape `κ` (Hosking sign convention).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GevParams {
    /// Location `η`.
    pub location: f64,
    /// Scale `β`.
    pub scale: f64,
    /// Shape `κ`.
    pub shape: f64,
}

/// A fitted GEV curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "form", rename_all = "snake_case")]
pub enum GevCurve {
    /// `|κ| > 0.005`.
    General(GevParams),
    /// `|κ| <= 0.005`: `β = λ2 / ln 2`, `η = λ1 - 0.5772 β`.
    GumbelLimit(GumbelParams),
}

/// Shape `κ` from the L-skewness `τ3`.
pub fn gev_shape(tau3: f64) -> f64 {
    let z = 2.0 / (3.0 + tau3) - LN_2 / 3f64.ln();
    7.859 * z + 2.9554 * z * z
}

impl GevCurve {
    /// Fits the curve to `sample` by L-moments.
    ///
    /// # Errors
    ///
    /// [`SampleError::TooShort`] below three values;
    /// [`SampleError::NumericDomain`] for a zero L-scale or an undefined
    /// `Γ(1 + κ)`.
    pub fn fit(sample: &[f64]) -> Result<Self, SampleError> {
        if sample.len() < PARAMETRIC_MIN_YEARS {
            return Err(SampleError::TooShort {
                found: sample.len(),
                required: PARAMETRIC_MIN_YEARS,
            });
        }
        let (Some(l1), Some(l2), Some(l3)) = (l_moment(sample, 1), l_moment(sample, 2), l_moment(sample, 3)) else {
            return Err(SampleError::domain("undefined L-moments"));
        };
        Self::from_l_moments(l1, l2, l3)
    }

    /// Curve from the first three L-moments.
    ///
    /// # Errors
    ///
    /// Same as [`GevCurve::from_shape`].
    pub fn from_l_moments(l1: f64, l2: f64, l3: f64) -> Result<Self, SampleError> {
        if l2 <= 0.0 {
            return Err(SampleError::domain("zero L-scale"));
        }
        let tau3 = l3 / l2;
        if 3.0 + tau3 == 0.0 {
            return Err(SampleError::domain("L-skewness of -3"));
        }
        Self::from_shape(l1, l2, gev_shape(tau3))
    }

    /// Curve with shape `kappa` matched to `λ1` and `λ2`.
    ///
    /// # Errors
    ///
    /// [`SampleError::NumericDomain`] if `λ2 <= 0`, `Γ(1 + κ)` is undefined
    /// or the resulting parameters are not finite.
    pub fn from_shape(l1: f64, l2: f64, kappa: f64) -> Result<Self, SampleError> {
        if l2 <= 0.0 {
            return Err(SampleError::domain("zero L-scale"));
        }
        if kappa.abs() <= GUMBEL_LIMIT_BAND {
            let scale = l2 / LN_2;
            return Ok(Self::GumbelLimit(GumbelParams {
                location: l1 - EULER_GAMMA * scale,
                scale,
            }));
        }

        let g = gamma_approx(1.0 + kappa).ok_or_else(|| SampleError::domain(format!("gamma(1 + {kappa}) undefined")))?;
        let denom = (1.0 - 2f64.powf(-kappa)) * g;
        if denom == 0.0 {
            return Err(SampleError::domain("zero scale denominator"));
        }
        let scale = l2 * kappa / denom;
        let location = l1 - scale * (1.0 - g) / kappa;
        if !scale.is_finite() || !location.is_finite() || scale <= 0.0 {
            return Err(SampleError::domain(format!("invalid GEV scale {scale}")));
        }
        Ok(Self::General(GevParams {
            location,
            scale,
            shape: kappa,
        }))
    }

    /// Shape `κ`; zero for the Gumbel limit.
    pub fn shape(&self) -> f64 {
        match self {
            Self::General(p) => p.shape,
            Self::GumbelLimit(_) => 0.0,
        }
    }

    /// Return level at `t` years (`T <= 1` is taken as 1.01).
    pub fn quantile(&self, t: f64) -> f64 {
        match self {
            Self::General(p) => {
                let f = 1.0 - 1.0 / effective_return_period(t);
                p.location + p.scale * (1.0 - (-f.ln()).powf(p.shape)) / p.shape
            }
            Self::GumbelLimit(p) => p.quantile(t),
        }
    }
}

/// The standard return periods, plus 500 and 1000 years when `extended` is
/// set and `shortest_series` exceeds [`EXTENDED_MIN_YEARS`].
pub fn gev_return_periods(shortest_series: usize, extended: bool) -> Vec<f64> {
    let mut periods = STANDARD_RETURN_PERIODS.to_vec();
    if extended && shortest_series > EXTENDED_MIN_YEARS {
        periods.extend_from_slice(&EXTENDED_RETURN_PERIODS);
    }
    periods
}

fn gev_levels(sample: &[f64], return_periods: &[f64]) -> Result<Vec<f64>, SampleError> {
    let curve = GevCurve::fit(sample)?;
    debug!(?curve, years = sample.len(), "gev curve");
    return_periods.iter().map(|&t| finite_level(t, curve.quantile(t))).collect()
}

/// Fits a GEV curve to the observed AMS and to each member independently.
///
/// The 500- and 1000-year periods follow the shortest member; the observed
/// record decides only when there are no members.
///
/// # Errors
///
/// See [`FitFailure`].
pub fn fit_gev(
    observed: Option<&AnnualMaxima>,
    modelled: &[AnnualMaxima],
    options: &FitOptions,
) -> Result<FrequencyTable, FitFailure> {
    options.validate()?;
    ensure_any(observed, modelled)?;
    if let Some(tolerance) = options.year_tolerance() {
        let lens: Vec<usize> = modelled.iter().map(AnnualMaxima::len).collect();
        check_member_lengths(&lens, tolerance)?;
    }

    let shortest = match modelled.iter().map(AnnualMaxima::len).min() {
        Some(years) => years,
        None => observed.map_or(0, AnnualMaxima::len),
    };
    let return_periods = gev_return_periods(shortest, options.extended_return_periods());

    let (obs, members) = levels_per_series(observed, modelled, |ams| gev_levels(&ams.values(), &return_periods))?;
    let table = tabulate(
        Distribution::Gev,
        &return_periods,
        obs.as_deref(),
        &members,
        options.percentile_wanted(),
    );
    info!(rows = table.return_period_count(), members = members.len(), "gev fit complete");
    Ok(table)
}
