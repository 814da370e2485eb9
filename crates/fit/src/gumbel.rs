//! Gumbel fit by frequency factors on the sample mean and standard deviation.

use nimbus_extremes::AnnualMaxima;
use nimbus_stats::{mean, reduced_variate, sd};
use serde::Serialize;
use tracing::{debug, info};

use crate::common::{
    STANDARD_RETURN_PERIODS, check_member_lengths, ensure_any, finite_level, levels_per_series, tabulate,
};
use crate::error::{FitFailure, SampleError};
use crate::options::{Distribution, FitOptions};
use crate::table::FrequencyTable;

/// Fewest annual maxima a Gumbel or GEV fit accepts.
pub const PARAMETRIC_MIN_YEARS: usize = 3;

/// `√6 / π`: Gumbel scale per unit standard deviation.
pub const GUMBEL_SCALE_PER_SD: f64 = 0.7797;

/// Euler–Mascheroni constant as used in the location estimate.
pub const EULER_GAMMA: f64 = 0.5772;

/// Frequency factors `K_T` paired with the standard return periods.
pub const GUMBEL_FREQUENCY_FACTORS: [(f64, f64); 10] = [
    (2.0, -0.1643),
    (3.0, 0.2538),
    (4.0, 0.5214),
    (5.0, 0.7195),
    (10.0, 1.3046),
    (15.0, 1.6347),
    (20.0, 1.8658),
    (30.0, 2.1887),
    (50.0, 2.5923),
    (100.0, 3.1367),
];

/// Gumbel location and scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GumbelParams {
    /// Location `μ`.
    pub location: f64,
    /// Scale `β`.
    pub scale: f64,
}

impl GumbelParams {
    /// Method-of-moments parameters: `β = 0.7797 sd`, `μ = mean - 0.5772 β`.
    pub fn from_moments(mean: f64, sd: f64) -> Self {
        let scale = GUMBEL_SCALE_PER_SD * sd;
        Self {
            location: mean - EULER_GAMMA * scale,
            scale,
        }
    }

    /// Method-of-moments parameters of `sample`.
    ///
    /// # Errors
    ///
    /// [`SampleError::TooShort`] below three values, and
    /// [`SampleError::NumericDomain`] for a constant sample.
    pub fn fit(sample: &[f64]) -> Result<Self, SampleError> {
        let (m, s) = sample_moments(sample)?;
        Ok(Self::from_moments(m, s))
    }

    /// Return level `μ + β y_T` with `y_T = -ln(-ln(1 - 1/T))`.
    pub fn quantile(&self, t: f64) -> f64 {
        self.location + self.scale * reduced_variate(t)
    }
}

fn sample_moments(sample: &[f64]) -> Result<(f64, f64), SampleError> {
    if sample.len() < PARAMETRIC_MIN_YEARS {
        return Err(SampleError::TooShort {
            found: sample.len(),
            required: PARAMETRIC_MIN_YEARS,
        });
    }
    let (Some(m), Some(s)) = (mean(sample), sd(sample)) else {
        return Err(SampleError::domain("undefined sample moments"));
    };
    if s <= 0.0 {
        return Err(SampleError::domain("zero standard deviation"));
    }
    Ok((m, s))
}

/// Return levels `mean + K_T sd` at the standard return periods.
///
/// # Errors
///
/// Same as [`GumbelParams::fit`].
pub fn gumbel_return_levels(sample: &[f64]) -> Result<Vec<f64>, SampleError> {
    let (m, s) = sample_moments(sample)?;
    debug!(
        mean = m,
        sd = s,
        location = GumbelParams::from_moments(m, s).location,
        scale = GUMBEL_SCALE_PER_SD * s,
        "gumbel moments"
    );
    GUMBEL_FREQUENCY_FACTORS
        .iter()
        .map(|&(t, k)| finite_level(t, m + k * s))
        .collect()
}

/// Fits a Gumbel curve to the observed AMS and to each member.
///
/// Return periods are the ten standard periods; there is no extension for
/// long records.
///
/// # Errors
///
/// See [`FitFailure`]. With a year tolerance set, members whose lengths
/// spread further fail with [`FitFailure::EnsembleLengthMismatch`].
pub fn fit_gumbel(
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

    let (obs, members) = levels_per_series(observed, modelled, |ams| gumbel_return_levels(&ams.values()))?;
    let table = tabulate(
        Distribution::Gumbel,
        &STANDARD_RETURN_PERIODS,
        obs.as_deref(),
        &members,
        options.percentile_wanted(),
    );
    info!(rows = table.return_period_count(), members = members.len(), "gumbel fit complete");
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn frequency_factors_match_reduced_variate() {
        // K_T = (y_T - 0.5772) * 0.7797
        for (t, k) in GUMBEL_FREQUENCY_FACTORS {
            let from_variate = GUMBEL_SCALE_PER_SD * (reduced_variate(t) - EULER_GAMMA);
            assert_relative_eq!(k, from_variate, epsilon = 2e-4);
        }
    }

    #[test]
    fn table_and_params_agree() {
        let sample = [31.0, 45.0, 27.5, 60.2, 38.8, 41.0, 52.3, 29.9];
        let levels = gumbel_return_levels(&sample).unwrap();
        let params = GumbelParams::fit(&sample).unwrap();
        for (level, (t, _)) in levels.iter().zip(GUMBEL_FREQUENCY_FACTORS) {
            assert_relative_eq!(*level, params.quantile(t), max_relative = 1e-3);
        }
    }

    #[test]
    fn two_years_is_too_short() {
        assert_eq!(
            gumbel_return_levels(&[1.0, 2.0]).unwrap_err(),
            SampleError::TooShort {
                found: 2,
                required: 3
            }
        );
    }

    #[test]
    fn constant_sample_is_domain_error() {
        assert!(matches!(
            GumbelParams::fit(&[5.0, 5.0, 5.0]),
            Err(SampleError::NumericDomain { .. })
        ));
    }

    #[test]
    fn mean_plus_k_sd() {
        // mean 20, sd 10
        let sample = [10.0, 20.0, 30.0];
        let levels = gumbel_return_levels(&sample).unwrap();
        assert_relative_eq!(levels[0], 20.0 - 1.643, epsilon = 1e-9);
        assert_relative_eq!(levels[9], 20.0 + 31.367, epsilon = 1e-9);
    }
}
