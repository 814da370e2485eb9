//! Plumbing shared by the multi-series fits.

use crate::ensemble::summarize_members;
use crate::error::{FitFailure, SampleError};
use crate::options::Distribution;
use crate::table::FrequencyTable;

/// Return periods of the parametric fits, in years.
pub const STANDARD_RETURN_PERIODS: [f64; 10] = [2.0, 3.0, 4.0, 5.0, 10.0, 15.0, 20.0, 30.0, 50.0, 100.0];

/// `observed`, or `member N` with `N` counted from 1.
pub fn series_label(member: Option<usize>) -> String {
    match member {
        None => "observed".to_string(),
        Some(m) => format!("member {}", m + 1),
    }
}

pub(crate) fn ensure_any<T>(observed: Option<&T>, modelled: &[T]) -> Result<(), FitFailure> {
    if observed.is_none() && modelled.is_empty() {
        return Err(FitFailure::NoSeries);
    }
    Ok(())
}

/// Fails when the member lengths spread by more than `tolerance`.
pub(crate) fn check_member_lengths(lens: &[usize], tolerance: usize) -> Result<(), FitFailure> {
    let (Some(&shortest), Some(&longest)) = (lens.iter().min(), lens.iter().max()) else {
        return Ok(());
    };
    if longest - shortest > tolerance {
        return Err(FitFailure::EnsembleLengthMismatch {
            shortest,
            longest,
            tolerance,
        });
    }
    Ok(())
}

/// Runs `levels` on every series, naming the series in any failure.
pub(crate) fn levels_per_series<T>(
    observed: Option<&T>,
    modelled: &[T],
    levels: impl Fn(&T) -> Result<Vec<f64>, SampleError>,
) -> Result<(Option<Vec<f64>>, Vec<Vec<f64>>), FitFailure> {
    let observed_levels = observed
        .map(|s| levels(s).map_err(|e| e.for_series(series_label(None))))
        .transpose()?;
    let modelled_levels = modelled
        .iter()
        .enumerate()
        .map(|(m, s)| levels(s).map_err(|e| e.for_series(series_label(Some(m)))))
        .collect::<Result<Vec<_>, _>>()?;
    Ok((observed_levels, modelled_levels))
}

/// Rejects levels that are not finite.
pub(crate) fn finite_level(t: f64, level: f64) -> Result<f64, SampleError> {
    if level.is_finite() {
        Ok(level)
    } else {
        Err(SampleError::domain(format!("return level at T={t} is not finite")))
    }
}

/// Builds the table for curves evaluated at shared return periods.
///
/// `observed` and each member of `modelled` hold one level per entry of
/// `return_periods`.
pub(crate) fn tabulate(
    distribution: Distribution,
    return_periods: &[f64],
    observed: Option<&[f64]>,
    modelled: &[Vec<f64>],
    percentile_wanted: f64,
) -> FrequencyTable {
    let observed_points: Vec<(f64, f64)> = observed
        .map(|levels| return_periods.iter().copied().zip(levels.iter().copied()).collect())
        .unwrap_or_default();

    let modelled_points: Vec<_> = return_periods
        .iter()
        .enumerate()
        .filter_map(|(j, &rp)| {
            let at_rp: Vec<f64> = modelled.iter().filter_map(|m| m.get(j).copied()).collect();
            summarize_members(&at_rp, percentile_wanted).map(|band| (rp, band))
        })
        .collect();

    FrequencyTable::merge(distribution, &observed_points, &modelled_points)
}
