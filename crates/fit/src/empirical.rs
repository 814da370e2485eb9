//! Empirical return periods from ranked annual maxima.

use nimbus_extremes::AnnualMaxima;
use tracing::info;

use crate::common::{check_member_lengths, ensure_any, series_label};
use crate::ensemble::summarize_members;
use crate::error::{FitFailure, SampleError};
use crate::options::{Distribution, FitOptions};
use crate::table::FrequencyTable;

/// Fewest annual maxima the empirical fit accepts.
pub const EMPIRICAL_MIN_YEARS: usize = 10;

/// `(N / rank, value)` for each annual maximum, largest first.
pub fn empirical_points(ams: &AnnualMaxima) -> Vec<(f64, f64)> {
    ams.ranked().into_iter().map(|r| (r.return_period, r.value)).collect()
}

fn check_years(ams: &AnnualMaxima, member: Option<usize>) -> Result<(), FitFailure> {
    if ams.len() < EMPIRICAL_MIN_YEARS {
        return Err(SampleError::TooShort {
            found: ams.len(),
            required: EMPIRICAL_MIN_YEARS,
        }
        .for_series(series_label(member)));
    }
    Ok(())
}

/// Ranks the observed AMS and each member's AMS.
///
/// The modelled column holds, rank by rank, the median of the members'
/// values with the percentile band when there is more than one member. All
/// members must have the same number of years; the observed record may
/// differ, in which case its rows merge with the modelled rows by return
/// period. The rank-by-rank layout that repeats the last row of the shorter
/// column is [`rank_aligned`](crate::rank_aligned).
///
/// # Errors
///
/// [`FitFailure::InsufficientYears`] for a series under ten years and
/// [`FitFailure::EnsembleLengthMismatch`] for members of unequal length.
pub fn fit_empirical(
    observed: Option<&AnnualMaxima>,
    modelled: &[AnnualMaxima],
    options: &FitOptions,
) -> Result<FrequencyTable, FitFailure> {
    options.validate()?;
    ensure_any(observed, modelled)?;

    let observed_points = match observed {
        Some(ams) => {
            check_years(ams, None)?;
            empirical_points(ams)
        }
        None => Vec::new(),
    };

    for (m, ams) in modelled.iter().enumerate() {
        check_years(ams, Some(m))?;
    }
    let lens: Vec<usize> = modelled.iter().map(AnnualMaxima::len).collect();
    check_member_lengths(&lens, 0)?;

    let ranked: Vec<Vec<f64>> = modelled
        .iter()
        .map(|ams| empirical_points(ams).into_iter().map(|(_, v)| v).collect())
        .collect();
    let n_years = lens.first().copied().unwrap_or(0);
    let modelled_points: Vec<_> = (0..n_years)
        .filter_map(|r| {
            let at_rank: Vec<f64> = ranked.iter().map(|values| values[r]).collect();
            summarize_members(&at_rank, options.percentile_wanted())
                .map(|band| (n_years as f64 / (r + 1) as f64, band))
        })
        .collect();

    let table = FrequencyTable::merge(Distribution::Empirical, &observed_points, &modelled_points);
    info!(rows = table.return_period_count(), members = modelled.len(), "empirical fit complete");
    Ok(table)
}
