//! Dispatch from a distribution choice to its fitter.

use nimbus_extremes::{AnnualMaxima, extract_ams};
use nimbus_io::DailySeries;
use tracing::{info, warn};

use crate::empirical::fit_empirical;
use crate::error::FitFailure;
use crate::gev::fit_gev;
use crate::gumbel::fit_gumbel;
use crate::options::{Distribution, FitOptions};
use crate::stretched::fit_stretched;
use crate::table::FrequencyTable;

/// Runs one frequency analysis on filtered daily series.
///
/// Empirical, GEV and Gumbel work on the annual maxima of
/// `options.window()`-day sums; the stretched fit uses the daily values.
///
/// # Errors
///
/// Returns the fitter's [`FitFailure`]; failures are also logged at `warn`.
pub fn frequency_analysis(
    distribution: Distribution,
    observed: Option<&DailySeries>,
    modelled: &[DailySeries],
    options: &FitOptions,
) -> Result<FrequencyTable, FitFailure> {
    options.validate()?;
    info!(
        %distribution,
        observed = observed.is_some(),
        members = modelled.len(),
        window = options.window(),
        "frequency analysis"
    );

    let annual_maxima = || -> (Option<AnnualMaxima>, Vec<AnnualMaxima>) {
        (
            observed.map(|s| extract_ams(s, options.window())),
            modelled.iter().map(|s| extract_ams(s, options.window())).collect(),
        )
    };

    let result = match distribution {
        Distribution::Empirical => {
            let (obs, members) = annual_maxima();
            fit_empirical(obs.as_ref(), &members, options)
        }
        Distribution::Gev => {
            let (obs, members) = annual_maxima();
            fit_gev(obs.as_ref(), &members, options)
        }
        Distribution::Gumbel => {
            let (obs, members) = annual_maxima();
            fit_gumbel(obs.as_ref(), &members, options)
        }
        Distribution::Stretched => fit_stretched(observed, modelled, options),
    };

    if let Err(failure) = &result {
        warn!(%distribution, %failure, "frequency fit failed");
    }
    result
}
