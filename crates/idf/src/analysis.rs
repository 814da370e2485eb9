//! IDF analysis over an observed series and an ensemble.

use std::collections::BTreeMap;

use nimbus_extremes::{AnnualMaxima, running_sums};
use nimbus_fit::series_label;
use nimbus_io::DailySeries;
use serde::Serialize;
use tracing::{info, warn};

use crate::config::IdfConfig;
use crate::error::IdfError;
use crate::method::IdfMethod;
use crate::scaling::scale_idf;
use crate::table::{IdfBand, IdfTable};

/// Observed table and ensemble summary of one IDF analysis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IdfResult {
    /// Scaling method used.
    pub method: IdfMethod,
    /// Table of the observed series.
    pub observed: Option<IdfTable>,
    /// Cell-wise summary of the member tables.
    pub modelled: Option<IdfBand>,
}

/// Annual maxima of `window`-day running sums for each configured window.
pub fn ams_by_window(series: &DailySeries, windows: &[usize]) -> BTreeMap<usize, AnnualMaxima> {
    windows
        .iter()
        .map(|&w| (w, AnnualMaxima::from_running_sums(&running_sums(series, w))))
        .collect()
}

fn scale_series(series: &DailySeries, member: Option<usize>, config: &IdfConfig) -> Result<IdfTable, IdfError> {
    scale_idf(
        &ams_by_window(series, config.windows()),
        config.return_periods(),
        config.durations(),
        config.method(),
    )
    .map_err(|e| e.in_series(series_label(member)))
}

fn scale_all(
    observed: Option<&DailySeries>,
    modelled: &[DailySeries],
    config: &IdfConfig,
) -> Result<IdfResult, IdfError> {
    let observed = observed.map(|s| scale_series(s, None, config)).transpose()?;
    let members = modelled
        .iter()
        .enumerate()
        .map(|(m, s)| scale_series(s, Some(m), config))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(IdfResult {
        method: config.method(),
        observed,
        modelled: IdfBand::summarize(&members, config.percentile_wanted()),
    })
}

/// Scales the observed series and each member through the same path, then
/// summarises the members cell by cell.
///
/// # Errors
///
/// [`IdfError::NoSeries`] with nothing to scale, [`IdfError::InvalidConfig`]
/// for a bad configuration, and [`IdfError::Series`] naming the first
/// series that failed.
pub fn idf_analysis(
    observed: Option<&DailySeries>,
    modelled: &[DailySeries],
    config: &IdfConfig,
) -> Result<IdfResult, IdfError> {
    config.validate()?;
    if observed.is_none() && modelled.is_empty() {
        return Err(IdfError::NoSeries);
    }
    info!(
        method = %config.method(),
        windows = ?config.windows(),
        members = modelled.len(),
        "idf analysis"
    );

    let result = scale_all(observed, modelled, config);
    if let Err(failure) = &result {
        warn!(%failure, "idf analysis failed");
    }
    result
}
