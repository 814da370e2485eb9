//! Frequency command: fit one distribution and write the table as JSON.

use anyhow::Result;
use serde::Serialize;
use tracing::{info, info_span, warn};

use nimbus_fit::{
    AlignedRow, Distribution, FrequencyTable, PlotSeries, TabularView, frequency_analysis, plot_series,
    rank_aligned,
};

use crate::cli::FrequencyArgs;
use crate::convert;
use crate::input::{self, Inputs};

/// JSON result of the `frequency` command.
///
/// On failure only `success`, `distribution`, `members` and `error` are
/// present.
#[derive(Debug, Serialize)]
pub struct FrequencyReport {
    pub success: bool,
    pub distribution: Distribution,
    pub members: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table: Option<FrequencyTable>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tabular: Option<TabularView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plot: Option<Vec<PlotSeries>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rank_aligned: Option<Vec<AlignedRow>>,
}

impl FrequencyReport {
    fn from_outcome(distribution: Distribution, members: usize, outcome: Result<FrequencyTable, String>) -> Self {
        match outcome {
            Ok(table) => Self {
                success: true,
                distribution,
                members,
                error: None,
                tabular: Some(TabularView::from(&table)),
                plot: Some(plot_series(&table)),
                rank_aligned: Some(rank_aligned(&table)),
                table: Some(table),
            },
            Err(error) => Self {
                success: false,
                distribution,
                members,
                error: Some(error),
                table: None,
                tabular: None,
                plot: None,
                rank_aligned: None,
            },
        }
    }
}

/// Run the frequency analysis pipeline.
pub fn run(args: FrequencyArgs) -> Result<()> {
    let _cmd = info_span!("frequency").entered();
    // 1. Load project TOML
    let mut config = input::load_config(&args.config)?;
    if let Some(d) = args.distribution {
        config.frequency.distribution = d;
    }
    let (distribution, options) = convert::build_fit_options(&config.frequency)?;

    // 2. Read series
    let Inputs { observed, modelled } = input::read_inputs(&config)?;

    // 3. Fit
    info!(%distribution, "fitting");
    let outcome = frequency_analysis(distribution, observed.as_ref(), &modelled, &options).map_err(|e| e.to_string());
    if let Err(ref e) = outcome {
        warn!(%distribution, error = %e, "no frequency table produced");
    }

    // 4. Write result
    let report = FrequencyReport::from_outcome(distribution, modelled.len(), outcome);
    input::write_json(args.output.as_deref(), &report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nimbus_fit::EnsembleBand;

    #[test]
    fn failure_report_has_no_table() {
        let report = FrequencyReport::from_outcome(Distribution::Gev, 3, Err("observed: too short".to_string()));
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["distribution"], "gev");
        assert_eq!(json["error"], "observed: too short");
        assert_eq!(json["members"], 3);
        let mut keys: Vec<&str> = json.as_object().unwrap().keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(keys, ["distribution", "error", "members", "success"]);
    }

    #[test]
    fn success_report_carries_views() {
        let band = EnsembleBand {
            median: 12.0,
            lower: None,
            upper: None,
        };
        let table = FrequencyTable::merge(Distribution::Gumbel, &[(2.0, 10.0)], &[(2.0, band)]);
        let report = FrequencyReport::from_outcome(Distribution::Gumbel, 1, Ok(table));
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["success"], true);
        assert!(json.get("error").is_none());
        assert_eq!(json["table"]["rows"][0]["observed"], 10.0);
        assert_eq!(json["tabular"]["rows"][0][2], 12.0);
        assert_eq!(json["plot"].as_array().unwrap().len(), 2);
        assert_eq!(json["rank_aligned"][0]["modelled_median"], 12.0);
    }
}
