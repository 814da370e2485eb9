//! Shared command plumbing: config loading, series reading, JSON output.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::Serialize;
use tracing::info;

use nimbus_io::{DailySeries, read_series};

use crate::config::NimbusConfig;
use crate::convert;

/// Observed series and ensemble members after reading and filtering.
pub struct Inputs {
    pub observed: Option<DailySeries>,
    pub modelled: Vec<DailySeries>,
}

/// Reads and parses the TOML configuration at `path`.
pub fn load_config(path: &Path) -> Result<NimbusConfig> {
    let toml_str = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file: {}", path.display()))?;
    toml::from_str(&toml_str).context("failed to parse TOML config")
}

/// Reads the observed and modelled files named in `[series]`.
pub fn read_inputs(config: &NimbusConfig) -> Result<Inputs> {
    let series = &config.series;
    if series.observed.is_none() && series.modelled.is_none() {
        bail!("no input series: set [series].observed and/or [series].modelled");
    }

    let observed = match &series.observed {
        Some(path) => {
            let cfg = convert::build_observed_reader(&config.settings, series)?;
            let data = read_series(path, &cfg)
                .with_context(|| format!("failed to read observed series: {}", path.display()))?;
            let daily = data.into_daily();
            info!(days = daily.len(), valid = daily.n_valid(), "observed series loaded");
            Some(daily)
        }
        None => None,
    };

    let modelled = match &series.modelled {
        Some(path) => {
            let cfg = convert::build_modelled_reader(&config.settings, series)?;
            let data = read_series(path, &cfg)
                .with_context(|| format!("failed to read modelled series: {}", path.display()))?;
            let members = data.into_ensemble().into_members();
            info!(members = members.len(), "modelled series loaded");
            members
        }
        None => Vec::new(),
    };

    Ok(Inputs { observed, modelled })
}

/// Writes `value` as pretty JSON to `output`, or to stdout.
pub fn write_json<T: Serialize>(output: Option<&Path>, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("failed to serialize result")?;
    match output {
        Some(path) => {
            std::fs::write(path, json + "\n")
                .with_context(|| format!("failed to write result: {}", path.display()))?;
            info!(path = %path.display(), "result written");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{json}").context("failed to write result to stdout")?;
        }
    }
    Ok(())
}
