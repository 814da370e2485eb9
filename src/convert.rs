//! Pure conversion functions: TOML config structs -> crate API config types.

use std::str::FromStr;

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;

use crate::config::*;

use nimbus_calendar::{PeriodFilter, YearLength};
use nimbus_fit::{Distribution, FitOptions};
use nimbus_idf::{IdfConfig, IdfMethod};
use nimbus_io::{EnsembleLayout, ReaderConfig};

/// Parses a `YYYY-MM-DD` date; `field` names the setting in errors.
pub fn parse_date(field: &str, s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .with_context(|| format!("invalid {field} date {s:?}, expected YYYY-MM-DD"))
}

/// Parses a year-length name into the corresponding enum variant.
pub fn parse_year_length(s: &str) -> Result<YearLength> {
    match s.to_lowercase().as_str() {
        "calendar" | "gregorian" | "366" => Ok(YearLength::Calendar),
        "noleap" | "365" | "365_day" => Ok(YearLength::NoLeap),
        other => bail!("unknown year length: {other:?}"),
    }
}

/// Parses a data period (`annual`, a month or a season).
pub fn parse_period(s: &str) -> Result<PeriodFilter> {
    PeriodFilter::from_str(s).with_context(|| format!("unknown period: {s:?}"))
}

/// Parses a distribution name into the corresponding enum variant.
pub fn parse_distribution(s: &str) -> Result<Distribution> {
    Distribution::from_str(s).map_err(anyhow::Error::from)
}

/// Parses an IDF method name into the corresponding enum variant.
pub fn parse_idf_method(s: &str) -> Result<IdfMethod> {
    IdfMethod::from_str(s).map_err(anyhow::Error::from)
}

/// Builds the shared part of a [`ReaderConfig`] from the TOML settings and
/// series ranges.
fn base_reader_config(settings: &SettingsToml, series: &SeriesToml) -> Result<ReaderConfig> {
    let epoch = parse_date("epoch", &settings.epoch)?;
    let start = parse_date("start", &series.start)?;
    let end = parse_date("end", &series.end)?;
    if end < start {
        bail!("[series] end {end} precedes start {start}");
    }
    let cfg = ReaderConfig::new(epoch, start, end)
        .with_year_length(parse_year_length(&settings.year_length)?)
        .with_missing_code(settings.missing_code)
        .with_threshold(settings.threshold)
        .with_apply_threshold(settings.apply_threshold)
        .with_period(parse_period(&series.period)?);
    cfg.validate().context("invalid reader settings")?;
    Ok(cfg)
}

/// Builds the [`ReaderConfig`] for the observed file.
pub fn build_observed_reader(settings: &SettingsToml, series: &SeriesToml) -> Result<ReaderConfig> {
    base_reader_config(settings, series)
}

/// Builds the [`ReaderConfig`] for the modelled file.
///
/// More than one member selects the fixed-width ensemble layout.
pub fn build_modelled_reader(settings: &SettingsToml, series: &SeriesToml) -> Result<ReaderConfig> {
    if series.members == 0 {
        bail!("[series].members must be >= 1");
    }
    let mut cfg = base_reader_config(settings, series)?;
    if series.members > 1 {
        cfg = cfg.with_ensemble(EnsembleLayout::new(series.members).with_width(series.width));
        cfg.validate().context("invalid ensemble layout")?;
    }
    Ok(cfg)
}

/// Builds [`FitOptions`] and the chosen [`Distribution`] from the TOML
/// frequency configuration.
pub fn build_fit_options(freq: &FrequencyToml) -> Result<(Distribution, FitOptions)> {
    let distribution = parse_distribution(&freq.distribution)?;
    let options = FitOptions::new()
        .with_percentile_wanted(freq.percentile_wanted)
        .with_year_tolerance(freq.year_tolerance)
        .with_wet_threshold(freq.wet_threshold)
        .with_fit_threshold(freq.fit_threshold)
        .with_extended_return_periods(freq.extended_return_periods)
        .with_window(freq.window);
    options.validate()?;
    Ok((distribution, options))
}

/// Builds an [`IdfConfig`] from the TOML IDF configuration.
pub fn build_idf_config(idf: &IdfToml) -> Result<IdfConfig> {
    let mut cfg = IdfConfig::new()
        .with_method(parse_idf_method(&idf.method)?)
        .with_percentile_wanted(idf.percentile_wanted);
    if let Some(ref windows) = idf.windows {
        cfg = cfg.with_windows(windows.clone());
    }
    if let Some(ref durations) = idf.durations {
        cfg = cfg.with_durations(durations.clone());
    }
    if let Some(ref rps) = idf.return_periods {
        cfg = cfg.with_return_periods(rps.clone());
    }
    cfg.validate()?;
    Ok(cfg)
}
