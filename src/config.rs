use std::path::PathBuf;

use serde::Deserialize;

/// Top-level Nimbus configuration.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NimbusConfig {
    /// File conventions shared by every series.
    #[serde(default)]
    pub settings: SettingsToml,

    /// Which files and which days to analyse.
    pub series: SeriesToml,

    /// Frequency analysis settings.
    #[serde(default)]
    pub frequency: FrequencyToml,

    /// IDF settings.
    #[serde(default)]
    pub idf: IdfToml,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SettingsToml {
    /// Date of the first line of every series file (`YYYY-MM-DD`).
    #[serde(default = "default_epoch")]
    pub epoch: String,
    #[serde(default = "default_missing_code")]
    pub missing_code: f64,
    #[serde(default)]
    pub threshold: f64,
    #[serde(default)]
    pub apply_threshold: bool,
    #[serde(default = "default_year_length")]
    pub year_length: String,
}

impl Default for SettingsToml {
    fn default() -> Self {
        Self {
            epoch: default_epoch(),
            missing_code: default_missing_code(),
            threshold: 0.0,
            apply_threshold: false,
            year_length: default_year_length(),
        }
    }
}

fn default_epoch() -> String {
    "1961-01-01".to_string()
}
fn default_missing_code() -> f64 {
    -999.0
}
fn default_year_length() -> String {
    "calendar".to_string()
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeriesToml {
    pub observed: Option<PathBuf>,
    pub modelled: Option<PathBuf>,
    #[serde(default = "default_members")]
    pub members: usize,
    #[serde(default = "default_width")]
    pub width: usize,
    pub start: String,
    pub end: String,
    #[serde(default = "default_period")]
    pub period: String,
}

fn default_members() -> usize {
    1
}
fn default_width() -> usize {
    14
}
fn default_period() -> String {
    "annual".to_string()
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FrequencyToml {
    #[serde(default = "default_distribution")]
    pub distribution: String,
    #[serde(default = "default_percentile_wanted")]
    pub percentile_wanted: f64,
    #[serde(default)]
    pub year_tolerance: Option<usize>,
    #[serde(default = "default_wet_threshold")]
    pub wet_threshold: f64,
    #[serde(default)]
    pub fit_threshold: f64,
    #[serde(default = "default_true")]
    pub extended_return_periods: bool,
    #[serde(default = "default_window")]
    pub window: usize,
}

impl Default for FrequencyToml {
    fn default() -> Self {
        Self {
            distribution: default_distribution(),
            percentile_wanted: default_percentile_wanted(),
            year_tolerance: None,
            wet_threshold: default_wet_threshold(),
            fit_threshold: 0.0,
            extended_return_periods: true,
            window: default_window(),
        }
    }
}

fn default_distribution() -> String {
    "gev".to_string()
}
fn default_percentile_wanted() -> f64 {
    90.0
}
fn default_wet_threshold() -> f64 {
    0.3
}
fn default_true() -> bool {
    true
}
fn default_window() -> usize {
    1
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IdfToml {
    #[serde(default = "default_idf_method")]
    pub method: String,
    #[serde(default)]
    pub windows: Option<Vec<usize>>,
    #[serde(default)]
    pub durations: Option<Vec<f64>>,
    #[serde(default)]
    pub return_periods: Option<Vec<f64>>,
    #[serde(default = "default_percentile_wanted")]
    pub percentile_wanted: f64,
}

impl Default for IdfToml {
    fn default() -> Self {
        Self {
            method: default_idf_method(),
            windows: None,
            durations: None,
            return_periods: None,
            percentile_wanted: default_percentile_wanted(),
        }
    }
}

fn default_idf_method() -> String {
    "intensity".to_string()
}
