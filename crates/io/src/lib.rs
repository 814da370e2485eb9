//! # nimbus-io
//!
//! Read daily climate series from plain-text files: one line per day from a
//! known epoch, either a single value or fixed-width fields for each member
//! of a model ensemble. Missing codes become `None` at this boundary; the
//! rest of the workspace never sees a sentinel.

mod error;
mod reader;
mod series;
mod validate;

pub use error::IoError;
pub use reader::{
    DEFAULT_ENSEMBLE_WIDTH, DEFAULT_MISSING_CODE, EnsembleLayout, ReaderConfig, SeriesData, read_series,
    read_series_from,
};
pub use series::{DailySeries, EnsembleSeries};
