//! # nimbus-fit
//!
//! Frequency analysis of extreme precipitation: four interchangeable fits
//! that turn annual maxima (or wet days) into return levels, with the
//! ensemble members summarised as a median and a percentile band.
//!
//! ## Architecture
//!
//! ```mermaid
//! graph LR
//!     A["DailySeries (obs + members)"] -->|"frequency_analysis()"| B{"Distribution"}
//!     B -->|Empirical| C["fit_empirical(AMS)"]
//!     B -->|Gev| D["fit_gev(AMS)"]
//!     B -->|Gumbel| E["fit_gumbel(AMS)"]
//!     B -->|Stretched| F["fit_stretched(daily)"]
//!     C --> G["FrequencyTable"]
//!     D --> G
//!     E --> G
//!     F --> G
//!     G -->|"TabularView / plot_series / rank_aligned"| H["Presentation"]
//! ```
//!
//! Every fit runs the observed series and each member through the same
//! code path. A failure in any series fails the whole analysis with a
//! [`FitFailure`]; partial tables are never returned.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `analysis` | Dispatch from [`Distribution`] to a fitter |
//! | `empirical` | Ranked AMS with `N / rank` return periods |
//! | `gev` | GEV by L-moments with the Gumbel limit near zero shape |
//! | `gumbel` | Gumbel by frequency factors |
//! | `stretched` | Stretched exponential on wet-day exceedances |
//! | `ensemble` | Median and percentile band across members |
//! | `table` | The merged frequency table |
//! | `present` | Tabular and plot views of a table |

mod analysis;
mod common;
mod empirical;
mod ensemble;
mod error;
mod gev;
mod gumbel;
mod options;
mod present;
mod stretched;
mod table;

pub use analysis::frequency_analysis;
pub use common::{STANDARD_RETURN_PERIODS, series_label};
pub use empirical::{EMPIRICAL_MIN_YEARS, empirical_points, fit_empirical};
pub use ensemble::{EnsembleBand, summarize_members};
pub use error::{FitFailure, SampleError};
pub use gev::{
    EXTENDED_MIN_YEARS, EXTENDED_RETURN_PERIODS, GUMBEL_LIMIT_BAND, GevCurve, GevParams, fit_gev,
    gev_return_periods, gev_shape,
};
pub use gumbel::{
    EULER_GAMMA, GUMBEL_FREQUENCY_FACTORS, GUMBEL_SCALE_PER_SD, GumbelParams, PARAMETRIC_MIN_YEARS,
    fit_gumbel, gumbel_return_levels,
};
pub use options::{Distribution, FitOptions};
pub use present::{AlignedRow, PlotSeries, TABLE_HEADER, TabularView, plot_series, rank_aligned};
pub use stretched::{DAYS_PER_YEAR, MIN_EXCEEDANCES, StretchedParams, fit_stretched};
pub use table::{FrequencyRow, FrequencyTable};
