//! # nimbus-idf
//!
//! Intensity-duration-frequency tables from annual maxima of several
//! running-sum windows.
//!
//! ## Architecture
//!
//! ```mermaid
//! graph LR
//!     A["DailySeries"] -->|"ams_by_window()"| B["window -> AnnualMaxima"]
//!     B -->|"scale_idf(Intensity)"| C["moment scaling exponent + 1-day Gumbel"]
//!     B -->|"scale_idf(Power / Linear)"| D["per-window Gumbel regressed on duration"]
//!     C --> E["IdfTable"]
//!     D --> E
//!     E -->|"IdfBand::summarize()"| F["median / lower / upper"]
//! ```
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `scaling` | The three scaling methods |
//! | `table` | Return-period by duration tables and ensemble bands |
//! | `analysis` | Observed plus ensemble analysis |
//! | `config` | Windows, durations and return periods |

mod analysis;
mod config;
mod error;
mod method;
mod scaling;
mod table;

pub use analysis::{IdfResult, ams_by_window, idf_analysis};
pub use config::{DEFAULT_DURATIONS, DEFAULT_WINDOWS, IdfConfig};
pub use error::IdfError;
pub use method::IdfMethod;
pub use scaling::{DAILY_LOCATION_FACTOR, DAILY_SCALE_FACTOR, HOURS_PER_DAY, MIN_WINDOWS, MOMENT_ORDERS, scale_idf};
pub use table::{IdfBand, IdfTable};
