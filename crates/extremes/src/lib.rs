//! # nimbus-extremes
//!
//! Turn a filtered daily series into extreme-value samples: per-year running
//! sums, the Annual Maximum Series (AMS) with empirical return periods, and
//! the wet-day sample used by exceedance-based fits.
//!
//! ## Architecture
//!
//! ```mermaid
//! graph LR
//!     A["DailySeries"] -->|"running_sums(w)"| B["RunningSums"]
//!     A -->|"extract_ams(1)"| C["AnnualMaxima"]
//!     B -->|"AnnualMaxima::from_running_sums()"| C
//!     C -->|".ranked()"| D["RankedValue (N / rank)"]
//!     A -->|"wet_day_values()"| E["WetDays"]
//! ```
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `running` | Per-year moving sums |
//! | `ams` | Annual maxima, ranking and return periods |
//! | `wet` | Wet-day sample and wet-day fraction |

mod ams;
mod running;
mod wet;

pub use ams::{AnnualMaxima, RankedValue, extract_ams, extract_ensemble_ams};
pub use running::{RunningSums, running_sums};
pub use wet::{WetDays, wet_day_values};
