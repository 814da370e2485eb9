//! # nimbus-calendar
//!
//! Date arithmetic for daily climate series: mapping a step index on a
//! daily time grid back to a calendar date, month and meteorological season,
//! under either the Gregorian calendar or the 365-day (no-leap) convention.
//!
//! ## Architecture
//!
//! ```mermaid
//! graph LR
//!     A["epoch + YearLength"] -->|"TimeGrid::new()"| B["TimeGrid"]
//!     B -->|".date_at(step)"| C["NaiveDate"]
//!     C -->|"Season::from_month()"| D["Season"]
//!     C -->|"PeriodFilter::matches()"| E["keep / drop"]
//!     C -->|"next_day()"| C
//! ```
//!
//! ## Quick Start
//!
//! ```ignore
//! use chrono::NaiveDate;
//! use nimbus_calendar::{PeriodFilter, Season, TimeGrid, YearLength};
//!
//! let epoch = NaiveDate::from_ymd_opt(1961, 1, 1).unwrap();
//! let grid = TimeGrid::new(epoch, YearLength::Calendar).unwrap();
//! let date = grid.date_at(59); // 1961-03-01
//! assert_eq!(grid.season_at(59), Season::Spring);
//!
//! let summer: PeriodFilter = "summer".parse().unwrap();
//! assert!(!summer.matches(date));
//! ```
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `grid` | Year-length convention and step/date conversion |
//! | `season` | Meteorological seasons |
//! | `period` | Month / season / annual day filters |
//! | `sequence` | Day stepping and date sequence generation |
//! | `error` | Error types |

mod error;
mod grid;
mod period;
mod season;
mod sequence;

pub use error::CalendarError;
pub use grid::{TimeGrid, YearLength, days_between};
pub use period::PeriodFilter;
pub use season::Season;
pub use sequence::{date_sequence, next_day};
