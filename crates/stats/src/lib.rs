//! Statistical primitives for extreme-value analysis.
//!
//! Everything here is a pure function over `&[f64]` samples that already
//! exclude missing values. Functions that cannot produce a meaningful result
//! (empty input, undefined order, zero variance) return `None` rather than a
//! placeholder number.

mod descriptive;
mod gamma;
mod moments;
mod percentile;
mod regression;
mod return_period;

pub use descriptive::{mean, sd, skewness, variance};
pub use gamma::gamma_approx;
pub use moments::{binomial, l_moment, probability_weighted_moment};
pub use percentile::percentile;
pub use regression::{LinearFit, linear_regression, slope_through_origin};
pub use return_period::{UNIT_RETURN_PERIOD_SUBSTITUTE, effective_return_period, reduced_variate};
