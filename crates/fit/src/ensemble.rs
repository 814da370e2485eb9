//! Ensemble median and percentile band.

use nimbus_stats::percentile;
use serde::Serialize;

/// Median of the ensemble members and, for more than one member, the band
/// between the lower and upper percentiles.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EnsembleBand {
    /// `percentile(values, 50)`.
    pub median: f64,
    /// `percentile(values, percentile_wanted / 2)`.
    pub lower: Option<f64>,
    /// `percentile(values, 100 - percentile_wanted / 2)`.
    pub upper: Option<f64>,
}

/// Summarises one value per member. Returns `None` when there are no values.
pub fn summarize_members(values: &[f64], percentile_wanted: f64) -> Option<EnsembleBand> {
    let median = percentile(values, 50.0)?;
    let (lower, upper) = if values.len() > 1 {
        (
            percentile(values, percentile_wanted / 2.0),
            percentile(values, 100.0 - percentile_wanted / 2.0),
        )
    } else {
        (None, None)
    };
    Some(EnsembleBand { median, lower, upper })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn three_members_percentile_ten() {
        let band = summarize_members(&[30.0, 10.0, 20.0], 10.0).unwrap();
        assert_relative_eq!(band.median, 20.0, epsilon = 1e-12);
        assert_relative_eq!(band.lower.unwrap(), percentile(&[10.0, 20.0, 30.0], 5.0).unwrap());
        assert_relative_eq!(band.upper.unwrap(), percentile(&[10.0, 20.0, 30.0], 95.0).unwrap());
        assert_relative_eq!(band.lower.unwrap(), 11.0, epsilon = 1e-12);
        assert_relative_eq!(band.upper.unwrap(), 29.0, epsilon = 1e-12);
    }

    #[test]
    fn single_member_has_no_band() {
        let band = summarize_members(&[42.0], 90.0).unwrap();
        assert_eq!(band.median, 42.0);
        assert!(band.lower.is_none());
        assert!(band.upper.is_none());
    }

    #[test]
    fn empty_is_none() {
        assert!(summarize_members(&[], 90.0).is_none());
    }
}
