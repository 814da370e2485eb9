//! Wet-day sample for exceedance-based fits.

use nimbus_io::DailySeries;

/// Values of the days above a wet-day threshold, with the count of valid days.
#[derive(Debug, Clone, PartialEq)]
pub struct WetDays {
    /// Wet-day values in date order.
    pub values: Vec<f64>,
    /// Number of valid (non-missing) days examined.
    pub n_valid: usize,
}

impl WetDays {
    /// Fraction of valid days that were wet, or `None` with no valid days.
    pub fn p_wet(&self) -> Option<f64> {
        (self.n_valid > 0).then(|| self.values.len() as f64 / self.n_valid as f64)
    }

    /// Wet-day values strictly above `threshold`.
    pub fn exceedances(&self, threshold: f64) -> Vec<f64> {
        self.values.iter().copied().filter(|&v| v > threshold).collect()
    }
}

/// Collects the valid days of `series` strictly above `wet_threshold`.
pub fn wet_day_values(series: &DailySeries, wet_threshold: f64) -> WetDays {
    let valid = series.valid_values();
    WetDays {
        n_valid: valid.len(),
        values: valid.into_iter().filter(|&v| v > wet_threshold).collect(),
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    #[test]
    fn wet_fraction_ignores_missing() {
        let start = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
        let values = vec![Some(0.0), Some(0.2), None, Some(1.0), Some(4.0)];
        let dates = start.iter_days().take(values.len()).collect();
        let s = DailySeries::new(dates, values).unwrap();

        let wet = wet_day_values(&s, 0.3);
        assert_eq!(wet.values, vec![1.0, 4.0]);
        assert_eq!(wet.n_valid, 4);
        assert_eq!(wet.p_wet(), Some(0.5));
        assert_eq!(wet.exceedances(2.0), vec![4.0]);
    }

    #[test]
    fn no_valid_days() {
        let wet = WetDays {
            values: vec![],
            n_valid: 0,
        };
        assert_eq!(wet.p_wet(), None);
    }
}
