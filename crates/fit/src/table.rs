//! The frequency table handed to presentation.

use serde::Serialize;

use crate::ensemble::EnsembleBand;
use crate::options::Distribution;

/// Relative tolerance under which two return periods name the same row.
const RETURN_PERIOD_MATCH: f64 = 1e-9;

/// One return period with its observed and modelled values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FrequencyRow {
    /// Return period in years.
    pub return_period: f64,
    /// Observed return level.
    pub observed: Option<f64>,
    /// Ensemble median return level.
    pub modelled_median: Option<f64>,
    /// Lower ensemble bound.
    pub modelled_lower: Option<f64>,
    /// Upper ensemble bound.
    pub modelled_upper: Option<f64>,
}

impl FrequencyRow {
    fn empty(return_period: f64) -> Self {
        Self {
            return_period,
            observed: None,
            modelled_median: None,
            modelled_lower: None,
            modelled_upper: None,
        }
    }
}

/// Result of one frequency analysis: rows ordered by descending return
/// period, one row per distinct return period.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrequencyTable {
    distribution: Distribution,
    rows: Vec<FrequencyRow>,
}

impl FrequencyTable {
    /// Merges an observed column and a modelled column into one table.
    ///
    /// Points at the same return period share a row, so an observed-only and
    /// a modelled-only point never produce two rows for one period.
    pub fn merge(
        distribution: Distribution,
        observed: &[(f64, f64)],
        modelled: &[(f64, EnsembleBand)],
    ) -> Self {
        let mut rows: Vec<FrequencyRow> = Vec::with_capacity(observed.len().max(modelled.len()));

        for &(rp, value) in observed {
            row_for(&mut rows, rp).observed = Some(value);
        }
        for &(rp, band) in modelled {
            let row = row_for(&mut rows, rp);
            row.modelled_median = Some(band.median);
            row.modelled_lower = band.lower;
            row.modelled_upper = band.upper;
        }

        rows.sort_by(|a, b| b.return_period.total_cmp(&a.return_period));
        Self { distribution, rows }
    }

    /// The distribution that produced the table.
    pub fn distribution(&self) -> Distribution {
        self.distribution
    }

    /// Rows by descending return period.
    pub fn rows(&self) -> &[FrequencyRow] {
        &self.rows
    }

    /// Number of distinct return periods.
    pub fn return_period_count(&self) -> usize {
        self.rows.len()
    }

    /// The row at return period `rp`, if any.
    pub fn row(&self, rp: f64) -> Option<&FrequencyRow> {
        self.rows.iter().find(|r| same_period(r.return_period, rp))
    }

    /// `(return period, observed)` for rows with an observed value.
    pub fn observed_points(&self) -> Vec<(f64, f64)> {
        self.rows
            .iter()
            .filter_map(|r| r.observed.map(|v| (r.return_period, v)))
            .collect()
    }

    /// Rows that carry a modelled median.
    pub fn modelled_rows(&self) -> Vec<FrequencyRow> {
        self.rows
            .iter()
            .filter(|r| r.modelled_median.is_some())
            .copied()
            .collect()
    }
}

fn same_period(a: f64, b: f64) -> bool {
    (a - b).abs() <= RETURN_PERIOD_MATCH * a.abs().max(b.abs()).max(1.0)
}

fn row_for(rows: &mut Vec<FrequencyRow>, rp: f64) -> &mut FrequencyRow {
    match rows.iter().position(|r| same_period(r.return_period, rp)) {
        Some(i) => &mut rows[i],
        None => {
            rows.push(FrequencyRow::empty(rp));
            rows.last_mut().expect("row was just pushed")
        }
    }
}
