//! Views of a [`FrequencyTable`] for tabular display and plotting.

use serde::Serialize;

use crate::table::{FrequencyRow, FrequencyTable};

/// Column headers of [`TabularView`].
pub const TABLE_HEADER: [&str; 5] = [
    "Return period",
    "Observed",
    "Modelled median",
    "Modelled lower",
    "Modelled upper",
];

/// Row-major table: a header and one cell per column, `None` where empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TabularView {
    /// Column names.
    pub header: Vec<String>,
    /// Cells, row-major.
    pub rows: Vec<Vec<Option<f64>>>,
}

impl From<&FrequencyTable> for TabularView {
    fn from(table: &FrequencyTable) -> Self {
        Self {
            header: TABLE_HEADER.iter().map(|h| h.to_string()).collect(),
            rows: table
                .rows()
                .iter()
                .map(|r| {
                    vec![
                        Some(r.return_period),
                        r.observed,
                        r.modelled_median,
                        r.modelled_lower,
                        r.modelled_upper,
                    ]
                })
                .collect(),
        }
    }
}

/// One named line for the plotting collaborator.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlotSeries {
    /// `observed`, `median`, `lower` or `upper`.
    pub name: String,
    /// `(return period, value)` by ascending return period.
    pub points: Vec<(f64, f64)>,
}

/// Splits the table into up to four plot lines; empty columns are left out.
pub fn plot_series(table: &FrequencyTable) -> Vec<PlotSeries> {
    let columns: [(&str, fn(&FrequencyRow) -> Option<f64>); 4] = [
        ("observed", |r| r.observed),
        ("median", |r| r.modelled_median),
        ("lower", |r| r.modelled_lower),
        ("upper", |r| r.modelled_upper),
    ];
    columns
        .iter()
        .filter_map(|(name, column)| {
            let points: Vec<(f64, f64)> = table
                .rows()
                .iter()
                .rev()
                .filter_map(|r| column(r).map(|v| (r.return_period, v)))
                .collect();
            (!points.is_empty()).then(|| PlotSeries {
                name: name.to_string(),
                points,
            })
        })
        .collect()
}

/// One line of the side-by-side layout.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AlignedRow {
    /// Return period of the observed entry.
    pub observed_return_period: Option<f64>,
    /// Observed value.
    pub observed: Option<f64>,
    /// Return period of the modelled entry.
    pub modelled_return_period: Option<f64>,
    /// Modelled median.
    pub modelled_median: Option<f64>,
    /// Lower ensemble bound.
    pub modelled_lower: Option<f64>,
    /// Upper ensemble bound.
    pub modelled_upper: Option<f64>,
}

/// Lays observed and modelled entries side by side by rank.
///
/// The shorter column is padded by repeating its last entry so both have
/// the same length; a column with no entries at all stays empty.
pub fn rank_aligned(table: &FrequencyTable) -> Vec<AlignedRow> {
    let observed = table.observed_points();
    let modelled = table.modelled_rows();
    let n = observed.len().max(modelled.len());

    (0..n)
        .map(|i| {
            let obs = observed.get(i).or(observed.last());
            let model = modelled.get(i).or(modelled.last());
            AlignedRow {
                observed_return_period: obs.map(|&(rp, _)| rp),
                observed: obs.map(|&(_, v)| v),
                modelled_return_period: model.map(|r| r.return_period),
                modelled_median: model.and_then(|r| r.modelled_median),
                modelled_lower: model.and_then(|r| r.modelled_lower),
                modelled_upper: model.and_then(|r| r.modelled_upper),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ensemble::EnsembleBand;
    use crate::options::Distribution;

    fn band(median: f64) -> EnsembleBand {
        EnsembleBand {
            median,
            lower: Some(median - 1.0),
            upper: Some(median + 1.0),
        }
    }

    fn sample_table() -> FrequencyTable {
        FrequencyTable::merge(
            Distribution::Empirical,
            &[(3.0, 30.0), (1.5, 20.0), (1.0, 10.0)],
            &[(2.0, band(25.0)), (1.0, band(12.0))],
        )
    }

    #[test]
    fn tabular_view_is_row_major() {
        let view = TabularView::from(&sample_table());
        assert_eq!(view.header.len(), 5);
        assert_eq!(view.rows.len(), 4);
        assert_eq!(view.rows[0], vec![Some(3.0), Some(30.0), None, None, None]);
        assert_eq!(
            view.rows[3],
            vec![Some(1.0), Some(10.0), Some(12.0), Some(11.0), Some(13.0)]
        );
    }

    #[test]
    fn plot_series_ascending_and_named() {
        let series = plot_series(&sample_table());
        let names: Vec<&str> = series.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["observed", "median", "lower", "upper"]);
        assert_eq!(series[0].points, vec![(1.0, 10.0), (1.5, 20.0), (3.0, 30.0)]);
        assert_eq!(series[1].points, vec![(1.0, 12.0), (2.0, 25.0)]);
    }

    #[test]
    fn plot_series_skips_empty_columns() {
        let table = FrequencyTable::merge(Distribution::Gev, &[(2.0, 1.0)], &[]);
        let series = plot_series(&table);
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].name, "observed");
    }

    #[test]
    fn rank_aligned_pads_shorter_side_with_last_row() {
        let rows = rank_aligned(&sample_table());
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].observed, Some(30.0));
        assert_eq!(rows[0].modelled_median, Some(25.0));
        assert_eq!(rows[1].modelled_median, Some(12.0));
        // Padding repeats the last modelled row.
        assert_eq!(rows[2].observed, Some(10.0));
        assert_eq!(rows[2].modelled_return_period, Some(1.0));
        assert_eq!(rows[2].modelled_median, Some(12.0));
    }

    #[test]
    fn rank_aligned_with_empty_side() {
        let table = FrequencyTable::merge(Distribution::Gev, &[(2.0, 1.0), (5.0, 2.0)], &[]);
        let rows = rank_aligned(&table);
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r.modelled_median.is_none()));
    }

    #[test]
    fn views_serialize() {
        let json = serde_json::to_value(TabularView::from(&sample_table())).unwrap();
        assert_eq!(json["header"][0], "Return period");
        assert!(json["rows"][0][2].is_null());
    }
}
