//! Return-period by duration intensity tables.

use nimbus_fit::{EnsembleBand, summarize_members};
use serde::Serialize;

/// Intensities (depth per hour) indexed by return period and duration.
///
/// `intensities[i][j]` belongs to `return_periods[i]` and `durations[j]`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IdfTable {
    return_periods: Vec<f64>,
    durations: Vec<f64>,
    intensities: Vec<Vec<f64>>,
}

impl IdfTable {
    /// Builds a table by evaluating `intensity(rp, duration)` on the grid.
    pub(crate) fn tabulate(
        return_periods: &[f64],
        durations: &[f64],
        mut intensity: impl FnMut(f64, f64) -> f64,
    ) -> Self {
        let intensities = return_periods
            .iter()
            .map(|&t| durations.iter().map(|&h| intensity(t, h)).collect())
            .collect();
        Self {
            return_periods: return_periods.to_vec(),
            durations: durations.to_vec(),
            intensities,
        }
    }

    /// Return periods, in years.
    pub fn return_periods(&self) -> &[f64] {
        &self.return_periods
    }

    /// Durations, in hours.
    pub fn durations(&self) -> &[f64] {
        &self.durations
    }

    /// Row of intensities for return period `rp`, one per duration.
    pub fn row(&self, rp: f64) -> Option<&[f64]> {
        let i = self.return_periods.iter().position(|&t| t == rp)?;
        Some(&self.intensities[i])
    }

    /// Intensity at return period `rp` and duration `hours`.
    pub fn intensity(&self, rp: f64, hours: f64) -> Option<f64> {
        let j = self.durations.iter().position(|&h| h == hours)?;
        self.row(rp).map(|row| row[j])
    }

    /// Iterates over `(return period, duration, intensity)` cells.
    pub fn cells(&self) -> impl Iterator<Item = (f64, f64, f64)> + '_ {
        self.return_periods.iter().zip(&self.intensities).flat_map(|(&t, row)| {
            self.durations.iter().zip(row).map(move |(&h, &v)| (t, h, v))
        })
    }

    /// Returns `true` when every intensity is finite.
    pub fn is_finite(&self) -> bool {
        self.intensities.iter().flatten().all(|v| v.is_finite())
    }
}

/// Cell-wise ensemble summary of several tables on the same grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IdfBand {
    /// Median across members.
    pub median: IdfTable,
    /// Lower percentile, with more than one member.
    pub lower: Option<IdfTable>,
    /// Upper percentile, with more than one member.
    pub upper: Option<IdfTable>,
}

impl IdfBand {
    /// Summarises member tables cell by cell. Returns `None` for no members.
    ///
    /// All tables must share the first table's grid.
    pub fn summarize(members: &[IdfTable], percentile_wanted: f64) -> Option<Self> {
        let first = members.first()?;
        let bands: Vec<Vec<EnsembleBand>> = (0..first.return_periods.len())
            .map(|i| {
                (0..first.durations.len())
                    .filter_map(|j| {
                        let cell: Vec<f64> = members.iter().map(|m| m.intensities[i][j]).collect();
                        summarize_members(&cell, percentile_wanted)
                    })
                    .collect()
            })
            .collect();

        let grid = |pick: fn(&EnsembleBand) -> Option<f64>| -> Option<IdfTable> {
            let intensities = bands
                .iter()
                .map(|row| row.iter().map(pick).collect::<Option<Vec<f64>>>())
                .collect::<Option<Vec<_>>>()?;
            Some(IdfTable {
                return_periods: first.return_periods.clone(),
                durations: first.durations.clone(),
                intensities,
            })
        };

        Some(Self {
            median: grid(|b| Some(b.median))?,
            lower: grid(|b| b.lower),
            upper: grid(|b| b.upper),
        })
    }
}
