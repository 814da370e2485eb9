//! Annual maxima, ranking and empirical return periods.

use chrono::Datelike;
use nimbus_io::{DailySeries, EnsembleSeries};
use tracing::debug;

use crate::running::{RunningSums, running_sums};

/// One AMS entry after ranking.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankedValue {
    /// Calendar year of the maximum.
    pub year: i32,
    /// The maximum.
    pub value: f64,
    /// 1-based descending rank.
    pub rank: usize,
    /// Empirical return period `N / rank` in years.
    pub return_period: f64,
}

/// Annual Maximum Series: one maximum per calendar year.
///
/// Entries are kept in chronological order. Years without a single valid
/// value are absent rather than zero-filled.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AnnualMaxima {
    entries: Vec<(i32, f64)>,
}

impl AnnualMaxima {
    /// Builds an AMS from `(year, maximum)` pairs, sorted by year.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (i32, f64)>) -> Self {
        let mut entries: Vec<(i32, f64)> = pairs.into_iter().collect();
        entries.sort_by_key(|&(year, _)| year);
        Self { entries }
    }

    /// Builds an AMS from maxima alone, numbering years from `first_year`.
    pub fn from_values(first_year: i32, values: &[f64]) -> Self {
        Self {
            entries: values.iter().enumerate().map(|(i, &v)| (first_year + i as i32, v)).collect(),
        }
    }

    /// Takes the per-year maximum of each year's valid moving sums.
    pub fn from_running_sums(sums: &RunningSums) -> Self {
        let mut entries = Vec::with_capacity(sums.n_years());
        for (year, values) in sums.iter() {
            match year_max(values) {
                Some(max) => entries.push((year, max)),
                None => debug!(year, window = sums.window(), "no valid data, year dropped"),
            }
        }
        Self { entries }
    }

    /// Number of years.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no year had valid data.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Years present, in chronological order.
    pub fn years(&self) -> Vec<i32> {
        self.entries.iter().map(|&(y, _)| y).collect()
    }

    /// Maxima, in chronological order.
    pub fn values(&self) -> Vec<f64> {
        self.entries.iter().map(|&(_, v)| v).collect()
    }

    /// Maximum of `year`, if present.
    pub fn get(&self, year: i32) -> Option<f64> {
        self.entries.iter().find(|&&(y, _)| y == year).map(|&(_, v)| v)
    }

    /// Iterates over `(year, maximum)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (i32, f64)> + '_ {
        self.entries.iter().copied()
    }

    /// Ranks the maxima in descending order.
    ///
    /// The sort is stable, so ties keep chronological order. The largest
    /// value gets rank 1 and return period `N`; the smallest gets rank `N`
    /// and return period 1.
    pub fn ranked(&self) -> Vec<RankedValue> {
        let mut sorted = self.entries.clone();
        sorted.sort_by(|a, b| b.1.total_cmp(&a.1));
        let n = sorted.len() as f64;
        sorted
            .into_iter()
            .enumerate()
            .map(|(i, (year, value))| RankedValue {
                year,
                value,
                rank: i + 1,
                return_period: n / (i + 1) as f64,
            })
            .collect()
    }
}

fn year_max(values: &[Option<f64>]) -> Option<f64> {
    values.iter().flatten().copied().fold(None, |acc: Option<f64>, v| {
        Some(acc.map_or(v, |m| m.max(v)))
    })
}

/// Extracts the Annual Maximum Series of `series`.
///
/// With `window <= 1` the daily values are used directly; otherwise the
/// maxima are taken over `window`-day moving sums within each year.
pub fn extract_ams(series: &DailySeries, window: usize) -> AnnualMaxima {
    let ams = if window <= 1 {
        let mut entries: Vec<(i32, f64)> = Vec::new();
        let mut current: Option<(i32, Option<f64>)> = None;
        for (date, value) in series.iter() {
            let year = date.year();
            match current {
                Some((y, max)) if y == year => {
                    current = Some((y, max_opt(max, value)));
                }
                _ => {
                    commit(&mut entries, current.take());
                    current = Some((year, value));
                }
            }
        }
        commit(&mut entries, current);
        AnnualMaxima { entries }
    } else {
        AnnualMaxima::from_running_sums(&running_sums(series, window))
    };
    debug!(window, years = ams.len(), "annual maxima extracted");
    ams
}

fn max_opt(a: Option<f64>, b: Option<f64>) -> Option<f64> {
    match (a, b) {
        (Some(x), Some(y)) => Some(x.max(y)),
        (x, None) => x,
        (None, y) => y,
    }
}

fn commit(entries: &mut Vec<(i32, f64)>, year_state: Option<(i32, Option<f64>)>) {
    match year_state {
        Some((year, Some(max))) => entries.push((year, max)),
        Some((year, None)) => debug!(year, "no valid data, year dropped"),
        None => {}
    }
}

/// Extracts one AMS per ensemble member.
pub fn extract_ensemble_ams(ensemble: &EnsembleSeries, window: usize) -> Vec<AnnualMaxima> {
    (0..ensemble.n_members())
        .filter_map(|m| ensemble.member(m))
        .map(|member| extract_ams(&member, window))
        .collect()
}
