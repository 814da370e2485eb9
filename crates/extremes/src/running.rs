//! Per-year moving sums.

use std::collections::BTreeMap;

use chrono::Datelike;
use nimbus_io::DailySeries;

/// `w`-day moving sums of a series, kept separately for each calendar year.
///
/// A window never spans two years. Windows that contain a missing day are
/// `None`. A year with fewer than `w` retained days has an empty sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct RunningSums {
    window: usize,
    years: BTreeMap<i32, Vec<Option<f64>>>,
}

impl RunningSums {
    /// Window length in days.
    pub fn window(&self) -> usize {
        self.window
    }

    /// Number of years seen in the series.
    pub fn n_years(&self) -> usize {
        self.years.len()
    }

    /// The moving sums of `year`.
    pub fn year(&self, year: i32) -> Option<&[Option<f64>]> {
        self.years.get(&year).map(Vec::as_slice)
    }

    /// Iterates over `(year, sums)` in chronological order.
    pub fn iter(&self) -> impl Iterator<Item = (i32, &[Option<f64>])> + '_ {
        self.years.iter().map(|(&y, sums)| (y, sums.as_slice()))
    }
}

/// Computes `window`-day moving sums within each calendar year of `series`.
///
/// Consecutive retained days form the window, so with a period filter the
/// sums run over the filtered view. A `window` of 0 is treated as 1.
pub fn running_sums(series: &DailySeries, window: usize) -> RunningSums {
    let window = window.max(1);

    let mut by_year: BTreeMap<i32, Vec<Option<f64>>> = BTreeMap::new();
    for (date, value) in series.iter() {
        by_year.entry(date.year()).or_default().push(value);
    }

    let years = by_year
        .into_iter()
        .map(|(year, days)| {
            let sums = days
                .windows(window)
                .map(|w| w.iter().copied().sum::<Option<f64>>())
                .collect();
            (year, sums)
        })
        .collect();

    RunningSums { window, years }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn series(start: NaiveDate, values: &[Option<f64>]) -> DailySeries {
        let dates = start.iter_days().take(values.len()).collect();
        DailySeries::new(dates, values.to_vec()).unwrap()
    }

    #[test]
    fn three_day_sums() {
        let start = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
        let s = series(start, &[Some(1.0), Some(2.0), Some(3.0), Some(4.0)]);
        let sums = running_sums(&s, 3);
        assert_eq!(sums.window(), 3);
        assert_eq!(sums.year(2000).unwrap(), &[Some(6.0), Some(9.0)]);
    }

    #[test]
    fn missing_day_poisons_its_windows() {
        let start = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
        let s = series(start, &[Some(1.0), None, Some(3.0), Some(4.0), Some(5.0)]);
        let sums = running_sums(&s, 2);
        assert_eq!(sums.year(2000).unwrap(), &[None, None, Some(7.0), Some(9.0)]);
    }

    #[test]
    fn windows_do_not_cross_years() {
        let start = NaiveDate::from_ymd_opt(1999, 12, 30).unwrap();
        let s = series(start, &[Some(1.0), Some(2.0), Some(10.0), Some(20.0)]);
        let sums = running_sums(&s, 2);
        assert_eq!(sums.n_years(), 2);
        assert_eq!(sums.year(1999).unwrap(), &[Some(3.0)]);
        assert_eq!(sums.year(2000).unwrap(), &[Some(30.0)]);
    }

    #[test]
    fn short_year_has_no_windows() {
        let start = NaiveDate::from_ymd_opt(1999, 12, 31).unwrap();
        let s = series(start, &[Some(1.0), Some(2.0), Some(3.0)]);
        let sums = running_sums(&s, 2);
        assert_eq!(sums.year(1999).unwrap(), &[] as &[Option<f64>]);
        assert_eq!(sums.year(2000).unwrap(), &[Some(5.0)]);
    }

    #[test]
    fn zero_window_is_daily() {
        let start = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
        let s = series(start, &[Some(1.0), Some(2.0)]);
        let sums = running_sums(&s, 0);
        assert_eq!(sums.window(), 1);
        assert_eq!(sums.year(2000).unwrap(), &[Some(1.0), Some(2.0)]);
    }
}
