//! Plain-text daily series reader configuration and orchestration.
//!
//! A series file holds one line per day starting at a known epoch date.
//! A line is either a single number or, for multi-member model output,
//! `members` fixed-width numeric fields concatenated without delimiters.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use chrono::NaiveDate;
use nimbus_calendar::{CalendarError, PeriodFilter, TimeGrid, YearLength};
use tracing::{debug, info, warn};

use crate::error::IoError;
use crate::series::{DailySeries, EnsembleSeries};
use crate::validate::ValidationCollector;

/// Numeric code that marks a missing day in series files.
pub const DEFAULT_MISSING_CODE: f64 = -999.0;

/// Character width of one member field in ensemble files.
pub const DEFAULT_ENSEMBLE_WIDTH: usize = 14;

// ---------------------------------------------------------------------------
// EnsembleLayout
// ---------------------------------------------------------------------------

/// Fixed-width layout of a multi-member line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnsembleLayout {
    members: usize,
    width: usize,
}

impl EnsembleLayout {
    /// `members` fields of [`DEFAULT_ENSEMBLE_WIDTH`] characters.
    pub fn new(members: usize) -> Self {
        Self {
            members,
            width: DEFAULT_ENSEMBLE_WIDTH,
        }
    }

    /// Set the field width in characters.
    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    /// Number of member fields per line.
    pub fn members(&self) -> usize {
        self.members
    }

    /// Width of each field in characters.
    pub fn width(&self) -> usize {
        self.width
    }
}

// ---------------------------------------------------------------------------
// ReaderConfig
// ---------------------------------------------------------------------------

/// Configuration for reading a daily series file.
///
/// The three dates are required; everything else has a default matching the
/// usual settings: missing code `-999`, no threshold, all days retained,
/// Gregorian calendar, single-column lines.
#[derive(Debug, Clone)]
pub struct ReaderConfig {
    /// Date of the first line in the file.
    epoch: NaiveDate,
    /// First day to read.
    start: NaiveDate,
    /// Last day to read (inclusive).
    end: NaiveDate,
    /// Leap-year convention of the file.
    year_length: YearLength,
    /// Value that marks a missing day.
    missing_code: f64,
    /// Whether values below `threshold` are treated as missing.
    apply_threshold: bool,
    /// Event threshold.
    threshold: f64,
    /// Which days are retained.
    period: PeriodFilter,
    /// Multi-member layout, or `None` for single-column lines.
    ensemble: Option<EnsembleLayout>,
}

impl ReaderConfig {
    /// Creates a configuration reading `start..=end` from a file whose first
    /// line is `epoch`.
    pub fn new(epoch: NaiveDate, start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            epoch,
            start,
            end,
            year_length: YearLength::Calendar,
            missing_code: DEFAULT_MISSING_CODE,
            apply_threshold: false,
            threshold: 0.0,
            period: PeriodFilter::Annual,
            ensemble: None,
        }
    }

    /// Set the leap-year convention.
    pub fn with_year_length(mut self, year_length: YearLength) -> Self {
        self.year_length = year_length;
        self
    }

    /// Set the missing-value code.
    pub fn with_missing_code(mut self, code: f64) -> Self {
        self.missing_code = code;
        self
    }

    /// Treat values below `threshold` as missing.
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.apply_threshold = true;
        self.threshold = threshold;
        self
    }

    /// Enable or disable the threshold without changing its value.
    pub fn with_apply_threshold(mut self, apply: bool) -> Self {
        self.apply_threshold = apply;
        self
    }

    /// Set the data-period filter.
    pub fn with_period(mut self, period: PeriodFilter) -> Self {
        self.period = period;
        self
    }

    /// Read fixed-width multi-member lines.
    pub fn with_ensemble(mut self, layout: EnsembleLayout) -> Self {
        self.ensemble = Some(layout);
        self
    }

    /// Date of the first line in the file.
    pub fn epoch(&self) -> NaiveDate {
        self.epoch
    }

    /// First day read.
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// Last day read.
    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Leap-year convention.
    pub fn year_length(&self) -> YearLength {
        self.year_length
    }

    /// Missing-value code.
    pub fn missing_code(&self) -> f64 {
        self.missing_code
    }

    /// The threshold, if enabled.
    pub fn threshold(&self) -> Option<f64> {
        self.apply_threshold.then_some(self.threshold)
    }

    /// Data-period filter.
    pub fn period(&self) -> PeriodFilter {
        self.period
    }

    /// Multi-member layout, if any.
    pub fn ensemble(&self) -> Option<EnsembleLayout> {
        self.ensemble
    }

    /// Validate that the configuration is internally consistent.
    ///
    /// Date-range problems are reported separately as
    /// [`IoError::DateRange`] when reading.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::Validation`] if the missing code or threshold is not
    /// finite, or an ensemble layout has zero members or zero width.
    pub fn validate(&self) -> Result<(), IoError> {
        let mut c = ValidationCollector::new();
        if !self.missing_code.is_finite() {
            c.push(format!("missing_code must be finite, got {}", self.missing_code));
        }
        if self.apply_threshold && !self.threshold.is_finite() {
            c.push(format!("threshold must be finite, got {}", self.threshold));
        }
        if let Some(layout) = self.ensemble {
            if layout.members == 0 {
                c.push("ensemble members must be >= 1");
            }
            if layout.width == 0 {
                c.push("ensemble width must be >= 1");
            }
        }
        c.finish()
    }

    /// Maps a parsed number to a day value: missing code or below-threshold
    /// values become `None`.
    fn classify(&self, value: f64) -> Option<f64> {
        if value == self.missing_code {
            return None;
        }
        if self.apply_threshold && value < self.threshold {
            return None;
        }
        Some(value)
    }
}

// ---------------------------------------------------------------------------
// SeriesData
// ---------------------------------------------------------------------------

/// Result of reading a series file.
#[derive(Debug, Clone, PartialEq)]
pub enum SeriesData {
    /// Single-column file.
    Daily(DailySeries),
    /// Fixed-width multi-member file.
    Ensemble(EnsembleSeries),
}

impl SeriesData {
    /// Number of members (1 for a single-column file).
    pub fn n_members(&self) -> usize {
        match self {
            Self::Daily(_) => 1,
            Self::Ensemble(e) => e.n_members(),
        }
    }

    /// Views the data as an ensemble; a single-column file becomes one member.
    pub fn into_ensemble(self) -> EnsembleSeries {
        match self {
            Self::Daily(s) => s.into(),
            Self::Ensemble(e) => e,
        }
    }

    /// Returns the single series, or member 0 of an ensemble.
    pub fn into_daily(self) -> DailySeries {
        match self {
            Self::Daily(s) => s,
            Self::Ensemble(e) => e
                .into_members()
                .into_iter()
                .next()
                .expect("ensembles always have at least one member"),
        }
    }
}

// ---------------------------------------------------------------------------
// read_series
// ---------------------------------------------------------------------------

/// Read a daily series file.
///
/// Lines between the epoch and `start` are skipped without parsing. One line
/// is then read per day up to `end`; days outside the period filter are
/// dropped entirely, the missing code and below-threshold values become
/// `None`, and a non-numeric value is logged and recorded as missing.
///
/// # Errors
///
/// Returns [`IoError::FileNotFound`] if the file does not exist,
/// [`IoError::DateRange`] for an inverted range, a start before the epoch or
/// a file ending before `start`, and [`IoError::ShortFile`] if it ends
/// before `end`.
pub fn read_series(path: &Path, config: &ReaderConfig) -> Result<SeriesData, IoError> {
    config.validate()?;

    if !path.exists() {
        return Err(IoError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let file = File::open(path).map_err(|source| IoError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    info!(path = %path.display(), start = %config.start, end = %config.end, "reading series");
    read_lines(BufReader::new(file), config, path)
}

/// Read a daily series from any buffered source. See [`read_series`].
///
/// # Errors
///
/// Same as [`read_series`], except that there is no file to be missing.
pub fn read_series_from<R: BufRead>(reader: R, config: &ReaderConfig) -> Result<SeriesData, IoError> {
    config.validate()?;
    read_lines(reader, config, Path::new("<stream>"))
}

fn read_lines<R: BufRead>(reader: R, config: &ReaderConfig, source: &Path) -> Result<SeriesData, IoError> {
    let grid = TimeGrid::new(config.epoch, config.year_length)?;
    let (skip, n_days) = day_span(&grid, config)?;

    let io_err = |e: std::io::Error| IoError::Io {
        path: source.to_path_buf(),
        source: e,
    };
    let mut lines = reader.lines();

    for skipped in 0..skip {
        match lines.next() {
            Some(line) => {
                line.map_err(io_err)?;
            }
            None => {
                return Err(IoError::DateRange {
                    reason: format!(
                        "file has only {skipped} lines after epoch {}, start {} needs {skip}",
                        config.epoch, config.start
                    ),
                });
            }
        }
    }
    debug!(skipped = skip, "advanced to start date");

    let n_members = config.ensemble.map_or(1, |l| l.members);
    let mut dates = Vec::with_capacity(n_days);
    let mut members: Vec<Vec<Option<f64>>> = vec![Vec::with_capacity(n_days); n_members];
    let mut n_unparsed = 0usize;

    for day in 0..n_days {
        let date = grid.date_at(skip + day);
        let line = match lines.next() {
            Some(line) => line.map_err(io_err)?,
            None => {
                return Err(IoError::ShortFile {
                    expected: n_days,
                    read: day,
                    next_date: date,
                });
            }
        };
        if !config.period.matches(date) {
            continue;
        }
        let line_no = skip + day + 1;
        dates.push(date);

        match config.ensemble {
            None => {
                let value = parse_field(line.trim(), line_no, date, 0, &mut n_unparsed);
                members[0].push(value.and_then(|v| config.classify(v)));
            }
            Some(layout) => {
                let line = line.trim_end_matches(['\r', '\n']);
                for (m, column) in members.iter_mut().enumerate() {
                    let value = match fixed_width_field(line, m, layout.width) {
                        FixedField::Text(field) => parse_field(field.trim(), line_no, date, m, &mut n_unparsed),
                        FixedField::PastEnd => {
                            warn!(line = line_no, %date, member = m, "field beyond end of line, recording day as missing");
                            None
                        }
                        FixedField::SplitChar => {
                            n_unparsed += 1;
                            warn!(
                                line = line_no,
                                %date,
                                member = m,
                                "field splits a multi-byte character, recording day as missing"
                            );
                            None
                        }
                    };
                    column.push(value.and_then(|v| config.classify(v)));
                }
            }
        }
    }

    let n_missing: usize = members.iter().map(|m| m.iter().filter(|v| v.is_none()).count()).sum();
    info!(
        days = n_days,
        retained = dates.len(),
        members = n_members,
        missing = n_missing,
        unparsed = n_unparsed,
        period = %config.period,
        "series read"
    );

    match config.ensemble {
        None => {
            let values = members.pop().unwrap_or_default();
            Ok(SeriesData::Daily(DailySeries::new(dates, values)?))
        }
        Some(_) => Ok(SeriesData::Ensemble(EnsembleSeries::new(dates, members)?)),
    }
}

/// Returns `(lines to skip, days to read)` for the configured range.
fn day_span(grid: &TimeGrid, config: &ReaderConfig) -> Result<(usize, usize), IoError> {
    if config.end < config.start {
        return Err(IoError::DateRange {
            reason: format!("end {} precedes start {}", config.end, config.start),
        });
    }
    let step = |date: NaiveDate| {
        grid.step_of(date).map_err(|e| match e {
            CalendarError::BeforeEpoch { date, epoch } => IoError::DateRange {
                reason: format!("{date} precedes the file epoch {epoch}"),
            },
            other => other.into(),
        })
    };
    let first = step(config.start)?;
    let last = step(config.end)?;
    Ok((first, last - first + 1))
}

/// One member's slot in a fixed-width line.
#[derive(Debug, PartialEq)]
enum FixedField<'a> {
    Text(&'a str),
    PastEnd,
    /// The byte columns cut through a multi-byte character.
    SplitChar,
}

/// Slice member `index` out of a fixed-width line. A partially present last
/// field is returned truncated.
fn fixed_width_field(line: &str, index: usize, width: usize) -> FixedField<'_> {
    let start = index * width;
    if start >= line.len() {
        return FixedField::PastEnd;
    }
    let end = (start + width).min(line.len());
    match line.get(start..end) {
        Some(field) => FixedField::Text(field),
        None => FixedField::SplitChar,
    }
}

fn parse_field(text: &str, line_no: usize, date: NaiveDate, member: usize, n_unparsed: &mut usize) -> Option<f64> {
    match text.parse::<f64>() {
        Ok(v) if v.is_finite() => Some(v),
        _ => {
            *n_unparsed += 1;
            warn!(line = line_no, %date, member, field = text, "non-numeric value, recording day as missing");
            None
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn read(text: &str, cfg: &ReaderConfig) -> Result<SeriesData, IoError> {
        read_series_from(Cursor::new(text.to_string()), cfg)
    }

    #[test]
    fn default_config_values() {
        let cfg = ReaderConfig::new(ymd(1961, 1, 1), ymd(1961, 1, 1), ymd(1961, 12, 31));
        assert_eq!(cfg.missing_code(), -999.0);
        assert_eq!(cfg.threshold(), None);
        assert_eq!(cfg.period(), PeriodFilter::Annual);
        assert_eq!(cfg.year_length(), YearLength::Calendar);
        assert!(cfg.ensemble().is_none());
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn builder_methods() {
        let cfg = ReaderConfig::new(ymd(1961, 1, 1), ymd(1962, 1, 1), ymd(1962, 12, 31))
            .with_missing_code(-99.9)
            .with_threshold(0.5)
            .with_period(PeriodFilter::Month(6))
            .with_year_length(YearLength::NoLeap)
            .with_ensemble(EnsembleLayout::new(3).with_width(10));
        assert_eq!(cfg.missing_code(), -99.9);
        assert_eq!(cfg.threshold(), Some(0.5));
        assert_eq!(cfg.period(), PeriodFilter::Month(6));
        assert_eq!(cfg.year_length(), YearLength::NoLeap);
        assert_eq!(cfg.ensemble().unwrap().members(), 3);
        assert_eq!(cfg.ensemble().unwrap().width(), 10);

        let disabled = cfg.with_apply_threshold(false);
        assert_eq!(disabled.threshold(), None);
    }

    #[test]
    fn default_ensemble_width() {
        assert_eq!(EnsembleLayout::new(2).width(), 14);
    }

    #[test]
    fn validate_rejects_zero_layout() {
        let cfg = ReaderConfig::new(ymd(1961, 1, 1), ymd(1961, 1, 1), ymd(1961, 1, 2))
            .with_ensemble(EnsembleLayout::new(0).with_width(0));
        match cfg.validate().unwrap_err() {
            IoError::Validation { count, .. } => assert_eq!(count, 2),
            other => panic!("expected Validation, got {other:?}"),
        }
    }

    #[test]
    fn validate_rejects_nan_missing_code() {
        let cfg = ReaderConfig::new(ymd(1961, 1, 1), ymd(1961, 1, 1), ymd(1961, 1, 2)).with_missing_code(f64::NAN);
        assert!(matches!(cfg.validate(), Err(IoError::Validation { .. })));
    }

    #[test]
    fn skips_to_start_and_maps_missing() {
        let cfg = ReaderConfig::new(ymd(2000, 1, 1), ymd(2000, 1, 3), ymd(2000, 1, 5));
        let text = "junk\nmore junk\n1.5\n-999\n3.0\n99\n";
        let s = read(text, &cfg).unwrap().into_daily();
        assert_eq!(s.dates(), &[ymd(2000, 1, 3), ymd(2000, 1, 4), ymd(2000, 1, 5)]);
        assert_eq!(s.values(), &[Some(1.5), None, Some(3.0)]);
    }

    #[test]
    fn threshold_masks_small_values() {
        let cfg = ReaderConfig::new(ymd(2000, 1, 1), ymd(2000, 1, 1), ymd(2000, 1, 3)).with_threshold(1.0);
        let s = read("0.5\n1.0\n2.0\n", &cfg).unwrap().into_daily();
        assert_eq!(s.values(), &[None, Some(1.0), Some(2.0)]);
    }

    #[test]
    fn non_numeric_line_is_missing_and_keeps_alignment() {
        let cfg = ReaderConfig::new(ymd(2000, 1, 1), ymd(2000, 1, 1), ymd(2000, 1, 3));
        let s = read("1.0\nabc\n3.0\n", &cfg).unwrap().into_daily();
        assert_eq!(s.len(), 3);
        assert_eq!(s.values(), &[Some(1.0), None, Some(3.0)]);
    }

    #[test]
    fn period_filter_drops_days() {
        let cfg = ReaderConfig::new(ymd(2000, 1, 30), ymd(2000, 1, 30), ymd(2000, 2, 2)).with_period(PeriodFilter::Month(2));
        let s = read("1\n2\n3\n4\n", &cfg).unwrap().into_daily();
        assert_eq!(s.dates(), &[ymd(2000, 2, 1), ymd(2000, 2, 2)]);
        assert_eq!(s.values(), &[Some(3.0), Some(4.0)]);
    }

    #[test]
    fn noleap_file_has_no_feb_29() {
        let cfg = ReaderConfig::new(ymd(2000, 2, 28), ymd(2000, 2, 28), ymd(2000, 3, 1)).with_year_length(YearLength::NoLeap);
        let s = read("1\n2\n", &cfg).unwrap().into_daily();
        assert_eq!(s.dates(), &[ymd(2000, 2, 28), ymd(2000, 3, 1)]);
    }

    #[test]
    fn fixed_width_members() {
        let cfg = ReaderConfig::new(ymd(2000, 1, 1), ymd(2000, 1, 1), ymd(2000, 1, 2))
            .with_ensemble(EnsembleLayout::new(3).with_width(6));
        let text = "   1.0   2.0-999.0\n   4.0   5.0   6.0\n";
        let e = read(text, &cfg).unwrap().into_ensemble();
        assert_eq!(e.n_members(), 3);
        assert_eq!(e.member_values(0).unwrap(), &[Some(1.0), Some(4.0)]);
        assert_eq!(e.member_values(1).unwrap(), &[Some(2.0), Some(5.0)]);
        assert_eq!(e.member_values(2).unwrap(), &[None, Some(6.0)]);
    }

    #[test]
    fn fixed_width_field_past_line_end_is_missing() {
        let cfg = ReaderConfig::new(ymd(2000, 1, 1), ymd(2000, 1, 1), ymd(2000, 1, 1))
            .with_ensemble(EnsembleLayout::new(3).with_width(4));
        let e = read(" 1.0 2.\n", &cfg).unwrap().into_ensemble();
        assert_eq!(e.member_values(0).unwrap(), &[Some(1.0)]);
        assert_eq!(e.member_values(1).unwrap(), &[Some(2.0)]);
        assert_eq!(e.member_values(2).unwrap(), &[None]);
    }

    #[test]
    fn fixed_width_field_slots() {
        assert_eq!(fixed_width_field(" 1.0 2.", 1, 4), FixedField::Text(" 2."));
        assert_eq!(fixed_width_field(" 1.0", 1, 4), FixedField::PastEnd);
        assert_eq!(fixed_width_field("  é1.0", 1, 3), FixedField::SplitChar);
    }

    #[test]
    fn non_ascii_field_is_unparsed_not_missing_column() {
        let cfg = ReaderConfig::new(ymd(2000, 1, 1), ymd(2000, 1, 1), ymd(2000, 1, 1))
            .with_ensemble(EnsembleLayout::new(3).with_width(4));
        let e = read(" 1.0   é3.0\n", &cfg).unwrap().into_ensemble();
        assert_eq!(e.member_values(0).unwrap(), &[Some(1.0)]);
        assert_eq!(e.member_values(1).unwrap(), &[None]);
        assert_eq!(e.member_values(2).unwrap(), &[None]);
    }

    #[test]
    fn eof_during_skip_is_date_range() {
        let cfg = ReaderConfig::new(ymd(2000, 1, 1), ymd(2000, 1, 10), ymd(2000, 1, 12));
        assert!(matches!(read("1\n2\n", &cfg), Err(IoError::DateRange { .. })));
    }

    #[test]
    fn eof_during_read_is_short_file() {
        let cfg = ReaderConfig::new(ymd(2000, 1, 1), ymd(2000, 1, 1), ymd(2000, 1, 5));
        match read("1\n2\n3\n", &cfg).unwrap_err() {
            IoError::ShortFile { expected, read, next_date } => {
                assert_eq!(expected, 5);
                assert_eq!(read, 3);
                assert_eq!(next_date, ymd(2000, 1, 4));
            }
            other => panic!("expected ShortFile, got {other:?}"),
        }
    }

    #[test]
    fn inverted_range_is_date_range() {
        let cfg = ReaderConfig::new(ymd(2000, 1, 1), ymd(2000, 2, 1), ymd(2000, 1, 1));
        assert!(matches!(read("1\n", &cfg), Err(IoError::DateRange { .. })));
    }

    #[test]
    fn start_before_epoch_is_date_range() {
        let cfg = ReaderConfig::new(ymd(2000, 1, 1), ymd(1999, 12, 31), ymd(2000, 1, 1));
        assert!(matches!(read("1\n", &cfg), Err(IoError::DateRange { .. })));
    }

    #[test]
    fn crlf_line_endings() {
        let cfg = ReaderConfig::new(ymd(2000, 1, 1), ymd(2000, 1, 1), ymd(2000, 1, 2));
        let s = read("1.25\r\n2.5\r\n", &cfg).unwrap().into_daily();
        assert_eq!(s.values(), &[Some(1.25), Some(2.5)]);
    }

    #[test]
    fn series_data_members() {
        let cfg = ReaderConfig::new(ymd(2000, 1, 1), ymd(2000, 1, 1), ymd(2000, 1, 1));
        let data = read("1\n", &cfg).unwrap();
        assert_eq!(data.n_members(), 1);
        assert_eq!(data.into_ensemble().n_members(), 1);
    }
}
