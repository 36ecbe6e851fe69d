// File: crates/popularity-core/src/loader.rs
// Summary: CSV feed loaders; coerce rows into validated records (fractions scaled to percentages).

use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;
use csv::StringRecord;
use tracing::{debug, info};

use crate::error::{LoadError, ParseError};
use crate::record::{HdiLevel, Interval, OuterHdi, PollRecord, PredictionRecord};

/// Public address of the polls feed.
pub const POLLS_URL: &str =
    "https://raw.githubusercontent.com/AlexAndorra/pollsposition_dashboards/main/exports/polls_popularity.csv";
/// Public address of the predictions feed.
pub const PREDICTIONS_URL: &str =
    "https://raw.githubusercontent.com/AlexAndorra/pollsposition_dashboards/main/exports/predictions_popularity.csv";

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Column lookup over a lower-cased header row.
struct Columns {
    names: Vec<String>,
}

impl Columns {
    fn new(headers: &StringRecord) -> Self {
        Self { names: headers.iter().map(|h| h.trim().to_lowercase()).collect() }
    }

    fn find(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|h| h == name)
    }

    fn require(&self, name: &'static str) -> Result<usize, ParseError> {
        self.find(name).ok_or(ParseError::MissingColumn(name))
    }
}

/// One data row with its source line, for error reporting.
struct Row<'a> {
    rec: &'a StringRecord,
    line: u64,
}

impl Row<'_> {
    fn text(&self, ix: usize, column: &'static str) -> Result<&str, ParseError> {
        match self.rec.get(ix).map(str::trim) {
            Some(s) if !s.is_empty() => Ok(s),
            _ => Err(ParseError::MissingField { line: self.line, column }),
        }
    }

    fn date(&self, ix: usize, column: &'static str) -> Result<NaiveDate, ParseError> {
        let s = self.text(ix, column)?;
        NaiveDate::parse_from_str(s, DATE_FORMAT).map_err(|_| ParseError::InvalidDate {
            line: self.line,
            column,
            value: s.to_string(),
        })
    }

    fn number(&self, ix: usize, column: &'static str) -> Result<f64, ParseError> {
        let s = self.text(ix, column)?;
        // "NaN" and "inf" parse as f64; neither is a usable coordinate
        match s.parse::<f64>() {
            Ok(v) if v.is_finite() => Ok(v),
            _ => Err(ParseError::NotNumeric { line: self.line, column, value: s.to_string() }),
        }
    }

    /// Fraction in the feed, percentage in the record.
    fn percent(&self, ix: usize, column: &'static str) -> Result<f64, ParseError> {
        let v = 100.0 * self.number(ix, column)?;
        if !(0.0..=100.0).contains(&v) {
            return Err(ParseError::OutOfRange { line: self.line, column, value: v });
        }
        Ok(v)
    }

    /// Accepts `1000` as well as the float export form `1000.0`.
    fn count(&self, ix: usize, column: &'static str) -> Result<u32, ParseError> {
        let s = self.text(ix, column)?;
        if let Ok(n) = s.parse::<u32>() {
            return Ok(n);
        }
        match s.parse::<f64>() {
            Ok(v) if v.is_finite() && v >= 0.0 && v.fract() == 0.0 && v <= u32::MAX as f64 => Ok(v as u32),
            _ => Err(ParseError::NotInteger { line: self.line, column, value: s.to_string() }),
        }
    }
}

fn reader<R: Read>(source: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::Headers)
        .from_reader(source)
}

fn line_of(rec: &StringRecord, fallback: u64) -> u64 {
    rec.position().map(|p| p.line()).unwrap_or(fallback)
}

/// Parse the polls feed. Row order is kept as-is; the feed is not required to be sorted.
pub fn read_polls<R: Read>(source: R) -> Result<Vec<PollRecord>, LoadError> {
    let mut rdr = reader(source);
    let cols = Columns::new(rdr.headers()?);
    let i_date = cols.require("field_date")?;
    let i_pollster = cols.require("sondage")?;
    let i_method = cols.require("method")?;
    let i_approve = cols.require("p_approve")?;
    let i_disapprove = cols.require("p_disapprove")?;
    let i_size = cols.require("samplesize")?;

    let mut out = Vec::new();
    for (n, rec) in rdr.records().enumerate() {
        let rec = rec?;
        let row = Row { rec: &rec, line: line_of(&rec, n as u64 + 2) };
        out.push(PollRecord {
            field_date: row.date(i_date, "field_date")?,
            pollster_id: row.text(i_pollster, "sondage")?.to_string(),
            method: row.text(i_method, "method")?.to_string(),
            approve_pct: row.percent(i_approve, "p_approve")?,
            disapprove_pct: row.percent(i_disapprove, "p_disapprove")?,
            sample_size: row.count(i_size, "samplesize")?,
        });
    }
    info!(rows = out.len(), "loaded polls feed");
    Ok(out)
}

/// Parse the predictions feed. Rows must be in ascending date order.
///
/// The outer band is read from `hdi_95_*` when present, otherwise from `hdi_90_*`.
pub fn read_predictions<R: Read>(source: R) -> Result<Vec<PredictionRecord>, LoadError> {
    let mut rdr = reader(source);
    let cols = Columns::new(rdr.headers()?);
    let i_date = cols.require("date")?;
    let i_mean = cols.require("mean")?;
    let i_50_lo = cols.require("hdi_50_left")?;
    let i_50_hi = cols.require("hdi_50_right")?;
    let (level, lo_name, hi_name) = if cols.find("hdi_95_left").is_some() {
        (HdiLevel::P95, "hdi_95_left", "hdi_95_right")
    } else if cols.find("hdi_90_left").is_some() {
        (HdiLevel::P90, "hdi_90_left", "hdi_90_right")
    } else {
        return Err(ParseError::MissingColumn("hdi_95_left").into());
    };
    let i_out_lo = cols.require(lo_name)?;
    let i_out_hi = cols.require(hi_name)?;
    debug!(%level, "predictions feed outer band");

    let mut out: Vec<PredictionRecord> = Vec::new();
    for (n, rec) in rdr.records().enumerate() {
        let rec = rec?;
        let row = Row { rec: &rec, line: line_of(&rec, n as u64 + 2) };
        let record = PredictionRecord {
            date: row.date(i_date, "date")?,
            mean_pct: row.percent(i_mean, "mean")?,
            hdi50: Interval::new(row.percent(i_50_lo, "hdi_50_left")?, row.percent(i_50_hi, "hdi_50_right")?),
            outer: OuterHdi {
                level,
                interval: Interval::new(row.percent(i_out_lo, lo_name)?, row.percent(i_out_hi, hi_name)?),
            },
        };
        if let Err(bad) = record.check_intervals() {
            let iv = record.interval(bad);
            return Err(ParseError::IntervalOrder {
                line: row.line,
                level: bad.label(),
                low: iv.low,
                mean: record.mean_pct,
                high: iv.high,
            }
            .into());
        }
        if let Some(prev) = out.last() {
            if record.date < prev.date {
                return Err(ParseError::Unsorted { line: row.line, date: record.date }.into());
            }
        }
        out.push(record);
    }
    info!(rows = out.len(), %level, "loaded predictions feed");
    Ok(out)
}

pub fn load_polls_path(path: impl AsRef<Path>) -> Result<Vec<PollRecord>, LoadError> {
    let path = path.as_ref();
    debug!(path = %path.display(), "opening polls feed");
    read_polls(std::fs::File::open(path)?)
}

pub fn load_predictions_path(path: impl AsRef<Path>) -> Result<Vec<PredictionRecord>, LoadError> {
    let path = path.as_ref();
    debug!(path = %path.display(), "opening predictions feed");
    read_predictions(std::fs::File::open(path)?)
}

/// One-shot GET; no retry.
#[cfg(feature = "fetch")]
fn get(url: &str) -> Result<reqwest::blocking::Response, LoadError> {
    debug!(%url, "fetching feed");
    Ok(reqwest::blocking::get(url)?.error_for_status()?)
}

#[cfg(feature = "fetch")]
pub fn fetch_polls(url: &str) -> Result<Vec<PollRecord>, LoadError> {
    read_polls(get(url)?)
}

#[cfg(feature = "fetch")]
pub fn fetch_predictions(url: &str) -> Result<Vec<PredictionRecord>, LoadError> {
    read_predictions(get(url)?)
}

/// Where a feed comes from: a URL (`http://`, `https://`) or a local path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FeedSource {
    Url(String),
    Path(std::path::PathBuf),
}

impl FeedSource {
    pub fn parse(raw: &str) -> Self {
        if raw.starts_with("http://") || raw.starts_with("https://") {
            FeedSource::Url(raw.to_string())
        } else {
            FeedSource::Path(raw.into())
        }
    }

    pub fn load_polls(&self) -> Result<Vec<PollRecord>, LoadError> {
        match self {
            FeedSource::Path(p) => load_polls_path(p),
            FeedSource::Url(u) => fetch_url(u, read_polls),
        }
    }

    pub fn load_predictions(&self) -> Result<Vec<PredictionRecord>, LoadError> {
        match self {
            FeedSource::Path(p) => load_predictions_path(p),
            FeedSource::Url(u) => fetch_url(u, read_predictions),
        }
    }
}

impl std::fmt::Display for FeedSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FeedSource::Url(u) => f.write_str(u),
            FeedSource::Path(p) => write!(f, "{}", p.display()),
        }
    }
}

#[cfg(feature = "fetch")]
fn fetch_url<T>(
    url: &str,
    parse: fn(reqwest::blocking::Response) -> Result<Vec<T>, LoadError>,
) -> Result<Vec<T>, LoadError> {
    parse(get(url)?)
}

#[cfg(not(feature = "fetch"))]
fn fetch_url<T>(url: &str, _parse: fn(std::io::Empty) -> Result<Vec<T>, LoadError>) -> Result<Vec<T>, LoadError> {
    Err(LoadError::Io(std::io::Error::new(
        std::io::ErrorKind::Unsupported,
        format!("popularity-core built without `fetch` feature; cannot GET {url}"),
    )))
}
