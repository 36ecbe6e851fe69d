// File: crates/popularity-core/src/error.rs
// Summary: Error types for feed loading and row validation.

use thiserror::Error;

/// A row (or header) of a feed that does not describe a valid record.
/// `line` is the 1-based line in the CSV source, header included.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ParseError {
    #[error("missing column `{0}` in header")]
    MissingColumn(&'static str),

    #[error("line {line}: field `{column}` is empty")]
    MissingField { line: u64, column: &'static str },

    #[error("line {line}: field `{column}` is not a finite number: {value:?}")]
    NotNumeric { line: u64, column: &'static str, value: String },

    #[error("line {line}: field `{column}` is not an integer: {value:?}")]
    NotInteger { line: u64, column: &'static str, value: String },

    #[error("line {line}: field `{column}` is not a YYYY-MM-DD date: {value:?}")]
    InvalidDate { line: u64, column: &'static str, value: String },

    #[error("line {line}: `{column}` = {value} is outside [0, 100]")]
    OutOfRange { line: u64, column: &'static str, value: f64 },

    #[error("line {line}: HDI {level} interval [{low}, {high}] does not contain mean {mean}")]
    IntervalOrder { line: u64, level: &'static str, low: f64, mean: f64, high: f64 },

    #[error("line {line}: date {date} is earlier than the previous row")]
    Unsorted { line: u64, date: chrono::NaiveDate },
}

/// Failure to produce a record sequence for a chart.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "fetch")]
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl LoadError {
    /// The validation failure, if this load failed on content rather than transport.
    pub fn as_parse(&self) -> Option<&ParseError> {
        match self {
            LoadError::Parse(p) => Some(p),
            _ => None,
        }
    }
}
