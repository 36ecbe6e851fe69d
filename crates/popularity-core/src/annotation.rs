// File: crates/popularity-core/src/annotation.rs
// Summary: Tooltip and annotation text for a located record.

use chrono::{Months, NaiveDate};

use crate::record::{PollRecord, PredictionRecord};

/// Percentage with one decimal, e.g. `41.2%`.
pub fn percent(v: f64) -> String {
    format!("{v:.1}%")
}

/// Tooltip body for a poll marker, one entry per line.
pub fn poll_tooltip(r: &PollRecord) -> Vec<String> {
    vec![
        format!("Pollster: {}", r.pollster_id),
        format!("Method: {}", r.method),
        format!("Sample: {}", r.sample_size),
        format!("Approve: {}", percent(r.approve_pct)),
        format!("Disapprove: {}", percent(r.disapprove_pct)),
        format!("Field date: {}", r.field_date.format("%d %b %Y")),
    ]
}

/// Large headline next to the located prediction.
pub fn headline(r: &PredictionRecord) -> String {
    format!("{} approve", percent(r.mean_pct))
}

/// One calendar month before `date`; the day is clamped to the shorter month.
///
/// The dashboard has always labelled a prediction with the previous month. Kept as-is.
pub fn lagged_month(date: NaiveDate) -> NaiveDate {
    date.checked_sub_months(Months::new(1)).unwrap_or(date)
}

/// `May 2021` for a prediction dated 2021-06-15.
pub fn lagged_month_label(date: NaiveDate) -> String {
    lagged_month(date).format("%B %Y").to_string()
}

/// Text content of the line chart's annotations for one prediction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LineAnnotation {
    pub headline: String,
    pub month: String,
}

impl LineAnnotation {
    pub fn for_record(r: &PredictionRecord) -> Self {
        Self { headline: headline(r), month: lagged_month_label(r.date) }
    }
}
