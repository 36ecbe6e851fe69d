// File: crates/popularity-core/src/grid.rs
// Summary: Tick layout helpers for the date and percentage axes.

use chrono::{Datelike, NaiveDate};

use crate::types::DateDomain;

pub fn linspace(start: f64, end: f64, steps: usize) -> Vec<f64> {
    if steps < 2 { return vec![start, end]; }
    let step = (end - start) / (steps as f64 - 1.0);
    (0..steps).map(|i| start + step * i as f64).collect()
}

/// Every 1st of January inside the domain.
pub fn year_ticks(domain: &DateDomain) -> Vec<NaiveDate> {
    let first = if domain.start.ordinal() == 1 { domain.start.year() } else { domain.start.year() + 1 };
    (first..=domain.end.year())
        .filter_map(|y| NaiveDate::from_ymd_opt(y, 1, 1))
        .filter(|d| *d <= domain.end)
        .collect()
}

/// 0, 10, .., 100.
pub fn percent_ticks() -> Vec<f64> {
    linspace(0.0, 100.0, 11)
}
