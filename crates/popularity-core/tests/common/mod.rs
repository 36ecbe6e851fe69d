// File: crates/popularity-core/tests/common/mod.rs
// Purpose: Shared record builders for integration tests.

#![allow(dead_code)]

use chrono::NaiveDate;
use popularity_core::{HdiLevel, Interval, OuterHdi, PollRecord, PredictionRecord};

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

pub fn poll(pollster: &str, d: NaiveDate, approve: f64) -> PollRecord {
    PollRecord {
        field_date: d,
        pollster_id: pollster.to_string(),
        method: "internet".to_string(),
        approve_pct: approve,
        disapprove_pct: 100.0 - approve - 2.0,
        sample_size: 1000,
    }
}

pub fn prediction(d: NaiveDate, mean: f64) -> PredictionRecord {
    PredictionRecord {
        date: d,
        mean_pct: mean,
        hdi50: Interval::new(mean - 2.0, mean + 2.0),
        outer: OuterHdi { level: HdiLevel::P95, interval: Interval::new(mean - 5.0, mean + 5.0) },
    }
}

pub fn ms(v: u64) -> std::time::Duration {
    std::time::Duration::from_millis(v)
}
