// File: crates/popularity-core/src/record.rs
// Summary: Typed records for the polls feed and the model predictions feed.

use chrono::NaiveDate;
use std::fmt;

/// One published poll. Percentages are already scaled to [0, 100].
#[derive(Clone, Debug, PartialEq)]
pub struct PollRecord {
    pub field_date: NaiveDate,
    /// Pollster name; grouping key for highlight/selection.
    pub pollster_id: String,
    pub method: String,
    pub approve_pct: f64,
    pub disapprove_pct: f64,
    pub sample_size: u32,
}

/// Closed credible interval in percentage points.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Interval {
    pub low: f64,
    pub high: f64,
}

impl Interval {
    pub const fn new(low: f64, high: f64) -> Self { Self { low, high } }

    pub fn contains(&self, v: f64) -> bool { self.low <= v && v <= self.high }
}

/// Width of the outer HDI band published by the feed. The inner band is always 50%.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HdiLevel {
    P90,
    P95,
}

impl HdiLevel {
    pub fn label(self) -> &'static str {
        match self {
            HdiLevel::P90 => "90%",
            HdiLevel::P95 => "95%",
        }
    }
}

impl fmt::Display for HdiLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Which of a prediction's two bands an interval check refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HdiBand {
    Inner,
    Outer(HdiLevel),
}

impl HdiBand {
    pub fn label(self) -> &'static str {
        match self {
            HdiBand::Inner => "50%",
            HdiBand::Outer(level) => level.label(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OuterHdi {
    pub level: HdiLevel,
    pub interval: Interval,
}

/// One day of the model's posterior approval.
/// Contract: `hdi50` and `outer.interval` both contain `mean_pct`.
#[derive(Clone, Debug, PartialEq)]
pub struct PredictionRecord {
    pub date: NaiveDate,
    pub mean_pct: f64,
    pub hdi50: Interval,
    pub outer: OuterHdi,
}

impl PredictionRecord {
    /// Check the interval ordering; returns the offending band on failure.
    pub fn check_intervals(&self) -> Result<(), HdiBand> {
        if !self.hdi50.contains(self.mean_pct) {
            return Err(HdiBand::Inner);
        }
        if !self.outer.interval.contains(self.mean_pct) {
            return Err(HdiBand::Outer(self.outer.level));
        }
        Ok(())
    }

    /// The interval of `band`.
    pub fn interval(&self, band: HdiBand) -> Interval {
        match band {
            HdiBand::Inner => self.hdi50,
            HdiBand::Outer(_) => self.outer.interval,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(mean: f64, outer: (f64, f64)) -> PredictionRecord {
        PredictionRecord {
            date: NaiveDate::from_ymd_opt(2021, 6, 15).unwrap(),
            mean_pct: mean,
            hdi50: Interval::new(mean - 1.0, mean + 1.0),
            outer: OuterHdi { level: HdiLevel::P90, interval: Interval::new(outer.0, outer.1) },
        }
    }

    #[test]
    fn outer_violation_names_the_outer_level() {
        let r = record(41.0, (42.0, 50.0));
        assert_eq!(r.check_intervals(), Err(HdiBand::Outer(HdiLevel::P90)));
        assert_eq!(HdiBand::Outer(HdiLevel::P90).label(), "90%");
        assert_eq!(r.interval(HdiBand::Outer(HdiLevel::P90)), Interval::new(42.0, 50.0));
    }

    #[test]
    fn inner_band_is_checked_first() {
        let mut r = record(41.0, (30.0, 50.0));
        r.hdi50 = Interval::new(45.0, 46.0);
        assert_eq!(r.check_intervals(), Err(HdiBand::Inner));
        assert_eq!(HdiBand::Inner.label(), "50%");
    }
}
