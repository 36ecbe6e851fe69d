// File: crates/popularity-core/src/types.rs
// Summary: Shared types and constants (surface size, insets, fixed display domains).

use chrono::NaiveDate;

/// Default surface width in pixels.
pub const WIDTH: i32 = 800;
/// Default surface height in pixels.
pub const HEIGHT: i32 = 500;

/// First day of the fixed x-domain.
pub const DOMAIN_START: (i32, u32, u32) = (2017, 5, 1);
/// Last day of the fixed x-domain.
pub const DOMAIN_END: (i32, u32, u32) = (2022, 5, 1);

/// Fixed y-domain (percentage scale).
pub const PCT_MIN: f64 = 0.0;
pub const PCT_MAX: f64 = 100.0;

/// Screen margins around the plot area, in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Insets {
    pub left: u32,
    pub right: u32,
    pub top: u32,
    pub bottom: u32,
}

impl Insets {
    /// Create new insets (non-negative by type).
    pub const fn new(left: u32, right: u32, top: u32, bottom: u32) -> Self {
        Self { left, right, top, bottom }
    }
    /// Total horizontal inset (left + right).
    pub const fn hsum(&self) -> u32 { self.left + self.right }
    /// Total vertical inset (top + bottom).
    pub const fn vsum(&self) -> u32 { self.top + self.bottom }
}

impl Default for Insets {
    fn default() -> Self {
        Self::new(60, 30, 10, 30)
    }
}

/// Inclusive calendar window shown on the x axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DateDomain {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateDomain {
    /// Build a domain; returns `None` if either bound is not a real date or `end <= start`.
    pub fn from_ymd(start: (i32, u32, u32), end: (i32, u32, u32)) -> Option<Self> {
        let start = NaiveDate::from_ymd_opt(start.0, start.1, start.2)?;
        let end = NaiveDate::from_ymd_opt(end.0, end.1, end.2)?;
        (end > start).then_some(Self { start, end })
    }

    /// The dashboard's 2017-05-01 .. 2022-05-01 window.
    pub fn fixed() -> Self {
        // Both constants are valid calendar dates.
        Self::from_ymd(DOMAIN_START, DOMAIN_END).unwrap_or(Self {
            start: NaiveDate::MIN,
            end: NaiveDate::MAX,
        })
    }
}

impl Default for DateDomain {
    fn default() -> Self { Self::fixed() }
}
