// File: crates/popularity-core/src/scale.rs
// Summary: Time (X) and percentage (Y) scale transforms between data domains and plot pixels.

use chrono::{Datelike, NaiveDate};

use crate::types::{DateDomain, PCT_MAX, PCT_MIN};

/// Continuous date coordinate: days since 0001-01-01 (CE), fractional between midnights.
pub type DayKey = f64;
/// Value Y coordinate (percentage points).
pub type Value = f64;

#[inline]
pub fn day_key(date: NaiveDate) -> DayKey {
    date.num_days_from_ce() as f64
}

/// Calendar day containing `key`, if representable.
pub fn date_from_key(key: DayKey) -> Option<NaiveDate> {
    if !key.is_finite() { return None; }
    let days = key.floor();
    if days < i32::MIN as f64 || days > i32::MAX as f64 { return None; }
    NaiveDate::from_num_days_from_ce_opt(days as i32)
}

/// Horizontal time scale mapping a fixed date window onto `[left_px, right_px]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimeScale {
    pub left_px: f32,
    pub right_px: f32,
    start: DayKey,
    end: DayKey,
}

impl TimeScale {
    pub fn new(domain: DateDomain, left_px: f32, right_px: f32) -> Self {
        let start = day_key(domain.start);
        let mut end = day_key(domain.end);
        if end - start < 1.0 { end = start + 1.0; }
        Self { left_px, right_px, start, end }
    }

    pub fn domain(&self) -> (DayKey, DayKey) { (self.start, self.end) }

    #[inline]
    pub fn key_to_px(&self, key: DayKey) -> f32 {
        let t = (key - self.start) / (self.end - self.start);
        self.left_px + (t as f32) * (self.right_px - self.left_px)
    }

    #[inline]
    pub fn to_px(&self, date: NaiveDate) -> f32 {
        self.key_to_px(day_key(date))
    }

    /// Inverse mapping; not clamped to the domain.
    #[inline]
    pub fn invert(&self, px: f32) -> DayKey {
        let span_px = f64::from((self.right_px - self.left_px).max(1e-6));
        self.start + f64::from(px - self.left_px) / span_px * (self.end - self.start)
    }

    pub fn invert_date(&self, px: f32) -> Option<NaiveDate> {
        date_from_key(self.invert(px))
    }
}

/// Vertical linear scale mapping `[vmin, vmax]` to `[bottom_px, top_px]` (screen y grows downward).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ValueScale {
    pub top_px: f32,
    pub bottom_px: f32,
    pub vmin: Value,
    pub vmax: Value,
}

impl ValueScale {
    pub fn new_linear(top_px: f32, bottom_px: f32, vmin: Value, vmax: Value) -> Self {
        let mut s = Self { top_px, bottom_px, vmin, vmax };
        if (s.vmax - s.vmin).abs() < 1e-12 { s.vmax = s.vmin + 1.0; }
        s
    }

    /// The fixed `[0, 100]` percentage scale.
    pub fn percent(top_px: f32, bottom_px: f32) -> Self {
        Self::new_linear(top_px, bottom_px, PCT_MIN, PCT_MAX)
    }

    #[inline]
    pub fn to_px(&self, y: Value) -> f32 {
        let span = (self.vmax - self.vmin).max(1e-12);
        self.bottom_px - ((y - self.vmin) / span) as f32 * (self.bottom_px - self.top_px)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_scale_maps_domain_ends_to_range_ends() {
        let s = TimeScale::new(DateDomain::fixed(), 0.0, 710.0);
        let start = NaiveDate::from_ymd_opt(2017, 5, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2022, 5, 1).unwrap();
        assert_eq!(s.to_px(start), 0.0);
        assert!((s.to_px(end) - 710.0).abs() < 1e-3);
        assert_eq!(s.invert_date(0.0), Some(start));
    }

    #[test]
    fn value_scale_is_inverted_on_screen() {
        let s = ValueScale::percent(0.0, 460.0);
        assert_eq!(s.to_px(0.0), 460.0);
        assert_eq!(s.to_px(100.0), 0.0);
        assert_eq!(s.to_px(50.0), 230.0);
    }
}
