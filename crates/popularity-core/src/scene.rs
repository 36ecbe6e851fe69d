// File: crates/popularity-core/src/scene.rs
// Summary: Retained visual elements of both charts, with time-sampled attribute tweens.

use std::time::Duration;

use crate::geometry::Point;
use crate::style::{MarkerStyle, Rgb};

/// A scalar attribute moving linearly from `from` to `to` over `duration`, starting at `start`.
/// Times are offsets from chart creation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tween {
    from: f32,
    to: f32,
    start: Duration,
    duration: Duration,
}

impl Tween {
    pub const fn fixed(value: f32) -> Self {
        Self { from: value, to: value, start: Duration::ZERO, duration: Duration::ZERO }
    }

    pub fn value_at(&self, now: Duration) -> f32 {
        if self.duration.is_zero() || now >= self.start + self.duration {
            return self.to;
        }
        if now <= self.start {
            return self.from;
        }
        let t = (now - self.start).as_secs_f32() / self.duration.as_secs_f32();
        self.from + (self.to - self.from) * t
    }

    /// Value once the current transition completes.
    pub fn target(&self) -> f32 { self.to }

    pub fn is_settled(&self, now: Duration) -> bool {
        now >= self.start + self.duration
    }

    /// Start a transition from wherever the attribute is at `now`.
    pub fn animate_to(&mut self, to: f32, now: Duration, duration: Duration) {
        self.from = self.value_at(now);
        self.to = to;
        self.start = now;
        self.duration = duration;
    }

    /// Jump without animation.
    pub fn set(&mut self, value: f32) {
        *self = Self::fixed(value);
    }
}

/// One poll marker. `record` indexes the chart's poll sequence.
#[derive(Clone, Debug, PartialEq)]
pub struct Marker {
    pub record: usize,
    pub center: Point,
    pub fill: Rgb,
    pub stroke: Rgb,
    pub radius: Tween,
    pub opacity: Tween,
}

impl Marker {
    pub fn new(record: usize, center: Point, style: MarkerStyle) -> Self {
        Self {
            record,
            center,
            fill: style.fill,
            stroke: style.stroke,
            radius: Tween::fixed(style.radius),
            opacity: Tween::fixed(style.opacity.unwrap_or(1.0)),
        }
    }

    /// Colours switch immediately; radius and opacity animate.
    pub fn apply(&mut self, style: MarkerStyle, now: Duration, duration: Duration) {
        self.fill = style.fill;
        self.stroke = style.stroke;
        self.radius.animate_to(style.radius, now, duration);
        if let Some(op) = style.opacity {
            self.opacity.animate_to(op, now, duration);
        }
    }

    /// Style the marker is heading to, for comparisons in tests and hit testing.
    pub fn target_style(&self) -> MarkerStyle {
        MarkerStyle {
            fill: self.fill,
            stroke: self.stroke,
            radius: self.radius.target(),
            opacity: Some(self.opacity.target()),
        }
    }
}

/// Floating multi-line tooltip box; `anchor` is its top-left corner.
#[derive(Clone, Debug, PartialEq)]
pub struct Tooltip {
    pub lines: Vec<String>,
    pub anchor: Point,
    pub opacity: Tween,
}

impl Default for Tooltip {
    fn default() -> Self {
        Self { lines: Vec::new(), anchor: Point::default(), opacity: Tween::fixed(0.0) }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Label {
    pub text: String,
    pub pos: Point,
    pub size: f32,
    pub opacity: Tween,
}

impl Label {
    pub fn hidden(size: f32) -> Self {
        Self { text: String::new(), pos: Point::default(), size, opacity: Tween::fixed(0.0) }
    }
}

/// Dashed vertical guide following the located prediction.
#[derive(Clone, Debug, PartialEq)]
pub struct TrackingLine {
    pub x: f32,
    pub y1: f32,
    pub y2: f32,
    pub opacity: Tween,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ScatterScene {
    pub markers: Vec<Marker>,
    pub tooltip: Tooltip,
}

/// One column of a shaded band: x with the low/high edges in pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BandPoint {
    pub x: f32,
    pub y_low: f32,
    pub y_high: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LineScene {
    pub mean_path: Vec<Point>,
    pub hdi50: Vec<BandPoint>,
    pub outer: Vec<BandPoint>,
    pub headline: Label,
    pub month: Label,
    pub tracking: TrackingLine,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration { Duration::from_millis(v) }

    #[test]
    fn tween_interpolates_then_holds() {
        let mut t = Tween::fixed(0.0);
        t.animate_to(1.0, ms(1000), ms(200));
        assert_eq!(t.value_at(ms(1000)), 0.0);
        assert!((t.value_at(ms(1100)) - 0.5).abs() < 1e-6);
        assert_eq!(t.value_at(ms(1200)), 1.0);
        assert_eq!(t.value_at(ms(5000)), 1.0);
        assert!(t.is_settled(ms(1200)));
    }

    #[test]
    fn retarget_mid_flight_starts_from_current_value() {
        let mut t = Tween::fixed(4.0);
        t.animate_to(0.0, ms(0), ms(200));
        t.animate_to(4.0, ms(100), ms(200));
        assert!((t.value_at(ms(100)) - 2.0).abs() < 1e-6);
        assert_eq!(t.target(), 4.0);
    }
}
