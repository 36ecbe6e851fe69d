// File: crates/popularity-core/src/style.rs
// Summary: Colours, marker styles, transition timing and light/dark themes.

use std::time::Duration;

use skia_safe as skia;

/// Opaque sRGB colour, renderer-agnostic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self { Self { r, g, b } }

    /// `0xRRGGBB`.
    pub const fn from_hex(hex: u32) -> Self {
        Self::new((hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
    }

    pub fn to_skia(self, opacity: f32) -> skia::Color {
        let a = (opacity.clamp(0.0, 1.0) * 255.0).round() as u8;
        skia::Color::from_argb(a, self.r, self.g, self.b)
    }
}

pub const WHITE: Rgb = Rgb::from_hex(0xffffff);
pub const BLACK: Rgb = Rgb::from_hex(0x000000);
pub const STEELBLUE: Rgb = Rgb::from_hex(0x4682b4);
/// Nord frost; fresh markers and the HDI bands.
pub const FROST: Rgb = Rgb::from_hex(0x81a1c1);
/// Nord snow storm; markers after the pointer leaves.
pub const SNOW: Rgb = Rgb::from_hex(0xd8dee9);
/// Nord polar night; markers of the selected pollster.
pub const POLAR_NIGHT: Rgb = Rgb::from_hex(0x2e3440);

/// Every animated style change runs this long.
pub const TRANSITION: Duration = Duration::from_millis(200);

pub const MARKER_RADIUS: f32 = 4.0;
/// Extra pixels around a marker that still count as "over" it.
pub const HIT_SLOP: f32 = 2.0;
/// Scatter tooltip sits this far right of the pointer so it does not cover the marker.
pub const SCATTER_TOOLTIP_OFFSET: (f32, f32) = (90.0, 0.0);
/// Headline placement relative to the located prediction.
pub const HEADLINE_OFFSET: (f32, f32) = (15.0, -25.0);

pub const HDI_OPACITY: f32 = 0.2;
pub const MEAN_STROKE_WIDTH: f32 = 4.0;
pub const TRACKING_DASH: [f32; 2] = [5.0, 1.0];
pub const HEADLINE_SIZE: f32 = 34.0;

/// Target attributes for a poll marker. `opacity: None` leaves the current opacity alone.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MarkerStyle {
    pub fill: Rgb,
    pub stroke: Rgb,
    pub radius: f32,
    pub opacity: Option<f32>,
}

impl MarkerStyle {
    /// As first drawn.
    pub const fn initial() -> Self {
        Self { fill: FROST, stroke: WHITE, radius: MARKER_RADIUS, opacity: Some(0.5) }
    }

    /// Restored when the pointer leaves without an active selection.
    pub const fn unselected() -> Self {
        Self { fill: SNOW, stroke: WHITE, radius: MARKER_RADIUS, opacity: Some(1.0) }
    }

    /// Markers of the clicked pollster.
    pub const fn selected() -> Self {
        Self { fill: POLAR_NIGHT, stroke: WHITE, radius: MARKER_RADIUS, opacity: Some(1.0) }
    }

    /// Markers of every other pollster while a selection is active.
    pub const fn hidden() -> Self {
        Self { fill: WHITE, stroke: WHITE, radius: 0.0, opacity: None }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct Theme {
    pub name: &'static str,
    pub background: Rgb,
    pub grid: Rgb,
    pub axis_line: Rgb,
    pub axis_label: Rgb,
    pub text: Rgb,
    pub tooltip_fill: Rgb,
    pub tooltip_border: Rgb,
    pub mean_line: Rgb,
    pub hdi_fill: Rgb,
    pub tracking_line: Rgb,
}

impl Theme {
    /// White page, as the dashboard is published.
    pub fn light() -> Self {
        Self {
            name: "light",
            background: WHITE,
            grid: Rgb::new(236, 239, 244),
            axis_line: Rgb::new(60, 60, 70),
            axis_label: Rgb::new(20, 20, 30),
            text: BLACK,
            tooltip_fill: WHITE,
            tooltip_border: BLACK,
            mean_line: STEELBLUE,
            hdi_fill: FROST,
            tracking_line: BLACK,
        }
    }

    pub fn dark() -> Self {
        Self {
            name: "dark",
            background: Rgb::new(18, 18, 20),
            grid: Rgb::new(40, 40, 45),
            axis_line: Rgb::new(180, 180, 190),
            axis_label: Rgb::new(235, 235, 245),
            text: Rgb::new(235, 235, 245),
            tooltip_fill: POLAR_NIGHT,
            tooltip_border: SNOW,
            mean_line: Rgb::new(64, 160, 255),
            hdi_fill: FROST,
            tracking_line: Rgb::new(255, 230, 70),
        }
    }
}

impl Default for Theme {
    fn default() -> Self { Self::light() }
}

/// Return a list of built-in theme presets.
pub fn presets() -> Vec<Theme> {
    vec![Theme::light(), Theme::dark()]
}

/// Find a theme by its `name`, falling back to light.
pub fn find(name: &str) -> Theme {
    for t in presets() { if t.name.eq_ignore_ascii_case(name) { return t; } }
    Theme::light()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_constants_unpack_to_channels() {
        assert_eq!(SNOW, Rgb::new(0xd8, 0xde, 0xe9));
        assert_eq!(POLAR_NIGHT, Rgb::new(0x2e, 0x34, 0x40));
    }
}
