// File: crates/popularity-core/src/text.rs
// Summary: Text shaper for axis ticks, annotations and multi-line tooltips (Skia textlayout).

use skia_safe as skia;
use skia::textlayout::{FontCollection, Paragraph, ParagraphBuilder, ParagraphStyle, TextStyle};

/// Line advance as a multiple of font size.
const LINE_HEIGHT: f32 = 1.3;

pub struct TextShaper {
    fonts: FontCollection,
}

impl Default for TextShaper {
    fn default() -> Self { Self::new() }
}

impl TextShaper {
    pub fn new() -> Self {
        let mut fc = FontCollection::new();
        // Use system manager fallback
        fc.set_default_font_manager(skia::FontMgr::default(), None);
        Self { fonts: fc }
    }

    fn make_style(size: f32, color: skia::Color) -> TextStyle {
        let mut ts = TextStyle::new();
        ts.set_font_size(size.max(1.0));
        ts.set_color(color);
        ts.set_font_families(&["Segoe UI", "Arial", "Helvetica", "Roboto", "DejaVu Sans", "sans-serif"]);
        ts
    }

    pub fn layout(&self, text: &str, size: f32, color: skia::Color) -> Paragraph {
        let mut pstyle = ParagraphStyle::new();
        pstyle.set_text_align(skia::textlayout::TextAlign::Left);
        let mut builder = ParagraphBuilder::new(&pstyle, &self.fonts);
        let style = Self::make_style(size, color);
        builder.push_style(&style);
        builder.add_text(text);
        let mut paragraph = builder.build();
        paragraph.layout(10_000.0);
        paragraph
    }

    pub fn measure_width(&self, text: &str, size: f32) -> f32 {
        let p = self.layout(text, size, skia::Color::from_argb(0, 0, 0, 0));
        // width of the longest line
        p.longest_line()
    }

    /// Draw with the baseline at `y`.
    pub fn draw_left(&self, canvas: &skia::Canvas, text: &str, x: f32, y: f32, size: f32, color: skia::Color) {
        let mut p = self.layout(text, size, color);
        // Paragraph draws from top-left; adjust baseline by glyph height approximation
        p.paint(canvas, (x, y - size * 0.8));
    }

    /// Vertically centred on `y`, like SVG `alignment-baseline: middle`.
    pub fn draw_middle(&self, canvas: &skia::Canvas, text: &str, x: f32, y: f32, size: f32, color: skia::Color) {
        self.draw_left(canvas, text, x, y + size * 0.35, size, color);
    }

    /// Size of a block of `lines` at `size`: (widest line, total height).
    pub fn block_size(&self, lines: &[String], size: f32) -> (f32, f32) {
        let w = lines.iter().map(|l| self.measure_width(l, size)).fold(0.0f32, f32::max);
        (w, lines.len() as f32 * size * LINE_HEIGHT)
    }

    /// Draw `lines` top-down with the first line's top at `(x, y)`.
    pub fn draw_lines(&self, canvas: &skia::Canvas, lines: &[String], x: f32, y: f32, size: f32, color: skia::Color) {
        for (i, line) in lines.iter().enumerate() {
            let top = y + i as f32 * size * LINE_HEIGHT;
            self.layout(line, size, color).paint(canvas, (x, top));
        }
    }
}
