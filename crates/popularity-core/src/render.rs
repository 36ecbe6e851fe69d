// File: crates/popularity-core/src/render.rs
// Summary: Skia frame painting for both charts; raster (PNG / RGBA8) output.

use std::path::Path;

use anyhow::Result;
use skia_safe as skia;

use crate::chart::{ChartLayout, LineChart, RenderOptions, ScatterChart};
use crate::grid::{percent_ticks, year_ticks};
use crate::scene::BandPoint;
use crate::style::{Rgb, HDI_OPACITY, MEAN_STROKE_WIDTH, TRACKING_DASH};
use crate::text::TextShaper;

const TICK_LEN: f32 = 6.0;
const TICK_FONT: f32 = 11.0;
const TOOLTIP_FONT: f32 = 13.0;
const TOOLTIP_PADDING: f32 = 10.0;
const TOOLTIP_RADIUS: f32 = 5.0;

/// Raster output shared by both charts. Implementors only paint the plot contents.
pub trait ChartRender {
    fn layout(&self) -> &ChartLayout;

    /// Series, clipped to the plot area. Canvas origin is the plot's top-left.
    fn paint_series(&self, canvas: &skia::Canvas, opts: &RenderOptions);

    /// Annotations and tooltips, unclipped. Canvas origin is the plot's top-left.
    fn paint_overlay(&self, canvas: &skia::Canvas, opts: &RenderOptions, text: Option<&TextShaper>);

    /// Paint a whole frame onto `canvas`, whose origin is the surface's top-left.
    /// Shared by the raster surface and the SVG canvas.
    fn paint_frame(&self, canvas: &skia::Canvas, opts: &RenderOptions) {
        let layout = *self.layout();
        let text = opts.draw_labels.then(TextShaper::new);

        canvas.clear(opts.theme.background.to_skia(1.0));
        draw_frame(canvas, &layout, opts, text.as_ref());

        let (l, t) = (layout.insets.left as f32, layout.insets.top as f32);
        canvas.save();
        canvas.translate((l, t));
        canvas.clip_rect(
            skia::Rect::from_wh(layout.plot_width(), layout.plot_height()),
            skia::ClipOp::Intersect,
            true,
        );
        self.paint_series(canvas, opts);
        canvas.restore();

        canvas.save();
        canvas.translate((l, t));
        self.paint_overlay(canvas, opts, text.as_ref());
        canvas.restore();
    }

    /// Render a frame to a CPU raster surface.
    fn render_surface(&self, opts: &RenderOptions) -> Result<skia::Surface> {
        let layout = *self.layout();
        let mut surface = skia::surfaces::raster_n32_premul((layout.width, layout.height))
            .ok_or_else(|| anyhow::anyhow!("failed to create raster surface"))?;
        self.paint_frame(surface.canvas(), opts);
        Ok(surface)
    }

    fn render_to_png_bytes(&self, opts: &RenderOptions) -> Result<Vec<u8>> {
        let mut surface = self.render_surface(opts)?;
        let image = surface.image_snapshot();
        #[allow(deprecated)]
        let data = image
            .encode_to_data(skia::EncodedImageFormat::PNG)
            .ok_or_else(|| anyhow::anyhow!("encode PNG failed"))?;
        Ok(data.as_bytes().to_vec())
    }

    /// Render to a PNG at `output_png_path`.
    fn render_to_png(&self, opts: &RenderOptions, output_png_path: impl AsRef<Path>) -> Result<()>
    where
        Self: Sized,
    {
        let bytes = self.render_to_png_bytes(opts)?;
        write_creating_dirs(output_png_path.as_ref(), &bytes)
    }

    /// Unpremultiplied RGBA8 pixels: (pixels, width, height, row stride in bytes).
    fn render_to_rgba8(&self, opts: &RenderOptions) -> Result<(Vec<u8>, u32, u32, usize)> {
        let mut surface = self.render_surface(opts)?;
        let (w, h) = (surface.width(), surface.height());
        let info = skia::ImageInfo::new((w, h), skia::ColorType::RGBA8888, skia::AlphaType::Unpremul, None);
        let stride = w as usize * 4;
        let mut pixels = vec![0u8; stride * h as usize];
        if !surface.read_pixels(&info, &mut pixels, stride, (0, 0)) {
            anyhow::bail!("read_pixels failed");
        }
        Ok((pixels, w as u32, h as u32, stride))
    }
}

pub(crate) fn write_creating_dirs(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, bytes)?;
    Ok(())
}

impl ChartRender for ScatterChart {
    fn layout(&self) -> &ChartLayout { ScatterChart::layout(self) }

    fn paint_series(&self, canvas: &skia::Canvas, opts: &RenderOptions) {
        let mut fill = fill_paint(Rgb::new(0, 0, 0), 1.0);
        let mut stroke = stroke_paint(Rgb::new(0, 0, 0), 1.0, 1.0);
        for m in &self.scene().markers {
            let r = m.radius.value_at(opts.at);
            if r <= 0.0 {
                continue;
            }
            let op = m.opacity.value_at(opts.at);
            fill.set_color(m.fill.to_skia(op));
            stroke.set_color(m.stroke.to_skia(op));
            canvas.draw_circle((m.center.x, m.center.y), r, &fill);
            canvas.draw_circle((m.center.x, m.center.y), r, &stroke);
        }
    }

    fn paint_overlay(&self, canvas: &skia::Canvas, opts: &RenderOptions, text: Option<&TextShaper>) {
        let tip = &self.scene().tooltip;
        let op = tip.opacity.value_at(opts.at);
        if op <= 0.0 || tip.lines.is_empty() {
            return;
        }
        let (tw, th) = match text {
            Some(t) => t.block_size(&tip.lines, TOOLTIP_FONT),
            None => estimate_block(&tip.lines, TOOLTIP_FONT),
        };
        let rect = skia::Rect::from_xywh(
            tip.anchor.x,
            tip.anchor.y,
            tw + 2.0 * TOOLTIP_PADDING,
            th + 2.0 * TOOLTIP_PADDING,
        );
        let theme = &opts.theme;
        canvas.draw_round_rect(rect, TOOLTIP_RADIUS, TOOLTIP_RADIUS, &fill_paint(theme.tooltip_fill, op));
        canvas.draw_round_rect(rect, TOOLTIP_RADIUS, TOOLTIP_RADIUS, &stroke_paint(theme.tooltip_border, op, 1.0));
        if let Some(t) = text {
            t.draw_lines(
                canvas,
                &tip.lines,
                rect.left + TOOLTIP_PADDING,
                rect.top + TOOLTIP_PADDING,
                TOOLTIP_FONT,
                theme.text.to_skia(op),
            );
        }
    }
}

impl ChartRender for LineChart {
    fn layout(&self) -> &ChartLayout { LineChart::layout(self) }

    fn paint_series(&self, canvas: &skia::Canvas, opts: &RenderOptions) {
        let scene = self.scene();
        let theme = &opts.theme;
        let band_fill = fill_paint(theme.hdi_fill, HDI_OPACITY);
        if let Some(path) = band_path(&scene.outer) {
            canvas.draw_path(&path, &band_fill);
        }
        if let Some(path) = band_path(&scene.hdi50) {
            canvas.draw_path(&path, &band_fill);
        }

        if scene.mean_path.len() >= 2 {
            let mut path = skia::Path::new();
            path.move_to((scene.mean_path[0].x, scene.mean_path[0].y));
            for p in scene.mean_path.iter().skip(1) {
                path.line_to((p.x, p.y));
            }
            canvas.draw_path(&path, &stroke_paint(theme.mean_line, 1.0, MEAN_STROKE_WIDTH));
        }
    }

    fn paint_overlay(&self, canvas: &skia::Canvas, opts: &RenderOptions, text: Option<&TextShaper>) {
        let scene = self.scene();
        let theme = &opts.theme;

        let line = &scene.tracking;
        let op = line.opacity.value_at(opts.at);
        if op > 0.0 {
            let mut paint = stroke_paint(theme.tracking_line, op, 1.0);
            if let Some(dash) = skia::PathEffect::dash(&TRACKING_DASH, 0.0) {
                paint.set_path_effect(dash);
            }
            canvas.draw_line((line.x, line.y1), (line.x, line.y2), &paint);
        }

        let Some(t) = text else { return };
        for label in [&scene.headline, &scene.month] {
            let op = label.opacity.value_at(opts.at);
            if op > 0.0 && !label.text.is_empty() {
                t.draw_middle(canvas, &label.text, label.pos.x, label.pos.y, label.size, theme.text.to_skia(op));
            }
        }
    }
}

// ---- helpers ----------------------------------------------------------------

fn fill_paint(color: Rgb, opacity: f32) -> skia::Paint {
    let mut paint = skia::Paint::default();
    paint.set_anti_alias(true);
    paint.set_style(skia::paint::Style::Fill);
    paint.set_color(color.to_skia(opacity));
    paint
}

fn stroke_paint(color: Rgb, opacity: f32, width: f32) -> skia::Paint {
    let mut paint = skia::Paint::default();
    paint.set_anti_alias(true);
    paint.set_style(skia::paint::Style::Stroke);
    paint.set_stroke_width(width);
    paint.set_color(color.to_skia(opacity));
    paint
}

/// Closed area: along the high edge, back along the low edge.
fn band_path(band: &[BandPoint]) -> Option<skia::Path> {
    let first = band.first()?;
    let mut path = skia::Path::new();
    path.move_to((first.x, first.y_high));
    for b in band.iter().skip(1) {
        path.line_to((b.x, b.y_high));
    }
    for b in band.iter().rev() {
        path.line_to((b.x, b.y_low));
    }
    path.close();
    Some(path)
}

/// Font-free size guess, for frames rendered without text.
fn estimate_block(lines: &[String], size: f32) -> (f32, f32) {
    let chars = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
    (chars as f32 * size * 0.55, lines.len() as f32 * size * 1.3)
}

/// Background grid, axis lines, ticks and tick labels, in surface coordinates.
fn draw_frame(canvas: &skia::Canvas, layout: &ChartLayout, opts: &RenderOptions, text: Option<&TextShaper>) {
    let theme = &opts.theme;
    let (l, t) = (layout.insets.left as f32, layout.insets.top as f32);
    let (r, b) = (l + layout.plot_width(), t + layout.plot_height());
    let x = layout.time_scale();
    let y = layout.value_scale();

    let grid = stroke_paint(theme.grid, 1.0, 1.0);
    let years = year_ticks(&layout.domain);
    let pcts = percent_ticks();
    for d in &years {
        let px = l + x.to_px(*d);
        canvas.draw_line((px, t), (px, b), &grid);
    }
    for v in &pcts {
        let py = t + y.to_px(*v);
        canvas.draw_line((l, py), (r, py), &grid);
    }

    let axis = stroke_paint(theme.axis_line, 1.0, 1.0);
    canvas.draw_line((l, b), (r, b), &axis);
    canvas.draw_line((l, t), (l, b), &axis);

    let label = theme.axis_label.to_skia(1.0);
    for d in &years {
        let px = l + x.to_px(*d);
        canvas.draw_line((px, b), (px, b + TICK_LEN), &axis);
        if let Some(tx) = text {
            let s = d.format("%Y").to_string();
            let w = tx.measure_width(&s, TICK_FONT);
            tx.draw_left(canvas, &s, px - w * 0.5, b + TICK_LEN + TICK_FONT + 2.0, TICK_FONT, label);
        }
    }
    for v in &pcts {
        let py = t + y.to_px(*v);
        canvas.draw_line((l - TICK_LEN, py), (l, py), &axis);
        if let Some(tx) = text {
            let s = format!("{v:.0}");
            let w = tx.measure_width(&s, TICK_FONT);
            tx.draw_middle(canvas, &s, l - TICK_LEN - 3.0 - w, py, TICK_FONT, label);
        }
    }
}
