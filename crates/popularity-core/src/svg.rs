// File: crates/popularity-core/src/svg.rs
// Summary: SVG document output for both charts, painted through Skia's SVG canvas.

use std::path::Path;

use anyhow::{Context, Result};
use skia_safe as skia;

use crate::chart::RenderOptions;
use crate::render::{write_creating_dirs, ChartRender};

/// Vector output. Replays the raster frame onto an SVG canvas, so both formats show the same state.
pub trait ChartSvg {
    fn render_to_svg_string(&self, opts: &RenderOptions) -> Result<String>;

    fn render_to_svg(&self, opts: &RenderOptions, output_svg_path: impl AsRef<Path>) -> Result<()>;
}

impl<T: ChartRender> ChartSvg for T {
    fn render_to_svg_string(&self, opts: &RenderOptions) -> Result<String> {
        let layout = *self.layout();
        let bounds = skia::Rect::from_wh(layout.width as f32, layout.height as f32);
        let canvas = skia::svg::Canvas::new(bounds, None);
        self.paint_frame(&canvas, opts);
        let data = canvas.end();
        String::from_utf8(data.as_bytes().to_vec()).context("svg canvas produced invalid utf-8")
    }

    fn render_to_svg(&self, opts: &RenderOptions, output_svg_path: impl AsRef<Path>) -> Result<()> {
        let doc = self.render_to_svg_string(opts)?;
        write_creating_dirs(output_svg_path.as_ref(), doc.as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::{ChartLayout, LineChart};
    use crate::record::{HdiLevel, Interval, OuterHdi, PredictionRecord};
    use chrono::NaiveDate;

    #[test]
    fn svg_document_has_layout_size() {
        let preds = vec![PredictionRecord {
            date: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
            mean_pct: 40.0,
            hdi50: Interval::new(38.0, 42.0),
            outer: OuterHdi { level: HdiLevel::P95, interval: Interval::new(35.0, 45.0) },
        }];
        let chart = LineChart::new(preds, ChartLayout::default()).expect("sorted");
        let opts = RenderOptions { draw_labels: false, ..RenderOptions::default() };
        let doc = chart.render_to_svg_string(&opts).expect("svg");
        assert!(doc.contains("<svg"));
        assert!(doc.contains(r#"width="800""#));
        assert!(doc.contains(r#"height="500""#));
        assert!(doc.trim_end().ends_with("</svg>"));
    }
}
