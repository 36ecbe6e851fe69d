// File: crates/popularity-core/tests/smoke.rs
// Purpose: End-to-end render smoke tests: PNG, RGBA8 and SVG for both charts.

mod common;

use common::{date, ms, poll, prediction};
use popularity_core::{ChartLayout, ChartRender, ChartSvg, LineChart, Point, PointerEvent, RenderOptions, ScatterChart};

fn scatter() -> ScatterChart {
    ScatterChart::new(
        vec![
            poll("IFOP", date(2021, 6, 2), 41.0),
            poll("Elabe", date(2021, 5, 20), 35.0),
            poll("Harris & Co", date(2019, 3, 10), 48.0),
        ],
        ChartLayout::default(),
    )
}

fn line() -> LineChart {
    let preds = (1..=12).map(|m| prediction(date(2020, m, 15), 35.0 + m as f64)).collect();
    LineChart::new(preds, ChartLayout::default()).expect("sorted")
}

#[test]
fn render_smoke_png() {
    let opts = RenderOptions::default();
    let out = std::path::PathBuf::from("target/test_out/scatter_smoke.png");
    scatter().render_to_png(&opts, &out).expect("render should succeed");
    let meta = std::fs::metadata(&out).expect("output exists");
    assert!(meta.len() > 0, "png should be non-empty");

    let bytes = line().render_to_png_bytes(&opts).expect("render bytes");
    assert!(bytes.starts_with(&[137, 80, 78, 71]), "should be PNG header");
}

#[test]
fn render_rgba8_buffer() {
    let opts = RenderOptions { draw_labels: false, ..RenderOptions::default() };
    let (px, w, h, stride) = line().render_to_rgba8(&opts).expect("rgba render");
    assert_eq!((w, h), (800, 500));
    assert_eq!(w as usize * h as usize * 4, px.len());
    assert_eq!(stride, (w as usize) * 4);
    // opaque white background in the top-left corner
    assert_eq!(&px[0..4], &[255, 255, 255, 255]);
}

#[test]
fn hovered_line_renders_annotations() {
    let mut c = line();
    let px = c.x_scale().to_px(date(2020, 6, 15));
    c.handle(PointerEvent::Enter { pos: Point::new(px, 50.0) }, ms(0));
    let opts = RenderOptions { at: ms(16), ..RenderOptions::default() };
    let bytes = c.render_to_png_bytes(&opts).expect("render hovered");
    assert!(bytes.starts_with(&[137, 80, 78, 71]));

    let hovered = c.render_to_svg_string(&opts).expect("svg hovered");
    let idle = line().render_to_svg_string(&opts).expect("svg idle");
    assert!(hovered.contains("<svg"));
    // tooltip and tracking line add drawing to the same frame
    assert_ne!(hovered, idle);
    assert!(hovered.len() > idle.len());
}

#[test]
fn scatter_svg_reflects_selection() {
    let mut c = scatter();
    let opts = RenderOptions { at: ms(500), ..RenderOptions::default() };
    let before = c.render_to_svg_string(&opts).expect("svg before");
    c.select("IFOP", ms(0));
    let after = c.render_to_svg_string(&opts).expect("svg after");
    assert!(after.trim_end().ends_with("</svg>"));
    assert_ne!(before, after);
}

#[test]
fn svg_written_to_disk() {
    let out = std::path::PathBuf::from("target/test_out/line_smoke.svg");
    line().render_to_svg(&RenderOptions::default(), &out).expect("write svg");
    let text = std::fs::read_to_string(&out).expect("read back");
    assert!(text.contains("<svg"));
    // two HDI bands and the mean line
    assert!(text.matches("<path").count() >= 3);
}
