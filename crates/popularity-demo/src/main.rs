// File: crates/popularity-demo/src/main.rs
// Summary: Demo loads the polls and predictions feeds, replays pointer events, writes PNG + SVG per chart.

mod cli;
mod config;

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Parser;
use popularity_core::logging::init_logging;
use popularity_core::style::TRANSITION;
use popularity_core::{
    ChartRender, ChartSvg, LineChart, Point, PointerEvent, RenderOptions, ScatterChart,
};
use tracing::{error, info, warn};

use cli::Args;
use config::DashboardConfig;

fn main() -> Result<()> {
    init_logging();
    let args = Args::parse();
    let cfg = DashboardConfig::resolve(&args)?;
    info!(polls = %cfg.polls, predictions = %cfg.predictions, out_dir = %cfg.out_dir.display(), "starting");

    // a failed feed skips its chart; the other one still renders
    let mut written = 0;
    match scatter(&cfg, &args) {
        Ok(()) => written += 1,
        Err(e) => error!("scatter chart skipped: {e:#}"),
    }
    match line(&cfg, &args) {
        Ok(()) => written += 1,
        Err(e) => error!("line chart skipped: {e:#}"),
    }
    if written == 0 {
        anyhow::bail!("no chart could be rendered");
    }
    Ok(())
}

fn scatter(cfg: &DashboardConfig, args: &Args) -> Result<()> {
    let source = cfg.polls_source();
    let polls = source.load_polls().with_context(|| format!("failed to load polls from '{source}'"))?;
    info!("Loaded {} polls", polls.len());

    let mut chart = ScatterChart::new(polls, cfg.layout());
    let mut now = Duration::ZERO;
    if let Some(pollster) = &args.select {
        let target = chart
            .records()
            .iter()
            .position(|r| &r.pollster_id == pollster)
            .and_then(|i| chart.marker_center(i));
        match target {
            Some(pos) => {
                chart.handle(PointerEvent::Enter { pos }, now);
                chart.handle(PointerEvent::Click { pos }, now);
                info!(pollster = %pollster, "selected pollster");
            }
            None => warn!(pollster = %pollster, "no poll by this pollster; nothing selected"),
        }
    }
    if args.leave {
        chart.handle(PointerEvent::Leave, now);
    }
    now += TRANSITION;

    let opts = RenderOptions { theme: cfg.theme(), at: now, ..RenderOptions::default() };
    write_both(&chart, &opts, &cfg.out_dir, "popularity_scatter")
}

fn line(cfg: &DashboardConfig, args: &Args) -> Result<()> {
    let source = cfg.predictions_source();
    let preds = source
        .load_predictions()
        .with_context(|| format!("failed to load predictions from '{source}'"))?;
    info!("Loaded {} predictions", preds.len());

    let mut chart = LineChart::new(preds, cfg.layout())
        .map_err(|e| anyhow::anyhow!("predictions out of order at record {}", e.at))?;
    let mut now = Duration::ZERO;
    if let Some(date) = args.hover {
        let pos = hover_point(&chart, date);
        chart.handle(PointerEvent::Enter { pos }, now);
        if let Some(r) = chart.located() {
            info!(hovered = %date, located = %r.date, mean = r.mean_pct, "hovered prediction");
        }
    }
    if args.leave {
        chart.handle(PointerEvent::Leave, now);
    }
    now += TRANSITION;

    let opts = RenderOptions { theme: cfg.theme(), at: now, ..RenderOptions::default() };
    write_both(&chart, &opts, &cfg.out_dir, "popularity_line")
}

/// Plot-local point at `date`, halfway down the plot.
fn hover_point(chart: &LineChart, date: NaiveDate) -> Point {
    Point::new(chart.x_scale().to_px(date), chart.layout().plot_height() / 2.0)
}

fn write_both<C: ChartRender>(chart: &C, opts: &RenderOptions, dir: &Path, stem: &str) -> Result<()> {
    let png = out_path(dir, stem, "png");
    chart.render_to_png(opts, &png)?;
    info!("Wrote {}", png.display());
    let svg = png.with_extension("svg");
    chart.render_to_svg(opts, &svg)?;
    info!("Wrote {}", svg.display());
    Ok(())
}

fn out_path(dir: &Path, stem: &str, ext: &str) -> PathBuf {
    dir.join(format!("{stem}.{ext}"))
}
