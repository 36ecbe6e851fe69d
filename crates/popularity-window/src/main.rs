// File: crates/popularity-window/src/main.rs
// Summary: Windowed demo: renders one chart at a time via RGBA blit (CPU) using winit + softbuffer,
// feeding cursor motion, leave and clicks into the chart's pointer controller.
// Tab switches between the scatter and the line chart; Escape quits.

use std::num::NonZeroU32;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use popularity_core::loader::{POLLS_URL, PREDICTIONS_URL};
use popularity_core::logging::init_logging;
use popularity_core::{
    style, ChartLayout, ChartRender, FeedSource, LineChart, Point, PointerEvent, PointerTracker, RenderOptions,
    ScatterChart,
};
use tracing::{debug, error, info};
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, Event, KeyboardInput, MouseButton, VirtualKeyCode, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::WindowBuilder;

/// Interactive approval charts.
#[derive(Parser, Debug)]
#[command(name = "popularity-window", version, about)]
struct Args {
    /// Polls feed: URL or local CSV path
    #[arg(long, default_value = POLLS_URL)]
    polls: String,

    /// Predictions feed: URL or local CSV path
    #[arg(long, default_value = PREDICTIONS_URL)]
    predictions: String,

    /// Colour theme: light or dark
    #[arg(long, default_value = "light")]
    theme: String,
}

/// One of the two charts, with the tracker that derives enter/leave for it.
enum Panel {
    Scatter(ScatterChart),
    Line(LineChart),
}

impl Panel {
    fn name(&self) -> &'static str {
        match self {
            Panel::Scatter(_) => "scatter",
            Panel::Line(_) => "line",
        }
    }

    fn layout(&self) -> ChartLayout {
        match self {
            Panel::Scatter(c) => *c.layout(),
            Panel::Line(c) => *c.layout(),
        }
    }

    /// Raw cursor sample (plot-local, `None` once outside the window) -> controller event.
    fn track(&mut self, tracker: &mut PointerTracker, pos: Option<Point>, now: Duration) {
        match self {
            Panel::Scatter(c) => {
                if let Some(ev) = tracker.track(c, pos, now) {
                    c.handle(ev, now);
                }
            }
            Panel::Line(c) => {
                if let Some(ev) = tracker.track(c, pos, now) {
                    c.handle(ev, now);
                }
            }
        }
    }

    fn click(&mut self, pos: Point, now: Duration) {
        let ev = PointerEvent::Click { pos };
        match self {
            Panel::Scatter(c) => c.handle(ev, now),
            Panel::Line(c) => c.handle(ev, now),
        }
    }

    fn is_animating(&self, now: Duration) -> bool {
        match self {
            Panel::Scatter(c) => c.is_animating(now),
            Panel::Line(c) => c.is_animating(now),
        }
    }

    fn render_to_rgba8(&self, opts: &RenderOptions) -> Result<(Vec<u8>, u32, u32, usize)> {
        match self {
            Panel::Scatter(c) => c.render_to_rgba8(opts),
            Panel::Line(c) => c.render_to_rgba8(opts),
        }
    }
}

fn load_panels(args: &Args) -> Vec<Panel> {
    let layout = ChartLayout::default();
    let mut panels = Vec::new();
    match FeedSource::parse(&args.polls).load_polls() {
        Ok(polls) => panels.push(Panel::Scatter(ScatterChart::new(polls, layout))),
        Err(e) => error!("scatter chart skipped: failed to load polls from '{}': {e}", args.polls),
    }
    match FeedSource::parse(&args.predictions).load_predictions() {
        Ok(preds) => match LineChart::new(preds, layout) {
            Ok(chart) => panels.push(Panel::Line(chart)),
            Err(e) => error!("line chart skipped: predictions out of order at record {}", e.at),
        },
        Err(e) => error!("line chart skipped: failed to load predictions from '{}': {e}", args.predictions),
    }
    panels
}

fn main() -> Result<()> {
    init_logging();
    let args = Args::parse();
    let mut panels = load_panels(&args);
    if panels.is_empty() {
        anyhow::bail!("no chart could be loaded");
    }
    let theme = style::find(&args.theme);
    let layout = panels[0].layout();

    let event_loop = EventLoop::new();
    let window = WindowBuilder::new()
        .with_title("Approval ratings")
        .with_inner_size(PhysicalSize::new(layout.width as u32, layout.height as u32))
        .with_resizable(false)
        .build(&event_loop)
        .context("build window")?;

    let context = unsafe { softbuffer::Context::new(&window) }
        .map_err(|e| anyhow::anyhow!("softbuffer context: {e}"))?;
    let mut surface = unsafe { softbuffer::Surface::new(&context, &window) }
        .map_err(|e| anyhow::anyhow!("softbuffer surface: {e}"))?;

    let started = Instant::now();
    let mut idx = 0usize;
    let mut tracker = PointerTracker::new();
    let mut cursor: Option<Point> = None;
    info!(chart = panels[idx].name(), "Tab switches chart, Escape quits");

    event_loop.run(move |event, _, cf| {
        *cf = ControlFlow::Wait;
        let now = started.elapsed();
        match event {
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::CloseRequested => *cf = ControlFlow::Exit,
                WindowEvent::CursorMoved { position, .. } => {
                    let surface_pos = Point::new(position.x as f32, position.y as f32);
                    let pos = panels[idx].layout().to_plot(surface_pos);
                    cursor = Some(pos);
                    panels[idx].track(&mut tracker, Some(pos), now);
                    window.request_redraw();
                }
                WindowEvent::CursorLeft { .. } => {
                    cursor = None;
                    panels[idx].track(&mut tracker, None, now);
                    window.request_redraw();
                }
                WindowEvent::MouseInput { state: ElementState::Pressed, button: MouseButton::Left, .. } => {
                    if let Some(pos) = cursor {
                        panels[idx].click(pos, now);
                        window.request_redraw();
                    }
                }
                WindowEvent::KeyboardInput {
                    input: KeyboardInput { state: ElementState::Pressed, virtual_keycode: Some(key), .. },
                    ..
                } => match key {
                    VirtualKeyCode::Escape => *cf = ControlFlow::Exit,
                    VirtualKeyCode::Tab => {
                        // the chart being hidden sees the pointer leave
                        panels[idx].track(&mut tracker, None, now);
                        idx = (idx + 1) % panels.len();
                        panels[idx].track(&mut tracker, cursor, now);
                        debug!(chart = panels[idx].name(), "switched chart");
                        window.request_redraw();
                    }
                    _ => {}
                },
                _ => {}
            },
            Event::MainEventsCleared => {
                if panels[idx].is_animating(now) {
                    window.request_redraw();
                    *cf = ControlFlow::WaitUntil(Instant::now() + Duration::from_millis(16));
                }
            }
            Event::RedrawRequested(_) => {
                let opts = RenderOptions { theme, at: now, ..RenderOptions::default() };
                if let Err(e) = draw(&mut surface, &window, &panels[idx], &opts) {
                    error!("draw failed: {e:#}");
                }
            }
            _ => {}
        }
    })
}

/// Render the active chart and blit it into the window's frame buffer (0RGB u32).
fn draw(
    surface: &mut softbuffer::Surface,
    window: &winit::window::Window,
    panel: &Panel,
    opts: &RenderOptions,
) -> Result<()> {
    let size = window.inner_size();
    let (Some(w), Some(h)) = (NonZeroU32::new(size.width), NonZeroU32::new(size.height)) else {
        return Ok(());
    };
    surface.resize(w, h).map_err(|e| anyhow::anyhow!("resize: {e}"))?;

    let (rgba, cw, ch, stride) = panel.render_to_rgba8(opts)?;
    let bg = opts.theme.background;
    let bg = (bg.r as u32) << 16 | (bg.g as u32) << 8 | bg.b as u32;
    let (fw, fh) = (size.width as usize, size.height as usize);

    let mut frame = surface.buffer_mut().map_err(|e| anyhow::anyhow!("frame: {e}"))?;
    for y in 0..fh {
        for x in 0..fw {
            frame[y * fw + x] = if x < cw as usize && y < ch as usize {
                let px = &rgba[y * stride + x * 4..y * stride + x * 4 + 4];
                (px[0] as u32) << 16 | (px[1] as u32) << 8 | px[2] as u32
            } else {
                bg
            };
        }
    }
    frame.present().map_err(|e| anyhow::anyhow!("present: {e}"))?;
    Ok(())
}
