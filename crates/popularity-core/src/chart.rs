// File: crates/popularity-core/src/chart.rs
// Summary: Scatter and line chart pipelines: records -> scales -> index -> scene, plus event dispatch.

use std::time::Duration;

use tracing::debug;

use crate::geometry::{Point, RectF};
use crate::index::{NotSorted, PointIndex};
use crate::interaction::{
    hit_marker, LineController, LineView, PointerEvent, ScatterController, ScatterView, SensingRegion,
};
use crate::record::{PollRecord, PredictionRecord};
use crate::scale::{TimeScale, ValueScale};
use crate::scene::{BandPoint, Label, LineScene, Marker, ScatterScene, TrackingLine, Tween};
use crate::style::{MarkerStyle, Theme, HEADLINE_SIZE};
use crate::types::{DateDomain, Insets, HEIGHT, WIDTH};

/// Surface size, margins and the fixed date window. Decides every pixel position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChartLayout {
    pub width: i32,
    pub height: i32,
    pub insets: Insets,
    pub domain: DateDomain,
}

impl Default for ChartLayout {
    fn default() -> Self {
        Self { width: WIDTH, height: HEIGHT, insets: Insets::default(), domain: DateDomain::fixed() }
    }
}

impl ChartLayout {
    pub fn plot_width(&self) -> f32 {
        (self.width - self.insets.hsum() as i32).max(1) as f32
    }

    pub fn plot_height(&self) -> f32 {
        (self.height - self.insets.vsum() as i32).max(1) as f32
    }

    /// Plot area in plot-local coordinates.
    pub fn plot_rect(&self) -> RectF {
        RectF::from_ltwh(0.0, 0.0, self.plot_width(), self.plot_height())
    }

    pub fn time_scale(&self) -> TimeScale {
        TimeScale::new(self.domain, 0.0, self.plot_width())
    }

    pub fn value_scale(&self) -> ValueScale {
        ValueScale::percent(0.0, self.plot_height())
    }

    /// Surface pixel -> plot-local pixel.
    pub fn to_plot(&self, surface: Point) -> Point {
        surface.offset(-(self.insets.left as f32), -(self.insets.top as f32))
    }
}

/// How to draw a frame.
#[derive(Clone, Copy, Debug)]
pub struct RenderOptions {
    pub theme: Theme,
    /// Axis and annotation text; off for pixel-exact snapshots.
    pub draw_labels: bool,
    /// Sampling time for running transitions.
    pub at: Duration,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self { theme: Theme::light(), draw_labels: true, at: Duration::ZERO }
    }
}

/// Poll scatter: one marker per poll, tooltip on hover, pollster highlight on click.
pub struct ScatterChart {
    layout: ChartLayout,
    records: Vec<PollRecord>,
    x: TimeScale,
    y: ValueScale,
    index: PointIndex,
    scene: ScatterScene,
    controller: ScatterController,
}

impl ScatterChart {
    pub fn new(records: Vec<PollRecord>, layout: ChartLayout) -> Self {
        let x = layout.time_scale();
        let y = layout.value_scale();
        let index = PointIndex::from_unsorted(records.iter().map(|r| r.field_date));
        let markers = records
            .iter()
            .enumerate()
            .map(|(i, r)| Marker::new(i, Point::new(x.to_px(r.field_date), y.to_px(r.approve_pct)), MarkerStyle::initial()))
            .collect();
        debug!(polls = records.len(), "built scatter chart");
        Self {
            layout,
            records,
            x,
            y,
            index,
            scene: ScatterScene { markers, ..Default::default() },
            controller: ScatterController::new(),
        }
    }

    pub fn layout(&self) -> &ChartLayout { &self.layout }
    pub fn records(&self) -> &[PollRecord] { &self.records }
    pub fn scene(&self) -> &ScatterScene { &self.scene }
    pub fn controller(&self) -> &ScatterController { &self.controller }
    pub fn x_scale(&self) -> &TimeScale { &self.x }
    pub fn y_scale(&self) -> &ValueScale { &self.y }

    pub fn selected(&self) -> Option<&str> { self.controller.selected() }

    fn view(&self) -> ScatterView<'_> {
        ScatterView { records: &self.records, index: &self.index, x: &self.x }
    }

    /// Dispatch one pointer event (plot-local coordinates).
    pub fn handle(&mut self, event: PointerEvent, now: Duration) {
        let view = ScatterView { records: &self.records, index: &self.index, x: &self.x };
        self.controller.handle(event, now, &view, &mut self.scene);
    }

    /// Select a pollster directly, as a click on one of its markers would.
    pub fn select(&mut self, pollster: &str, now: Duration) {
        let view = ScatterView { records: &self.records, index: &self.index, x: &self.x };
        self.controller.select(pollster, now, &view, &mut self.scene);
    }

    /// Record whose marker is under `pos`.
    pub fn hit_test(&self, pos: Point, now: Duration) -> Option<usize> {
        hit_marker(&self.view(), &self.scene, pos, now)
    }

    /// Plot-local centre of the marker for `record`.
    pub fn marker_center(&self, record: usize) -> Option<Point> {
        self.scene.markers.get(record).map(|m| m.center)
    }

    pub fn is_animating(&self, now: Duration) -> bool {
        !self.scene.tooltip.opacity.is_settled(now)
            || self.scene.markers.iter().any(|m| !m.radius.is_settled(now) || !m.opacity.is_settled(now))
    }
}

impl SensingRegion for ScatterChart {
    fn senses(&self, pos: Point, now: Duration) -> bool {
        self.hit_test(pos, now).is_some()
    }
}

/// Prediction line: mean path over HDI bands, tracking annotations on hover.
pub struct LineChart {
    layout: ChartLayout,
    records: Vec<PredictionRecord>,
    x: TimeScale,
    y: ValueScale,
    index: PointIndex,
    scene: LineScene,
    controller: LineController,
}

impl LineChart {
    /// `records` must be ascending by date.
    pub fn new(records: Vec<PredictionRecord>, layout: ChartLayout) -> Result<Self, NotSorted> {
        let x = layout.time_scale();
        let y = layout.value_scale();
        let index = PointIndex::from_sorted(records.iter().map(|r| r.date))?;
        let plot_height = layout.plot_height();

        let mean_path = records.iter().map(|r| Point::new(x.to_px(r.date), y.to_px(r.mean_pct))).collect();
        let band = |pick: fn(&PredictionRecord) -> (f64, f64)| -> Vec<BandPoint> {
            records
                .iter()
                .map(|r| {
                    let (lo, hi) = pick(r);
                    BandPoint { x: x.to_px(r.date), y_low: y.to_px(lo), y_high: y.to_px(hi) }
                })
                .collect()
        };
        let hdi50 = band(|r| (r.hdi50.low, r.hdi50.high));
        let outer = band(|r| (r.outer.interval.low, r.outer.interval.high));

        let scene = LineScene {
            mean_path,
            hdi50,
            outer,
            headline: Label::hidden(HEADLINE_SIZE),
            month: Label::hidden(HEADLINE_SIZE),
            tracking: TrackingLine { x: 0.0, y1: 0.0, y2: plot_height, opacity: Tween::fixed(0.0) },
        };
        debug!(predictions = records.len(), "built line chart");
        Ok(Self { layout, records, x, y, index, scene, controller: LineController::new() })
    }

    pub fn layout(&self) -> &ChartLayout { &self.layout }
    pub fn records(&self) -> &[PredictionRecord] { &self.records }
    pub fn scene(&self) -> &LineScene { &self.scene }
    pub fn controller(&self) -> &LineController { &self.controller }
    pub fn x_scale(&self) -> &TimeScale { &self.x }
    pub fn y_scale(&self) -> &ValueScale { &self.y }
    pub fn index(&self) -> &PointIndex { &self.index }

    pub fn handle(&mut self, event: PointerEvent, now: Duration) {
        let view = LineView {
            records: &self.records,
            index: &self.index,
            x: &self.x,
            y: &self.y,
            plot_height: self.layout.plot_height(),
        };
        self.controller.handle(event, now, &view, &mut self.scene);
    }

    /// Prediction the annotations currently describe.
    pub fn located(&self) -> Option<&PredictionRecord> {
        self.controller.located().and_then(|i| self.records.get(i))
    }

    pub fn is_animating(&self, now: Duration) -> bool {
        !self.scene.headline.opacity.is_settled(now)
            || !self.scene.month.opacity.is_settled(now)
            || !self.scene.tracking.opacity.is_settled(now)
    }
}

impl SensingRegion for LineChart {
    fn senses(&self, pos: Point, _now: Duration) -> bool {
        self.layout.plot_rect().contains(pos)
    }
}
