// File: crates/popularity-core/src/interaction.rs
// Summary: Pointer state machines for the scatter and line charts, plus raw-cursor tracking.
//
// Both controllers follow the same shape: `Idle` until the pointer enters the chart's
// sensing region, `Hovering` until it leaves. Moves are ignored while idle. All effects
// are attribute changes on the chart's scene; records are never touched.

use std::time::Duration;

use tracing::{debug, trace};

use crate::annotation::{poll_tooltip, LineAnnotation};
use crate::geometry::Point;
use crate::index::PointIndex;
use crate::record::{PollRecord, PredictionRecord};
use crate::scale::{TimeScale, ValueScale};
use crate::scene::{LineScene, ScatterScene};
use crate::style::{MarkerStyle, HEADLINE_OFFSET, HIT_SLOP, MARKER_RADIUS, SCATTER_TOOLTIP_OFFSET, TRANSITION};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum HoverState {
    #[default]
    Idle,
    Hovering,
}

/// Pointer events in plot-local pixels, as dispatched by the host surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerEvent {
    Enter { pos: Point },
    Move { pos: Point },
    Leave,
    Click { pos: Point },
}

/// Whether a plot-local position is inside a chart's interactive area at `now`.
pub trait SensingRegion {
    fn senses(&self, pos: Point, now: Duration) -> bool;
}

/// Derives enter/move/leave from raw cursor samples for hosts that only report motion.
#[derive(Clone, Copy, Debug, Default)]
pub struct PointerTracker {
    inside: bool,
}

impl PointerTracker {
    pub fn new() -> Self { Self::default() }

    pub fn is_inside(&self) -> bool { self.inside }

    /// `pos: None` means the cursor left the surface entirely.
    pub fn track<R: SensingRegion + ?Sized>(
        &mut self,
        region: &R,
        pos: Option<Point>,
        now: Duration,
    ) -> Option<PointerEvent> {
        let sensed = pos.filter(|&p| region.senses(p, now));
        match (self.inside, sensed) {
            (false, Some(pos)) => {
                self.inside = true;
                Some(PointerEvent::Enter { pos })
            }
            (true, Some(pos)) => Some(PointerEvent::Move { pos }),
            (true, None) => {
                self.inside = false;
                Some(PointerEvent::Leave)
            }
            (false, None) => None,
        }
    }
}

// ---- scatter ----------------------------------------------------------------

/// Read-only data the scatter controller needs to resolve positions to polls.
pub struct ScatterView<'a> {
    pub records: &'a [PollRecord],
    /// Built with [`PointIndex::from_unsorted`] over `records`.
    pub index: &'a PointIndex,
    pub x: &'a TimeScale,
}

/// Marker under `pos`, if any. Hidden markers (radius 0) are never hit.
/// Among overlapping markers the one drawn last (highest record index) wins.
pub fn hit_marker(view: &ScatterView<'_>, scene: &ScatterScene, pos: Point, now: Duration) -> Option<usize> {
    let reach = MARKER_RADIUS + HIT_SLOP;
    let lo = view.x.invert(pos.x - reach);
    let hi = view.x.invert(pos.x + reach);
    let mut best: Option<(f32, usize)> = None;
    for sorted_pos in view.index.range_between(lo, hi) {
        let Some(rec) = view.index.record_at(sorted_pos) else { continue };
        let Some(m) = scene.markers.get(rec) else { continue };
        if m.radius.target() <= 0.0 {
            continue;
        }
        let r = m.radius.value_at(now).max(m.radius.target()) + HIT_SLOP;
        let d2 = m.center.distance_sq(pos);
        if d2 > r * r {
            continue;
        }
        best = match best {
            Some((bd, bi)) if bd < d2 || (bd == d2 && bi > rec) => Some((bd, bi)),
            _ => Some((d2, rec)),
        };
    }
    best.map(|(_, i)| i)
}

/// Hover/selection state for the poll scatter.
///
/// The selection is set by clicking a marker and is only ever replaced, never cleared.
#[derive(Clone, Debug, Default)]
pub struct ScatterController {
    state: HoverState,
    selected: Option<String>,
    hovered: Option<usize>,
}

impl ScatterController {
    pub fn new() -> Self { Self::default() }

    pub fn state(&self) -> HoverState { self.state }

    /// Pollster highlighted by the last click.
    pub fn selected(&self) -> Option<&str> { self.selected.as_deref() }

    /// Record shown in the tooltip by the last move over a marker.
    pub fn hovered(&self) -> Option<usize> { self.hovered }

    pub fn handle(&mut self, event: PointerEvent, now: Duration, view: &ScatterView<'_>, scene: &mut ScatterScene) {
        match event {
            PointerEvent::Enter { pos } => self.on_enter(pos, now, view, scene),
            PointerEvent::Move { pos } => self.on_move(pos, now, view, scene),
            PointerEvent::Leave => self.on_leave(now, scene),
            PointerEvent::Click { pos } => {
                self.on_click(pos, now, view, scene);
            }
        }
    }

    /// Show the tooltip, then treat `pos` as the first move.
    pub fn on_enter(&mut self, pos: Point, now: Duration, view: &ScatterView<'_>, scene: &mut ScatterScene) {
        if self.state == HoverState::Idle {
            trace!(x = pos.x, y = pos.y, "scatter: enter");
            self.state = HoverState::Hovering;
            scene.tooltip.opacity.set(1.0);
        }
        self.on_move(pos, now, view, scene);
    }

    pub fn on_move(&mut self, pos: Point, now: Duration, view: &ScatterView<'_>, scene: &mut ScatterScene) {
        if self.state != HoverState::Hovering {
            trace!("scatter: move while idle ignored");
            return;
        }
        let Some(i) = hit_marker(view, scene, pos, now) else { return };
        let Some(rec) = view.records.get(i) else { return };
        self.hovered = Some(i);
        scene.tooltip.lines = poll_tooltip(rec);
        scene.tooltip.anchor = pos.offset(SCATTER_TOOLTIP_OFFSET.0, SCATTER_TOOLTIP_OFFSET.1);
    }

    /// Fade the tooltip; restore default marker styling unless a pollster is selected.
    pub fn on_leave(&mut self, now: Duration, scene: &mut ScatterScene) {
        if self.state != HoverState::Hovering {
            return;
        }
        trace!("scatter: leave");
        self.state = HoverState::Idle;
        self.hovered = None;
        scene.tooltip.opacity.animate_to(0.0, now, TRANSITION);
        if self.selected.is_none() {
            for m in &mut scene.markers {
                m.apply(MarkerStyle::unselected(), now, TRANSITION);
            }
        }
    }

    /// Select the pollster of the marker under `pos`. Clicking empty space changes nothing.
    pub fn on_click(
        &mut self,
        pos: Point,
        now: Duration,
        view: &ScatterView<'_>,
        scene: &mut ScatterScene,
    ) -> Option<&str> {
        let rec = hit_marker(view, scene, pos, now).and_then(|i| view.records.get(i))?;
        self.select(&rec.pollster_id, now, view, scene);
        self.selected()
    }

    /// Highlight every poll by `pollster` and hide the rest.
    pub fn select(&mut self, pollster: &str, now: Duration, view: &ScatterView<'_>, scene: &mut ScatterScene) {
        debug!(pollster, previous = ?self.selected, "scatter: select pollster");
        for m in &mut scene.markers {
            let same = view.records.get(m.record).is_some_and(|r| r.pollster_id == pollster);
            let style = if same { MarkerStyle::selected() } else { MarkerStyle::hidden() };
            m.apply(style, now, TRANSITION);
        }
        self.selected = Some(pollster.to_string());
    }
}

// ---- line -------------------------------------------------------------------

/// Read-only data the line controller needs to place annotations.
pub struct LineView<'a> {
    pub records: &'a [PredictionRecord],
    /// Built with [`PointIndex::from_sorted`] over `records`.
    pub index: &'a PointIndex,
    pub x: &'a TimeScale,
    pub y: &'a ValueScale,
    pub plot_height: f32,
}

/// Hover state for the prediction line.
#[derive(Clone, Debug, Default)]
pub struct LineController {
    state: HoverState,
    last: Option<usize>,
}

impl LineController {
    pub fn new() -> Self { Self::default() }

    pub fn state(&self) -> HoverState { self.state }

    /// Prediction the annotations currently describe.
    pub fn located(&self) -> Option<usize> { self.last }

    pub fn handle(&mut self, event: PointerEvent, now: Duration, view: &LineView<'_>, scene: &mut LineScene) {
        match event {
            PointerEvent::Enter { pos } => self.on_enter(pos, now, view, scene),
            PointerEvent::Move { pos } => self.on_move(pos, now, view, scene),
            PointerEvent::Leave => self.on_leave(now, scene),
            PointerEvent::Click { .. } => trace!("line: click ignored"),
        }
    }

    /// Show the annotations and paint them for the last located prediction
    /// (the latest one before any move), then treat `pos` as the first move.
    pub fn on_enter(&mut self, pos: Point, now: Duration, view: &LineView<'_>, scene: &mut LineScene) {
        if self.state == HoverState::Idle {
            trace!(x = pos.x, "line: enter");
            self.state = HoverState::Hovering;
            scene.headline.opacity.set(1.0);
            scene.month.opacity.set(1.0);
            scene.tracking.opacity.set(1.0);
            let fallback = view.records.len().checked_sub(1);
            if let Some(i) = self.last.or(fallback) {
                self.paint(i, view, scene);
            }
        }
        self.on_move(pos, now, view, scene);
    }

    pub fn on_move(&mut self, pos: Point, _now: Duration, view: &LineView<'_>, scene: &mut LineScene) {
        if self.state != HoverState::Hovering {
            return;
        }
        if let Some(i) = view.index.lookup_px(view.x, pos.x) {
            trace!(x = pos.x, record = i, "line: located prediction");
            self.paint(i, view, scene);
        }
    }

    pub fn on_leave(&mut self, now: Duration, scene: &mut LineScene) {
        if self.state != HoverState::Hovering {
            return;
        }
        trace!("line: leave");
        self.state = HoverState::Idle;
        scene.headline.opacity.animate_to(0.0, now, TRANSITION);
        scene.month.opacity.animate_to(0.0, now, TRANSITION);
        scene.tracking.opacity.animate_to(0.0, now, TRANSITION);
    }

    fn paint(&mut self, i: usize, view: &LineView<'_>, scene: &mut LineScene) {
        let Some(rec) = view.records.get(i) else { return };
        self.last = Some(i);
        let text = LineAnnotation::for_record(rec);
        let px = view.x.to_px(rec.date);
        let py = view.y.to_px(rec.mean_pct);
        scene.headline.text = text.headline;
        scene.headline.pos = Point::new(px, py).offset(HEADLINE_OFFSET.0, HEADLINE_OFFSET.1);
        scene.month.text = text.month;
        scene.month.pos = Point::new(px, view.plot_height);
        scene.tracking.x = px;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Band;

    impl SensingRegion for Band {
        fn senses(&self, pos: Point, _now: Duration) -> bool { pos.x >= 10.0 && pos.x < 20.0 }
    }

    #[test]
    fn tracker_emits_enter_move_leave_once_each() {
        let mut t = PointerTracker::new();
        let now = Duration::ZERO;
        assert_eq!(t.track(&Band, Some(Point::new(5.0, 0.0)), now), None);
        assert!(matches!(t.track(&Band, Some(Point::new(12.0, 0.0)), now), Some(PointerEvent::Enter { .. })));
        assert!(matches!(t.track(&Band, Some(Point::new(13.0, 0.0)), now), Some(PointerEvent::Move { .. })));
        assert_eq!(t.track(&Band, Some(Point::new(25.0, 0.0)), now), Some(PointerEvent::Leave));
        assert_eq!(t.track(&Band, None, now), None);
        assert!(!t.is_inside());
    }
}
