// File: crates/popularity-core/tests/scatter.rs
// Purpose: Scatter hover, tooltip and pollster selection behaviour.

mod common;

use common::{date, ms, poll};
use popularity_core::style::{MarkerStyle, POLAR_NIGHT, SNOW, WHITE};
use popularity_core::{ChartLayout, HoverState, Point, PointerEvent, PointerTracker, ScatterChart};

/// Five polls spread far enough apart on both axes that markers never overlap.
fn chart() -> ScatterChart {
    let polls = vec![
        poll("IFOP", date(2021, 6, 2), 41.0),
        poll("Elabe", date(2021, 5, 20), 35.0),
        poll("Harris Interactive", date(2021, 6, 10), 48.0),
        poll("IFOP", date(2021, 4, 15), 38.0),
        poll("Kantar", date(2020, 6, 20), 30.0),
    ];
    ScatterChart::new(polls, ChartLayout::default())
}

fn center(c: &ScatterChart, i: usize) -> Point {
    c.marker_center(i).expect("marker")
}

#[test]
fn markers_start_in_initial_style() {
    let c = chart();
    assert_eq!(c.scene().markers.len(), 5);
    for m in &c.scene().markers {
        assert_eq!(m.target_style(), MarkerStyle::initial());
    }
    assert_eq!(c.controller().state(), HoverState::Idle);
}

#[test]
fn enter_shows_tooltip_beside_pointer() {
    let mut c = chart();
    let p = center(&c, 2);
    c.handle(PointerEvent::Enter { pos: p }, ms(0));
    assert_eq!(c.controller().state(), HoverState::Hovering);
    let tip = &c.scene().tooltip;
    assert_eq!(tip.opacity.value_at(ms(0)), 1.0);
    assert_eq!(tip.anchor, Point::new(p.x + 90.0, p.y));
    assert_eq!(tip.lines[0], "Pollster: Harris Interactive");
    assert!(tip.lines.iter().any(|l| l == "Approve: 48.0%"));
}

#[test]
fn move_while_idle_is_ignored() {
    let mut c = chart();
    c.handle(PointerEvent::Move { pos: center(&c, 0) }, ms(0));
    assert!(c.scene().tooltip.lines.is_empty());
    assert_eq!(c.controller().hovered(), None);
}

#[test]
fn move_follows_pointer_between_markers() {
    let mut c = chart();
    c.handle(PointerEvent::Enter { pos: center(&c, 0) }, ms(0));
    let p = center(&c, 1);
    c.handle(PointerEvent::Move { pos: p }, ms(10));
    assert_eq!(c.controller().hovered(), Some(1));
    assert_eq!(c.scene().tooltip.lines[0], "Pollster: Elabe");
    assert_eq!(c.scene().tooltip.anchor, Point::new(p.x + 90.0, p.y));
}

#[test]
fn leave_without_selection_restores_default_markers() {
    let mut c = chart();
    c.handle(PointerEvent::Enter { pos: center(&c, 0) }, ms(0));
    c.handle(PointerEvent::Leave, ms(100));
    assert_eq!(c.controller().state(), HoverState::Idle);

    let tip = &c.scene().tooltip.opacity;
    assert!((tip.value_at(ms(200)) - 0.5).abs() < 1e-4, "halfway through the fade");
    assert_eq!(tip.value_at(ms(300)), 0.0);

    for m in &c.scene().markers {
        assert_eq!(m.fill, SNOW);
        assert_eq!(m.stroke, WHITE);
        assert_eq!(m.radius.value_at(ms(300)), 4.0);
        assert_eq!(m.opacity.value_at(ms(300)), 1.0);
    }
    assert!(!c.is_animating(ms(300)));
}

#[test]
fn click_selects_pollster_and_hides_others() {
    let mut c = chart();
    let p = center(&c, 0);
    c.handle(PointerEvent::Enter { pos: p }, ms(0));
    c.handle(PointerEvent::Click { pos: p }, ms(0));
    assert_eq!(c.selected(), Some("IFOP"));

    let after = ms(200);
    for (i, m) in c.scene().markers.iter().enumerate() {
        if c.records()[i].pollster_id == "IFOP" {
            assert_eq!(m.fill, POLAR_NIGHT);
            assert_eq!(m.radius.value_at(after), 4.0);
            assert_eq!(m.opacity.value_at(after), 1.0);
        } else {
            assert_eq!(m.fill, WHITE);
            assert_eq!(m.radius.value_at(after), 0.0);
            // hidden markers keep whatever opacity they had
            assert_eq!(m.opacity.value_at(after), 0.5);
        }
    }
}

#[test]
fn hidden_markers_cannot_be_hovered_or_clicked() {
    let mut c = chart();
    c.select("IFOP", ms(0));
    let elabe = center(&c, 1);
    assert_eq!(c.hit_test(elabe, ms(500)), None);
    c.handle(PointerEvent::Enter { pos: center(&c, 3) }, ms(500));
    c.handle(PointerEvent::Click { pos: elabe }, ms(500));
    assert_eq!(c.selected(), Some("IFOP"));
}

#[test]
fn leave_with_selection_keeps_highlight() {
    let mut c = chart();
    c.select("Kantar", ms(0));
    let p = center(&c, 4);
    c.handle(PointerEvent::Enter { pos: p }, ms(300));
    c.handle(PointerEvent::Leave, ms(400));
    let kantar = &c.scene().markers[4];
    assert_eq!(kantar.target_style(), MarkerStyle::selected());
    assert_eq!(c.scene().markers[0].radius.value_at(ms(1000)), 0.0);
    assert_eq!(c.selected(), Some("Kantar"));
}

#[test]
fn clicking_empty_space_keeps_selection() {
    let mut c = chart();
    c.select("Elabe", ms(0));
    c.handle(PointerEvent::Enter { pos: center(&c, 1) }, ms(0));
    c.handle(PointerEvent::Click { pos: Point::new(1.0, 1.0) }, ms(10));
    assert_eq!(c.selected(), Some("Elabe"));
}

#[test]
fn reselecting_switches_pollster() {
    let mut c = chart();
    c.select("IFOP", ms(0));
    c.select("Kantar", ms(300));
    assert_eq!(c.scene().markers[0].fill, WHITE);
    assert_eq!(c.scene().markers[4].fill, POLAR_NIGHT);
    assert_eq!(c.scene().markers[4].radius.value_at(ms(500)), 4.0);
}

#[test]
fn tracker_enters_only_over_a_marker() {
    let mut c = chart();
    let mut tracker = PointerTracker::new();
    let empty = Point::new(2.0, 2.0);
    assert_eq!(tracker.track(&c, Some(empty), ms(0)), None);

    let p = center(&c, 2);
    let ev = tracker.track(&c, Some(p), ms(0)).expect("enter");
    assert_eq!(ev, PointerEvent::Enter { pos: p });
    c.handle(ev, ms(0));

    let ev = tracker.track(&c, Some(empty), ms(50)).expect("leave");
    assert_eq!(ev, PointerEvent::Leave);
    c.handle(ev, ms(50));
    assert_eq!(c.controller().state(), HoverState::Idle);
}
