use std::time::{Duration, Instant};

use super::*;
use crate::geometry::{DockRect, Edge, REVEAL_SLIVER};

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

fn placement(edge: Edge) -> Placement {
    Placement {
        edge,
        offset: 10,
        width: 56,
        height: 296,
        screen: DockRect::new(0, 0, 1920, 1080),
    }
}

fn controller() -> AutoHideController {
    AutoHideController::new(placement(Edge::Left))
}

/// Leaves at `t0` and lets the dock slide all the way out.
fn hidden_at(t0: Instant) -> AutoHideController {
    let mut c = controller();
    c.pointer_left(t0);
    c.tick(t0 + HIDE_DELAY);
    c.tick(t0 + HIDE_DELAY + SLIDE_DURATION);
    assert_eq!(c.state(), AutoHideState::Hidden);
    c
}

#[test]
fn starts_visible_at_visible_rect() {
    let c = controller();
    assert_eq!(c.state(), AutoHideState::Visible);
    assert_eq!(c.current_rect(), c.visible_rect());
    assert!(!c.needs_tick());
}

#[test]
fn leave_then_enter_within_delay_never_hides() {
    let t0 = Instant::now();
    let mut c = controller();
    c.pointer_left(t0);
    c.tick(t0 + ms(200));
    c.pointer_entered(t0 + ms(300));
    assert!(!c.hide_pending());

    for step in 0..20 {
        c.tick(t0 + ms(300 + step * 50));
        assert_eq!(c.state(), AutoHideState::Visible);
    }
    assert!(!c.needs_tick());
}

#[test]
fn sustained_leave_slides_out_then_hides() {
    let t0 = Instant::now();
    let mut c = controller();
    c.pointer_left(t0);

    c.tick(t0 + ms(499));
    assert_eq!(c.state(), AutoHideState::Visible);

    c.tick(t0 + ms(500));
    assert_eq!(c.state(), AutoHideState::AnimatingOut);

    c.tick(t0 + ms(650));
    assert_eq!(c.state(), AutoHideState::AnimatingOut);
    let mid = c.current_rect();
    assert!(mid.x < c.visible_rect().x && mid.x > c.hidden_rect().x);

    c.tick(t0 + ms(800));
    assert_eq!(c.state(), AutoHideState::Hidden);
    assert_eq!(c.current_rect().x, -56 + REVEAL_SLIVER);
    assert_eq!(c.current_rect().y, c.visible_rect().y);
    assert!(!c.needs_tick());
}

#[test]
fn repeated_leaves_restart_the_delay() {
    let t0 = Instant::now();
    let mut c = controller();
    c.pointer_left(t0);
    c.pointer_left(t0 + ms(400));
    c.tick(t0 + ms(600));
    assert_eq!(c.state(), AutoHideState::Visible);
    c.tick(t0 + ms(900));
    assert_eq!(c.state(), AutoHideState::AnimatingOut);
}

#[test]
fn enter_while_hidden_slides_back_in() {
    let t0 = Instant::now();
    let mut c = hidden_at(t0);
    let t1 = t0 + ms(2000);

    c.pointer_entered(t1);
    assert_eq!(c.state(), AutoHideState::AnimatingIn);
    c.tick(t1 + SLIDE_DURATION);
    assert_eq!(c.state(), AutoHideState::Visible);
    assert_eq!(c.current_rect(), c.visible_rect());
}

#[test]
fn enter_during_slide_out_reverses_from_current_position() {
    let t0 = Instant::now();
    let mut c = controller();
    c.pointer_left(t0);
    c.tick(t0 + ms(500));
    c.tick(t0 + ms(600));
    let before = c.current_rect();

    c.pointer_entered(t0 + ms(600));
    assert_eq!(c.state(), AutoHideState::AnimatingIn);
    // No jump: the reverse slide starts exactly where the dock was.
    assert_eq!(c.current_rect(), before);

    c.tick(t0 + ms(601));
    let after = c.current_rect();
    assert!(after.x >= before.x && after.x <= c.visible_rect().x);

    c.tick(t0 + ms(900));
    assert_eq!(c.state(), AutoHideState::Visible);
}

#[test]
fn enter_while_visible_only_cancels_timer() {
    let t0 = Instant::now();
    let mut c = controller();
    c.pointer_left(t0);
    c.pointer_entered(t0 + ms(10));
    assert_eq!(c.state(), AutoHideState::Visible);
    assert!(!c.needs_tick());
}

#[test]
fn open_dialog_blocks_hiding() {
    let t0 = Instant::now();
    let mut c = controller();
    c.set_dialog_open(true, t0);
    c.pointer_left(t0);
    c.tick(t0 + ms(500));
    c.tick(t0 + ms(1000));
    assert_eq!(c.state(), AutoHideState::Visible);
    assert!(!c.needs_tick(), "blocked firing must be discarded");

    c.set_dialog_open(false, t0 + ms(1100));
    c.pointer_left(t0 + ms(1200));
    c.tick(t0 + ms(1700));
    assert_eq!(c.state(), AutoHideState::AnimatingOut);
}

#[test]
fn closing_dialog_does_not_resurrect_a_discarded_timer() {
    let t0 = Instant::now();
    let mut c = controller();
    c.set_dialog_open(true, t0);
    c.pointer_left(t0);
    c.tick(t0 + ms(500));
    c.set_dialog_open(false, t0 + ms(600));
    c.tick(t0 + ms(2000));
    assert_eq!(c.state(), AutoHideState::Visible);
}

#[test]
fn opening_dialog_reveals_hidden_dock() {
    let t0 = Instant::now();
    let mut c = hidden_at(t0);
    c.set_dialog_open(true, t0 + ms(1000));
    assert_eq!(c.state(), AutoHideState::AnimatingIn);
    c.tick(t0 + ms(1300));
    assert_eq!(c.state(), AutoHideState::Visible);
}

#[test]
fn leave_while_hidden_is_ignored() {
    let t0 = Instant::now();
    let mut c = hidden_at(t0);
    c.pointer_left(t0 + ms(1000));
    assert!(!c.needs_tick());
}

#[test]
fn leave_during_slide_in_hides_again_from_current_rect() {
    let t0 = Instant::now();
    let mut c = hidden_at(t0);
    c.pointer_entered(t0 + ms(1000));
    c.pointer_left(t0 + ms(1100));
    c.tick(t0 + ms(1600));
    assert_eq!(c.state(), AutoHideState::AnimatingOut);
    c.tick(t0 + ms(1900));
    assert_eq!(c.state(), AutoHideState::Hidden);
}

#[test]
fn relayout_while_hidden_keeps_sliver_and_cross_axis() {
    let t0 = Instant::now();
    let mut c = hidden_at(t0);
    let y = c.current_rect().y;

    c.relayout(Placement {
        width: 80,
        height: 400,
        ..placement(Edge::Left)
    });
    assert_eq!(c.state(), AutoHideState::Hidden);
    assert_eq!(c.current_rect(), DockRect::new(-80 + REVEAL_SLIVER, y, 80, 400));
}

#[test]
fn relayout_to_another_edge_shows_dock() {
    let t0 = Instant::now();
    let mut c = hidden_at(t0);
    c.relayout(placement(Edge::Top));
    assert_eq!(c.state(), AutoHideState::Visible);
    assert_eq!(c.current_rect(), placement(Edge::Top).visible_rect());
}
