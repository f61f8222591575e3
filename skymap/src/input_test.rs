#![allow(clippy::float_cmp)]

use super::*;
use crate::consts::{ZOOM_MAX, ZOOM_MIN};

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

// =============================================================
// Drag state machine
// =============================================================

#[test]
fn starts_idle_at_identity() {
    let c = ViewportController::new();
    assert_eq!(c.drag_state(), DragState::Idle);
    assert_eq!(c.transform().scale(), 1.0);
    assert_eq!(c.transform().offset, pt(0.0, 0.0));
}

#[test]
fn pointer_down_records_anchor_relative_to_offset() {
    let mut c = ViewportController::new();
    c.on_pointer_down(pt(100.0, 50.0));
    assert_eq!(c.drag_state(), DragState::Dragging { anchor: pt(100.0, 50.0) });
    c.on_pointer_move(pt(130.0, 40.0));
    c.on_pointer_up();

    c.on_pointer_down(pt(10.0, 10.0));
    assert_eq!(c.drag_state(), DragState::Dragging { anchor: pt(-20.0, 20.0) });
}

#[test]
fn pointer_move_sets_offset_absolutely() {
    let mut c = ViewportController::new();
    c.on_pointer_down(pt(100.0, 100.0));
    assert!(c.on_pointer_move(pt(110.0, 95.0)));
    assert_eq!(c.transform().offset, pt(10.0, -5.0));
    assert!(c.on_pointer_move(pt(150.0, 100.0)));
    assert_eq!(c.transform().offset, pt(50.0, 0.0));
}

#[test]
fn pointer_move_back_to_start_restores_offset() {
    let mut c = ViewportController::new();
    c.on_pointer_down(pt(200.0, 200.0));
    for i in 0..50 {
        let f = f64::from(i) * 0.37;
        c.on_pointer_move(pt(200.0 + f, 200.0 - f));
    }
    c.on_pointer_move(pt(200.0, 200.0));
    assert_eq!(c.transform().offset, pt(0.0, 0.0));
}

#[test]
fn pointer_move_while_idle_is_ignored() {
    let mut c = ViewportController::new();
    assert!(!c.on_pointer_move(pt(300.0, 300.0)));
    assert_eq!(c.transform().offset, pt(0.0, 0.0));
}

#[test]
fn pointer_move_to_same_spot_reports_no_change() {
    let mut c = ViewportController::new();
    c.on_pointer_down(pt(5.0, 5.0));
    assert!(!c.on_pointer_move(pt(5.0, 5.0)));
}

#[test]
fn pointer_up_and_leave_end_drag() {
    let mut c = ViewportController::new();
    c.on_pointer_down(pt(0.0, 0.0));
    assert!(c.is_dragging());
    c.on_pointer_up();
    assert!(!c.is_dragging());

    c.on_pointer_down(pt(0.0, 0.0));
    c.on_pointer_leave();
    assert_eq!(c.drag_state(), DragState::Idle);
}

#[test]
fn offset_is_unbounded() {
    let mut c = ViewportController::new();
    c.on_pointer_down(pt(0.0, 0.0));
    c.on_pointer_move(pt(-50_000.0, 90_000.0));
    assert_eq!(c.transform().offset, pt(-50_000.0, 90_000.0));
}

// =============================================================
// Zoom
// =============================================================

#[test]
fn wheel_down_zooms_out_by_ten_percent() {
    let mut c = ViewportController::new();
    c.on_wheel(WheelDelta::vertical(120.0));
    assert!((c.transform().scale() - 0.9).abs() < 1e-12);
}

#[test]
fn wheel_up_and_zero_zoom_in() {
    let mut c = ViewportController::new();
    c.on_wheel(WheelDelta::vertical(-120.0));
    assert!((c.transform().scale() - 1.1).abs() < 1e-12);
    c.on_wheel(WheelDelta { dx: 40.0, dy: 0.0 });
    assert!((c.transform().scale() - 1.21).abs() < 1e-12);
}

#[test]
fn wheel_sequences_stay_clamped() {
    let mut c = ViewportController::new();
    let mut seed: u32 = 0x9e37_79b9;
    for _ in 0..2_000 {
        seed ^= seed << 13;
        seed ^= seed >> 17;
        seed ^= seed << 5;
        let dy = if seed % 3 == 0 { 1.0 } else { -1.0 };
        c.on_wheel(WheelDelta::vertical(dy));
        let s = c.transform().scale();
        assert!((ZOOM_MIN..=ZOOM_MAX).contains(&s), "scale {s} escaped bounds");
    }
}

#[test]
fn wheel_saturates_at_bounds() {
    let mut c = ViewportController::new();
    for _ in 0..100 {
        c.on_wheel(WheelDelta::vertical(-1.0));
    }
    assert_eq!(c.transform().scale(), ZOOM_MAX);
    for _ in 0..100 {
        c.on_wheel(WheelDelta::vertical(1.0));
    }
    assert_eq!(c.transform().scale(), ZOOM_MIN);
}

#[test]
fn wheel_works_mid_drag() {
    let mut c = ViewportController::new();
    c.on_pointer_down(pt(0.0, 0.0));
    c.on_wheel(WheelDelta::vertical(1.0));
    assert!(c.is_dragging());
    assert!(c.transform().scale() < 1.0);
}

#[test]
fn zoom_buttons_use_larger_steps() {
    let mut c = ViewportController::new();
    c.zoom_in();
    assert!((c.transform().scale() - 1.2).abs() < 1e-12);
    c.zoom_out();
    c.zoom_out();
    assert!((c.transform().scale() - 0.768).abs() < 1e-12);
}

// =============================================================
// Reset
// =============================================================

#[test]
fn reset_after_any_sequence_is_identity() {
    let mut c = ViewportController::new();
    c.on_pointer_down(pt(3.0, 4.0));
    c.on_pointer_move(pt(-400.0, 77.5));
    c.on_pointer_up();
    for _ in 0..7 {
        c.on_wheel(WheelDelta::vertical(-3.0));
    }
    c.zoom_out();
    c.reset();
    assert_eq!(c.transform().scale(), 1.0);
    assert_eq!(c.transform().offset, pt(0.0, 0.0));
    c.reset();
    assert_eq!(c.transform().scale(), 1.0);
    assert_eq!(c.transform().offset, pt(0.0, 0.0));
}
