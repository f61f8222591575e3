//! Input model: pointer/wheel types and the pan/zoom gesture state machine.
//!
//! [`ViewportController`] is the single writer of the [`ViewportTransform`].
//! Dragging is tracked against an anchor captured on pointer-down, so each
//! move sets the offset absolutely instead of accumulating deltas.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::consts::{BUTTON_ZOOM_IN, BUTTON_ZOOM_OUT, WHEEL_ZOOM_IN, WHEEL_ZOOM_OUT};
use crate::projection::{Point, ViewportTransform};

/// Wheel / trackpad scroll delta.
#[derive(Debug, Clone, Copy)]
pub struct WheelDelta {
    /// Horizontal scroll amount in pixels.
    pub dx: f64,
    /// Vertical scroll amount in pixels (positive = down).
    pub dy: f64,
}

impl WheelDelta {
    #[must_use]
    pub fn vertical(dy: f64) -> Self {
        Self { dx: 0.0, dy }
    }
}

/// Gesture state between pointer-down and pointer-up.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragState {
    /// No gesture in progress.
    #[default]
    Idle,
    /// Panning the map.
    Dragging {
        /// Pointer position minus the offset at pointer-down.
        anchor: Point,
    },
}

/// Owns the viewport transform and applies gestures to it.
#[derive(Debug, Clone, Default)]
pub struct ViewportController {
    transform: ViewportTransform,
    drag: DragState,
}

impl ViewportController {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn transform(&self) -> &ViewportTransform {
        &self.transform
    }

    #[must_use]
    pub fn drag_state(&self) -> DragState {
        self.drag
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        matches!(self.drag, DragState::Dragging { .. })
    }

    /// Start a pan gesture at `screen_pt`.
    pub fn on_pointer_down(&mut self, screen_pt: Point) {
        let offset = self.transform.offset;
        self.drag = DragState::Dragging { anchor: Point::new(screen_pt.x - offset.x, screen_pt.y - offset.y) };
    }

    /// Continue a pan gesture. Returns `true` when the offset changed.
    pub fn on_pointer_move(&mut self, screen_pt: Point) -> bool {
        let DragState::Dragging { anchor } = self.drag else {
            return false;
        };
        let next = Point::new(screen_pt.x - anchor.x, screen_pt.y - anchor.y);
        let changed = next != self.transform.offset;
        self.transform.offset = next;
        changed
    }

    pub fn on_pointer_up(&mut self) {
        self.drag = DragState::Idle;
    }

    /// Pointer left the surface; ends any gesture like pointer-up.
    pub fn on_pointer_leave(&mut self) {
        self.drag = DragState::Idle;
    }

    /// Multiplicative zoom: scroll down zooms out, anything else zooms in.
    pub fn on_wheel(&mut self, delta: WheelDelta) {
        let factor = if delta.dy > 0.0 { WHEEL_ZOOM_OUT } else { WHEEL_ZOOM_IN };
        self.transform.zoom_by(factor);
    }

    pub fn zoom_in(&mut self) {
        self.transform.zoom_by(BUTTON_ZOOM_IN);
    }

    pub fn zoom_out(&mut self) {
        self.transform.zoom_by(BUTTON_ZOOM_OUT);
    }

    /// Back to scale 1 and zero offset. Leaves any drag in progress alone.
    pub fn reset(&mut self) {
        self.transform = ViewportTransform::default();
    }
}
