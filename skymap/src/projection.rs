//! Celestial-to-screen projection.
//!
//! The map is a plate carrée of the full sky: right ascension runs linearly
//! along x and declination along y, both scaled by the viewport transform.
//! [`project`] is the only place that formula lives; the renderer and the
//! hit-tester both call it so what you see is what you can pick.

#[cfg(test)]
#[path = "projection_test.rs"]
mod projection_test;

use serde::{Deserialize, Serialize};

use crate::consts::{ZOOM_MAX, ZOOM_MIN};

/// A point in screen space (CSS pixels).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    #[must_use]
    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// A celestial position in degrees: RA in `[0, 360)`, Dec in `[-90, 90]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SkyCoord {
    pub ra: f64,
    pub dec: f64,
}

impl SkyCoord {
    #[must_use]
    pub fn new(ra: f64, dec: f64) -> Self {
        Self { ra, dec }
    }

    /// Both components are finite numbers.
    #[must_use]
    pub fn is_finite(self) -> bool {
        self.ra.is_finite() && self.dec.is_finite()
    }
}

/// Pixel dimensions of the drawing area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn center(self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }

    /// Whether `pt` lies inside the viewport grown by `margin` on every side.
    #[must_use]
    pub fn contains_with_margin(self, pt: Point, margin: f64) -> bool {
        pt.x >= -margin && pt.x <= self.width + margin && pt.y >= -margin && pt.y <= self.height + margin
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self { width: 800.0, height: 500.0 }
    }
}

/// Zoom scale and pan offset applied when projecting.
///
/// `scale` is kept inside `[ZOOM_MIN, ZOOM_MAX]` by every mutator; the
/// offset is unconstrained so the sky can be dragged off-canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportTransform {
    scale: f64,
    pub offset: Point,
}

impl Default for ViewportTransform {
    fn default() -> Self {
        Self { scale: 1.0, offset: Point::default() }
    }
}

impl ViewportTransform {
    /// Build a transform, clamping `scale` into the allowed zoom range.
    #[must_use]
    pub fn new(scale: f64, offset: Point) -> Self {
        Self { scale: clamp_scale(scale), offset }
    }

    #[must_use]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Multiply the scale by `factor`, then clamp.
    pub fn zoom_by(&mut self, factor: f64) {
        self.scale = clamp_scale(self.scale * factor);
    }

    pub fn set_scale(&mut self, scale: f64) {
        self.scale = clamp_scale(scale);
    }
}

fn clamp_scale(scale: f64) -> f64 {
    if scale.is_nan() {
        return 1.0;
    }
    scale.clamp(ZOOM_MIN, ZOOM_MAX)
}

/// Project a celestial position to viewport pixels.
///
/// No clipping is applied; use [`Viewport::contains_with_margin`] before
/// drawing.
#[must_use]
pub fn project(coord: SkyCoord, viewport: Viewport, transform: &ViewportTransform) -> Point {
    let scale = transform.scale();
    let x = (coord.ra / 360.0 * viewport.width * scale) + transform.offset.x + viewport.width / 2.0;
    let y = ((-coord.dec / 180.0 + 0.5) * viewport.height * scale) + transform.offset.y + viewport.height / 2.0;
    Point { x, y }
}
