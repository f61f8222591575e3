//! Rendering: draws the full sky-map scene to a [`Surface`].
//!
//! This module decides *what* to draw and in which order; a [`Surface`]
//! decides *how*. The browser canvas, the SVG writer, and the test
//! [`Recorder`] all implement the same trait, so every backend sees an
//! identical sequence of calls for identical input.
//!
//! Drawing never mutates map state. Objects without a usable position, or
//! whose projected centre falls outside the viewport plus
//! [`CLIP_MARGIN_PX`], are skipped.
//!
//! All fallible surface calls propagate errors via `Result<(), S::Error>`.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use std::convert::Infallible;

use crate::backdrop::StarField;
use crate::consts::{
    CLIP_MARGIN_PX, DEC_LABEL_LIMIT_DEG, DEC_LABEL_STEP_DEG, GLOW_FACTOR, GRID_STEP_DEG, MARKER_BASE_PX,
    MARKER_DEFAULT_PX, MARKER_MIN_PX, RA_LABEL_STEP_DEG,
};
use crate::filter::ActiveFilter;
use crate::object::{CelestialObject, ObjectId, source_color};
use crate::projection::{Point, SkyCoord, Viewport, ViewportTransform, project};

/// Inner colour of the sky background gradient.
pub const BACKGROUND_INNER: &str = "hsl(250, 30%, 8%)";
/// Outer colour of the sky background gradient.
pub const BACKGROUND_OUTER: &str = "hsl(230, 25%, 5%)";
/// RA/Dec grid line colour.
pub const GRID_COLOR: &str = "rgba(100, 150, 200, 0.15)";
/// Celestial equator colour.
pub const EQUATOR_COLOR: &str = "rgba(59, 130, 246, 0.3)";
/// Axis label colour.
pub const LABEL_COLOR: &str = "rgba(150, 170, 200, 0.6)";
/// Axis label font.
pub const LABEL_FONT: &str = "10px Space Grotesk";
/// Fill for the hovered object.
pub const HOVER_FILL: &str = "#ffffff";

/// Alpha suffix appended to a `#RRGGBB` source colour for the glow centre.
const GLOW_ALPHA_HEX: &str = "40";

// =============================================================
// Surface primitives
// =============================================================

/// Axis-aligned rectangle in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// One colour stop of a gradient. `offset` is in `[0, 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorStop {
    pub offset: f32,
    pub color: String,
}

/// Concentric radial gradient.
#[derive(Debug, Clone, PartialEq)]
pub struct RadialGradient {
    pub center: Point,
    pub inner_radius: f64,
    pub outer_radius: f64,
    pub stops: Vec<ColorStop>,
}

/// How a shape is filled.
#[derive(Debug, Clone, PartialEq)]
pub enum Paint {
    Solid(String),
    Radial(RadialGradient),
}

impl Paint {
    #[must_use]
    pub fn solid(color: &str) -> Self {
        Self::Solid(color.to_owned())
    }
}

/// Line colour and width.
#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    pub color: String,
    pub width: f64,
}

impl Stroke {
    #[must_use]
    pub fn new(color: &str, width: f64) -> Self {
        Self { color: color.to_owned(), width }
    }
}

/// Horizontal anchoring of text relative to its position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

impl TextAlign {
    /// CSS `textAlign` keyword.
    #[must_use]
    pub fn as_css(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Center => "center",
            Self::Right => "right",
        }
    }
}

/// Font, colour, and alignment for a text draw.
#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    pub font: String,
    pub color: String,
    pub align: TextAlign,
}

/// A 2D drawing target.
///
/// Methods mirror the subset of `CanvasRenderingContext2d` the sky map
/// uses. Each shape call is self-contained: it carries its own paint or
/// stroke rather than relying on ambient context state.
pub trait Surface {
    type Error;

    /// Erase the whole viewport.
    fn clear(&mut self, viewport: Viewport) -> Result<(), Self::Error>;
    fn fill_rect(&mut self, rect: Rect, paint: &Paint) -> Result<(), Self::Error>;
    fn fill_circle(&mut self, center: Point, radius: f64, paint: &Paint) -> Result<(), Self::Error>;
    fn stroke_circle(&mut self, center: Point, radius: f64, stroke: &Stroke) -> Result<(), Self::Error>;
    fn line(&mut self, from: Point, to: Point, stroke: &Stroke) -> Result<(), Self::Error>;
    fn text(&mut self, text: &str, at: Point, style: &TextStyle) -> Result<(), Self::Error>;
}

// =============================================================
// Scene
// =============================================================

/// Draw the full scene: background, star field, grid, equator, objects, labels.
///
/// `hovered` is drawn highlighted. `backdrop` supplies the decorative stars.
///
/// # Errors
///
/// Returns `Err` if any surface call fails.
pub fn draw<S: Surface>(
    surface: &mut S,
    objects: &[CelestialObject],
    filter: &ActiveFilter,
    transform: &ViewportTransform,
    viewport: Viewport,
    hovered: Option<&ObjectId>,
    backdrop: &StarField,
) -> Result<(), S::Error> {
    // Layer 1: background.
    surface.clear(viewport)?;
    draw_background(surface, viewport)?;

    // Layer 2: decorative stars.
    draw_backdrop(surface, backdrop, viewport)?;

    // Layer 3: coordinate grid and equator.
    draw_grid(surface, transform, viewport)?;

    // Layer 4: objects.
    for (obj, coord) in filter.visible(objects) {
        let center = project(coord, viewport, transform);
        if !viewport.contains_with_margin(center, CLIP_MARGIN_PX) {
            continue;
        }
        let is_hovered = hovered.is_some_and(|id| *id == obj.id);
        draw_object(surface, obj, center, transform.scale(), is_hovered)?;
    }

    // Layer 5: axis labels.
    draw_labels(surface, transform, viewport)
}

/// Marker radius for an object: brighter (lower magnitude) draws larger.
#[must_use]
pub fn marker_radius(magnitude: Option<f64>, scale: f64) -> f64 {
    magnitude.map_or(MARKER_DEFAULT_PX, |m| (MARKER_BASE_PX - m).max(MARKER_MIN_PX)) * scale
}

fn draw_background<S: Surface>(surface: &mut S, viewport: Viewport) -> Result<(), S::Error> {
    let gradient = RadialGradient {
        center: viewport.center(),
        inner_radius: 0.0,
        outer_radius: viewport.width.max(viewport.height),
        stops: vec![
            ColorStop { offset: 0.0, color: BACKGROUND_INNER.to_owned() },
            ColorStop { offset: 1.0, color: BACKGROUND_OUTER.to_owned() },
        ],
    };
    let rect = Rect { x: 0.0, y: 0.0, width: viewport.width, height: viewport.height };
    surface.fill_rect(rect, &Paint::Radial(gradient))
}

fn draw_backdrop<S: Surface>(surface: &mut S, backdrop: &StarField, viewport: Viewport) -> Result<(), S::Error> {
    for star in backdrop.stars() {
        let paint = Paint::Solid(format!("rgba(255, 255, 255, {:.3})", star.opacity));
        surface.fill_circle(star.position(viewport), star.radius, &paint)?;
    }
    Ok(())
}

fn draw_grid<S: Surface>(surface: &mut S, transform: &ViewportTransform, viewport: Viewport) -> Result<(), S::Error> {
    let grid = Stroke::new(GRID_COLOR, 1.0);

    for ra in (0..=360).step_by(GRID_STEP_DEG) {
        let x = project(SkyCoord::new(f64::from(ra), 0.0), viewport, transform).x;
        surface.line(Point::new(x, 0.0), Point::new(x, viewport.height), &grid)?;
    }
    for dec in (-90..=90).step_by(GRID_STEP_DEG) {
        let y = project(SkyCoord::new(0.0, f64::from(dec)), viewport, transform).y;
        surface.line(Point::new(0.0, y), Point::new(viewport.width, y), &grid)?;
    }

    let equator_y = project(SkyCoord::new(0.0, 0.0), viewport, transform).y;
    surface.line(
        Point::new(0.0, equator_y),
        Point::new(viewport.width, equator_y),
        &Stroke::new(EQUATOR_COLOR, 2.0),
    )
}

fn draw_object<S: Surface>(
    surface: &mut S,
    obj: &CelestialObject,
    center: Point,
    scale: f64,
    is_hovered: bool,
) -> Result<(), S::Error> {
    let color = source_color(&obj.source);
    let radius = marker_radius(obj.magnitude, scale);
    let glow_radius = radius * GLOW_FACTOR;

    let glow = RadialGradient {
        center,
        inner_radius: 0.0,
        outer_radius: glow_radius,
        stops: vec![
            ColorStop { offset: 0.0, color: with_alpha_hex(color, GLOW_ALPHA_HEX) },
            ColorStop { offset: 1.0, color: "transparent".to_owned() },
        ],
    };
    surface.fill_circle(center, glow_radius, &Paint::Radial(glow))?;

    let body = if is_hovered { HOVER_FILL } else { color };
    surface.fill_circle(center, radius, &Paint::solid(body))?;

    if is_hovered {
        surface.stroke_circle(center, radius, &Stroke::new(color, 2.0))?;
    }
    Ok(())
}

fn draw_labels<S: Surface>(surface: &mut S, transform: &ViewportTransform, viewport: Viewport) -> Result<(), S::Error> {
    let mut style = TextStyle { font: LABEL_FONT.to_owned(), color: LABEL_COLOR.to_owned(), align: TextAlign::Center };

    for ra in (0..=360).step_by(RA_LABEL_STEP_DEG) {
        let x = project(SkyCoord::new(f64::from(ra), 0.0), viewport, transform).x;
        surface.text(&format!("{ra}°"), Point::new(x, viewport.height - 5.0), &style)?;
    }

    style.align = TextAlign::Right;
    for dec in (-DEC_LABEL_LIMIT_DEG..=DEC_LABEL_LIMIT_DEG).step_by(DEC_LABEL_STEP_DEG) {
        let y = project(SkyCoord::new(0.0, f64::from(dec)), viewport, transform).y;
        surface.text(&format!("{dec}°"), Point::new(25.0, y + 4.0), &style)?;
    }
    Ok(())
}

/// Append a two-digit alpha to a `#RRGGBB` colour; other formats pass through.
fn with_alpha_hex(color: &str, alpha: &str) -> String {
    if color.len() == 7 && color.starts_with('#') {
        format!("{color}{alpha}")
    } else {
        color.to_owned()
    }
}

// =============================================================
// Recorder
// =============================================================

/// One captured surface call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Clear(Viewport),
    FillRect(Rect, Paint),
    FillCircle { center: Point, radius: f64, paint: Paint },
    StrokeCircle { center: Point, radius: f64, stroke: Stroke },
    Line { from: Point, to: Point, stroke: Stroke },
    Text { text: String, at: Point, style: TextStyle },
}

/// A [`Surface`] that records calls instead of drawing them.
#[derive(Debug, Clone, Default)]
pub struct Recorder {
    pub ops: Vec<DrawOp>,
}

impl Recorder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Surface for Recorder {
    type Error = Infallible;

    fn clear(&mut self, viewport: Viewport) -> Result<(), Infallible> {
        self.ops.push(DrawOp::Clear(viewport));
        Ok(())
    }

    fn fill_rect(&mut self, rect: Rect, paint: &Paint) -> Result<(), Infallible> {
        self.ops.push(DrawOp::FillRect(rect, paint.clone()));
        Ok(())
    }

    fn fill_circle(&mut self, center: Point, radius: f64, paint: &Paint) -> Result<(), Infallible> {
        self.ops.push(DrawOp::FillCircle { center, radius, paint: paint.clone() });
        Ok(())
    }

    fn stroke_circle(&mut self, center: Point, radius: f64, stroke: &Stroke) -> Result<(), Infallible> {
        self.ops.push(DrawOp::StrokeCircle { center, radius, stroke: stroke.clone() });
        Ok(())
    }

    fn line(&mut self, from: Point, to: Point, stroke: &Stroke) -> Result<(), Infallible> {
        self.ops.push(DrawOp::Line { from, to, stroke: stroke.clone() });
        Ok(())
    }

    fn text(&mut self, text: &str, at: Point, style: &TextStyle) -> Result<(), Infallible> {
        self.ops.push(DrawOp::Text { text: text.to_owned(), at, style: style.clone() });
        Ok(())
    }
}
