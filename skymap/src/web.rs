//! Browser backend: [`Surface`] over `CanvasRenderingContext2d`, plus the
//! canvas-bound [`CanvasSkyMap`] host wrapper.
//!
//! All fallible `Canvas2D` calls propagate errors via `Result<(), JsValue>`.

#[cfg(test)]
#[path = "web_test.rs"]
mod web_test;

use std::f64::consts::TAU;

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::engine::SkyMap;
use crate::projection::{Point, Viewport};
use crate::render::{Paint, Rect, Stroke, Surface, TextStyle};

impl Surface for CanvasRenderingContext2d {
    type Error = JsValue;

    fn clear(&mut self, viewport: Viewport) -> Result<(), JsValue> {
        self.clear_rect(0.0, 0.0, viewport.width, viewport.height);
        Ok(())
    }

    fn fill_rect(&mut self, rect: Rect, paint: &Paint) -> Result<(), JsValue> {
        apply_fill(self, paint)?;
        CanvasRenderingContext2d::fill_rect(self, rect.x, rect.y, rect.width, rect.height);
        Ok(())
    }

    fn fill_circle(&mut self, center: Point, radius: f64, paint: &Paint) -> Result<(), JsValue> {
        apply_fill(self, paint)?;
        self.begin_path();
        self.arc(center.x, center.y, radius, 0.0, TAU)?;
        self.fill();
        Ok(())
    }

    fn stroke_circle(&mut self, center: Point, radius: f64, stroke: &Stroke) -> Result<(), JsValue> {
        self.set_stroke_style_str(&stroke.color);
        self.set_line_width(stroke.width);
        self.begin_path();
        self.arc(center.x, center.y, radius, 0.0, TAU)?;
        CanvasRenderingContext2d::stroke(self);
        Ok(())
    }

    fn line(&mut self, from: Point, to: Point, stroke: &Stroke) -> Result<(), JsValue> {
        self.set_stroke_style_str(&stroke.color);
        self.set_line_width(stroke.width);
        self.begin_path();
        self.move_to(from.x, from.y);
        self.line_to(to.x, to.y);
        CanvasRenderingContext2d::stroke(self);
        Ok(())
    }

    fn text(&mut self, text: &str, at: Point, style: &TextStyle) -> Result<(), JsValue> {
        self.set_fill_style_str(&style.color);
        self.set_font(&style.font);
        self.set_text_align(style.align.as_css());
        self.fill_text(text, at.x, at.y)
    }
}

fn apply_fill(ctx: &CanvasRenderingContext2d, paint: &Paint) -> Result<(), JsValue> {
    match paint {
        Paint::Solid(color) => ctx.set_fill_style_str(color),
        Paint::Radial(g) => {
            let gradient =
                ctx.create_radial_gradient(g.center.x, g.center.y, g.inner_radius, g.center.x, g.center.y, g.outer_radius)?;
            for stop in &g.stops {
                gradient.add_color_stop(stop.offset, &stop.color)?;
            }
            ctx.set_fill_style_canvas_gradient(&gradient);
        }
    }
    Ok(())
}

/// A [`SkyMap`] bound to a canvas element.
pub struct CanvasSkyMap {
    canvas: HtmlCanvasElement,
    dpr: f64,
    pub map: SkyMap,
}

impl CanvasSkyMap {
    /// Bind `map` to `canvas`. The map viewport follows the canvas size.
    #[must_use]
    pub fn new(canvas: HtmlCanvasElement, mut map: SkyMap) -> Self {
        map.set_viewport(Viewport::new(f64::from(canvas.width()), f64::from(canvas.height())));
        Self { canvas, dpr: 1.0, map }
    }

    /// Resize to CSS pixels `width` x `height` at device pixel ratio `dpr`.
    ///
    /// The canvas backing store becomes `width * dpr` by `height * dpr`
    /// device pixels and its CSS box stays `width` x `height`, so
    /// [`Self::render`] can draw in CSS pixels under a `dpr` transform.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the canvas style properties cannot be set.
    pub fn set_viewport(&mut self, width: f64, height: f64, dpr: f64) -> Result<(), JsValue> {
        self.dpr = effective_dpr(dpr);
        let (backing_w, backing_h) = backing_size(width, height, self.dpr);
        self.canvas.set_width(backing_w);
        self.canvas.set_height(backing_h);
        let style = self.canvas.style();
        style.set_property("width", &format!("{width}px"))?;
        style.set_property("height", &format!("{height}px"))?;
        self.map.set_viewport(Viewport::new(width, height));
        Ok(())
    }

    /// Draw the current map state to the canvas.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the 2D context is unavailable or a canvas call fails.
    pub fn render(&self) -> Result<(), JsValue> {
        let mut ctx = self
            .canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        ctx.set_transform(self.dpr, 0.0, 0.0, self.dpr, 0.0, 0.0)?;
        self.map.render(&mut ctx)
    }

    /// Apply a CSS cursor keyword to the canvas element.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the style property cannot be set.
    pub fn set_cursor(&self, cursor: &str) -> Result<(), JsValue> {
        self.canvas.style().set_property("cursor", cursor)
    }
}

/// `dpr` if usable, else 1.
fn effective_dpr(dpr: f64) -> f64 {
    if dpr.is_finite() && dpr > 0.0 { dpr } else { 1.0 }
}

/// Device-pixel size of a canvas backing store for a CSS size at `dpr`.
/// Non-finite or negative sizes give 0.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn backing_size(width: f64, height: f64, dpr: f64) -> (u32, u32) {
    let dpr = effective_dpr(dpr);
    let device = |css: f64| {
        let px = (css * dpr).round();
        if px.is_finite() && px > 0.0 { px.min(f64::from(u32::MAX)) as u32 } else { 0 }
    };
    (device(width), device(height))
}
