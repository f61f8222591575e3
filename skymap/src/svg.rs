//! Headless [`Surface`] that writes a standalone SVG document.
//!
//! Used by the CLI to render sky maps without a browser. Gradients are
//! collected into `<defs>` and referenced by id; everything else is emitted
//! in draw order, so later shapes paint over earlier ones exactly as on a
//! canvas.

#[cfg(test)]
#[path = "svg_test.rs"]
mod svg_test;

use std::fmt::{self, Write};

use crate::projection::{Point, Viewport};
use crate::render::{Paint, RadialGradient, Rect, Stroke, Surface, TextAlign, TextStyle};

/// Accumulates SVG markup for one frame.
#[derive(Debug, Clone)]
pub struct SvgSurface {
    viewport: Viewport,
    defs: String,
    body: String,
    next_gradient: usize,
}

impl SvgSurface {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self { viewport, defs: String::new(), body: String::new(), next_gradient: 0 }
    }

    /// Close the document and return the markup.
    #[must_use]
    pub fn finish(self) -> String {
        format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}"><defs>{defs}</defs>{body}</svg>"#,
            w = self.viewport.width,
            h = self.viewport.height,
            defs = self.defs,
            body = self.body,
        )
    }

    /// Resolve a paint to an SVG `fill` value, registering gradients in `<defs>`.
    fn fill_value(&mut self, paint: &Paint) -> Result<String, fmt::Error> {
        match paint {
            Paint::Solid(color) => Ok(escape(color)),
            Paint::Radial(gradient) => {
                let id = self.push_gradient(gradient)?;
                Ok(format!("url(#{id})"))
            }
        }
    }

    fn push_gradient(&mut self, g: &RadialGradient) -> Result<String, fmt::Error> {
        let id = format!("g{}", self.next_gradient);
        self.next_gradient += 1;
        write!(
            self.defs,
            r#"<radialGradient id="{id}" gradientUnits="userSpaceOnUse" cx="{cx}" cy="{cy}" r="{r}" fx="{cx}" fy="{cy}""#,
            cx = g.center.x,
            cy = g.center.y,
            r = g.outer_radius,
        )?;
        if g.inner_radius > 0.0 {
            write!(self.defs, r#" fr="{}""#, g.inner_radius)?;
        }
        self.defs.push('>');
        for stop in &g.stops {
            if stop.color == "transparent" {
                write!(self.defs, r#"<stop offset="{}" stop-color="black" stop-opacity="0"/>"#, stop.offset)?;
            } else {
                write!(self.defs, r#"<stop offset="{}" stop-color="{}"/>"#, stop.offset, escape(&stop.color))?;
            }
        }
        self.defs.push_str("</radialGradient>");
        Ok(id)
    }
}

impl Surface for SvgSurface {
    type Error = fmt::Error;

    fn clear(&mut self, viewport: Viewport) -> Result<(), fmt::Error> {
        self.viewport = viewport;
        self.defs.clear();
        self.body.clear();
        self.next_gradient = 0;
        Ok(())
    }

    fn fill_rect(&mut self, rect: Rect, paint: &Paint) -> Result<(), fmt::Error> {
        let fill = self.fill_value(paint)?;
        write!(
            self.body,
            r#"<rect x="{}" y="{}" width="{}" height="{}" fill="{fill}"/>"#,
            rect.x, rect.y, rect.width, rect.height
        )
    }

    fn fill_circle(&mut self, center: Point, radius: f64, paint: &Paint) -> Result<(), fmt::Error> {
        if !(center.x.is_finite() && center.y.is_finite() && radius.is_finite()) {
            return Ok(());
        }
        let fill = self.fill_value(paint)?;
        write!(self.body, r#"<circle cx="{}" cy="{}" r="{radius}" fill="{fill}"/>"#, center.x, center.y)
    }

    fn stroke_circle(&mut self, center: Point, radius: f64, stroke: &Stroke) -> Result<(), fmt::Error> {
        if !(center.x.is_finite() && center.y.is_finite() && radius.is_finite()) {
            return Ok(());
        }
        write!(
            self.body,
            r#"<circle cx="{}" cy="{}" r="{radius}" fill="none" stroke="{}" stroke-width="{}"/>"#,
            center.x,
            center.y,
            escape(&stroke.color),
            stroke.width
        )
    }

    fn line(&mut self, from: Point, to: Point, stroke: &Stroke) -> Result<(), fmt::Error> {
        write!(
            self.body,
            r#"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{}" stroke-width="{}"/>"#,
            from.x,
            from.y,
            to.x,
            to.y,
            escape(&stroke.color),
            stroke.width
        )
    }

    fn text(&mut self, text: &str, at: Point, style: &TextStyle) -> Result<(), fmt::Error> {
        write!(
            self.body,
            r#"<text x="{}" y="{}" text-anchor="{}" fill="{}" style="font: {}">{}</text>"#,
            at.x,
            at.y,
            text_anchor(style.align),
            escape(&style.color),
            escape(&style.font),
            escape(text)
        )
    }
}

fn text_anchor(align: TextAlign) -> &'static str {
    match align {
        TextAlign::Left => "start",
        TextAlign::Center => "middle",
        TextAlign::Right => "end",
    }
}

/// Escape XML special characters for attribute and text content.
fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}
