use super::*;
use crate::backdrop::StarField;
use crate::filter::ActiveFilter;
use crate::object::sample_objects;
use crate::projection::ViewportTransform;
use crate::render::{ColorStop, draw};

fn vp() -> Viewport {
    Viewport::new(800.0, 500.0)
}

#[test]
fn empty_document_has_dimensions() {
    let svg = SvgSurface::new(vp()).finish();
    assert!(svg.starts_with("<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"800\" height=\"500\""));
    assert!(svg.ends_with("</svg>"));
}

#[test]
fn solid_circle_markup() {
    let mut s = SvgSurface::new(vp());
    s.fill_circle(Point::new(10.0, 20.5), 3.0, &Paint::solid("#3B82F6")).unwrap();
    let svg = s.finish();
    assert!(svg.contains(r##"<circle cx="10" cy="20.5" r="3" fill="#3B82F6"/>"##));
}

#[test]
fn gradients_go_to_defs_with_unique_ids() {
    let mut s = SvgSurface::new(vp());
    let g = RadialGradient {
        center: Point::new(5.0, 5.0),
        inner_radius: 0.0,
        outer_radius: 9.0,
        stops: vec![
            ColorStop { offset: 0.0, color: "#FFFFFF40".into() },
            ColorStop { offset: 1.0, color: "transparent".into() },
        ],
    };
    s.fill_circle(Point::new(5.0, 5.0), 9.0, &Paint::Radial(g.clone())).unwrap();
    s.fill_circle(Point::new(5.0, 5.0), 9.0, &Paint::Radial(g)).unwrap();
    let svg = s.finish();
    assert!(svg.contains(r#"<radialGradient id="g0""#));
    assert!(svg.contains(r#"<radialGradient id="g1""#));
    assert!(svg.contains(r#"fill="url(#g0)""#));
    assert!(svg.contains(r#"stop-color="black" stop-opacity="0""#));
    assert!(!svg.contains(" fr="));
}

#[test]
fn text_is_escaped_and_anchored() {
    let mut s = SvgSurface::new(vp());
    let style = TextStyle { font: "10px Space Grotesk".into(), color: "#fff".into(), align: TextAlign::Right };
    s.text("a<b & \"c\"", Point::new(25.0, 40.0), &style).unwrap();
    let svg = s.finish();
    assert!(svg.contains(r#"text-anchor="end""#));
    assert!(svg.contains("a&lt;b &amp; &quot;c&quot;</text>"));
}

#[test]
fn non_finite_circles_are_dropped() {
    let mut s = SvgSurface::new(vp());
    s.fill_circle(Point::new(f64::NAN, 1.0), 3.0, &Paint::solid("red")).unwrap();
    s.stroke_circle(Point::new(1.0, 1.0), f64::INFINITY, &Stroke::new("red", 1.0)).unwrap();
    assert!(!s.finish().contains("<circle"));
}

#[test]
fn clear_resets_content() {
    let mut s = SvgSurface::new(vp());
    s.line(Point::new(0.0, 0.0), Point::new(1.0, 1.0), &Stroke::new("red", 1.0)).unwrap();
    s.clear(Viewport::new(100.0, 50.0)).unwrap();
    let svg = s.finish();
    assert!(!svg.contains("<line"));
    assert!(svg.contains(r#"width="100" height="50""#));
}

#[test]
fn full_scene_renders() {
    let mut s = SvgSurface::new(vp());
    draw(
        &mut s,
        &sample_objects(),
        &ActiveFilter::default(),
        &ViewportTransform::default(),
        vp(),
        None,
        &StarField::new(3),
    )
    .unwrap();
    let svg = s.finish();
    assert_eq!(svg.matches("<line").count(), 21);
    assert_eq!(svg.matches("<text").count(), 12);
    // background + five object glows
    assert_eq!(svg.matches("<radialGradient").count(), 6);
    assert!(svg.contains("180°</text>"));
}
