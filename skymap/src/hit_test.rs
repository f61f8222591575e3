use super::*;
use crate::filter::ViewMode;
use crate::object::ObjectId;
use crate::projection::SkyCoord;

// =============================================================
// Helpers
// =============================================================

fn obj(id: i64, source: &str, ra: f64, dec: f64) -> CelestialObject {
    CelestialObject {
        id: ObjectId::Num(id),
        name: format!("obj-{id}"),
        source: source.to_owned(),
        ra_raw: Some(ra + 90.0),
        dec_raw: Some(dec),
        ra_normalized: Some(ra),
        dec_normalized: Some(dec),
        magnitude: Some(5.0),
    }
}

fn vp() -> Viewport {
    Viewport::new(800.0, 500.0)
}

fn all_sources() -> ActiveFilter {
    ActiveFilter::new(["nasa", "esa", "hubble"], ViewMode::Normalized)
}

fn id_of(hit: Option<&CelestialObject>) -> Option<ObjectId> {
    hit.map(|o| o.id.clone())
}

// ra=180, dec=0 projects to exactly (800, 500) on an 800x500 identity view.
const CENTER: Point = Point { x: 800.0, y: 500.0 };

// =============================================================
// Basic hits
// =============================================================

#[test]
fn pointer_on_object_hits() {
    let objects = vec![obj(1, "nasa", 180.0, 0.0)];
    let hit = hit_test(CENTER, &objects, &all_sources(), vp(), &ViewportTransform::default());
    assert_eq!(id_of(hit), Some(ObjectId::Num(1)));
}

#[test]
fn empty_space_misses() {
    let objects = vec![obj(1, "nasa", 180.0, 0.0)];
    let hit = hit_test(Point::new(100.0, 100.0), &objects, &all_sources(), vp(), &ViewportTransform::default());
    assert!(hit.is_none());
}

#[test]
fn no_objects_misses() {
    let hit = hit_test(CENTER, &[], &all_sources(), vp(), &ViewportTransform::default());
    assert!(hit.is_none());
}

// =============================================================
// Radius boundary
// =============================================================

#[test]
fn exactly_fifteen_pixels_is_excluded() {
    let objects = vec![obj(1, "nasa", 180.0, 0.0)];
    // (9, 12) is exactly 15 px away.
    let hit = hit_test(Point::new(809.0, 512.0), &objects, &all_sources(), vp(), &ViewportTransform::default());
    assert!(hit.is_none());
}

#[test]
fn just_inside_fifteen_pixels_is_eligible() {
    let objects = vec![obj(1, "nasa", 180.0, 0.0)];
    let hit = hit_test(Point::new(814.99, 500.0), &objects, &all_sources(), vp(), &ViewportTransform::default());
    assert_eq!(id_of(hit), Some(ObjectId::Num(1)));
}

#[test]
fn radius_is_not_scaled_by_zoom() {
    let objects = vec![obj(1, "nasa", 0.0, 0.0)];
    let t = ViewportTransform::new(5.0, Point::default());
    let at = project(SkyCoord::new(0.0, 0.0), vp(), &t);
    let near = Point::new(at.x + 14.0, at.y);
    let far = Point::new(at.x + 16.0, at.y);
    assert!(hit_test(near, &objects, &all_sources(), vp(), &t).is_some());
    assert!(hit_test(far, &objects, &all_sources(), vp(), &t).is_none());
}

// =============================================================
// Filtering
// =============================================================

#[test]
fn inactive_source_is_never_hit() {
    let objects = vec![obj(1, "gaia", 180.0, 0.0)];
    let hit = hit_test(CENTER, &objects, &all_sources(), vp(), &ViewportTransform::default());
    assert!(hit.is_none());
}

#[test]
fn inactive_source_is_skipped_for_active_neighbour() {
    let objects = vec![obj(1, "gaia", 180.0, 0.0), obj(2, "esa", 180.0, 0.0)];
    let hit = hit_test(CENTER, &objects, &all_sources(), vp(), &ViewportTransform::default());
    assert_eq!(id_of(hit), Some(ObjectId::Num(2)));
}

#[test]
fn source_match_ignores_case() {
    let objects = vec![obj(1, "NASA", 180.0, 0.0)];
    let hit = hit_test(CENTER, &objects, &all_sources(), vp(), &ViewportTransform::default());
    assert!(hit.is_some());
}

#[test]
fn view_mode_selects_coordinates() {
    // Raw ra is normalized ra + 90, so in raw mode the object moves 200 px right.
    let objects = vec![obj(1, "nasa", 90.0, 0.0)];
    let mut filter = all_sources();
    let normalized_at = Point::new(600.0, 500.0);
    assert!(hit_test(normalized_at, &objects, &filter, vp(), &ViewportTransform::default()).is_some());
    filter.set_view_mode(ViewMode::Raw);
    assert!(hit_test(normalized_at, &objects, &filter, vp(), &ViewportTransform::default()).is_none());
    assert!(hit_test(CENTER, &objects, &filter, vp(), &ViewportTransform::default()).is_some());
}

#[test]
fn objects_without_coordinates_are_skipped() {
    let mut broken = obj(1, "nasa", 180.0, 0.0);
    broken.dec_normalized = None;
    let objects = vec![broken, obj(2, "nasa", 180.0, 0.0)];
    let hit = hit_test(CENTER, &objects, &all_sources(), vp(), &ViewportTransform::default());
    assert_eq!(id_of(hit), Some(ObjectId::Num(2)));
}

// =============================================================
// Tie-breaking
// =============================================================

#[test]
fn first_match_wins_over_closer_object() {
    // Object 1 is ~10 px from the pointer, object 2 sits right on it.
    let objects = vec![obj(1, "nasa", 184.5, 0.0), obj(2, "esa", 180.0, 0.0)];
    let hit = hit_test(CENTER, &objects, &all_sources(), vp(), &ViewportTransform::default());
    assert_eq!(id_of(hit), Some(ObjectId::Num(1)));
}

#[test]
fn nearest_policy_picks_closest() {
    let objects = vec![obj(1, "nasa", 184.5, 0.0), obj(2, "esa", 180.0, 0.0)];
    let hit = hit_test_with(
        HitPolicy::Nearest,
        CENTER,
        &objects,
        &all_sources(),
        vp(),
        &ViewportTransform::default(),
    );
    assert_eq!(id_of(hit), Some(ObjectId::Num(2)));
}

#[test]
fn nearest_policy_keeps_input_order_on_ties() {
    let objects = vec![obj(1, "nasa", 180.0, 0.0), obj(2, "esa", 180.0, 0.0)];
    let hit = hit_test_with(
        HitPolicy::Nearest,
        CENTER,
        &objects,
        &all_sources(),
        vp(),
        &ViewportTransform::default(),
    );
    assert_eq!(id_of(hit), Some(ObjectId::Num(1)));
}

#[test]
fn default_policy_is_first_match() {
    assert_eq!(HitPolicy::default(), HitPolicy::FirstMatch);
}

// =============================================================
// Transform consistency
// =============================================================

#[test]
fn hit_follows_pan_offset() {
    let objects = vec![obj(1, "nasa", 180.0, 0.0)];
    let t = ViewportTransform::new(1.0, Point::new(-200.0, -100.0));
    assert!(hit_test(CENTER, &objects, &all_sources(), vp(), &t).is_none());
    assert!(hit_test(Point::new(600.0, 400.0), &objects, &all_sources(), vp(), &t).is_some());
}
