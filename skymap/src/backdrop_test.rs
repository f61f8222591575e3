use super::*;

#[test]
fn same_seed_same_stars() {
    assert_eq!(StarField::new(42), StarField::new(42));
}

#[test]
fn different_seeds_differ() {
    assert_ne!(StarField::new(1).stars(), StarField::new(2).stars());
}

#[test]
fn generates_configured_count() {
    assert_eq!(StarField::new(7).stars().len(), BACKDROP_STAR_COUNT);
}

#[test]
fn stars_stay_in_documented_ranges() {
    for star in StarField::new(99).stars() {
        assert!((0.0..1.0).contains(&star.fx));
        assert!((0.0..1.0).contains(&star.fy));
        assert!((0.0..BACKDROP_MAX_RADIUS_PX).contains(&star.radius));
        assert!((0.2..=0.7).contains(&star.opacity));
    }
}

#[test]
fn reseed_replaces_stars_and_seed() {
    let mut field = StarField::new(5);
    let before = field.stars().to_vec();
    field.reseed(6);
    assert_eq!(field.seed(), 6);
    assert_ne!(field.stars(), before.as_slice());
    assert_eq!(field, StarField::new(6));
}

#[test]
fn position_scales_with_viewport() {
    let star = BackdropStar { fx: 0.25, fy: 0.5, radius: 1.0, opacity: 0.3 };
    let p = star.position(Viewport::new(800.0, 500.0));
    assert_eq!(p, Point::new(200.0, 250.0));
}
