use super::*;

#[test]
fn backing_store_scales_with_dpr() {
    assert_eq!(backing_size(800.0, 500.0, 1.0), (800, 500));
    assert_eq!(backing_size(800.0, 500.0, 2.0), (1600, 1000));
    assert_eq!(backing_size(333.0, 101.0, 1.5), (500, 152));
}

#[test]
fn unusable_dpr_falls_back_to_one() {
    assert_eq!(backing_size(640.0, 480.0, 0.0), (640, 480));
    assert_eq!(backing_size(640.0, 480.0, -2.0), (640, 480));
    assert_eq!(backing_size(640.0, 480.0, f64::NAN), (640, 480));
}

#[test]
fn degenerate_sizes_clamp() {
    assert_eq!(backing_size(-10.0, f64::INFINITY, 2.0), (0, 0));
    assert_eq!(backing_size(1e12, 0.0, 1.0), (u32::MAX, 0));
}
