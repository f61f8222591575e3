use super::*;
use crate::object::sample_objects;

// =============================================================
// ViewMode
// =============================================================

#[test]
fn view_mode_defaults_to_normalized() {
    assert_eq!(ViewMode::default(), ViewMode::Normalized);
}

#[test]
fn view_mode_toggled_round_trips() {
    assert_eq!(ViewMode::Normalized.toggled(), ViewMode::Raw);
    assert_eq!(ViewMode::Raw.toggled().toggled(), ViewMode::Raw);
}

#[test]
fn view_mode_labels() {
    assert_eq!(ViewMode::Normalized.as_str(), "normalized");
    assert_eq!(ViewMode::Raw.label(), "Raw Data");
}

// =============================================================
// ActiveFilter
// =============================================================

#[test]
fn default_filter_enables_three_sources() {
    let f = ActiveFilter::default();
    assert_eq!(f.sources().collect::<Vec<_>>(), vec!["esa", "nasa", "observatory"]);
    assert_eq!(f.view_mode(), ViewMode::Normalized);
}

#[test]
fn toggle_twice_restores_original_set() {
    let original = ActiveFilter::default();
    let mut f = original.clone();
    f.toggle("hubble");
    assert!(f.is_active("hubble"));
    f.toggle("hubble");
    assert_eq!(f, original);

    f.toggle("nasa");
    assert!(!f.is_active("nasa"));
    f.toggle("nasa");
    assert_eq!(f.sources().collect::<Vec<_>>(), original.sources().collect::<Vec<_>>());
}

#[test]
fn toggle_is_case_insensitive() {
    let mut f = ActiveFilter::default();
    f.toggle("NASA");
    assert!(!f.is_active("nasa"));
    assert!(!f.is_active("Nasa"));
}

#[test]
fn set_same_view_mode_is_noop() {
    let mut f = ActiveFilter::default();
    let before = f.clone();
    f.set_view_mode(ViewMode::Normalized);
    f.set_view_mode(ViewMode::Normalized);
    assert_eq!(f, before);
}

#[test]
fn toggle_view_mode_flips() {
    let mut f = ActiveFilter::default();
    f.toggle_view_mode();
    assert_eq!(f.view_mode(), ViewMode::Raw);
    f.toggle_view_mode();
    assert_eq!(f.view_mode(), ViewMode::Normalized);
}

#[test]
fn visible_drops_inactive_sources() {
    let objects = sample_objects();
    let f = ActiveFilter::default();
    let names: Vec<&str> = f.visible(&objects).map(|(o, _)| o.name.as_str()).collect();
    assert_eq!(names, vec!["NGC 224 (Andromeda)", "M31 Core", "Orion Nebula", "Crab Nebula", "Pleiades"]);
}

#[test]
fn visible_uses_coordinates_for_current_mode() {
    let objects = sample_objects();
    let mut f = ActiveFilter::new(["nasa"], ViewMode::Raw);
    let (_, coord) = f.visible(&objects).next().unwrap();
    assert_eq!(coord, SkyCoord::new(10.5, 41.1));
    f.set_view_mode(ViewMode::Normalized);
    let (_, coord) = f.visible(&objects).next().unwrap();
    assert_eq!(coord, SkyCoord::new(10.68, 41.27));
}

#[test]
fn visible_skips_objects_without_coordinates() {
    let mut objects = sample_objects();
    objects[0].dec_normalized = None;
    let f = ActiveFilter::new(["nasa"], ViewMode::Normalized);
    let names: Vec<&str> = f.visible(&objects).map(|(o, _)| o.name.as_str()).collect();
    assert_eq!(names, vec!["Crab Nebula"]);
}

#[test]
fn empty_filter_shows_nothing() {
    let objects = sample_objects();
    let f = ActiveFilter::new(Vec::<String>::new(), ViewMode::Normalized);
    assert_eq!(f.visible(&objects).count(), 0);
}
