#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::consts::HIT_RADIUS_PX;
use crate::filter::ActiveFilter;
use crate::object::CelestialObject;
use crate::projection::{Point, Viewport, ViewportTransform, project};

/// How ties between several objects under the pointer are resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HitPolicy {
    /// The first object in input order within the radius wins.
    #[default]
    FirstMatch,
    /// The object closest to the pointer wins; equal distances keep input order.
    Nearest,
}

/// Find the object under `pointer` using the default [`HitPolicy::FirstMatch`].
///
/// Only objects that pass `filter` are considered, at the position for the
/// filter's view mode. An object is a hit when its projected centre is
/// strictly closer than [`HIT_RADIUS_PX`].
#[must_use]
pub fn hit_test<'a>(
    pointer: Point,
    objects: &'a [CelestialObject],
    filter: &ActiveFilter,
    viewport: Viewport,
    transform: &ViewportTransform,
) -> Option<&'a CelestialObject> {
    hit_test_with(HitPolicy::FirstMatch, pointer, objects, filter, viewport, transform)
}

/// [`hit_test`] with an explicit tie-breaking policy.
#[must_use]
pub fn hit_test_with<'a>(
    policy: HitPolicy,
    pointer: Point,
    objects: &'a [CelestialObject],
    filter: &ActiveFilter,
    viewport: Viewport,
    transform: &ViewportTransform,
) -> Option<&'a CelestialObject> {
    let mut candidates = filter
        .visible(objects)
        .map(|(obj, coord)| (obj, project(coord, viewport, transform).distance(pointer)))
        .filter(|(_, dist)| *dist < HIT_RADIUS_PX);

    match policy {
        HitPolicy::FirstMatch => candidates.next().map(|(obj, _)| obj),
        HitPolicy::Nearest => candidates
            .fold(None::<(&CelestialObject, f64)>, |best, (obj, dist)| match best {
                Some((_, best_dist)) if best_dist <= dist => best,
                _ => Some((obj, dist)),
            })
            .map(|(obj, _)| obj),
    }
}
