//! Decorative star field drawn behind the grid.
//!
//! Stars are generated from an explicit seed and stored in viewport-relative
//! units, so redraws (pan, zoom, hover, resize) show the same backdrop until
//! the seed is deliberately refreshed.

#[cfg(test)]
#[path = "backdrop_test.rs"]
mod backdrop_test;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::consts::{BACKDROP_MAX_RADIUS_PX, BACKDROP_STAR_COUNT};
use crate::projection::{Point, Viewport};

/// One background star. Position is a fraction of the viewport size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BackdropStar {
    pub fx: f64,
    pub fy: f64,
    pub radius: f64,
    pub opacity: f64,
}

impl BackdropStar {
    /// Pixel position inside `viewport`.
    #[must_use]
    pub fn position(&self, viewport: Viewport) -> Point {
        Point::new(self.fx * viewport.width, self.fy * viewport.height)
    }
}

/// A seeded, cached set of background stars.
#[derive(Debug, Clone, PartialEq)]
pub struct StarField {
    seed: u64,
    stars: Vec<BackdropStar>,
}

impl StarField {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self { seed, stars: generate(seed, BACKDROP_STAR_COUNT) }
    }

    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    #[must_use]
    pub fn stars(&self) -> &[BackdropStar] {
        &self.stars
    }

    /// Replace the stars with a fresh set from `seed`.
    pub fn reseed(&mut self, seed: u64) {
        self.seed = seed;
        self.stars = generate(seed, BACKDROP_STAR_COUNT);
    }
}

fn generate(seed: u64, count: usize) -> Vec<BackdropStar> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| BackdropStar {
            fx: rng.random::<f64>(),
            fy: rng.random::<f64>(),
            radius: rng.random::<f64>() * BACKDROP_MAX_RADIUS_PX,
            opacity: rng.random::<f64>() * 0.5 + 0.2,
        })
        .collect()
}
