//! Active data-source set and raw/normalized view mode.
//!
//! The renderer and the hit-tester both read the same [`ActiveFilter`]
//! through [`ActiveFilter::visible`], so an object is pickable exactly when
//! it is drawn and at exactly the position it is drawn.

#[cfg(test)]
#[path = "filter_test.rs"]
mod filter_test;

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::object::{CelestialObject, DEFAULT_ACTIVE_SOURCES};
use crate::projection::SkyCoord;

/// Which coordinate representation the map shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewMode {
    /// ICRS-converted positions.
    #[default]
    Normalized,
    /// Positions as ingested.
    Raw,
}

impl ViewMode {
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Normalized => Self::Raw,
            Self::Raw => Self::Normalized,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Normalized => "normalized",
            Self::Raw => "raw",
        }
    }

    /// Human label for the mode toggle.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Normalized => "Normalized",
            Self::Raw => "Raw Data",
        }
    }
}

/// Enabled source labels plus the active view mode.
///
/// Source labels are stored lower-cased; lookups are case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveFilter {
    sources: BTreeSet<String>,
    mode: ViewMode,
}

impl Default for ActiveFilter {
    fn default() -> Self {
        Self::new(DEFAULT_ACTIVE_SOURCES, ViewMode::default())
    }
}

impl ActiveFilter {
    #[must_use]
    pub fn new<I, S>(sources: I, mode: ViewMode) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self { sources: sources.into_iter().map(|s| s.as_ref().to_lowercase()).collect(), mode }
    }

    /// Flip membership of `source` in the active set.
    pub fn toggle(&mut self, source: &str) {
        let key = source.to_lowercase();
        if !self.sources.remove(&key) {
            self.sources.insert(key);
        }
    }

    pub fn set_view_mode(&mut self, mode: ViewMode) {
        self.mode = mode;
    }

    pub fn toggle_view_mode(&mut self) {
        self.mode = self.mode.toggled();
    }

    #[must_use]
    pub fn view_mode(&self) -> ViewMode {
        self.mode
    }

    #[must_use]
    pub fn is_active(&self, source: &str) -> bool {
        self.sources.contains(&source.to_lowercase())
    }

    /// Active source labels in sorted order.
    pub fn sources(&self) -> impl Iterator<Item = &str> {
        self.sources.iter().map(String::as_str)
    }

    /// Objects that pass the source filter and have a usable position in
    /// the current mode, paired with that position. Input order is kept.
    pub fn visible<'o>(&self, objects: &'o [CelestialObject]) -> impl Iterator<Item = (&'o CelestialObject, SkyCoord)> {
        objects
            .iter()
            .filter(move |obj| self.is_active(&obj.source))
            .filter_map(move |obj| obj.coord(self.mode).map(|c| (obj, c)))
    }
}
