//! Celestial object model and the known data-source catalog.
//!
//! Objects arrive from the dataset API (or the built-in demo sample) and are
//! never mutated by the map. Coordinates are kept exactly as received; the
//! wire format is flat (`ra_raw`, `dec_raw`, `ra_normalized`,
//! `dec_normalized`) and any of them may be missing.

#[cfg(test)]
#[path = "object_test.rs"]
mod object_test;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::filter::ViewMode;
use crate::projection::SkyCoord;

/// Object identifier. Catalogs use both numeric and string ids.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ObjectId {
    Num(i64),
    Text(String),
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Num(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for ObjectId {
    fn from(value: i64) -> Self {
        Self::Num(value)
    }
}

impl From<&str> for ObjectId {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

/// A catalogued sky object with raw and ICRS-normalized positions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CelestialObject {
    pub id: ObjectId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub source: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ra_raw: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dec_raw: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ra_normalized: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dec_normalized: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub magnitude: Option<f64>,
}

impl CelestialObject {
    /// Position for `mode`, or `None` when either component is missing or
    /// not a finite number.
    #[must_use]
    pub fn coord(&self, mode: ViewMode) -> Option<SkyCoord> {
        let (ra, dec) = match mode {
            ViewMode::Normalized => (self.ra_normalized?, self.dec_normalized?),
            ViewMode::Raw => (self.ra_raw?, self.dec_raw?),
        };
        Some(SkyCoord::new(ra, dec)).filter(|c| c.is_finite())
    }

    /// Lower-cased source label used for filter membership and colouring.
    #[must_use]
    pub fn source_key(&self) -> String {
        self.source.to_lowercase()
    }
}

// =============================================================
// Source catalog
// =============================================================

/// A known data source with its legend colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceInfo {
    pub key: &'static str,
    pub name: &'static str,
    pub color: &'static str,
}

/// Every source the map knows how to colour, in legend order.
pub const KNOWN_SOURCES: [SourceInfo; 6] = [
    SourceInfo { key: "nasa", name: "NASA", color: "#3B82F6" },
    SourceInfo { key: "esa", name: "ESA", color: "#8B5CF6" },
    SourceInfo { key: "observatory", name: "Observatory", color: "#10B981" },
    SourceInfo { key: "hubble", name: "Hubble", color: "#F59E0B" },
    SourceInfo { key: "jwst", name: "JWST", color: "#EF4444" },
    SourceInfo { key: "gaia", name: "Gaia", color: "#EC4899" },
];

/// Sources enabled when a map is first shown.
pub const DEFAULT_ACTIVE_SOURCES: [&str; 3] = ["nasa", "esa", "observatory"];

/// Colour for sources outside [`KNOWN_SOURCES`].
pub const UNKNOWN_SOURCE_COLOR: &str = "#FFFFFF";

/// Look up a source by key, case-insensitively.
#[must_use]
pub fn source_info(key: &str) -> Option<&'static SourceInfo> {
    KNOWN_SOURCES.iter().find(|s| s.key.eq_ignore_ascii_case(key))
}

/// Legend colour for a source label.
#[must_use]
pub fn source_color(key: &str) -> &'static str {
    source_info(key).map_or(UNKNOWN_SOURCE_COLOR, |s| s.color)
}

// =============================================================
// Demo sample
// =============================================================

/// Built-in demo objects shown when no dataset is loaded.
#[must_use]
pub fn sample_objects() -> Vec<CelestialObject> {
    let rows: [(i64, &str, &str, f64, f64, f64, f64, f64); 8] = [
        (1, "NGC 224 (Andromeda)", "nasa", 10.68, 41.27, 10.5, 41.1, 3.4),
        (2, "M31 Core", "esa", 10.69, 41.26, 10.7, 41.3, 4.5),
        (3, "NGC 6611", "hubble", 274.7, -13.8, 274.5, -13.9, 6.0),
        (4, "Orion Nebula", "observatory", 83.82, -5.39, 83.8, -5.4, 4.0),
        (5, "Sirius", "gaia", 101.29, -16.72, 101.3, -16.7, -1.46),
        (6, "Vega", "jwst", 279.23, 38.78, 279.2, 38.8, 0.03),
        (7, "Crab Nebula", "nasa", 83.63, 22.01, 83.6, 22.0, 8.4),
        (8, "Pleiades", "esa", 56.87, 24.12, 56.9, 24.1, 1.6),
    ];
    rows.into_iter()
        .map(|(id, name, source, ra_n, dec_n, ra_r, dec_r, mag)| CelestialObject {
            id: ObjectId::Num(id),
            name: name.to_owned(),
            source: source.to_owned(),
            ra_raw: Some(ra_r),
            dec_raw: Some(dec_r),
            ra_normalized: Some(ra_n),
            dec_normalized: Some(dec_n),
            magnitude: Some(mag),
        })
        .collect()
}
