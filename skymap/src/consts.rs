//! Shared numeric constants for the sky-map crate.

// ── Zoom ────────────────────────────────────────────────────────

/// Lower bound for the viewport scale factor.
pub const ZOOM_MIN: f64 = 0.5;

/// Upper bound for the viewport scale factor.
pub const ZOOM_MAX: f64 = 5.0;

/// Scale multiplier for one wheel notch scrolling down (zoom out).
pub const WHEEL_ZOOM_OUT: f64 = 0.9;

/// Scale multiplier for one wheel notch scrolling up (zoom in).
pub const WHEEL_ZOOM_IN: f64 = 1.1;

/// Scale multiplier for the zoom-in button.
pub const BUTTON_ZOOM_IN: f64 = 1.2;

/// Scale multiplier for the zoom-out button.
pub const BUTTON_ZOOM_OUT: f64 = 0.8;

// ── Hit-testing and clipping ────────────────────────────────────

/// Screen-space pick radius in pixels. Not scaled by zoom.
pub const HIT_RADIUS_PX: f64 = 15.0;

/// Slack around the viewport edge so glows that straddle it still draw.
pub const CLIP_MARGIN_PX: f64 = 20.0;

// ── Grid and labels ─────────────────────────────────────────────

/// Spacing between grid lines, in degrees, for both RA and Dec.
pub const GRID_STEP_DEG: usize = 30;

/// Spacing between RA axis labels, in degrees.
pub const RA_LABEL_STEP_DEG: usize = 60;

/// Spacing between Dec axis labels, in degrees.
pub const DEC_LABEL_STEP_DEG: usize = 30;

/// Outermost Dec label; labels run from `-DEC_LABEL_LIMIT_DEG` to `DEC_LABEL_LIMIT_DEG`.
pub const DEC_LABEL_LIMIT_DEG: i32 = 60;

// ── Objects ─────────────────────────────────────────────────────

/// Magnitude offset for the marker radius: `max(MIN, BASE - magnitude)`.
pub const MARKER_BASE_PX: f64 = 10.0;

/// Smallest marker radius before zoom scaling.
pub const MARKER_MIN_PX: f64 = 3.0;

/// Marker radius used when an object has no magnitude.
pub const MARKER_DEFAULT_PX: f64 = 5.0;

/// Glow radius as a multiple of the marker radius.
pub const GLOW_FACTOR: f64 = 3.0;

// ── Backdrop ────────────────────────────────────────────────────

/// Number of decorative background stars.
pub const BACKDROP_STAR_COUNT: usize = 200;

/// Largest decorative star radius in pixels.
pub const BACKDROP_MAX_RADIUS_PX: f64 = 1.5;

/// Seed for the star field of a freshly created map.
pub const DEFAULT_BACKDROP_SEED: u64 = 0x5EED_5747;
