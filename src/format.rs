//! Display formatting for coordinates, sizes, counts, and durations.
//!
//! Missing values render as [`NOT_AVAILABLE`].

#[cfg(test)]
#[path = "format_test.rs"]
mod format_test;

pub const NOT_AVAILABLE: &str = "N/A";

const SIZE_UNITS: [&str; 5] = ["Bytes", "KB", "MB", "GB", "TB"];

/// Long display names for catalog source keys.
const SOURCE_NAMES: [(&str, &str); 7] = [
    ("nasa", "NASA"),
    ("esa", "ESA"),
    ("observatory", "Observatory"),
    ("hubble", "Hubble Space Telescope"),
    ("jwst", "James Webb Space Telescope"),
    ("gaia", "Gaia Mission"),
    ("chandra", "Chandra X-ray Observatory"),
];

/// RA in hours/minutes/seconds and Dec in signed degrees/arcmin/arcsec,
/// e.g. `5h 35m 16.80s, -5° 23' 24.0"`.
#[must_use]
pub fn format_coordinates(ra: Option<f64>, dec: Option<f64>) -> String {
    let (Some(ra), Some(dec)) = (ra, dec) else {
        return NOT_AVAILABLE.to_owned();
    };
    let (ra_h, ra_m, ra_s) = sexagesimal(ra / 15.0);
    let sign = if dec >= 0.0 { '+' } else { '-' };
    let (dec_d, dec_m, dec_s) = sexagesimal(dec.abs());
    format!("{ra_h}h {ra_m}m {ra_s:.2}s, {sign}{dec_d}° {dec_m}' {dec_s:.1}\"")
}

/// (whole units, whole minutes, seconds) of a non-negative value.
#[allow(clippy::cast_possible_truncation)]
fn sexagesimal(value: f64) -> (i64, i64, f64) {
    let whole = value.floor();
    let minutes = (value - whole) * 60.0;
    let min_whole = minutes.floor();
    (whole as i64, min_whole as i64, (minutes - min_whole) * 60.0)
}

/// Binary-prefixed size with at most two decimals, e.g. `1.5 KB`.
#[must_use]
pub fn format_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_owned();
    }
    #[allow(clippy::cast_precision_loss)]
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < SIZE_UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{} {}", trim_decimals(&format!("{value:.2}")), SIZE_UNITS[unit])
}

fn trim_decimals(fixed: &str) -> &str {
    if fixed.contains('.') { fixed.trim_end_matches('0').trim_end_matches('.') } else { fixed }
}

/// Abbreviate thousands, millions, and billions with one decimal.
#[must_use]
pub fn format_large_number(num: f64) -> String {
    if num >= 1e9 {
        format!("{:.1}B", num / 1e9)
    } else if num >= 1e6 {
        format!("{:.1}M", num / 1e6)
    } else if num >= 1e3 {
        format!("{:.1}K", num / 1e3)
    } else {
        num.to_string()
    }
}

/// `value` as a percentage of 1.0, e.g. `0.256` → `25.6%`.
#[must_use]
pub fn format_percentage(value: f64, decimals: usize) -> String {
    format!("{:.*}%", decimals, value * 100.0)
}

/// Milliseconds as `850ms`, `4.2s`, `3m 12s`, or `2h 5m`.
#[must_use]
pub fn format_duration(ms: u64) -> String {
    match ms {
        0..1_000 => format!("{ms}ms"),
        #[allow(clippy::cast_precision_loss)]
        1_000..60_000 => format!("{:.1}s", ms as f64 / 1000.0),
        60_000..3_600_000 => format!("{}m {}s", ms / 60_000, (ms % 60_000) / 1000),
        _ => format!("{}h {}m", ms / 3_600_000, (ms % 3_600_000) / 60_000),
    }
}

/// Fixed-point, switching to exponent notation (`1.2346e+6`) for very
/// large or very small non-zero magnitudes.
#[must_use]
pub fn format_astronomical_number(num: f64, precision: usize) -> String {
    let abs = num.abs();
    if abs >= 1e6 || (abs < 1e-4 && num != 0.0) {
        let formatted = format!("{num:.precision$e}");
        match formatted.split_once('e') {
            Some((mantissa, exp)) if exp.starts_with('-') => format!("{mantissa}e{exp}"),
            Some((mantissa, exp)) => format!("{mantissa}e+{exp}"),
            None => formatted,
        }
    } else {
        format!("{num:.precision$}")
    }
}

/// Cut `s` to `max` characters, ending with `...` when shortened.
#[must_use]
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_owned();
    }
    let kept: String = s.chars().take(max.saturating_sub(3)).collect();
    format!("{kept}...")
}

/// Long name for a source key; unknown keys pass through unchanged.
#[must_use]
pub fn source_display_name(source: Option<&str>) -> String {
    let Some(source) = source.filter(|s| !s.is_empty()) else {
        return "Unknown".to_owned();
    };
    SOURCE_NAMES
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(source))
        .map_or_else(|| source.to_owned(), |(_, name)| (*name).to_owned())
}
