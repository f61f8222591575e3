use super::*;

#[test]
fn coordinates_in_sexagesimal() {
    assert_eq!(format_coordinates(Some(83.82), Some(-5.39)), "5h 35m 16.80s, -5° 23' 24.0\"");
    assert_eq!(format_coordinates(Some(0.0), Some(0.0)), "0h 0m 0.00s, +0° 0' 0.0\"");
    assert_eq!(format_coordinates(Some(10.68), Some(41.27)), "0h 42m 43.20s, +41° 16' 12.0\"");
}

#[test]
fn coordinates_missing_component() {
    assert_eq!(format_coordinates(None, Some(1.0)), NOT_AVAILABLE);
    assert_eq!(format_coordinates(Some(1.0), None), NOT_AVAILABLE);
}

#[test]
fn file_sizes() {
    assert_eq!(format_file_size(0), "0 Bytes");
    assert_eq!(format_file_size(500), "500 Bytes");
    assert_eq!(format_file_size(1024), "1 KB");
    assert_eq!(format_file_size(1536), "1.5 KB");
    assert_eq!(format_file_size(5 * 1024 * 1024 + 256 * 1024), "5.25 MB");
    assert_eq!(format_file_size(3 * 1024_u64.pow(4)), "3 TB");
    assert_eq!(format_file_size(2048 * 1024_u64.pow(4)), "2048 TB");
}

#[test]
fn large_numbers() {
    assert_eq!(format_large_number(999.0), "999");
    assert_eq!(format_large_number(1500.0), "1.5K");
    assert_eq!(format_large_number(2_340_000.0), "2.3M");
    assert_eq!(format_large_number(7_000_000_000.0), "7.0B");
}

#[test]
fn percentages() {
    assert_eq!(format_percentage(0.256, 1), "25.6%");
    assert_eq!(format_percentage(1.0, 0), "100%");
    assert_eq!(format_percentage(0.1234, 2), "12.34%");
}

#[test]
fn durations() {
    assert_eq!(format_duration(850), "850ms");
    assert_eq!(format_duration(4_200), "4.2s");
    assert_eq!(format_duration(192_000), "3m 12s");
    assert_eq!(format_duration(7_500_000), "2h 5m");
}

#[test]
fn astronomical_numbers() {
    assert_eq!(format_astronomical_number(1_234_567.0, 4), "1.2346e+6");
    assert_eq!(format_astronomical_number(0.000_015, 1), "1.5e-5");
    assert_eq!(format_astronomical_number(1.23456, 4), "1.2346");
    assert_eq!(format_astronomical_number(0.0, 2), "0.00");
    assert_eq!(format_astronomical_number(-2.5e7, 1), "-2.5e+7");
}

#[test]
fn truncation() {
    assert_eq!(truncate("short", 10), "short");
    assert_eq!(truncate("exactly10!", 10), "exactly10!");
    assert_eq!(truncate("Andromeda Galaxy", 10), "Androme...");
    assert_eq!(truncate("Ωmega Centauri", 8), "Ωmega...");
    assert_eq!(truncate("abc", 2), "...");
}

#[test]
fn source_names() {
    assert_eq!(source_display_name(Some("jwst")), "James Webb Space Telescope");
    assert_eq!(source_display_name(Some("NASA")), "NASA");
    assert_eq!(source_display_name(Some("chandra")), "Chandra X-ray Observatory");
    assert_eq!(source_display_name(Some("sdss")), "sdss");
    assert_eq!(source_display_name(Some("")), "Unknown");
    assert_eq!(source_display_name(None), "Unknown");
}
