// Byte formatting

use disk_analyser::forecast::{DEFAULT_PRECISION, format_bytes};

#[test]
fn zero_bytes() {
    assert_eq!(format_bytes(0.0, DEFAULT_PRECISION), "0 B");
}

#[test]
fn exact_units_have_no_decimals() {
    assert_eq!(format_bytes(1_073_741_824.0, 2), "1 GB");
    assert_eq!(format_bytes(1024.0, 2), "1 KB");
    assert_eq!(format_bytes(512.0, 2), "512 B");
}

#[test]
fn fractional_values() {
    assert_eq!(format_bytes(1536.0, 2), "1.5 KB");
    assert_eq!(format_bytes(1_288_490_188.8, 2), "1.2 GB");
    assert_eq!(format_bytes(1_500_000.0, 2), "1.43 MB");
}

#[test]
fn precision_controls_rounding() {
    assert_eq!(format_bytes(1_500_000.0, 0), "1 MB");
    assert_eq!(format_bytes(1_500_000.0, 1), "1.4 MB");
}

#[test]
fn unit_is_clamped_at_petabytes() {
    let pb = 1024f64.powi(5);
    assert_eq!(format_bytes(pb, 2), "1 PB");
    assert_eq!(format_bytes(2048.0 * pb, 2), "2048 PB");
}

#[test]
fn negative_and_non_finite_format_as_zero() {
    assert_eq!(format_bytes(-10.0, 2), "0 B");
    assert_eq!(format_bytes(f64::NAN, 2), "0 B");
}

#[test]
fn oversized_precision_is_capped() {
    assert_eq!(format_bytes(1536.0, 400), "1.5 KB");
    assert_eq!(format_bytes(1024.0, usize::MAX), "1 KB");
}
