// Human-readable byte counts

use super::round_to;

const UNITS: [&str; 6] = ["B", "KB", "MB", "GB", "TB", "PB"];

/// Default number of decimals for [`format_bytes`].
pub const DEFAULT_PRECISION: usize = 2;

/// Decimals beyond this carry no information for an f64 and overflow the rounding factor.
const MAX_PRECISION: usize = 15;

/// Format a byte count with binary (1024-based) units: "1.5 KB", "1 GB".
///
/// Picks the largest unit whose scaled value is at least 1 (capped at PB), rounds to
/// `precision` decimals (at most 15) and drops trailing zeros. Negative or non-finite input formats as 0.
pub fn format_bytes(bytes: f64, precision: usize) -> String {
    let mut scaled = if bytes.is_finite() && bytes > 0.0 { bytes } else { 0.0 };
    let mut unit = 0;
    while scaled >= 1024.0 && unit < UNITS.len() - 1 {
        scaled /= 1024.0;
        unit += 1;
    }
    let precision = precision.min(MAX_PRECISION);
    let rounded = round_to(scaled, precision as i32);
    let number = format!("{:.*}", precision, rounded);
    let number = if number.contains('.') {
        number.trim_end_matches('0').trim_end_matches('.')
    } else {
        number.as_str()
    };
    format!("{} {}", number, UNITS[unit])
}
