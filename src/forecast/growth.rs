// Growth-rate estimation over a trailing window of used-bytes samples

use super::{BYTES_PER_GB, SECONDS_PER_DAY, round_to};
use crate::error::ForecastError;
use crate::models::Sample;

/// Estimated growth in GB/day (binary GB) over the trailing `window_days`, anchored at the
/// latest sample.
///
/// Uses the first and last sample inside the window. The elapsed time is floored at one day
/// and negative growth (cleanups) is reported as 0. Fewer than two usable samples also yield 0.
/// Input need not be sorted; non-finite or negative values are ignored.
pub fn compute_growth_rate(samples: &[Sample], window_days: u32) -> Result<f64, ForecastError> {
    if window_days == 0 {
        return Err(ForecastError::InvalidArgument(format!(
            "window_days must be >= 1, got {}",
            window_days
        )));
    }

    let mut valid: Vec<Sample> = samples.iter().copied().filter(Sample::is_valid).collect();
    valid.sort_by_key(|s| s.timestamp);

    let Some(latest) = valid.last().map(|s| s.timestamp) else {
        return Ok(0.0);
    };
    let window_start = latest.saturating_sub(i64::from(window_days) * SECONDS_PER_DAY);
    let start = valid.partition_point(|s| s.timestamp < window_start);
    let window = &valid[start..];

    let (Some(first), Some(last)) = (window.first(), window.last()) else {
        return Ok(0.0);
    };
    if window.len() < 2 {
        return Ok(0.0);
    }

    let delta_bytes = last.value - first.value;
    let delta_days = ((last.timestamp - first.timestamp) as f64 / SECONDS_PER_DAY as f64).max(1.0);
    let rate = (delta_bytes / delta_days / BYTES_PER_GB).max(0.0);
    Ok(round_to(rate, 2))
}
