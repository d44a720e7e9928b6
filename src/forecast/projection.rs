// Days-until-full projection

use super::BYTES_PER_GB;
use crate::models::Projection;

/// Projects how many whole days remain until `used_bytes` reaches `total_bytes` at
/// `growth_rate_gb_per_day`. Non-positive growth is Stable; no remaining space is AlreadyFull.
pub fn project_days_until_full(
    total_bytes: f64,
    used_bytes: f64,
    growth_rate_gb_per_day: f64,
) -> Projection {
    if !growth_rate_gb_per_day.is_finite() || growth_rate_gb_per_day <= 0.0 {
        return Projection::STABLE;
    }
    let remaining_gb = (total_bytes - used_bytes) / BYTES_PER_GB;
    let days = (remaining_gb / growth_rate_gb_per_day).floor();
    if days.is_nan() {
        return Projection::STABLE;
    }
    // `as` saturates at the i64 bounds.
    Projection::from_days(days as i64)
}
