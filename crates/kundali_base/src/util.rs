//! Shared angle helpers.

/// Normalize an angle to [0, 360) degrees.
pub fn normalize_360(deg: f64) -> f64 {
    let r = deg % 360.0;
    if r < 0.0 { r + 360.0 } else { r }
}

/// Normalize an angle to [-180, +180].
pub fn normalize_to_pm180(deg: f64) -> f64 {
    let mut d = deg % 360.0;
    if d > 180.0 {
        d -= 360.0;
    } else if d <= -180.0 {
        d += 360.0;
    }
    d
}

/// Shortest angular separation between two longitudes, in [0, 180].
pub fn angular_distance(a: f64, b: f64) -> f64 {
    normalize_to_pm180(a - b).abs()
}

/// Zodiacal arc travelled from `from` forward to `to`, in [0, 360).
pub fn forward_arc(from: f64, to: f64) -> f64 {
    normalize_360(to - from)
}
