use nalgebra::Vector2;

use crate::error::SimError;

/// 2D vector used everywhere in the core. Positions are screen-style
/// coordinates in `[0, width] × [0, height]`.
pub type Vec2 = Vector2<f64>;

// ---------------------------------------------------------------------------
// Angle helpers (degrees, signed)
// ---------------------------------------------------------------------------

/// Wrap an angle delta into `(-180, 180]` degrees.
pub fn wrap_degrees(d: f64) -> f64 {
    let mut w = (d + 180.0) % 360.0;
    if w <= 0.0 {
        w += 360.0;
    }
    w - 180.0
}

/// Polar heading of a vector in degrees, in `(-180, 180]`.
pub fn heading_deg(v: &Vec2) -> f64 {
    wrap_degrees(v.y.atan2(v.x).to_degrees())
}

/// Signed angle from `a` to `b` in degrees, in `(-180, 180]`.
/// Positive when `b` is counter-clockwise of `a`.
pub fn signed_angle_deg(a: &Vec2, b: &Vec2) -> f64 {
    let cross = a.x * b.y - a.y * b.x;
    wrap_degrees(cross.atan2(a.dot(b)).to_degrees())
}

/// Unit vector along `v`.
///
/// Errors with [`SimError::DegenerateInput`] on a zero-length vector rather
/// than silently returning zero, since downstream heading math would be
/// undefined.
pub fn try_normalize_dir(v: &Vec2) -> Result<Vec2, SimError> {
    let len = v.norm();
    if len == 0.0 {
        return Err(SimError::DegenerateInput);
    }
    Ok(v / len)
}

/// Counter-clockwise perpendicular of `v` (rotate +90°).
pub fn perpendicular(v: &Vec2) -> Vec2 {
    Vec2::new(-v.y, v.x)
}
