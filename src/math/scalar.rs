use super::Vector3;

/// Linear interpolation: `a` at `v = 0`, `b` at `v = 1`.
#[must_use]
pub fn lerp(a: f64, b: f64, v: f64) -> f64 {
    a * (1.0 - v) + b * v
}

/// Inverse of [`lerp`]: where `v` lies between `a` and `b`.
#[must_use]
pub fn inverse_lerp(a: f64, b: f64, v: f64) -> f64 {
    (v - a) / (b - a)
}

/// Maps any signed index onto `[0, len)`.
///
/// Uses Euclidean remainder, so `-1` maps to `len - 1` rather than `-1`.
/// `len` must be non-zero.
#[must_use]
#[allow(
    clippy::cast_possible_wrap,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
pub fn wrap_index(k: i64, len: usize) -> usize {
    k.rem_euclid(len as i64) as usize
}

/// Heading of a tangent projected onto the horizontal (XZ) plane, in degrees.
///
/// The world is y-up with z pointing backward, so the angle is measured
/// from +X towards -Z. A zero tangent yields `0.0`; callers that need a
/// meaningful heading must check the tangent first.
#[must_use]
pub fn heading_degrees(tangent: &Vector3) -> f64 {
    (-tangent.z).atan2(tangent.x).to_degrees()
}
