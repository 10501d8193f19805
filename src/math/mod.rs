/// 3D point type.
pub type Point3 = nalgebra::Point3<f64>;

/// 3D vector type.
pub type Vector3 = nalgebra::Vector3<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;

/// Derivative magnitudes below this are treated as a stationary point.
pub const DEGENERATE_EPSILON: f64 = 1e-9;

/// Normalizes `v`, or returns `None` when its length is below `TOLERANCE`.
#[must_use]
pub fn try_normalize(v: &Vector3) -> Option<Vector3> {
    v.try_normalize(TOLERANCE)
}

/// Linear interpolation between two vectors (`a` at 0, `b` at 1).
#[must_use]
pub fn lerp(a: &Vector3, b: &Vector3, alpha: f64) -> Vector3 {
    a + (b - a) * alpha
}

/// Returns whether every component of `v` is finite.
#[must_use]
pub fn is_finite(v: &Vector3) -> bool {
    v.iter().all(|c| c.is_finite())
}
