use crate::math::{try_normalize, Point3, Vector3};

/// Cross products shorter than this count as parallel.
const PARALLEL_EPSILON: f64 = 1e-6;

/// An orthonormal basis riding the curve.
///
/// - `tangent`: direction of travel
/// - `right`: `tangent × world_up`, horizontal where possible
/// - `up`: `right × tangent`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TangentFrame {
    /// Point on the curve.
    pub position: Point3,
    /// Unit tangent.
    pub tangent: Vector3,
    /// Unit right vector.
    pub right: Vector3,
    /// Unit up vector.
    pub up: Vector3,
}

impl TangentFrame {
    /// Builds a frame from a unit tangent using `+Y` as the up hint.
    ///
    /// When the tangent is (nearly) vertical the cross product with `+Y`
    /// vanishes; `+X` and then `+Z` are used as secondary references so the
    /// frame never collapses.
    #[must_use]
    pub fn from_tangent(position: Point3, tangent: Vector3) -> Self {
        let tangent = try_normalize(&tangent).unwrap_or_else(Vector3::x);
        let right = [Vector3::y(), Vector3::x(), Vector3::z()]
            .iter()
            .find_map(|reference| tangent.cross(reference).try_normalize(PARALLEL_EPSILON))
            .unwrap_or_else(Vector3::z);
        let up = try_normalize(&right.cross(&tangent)).unwrap_or_else(Vector3::y);

        Self {
            position,
            tangent,
            right,
            up,
        }
    }

    /// Checks that all three axes are unit length and mutually orthogonal.
    #[must_use]
    pub fn is_orthonormal(&self, tolerance: f64) -> bool {
        let axes = [self.tangent, self.right, self.up];
        let unit = axes.iter().all(|a| (a.norm() - 1.0).abs() < tolerance);
        unit && self.tangent.dot(&self.right).abs() < tolerance
            && self.tangent.dot(&self.up).abs() < tolerance
            && self.right.dot(&self.up).abs() < tolerance
    }
}
