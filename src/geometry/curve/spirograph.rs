use std::f64::consts::TAU;

use crate::error::{GeometryError, Result};
use crate::math::{Point3, Vector3, DEGENERATE_EPSILON};
use crate::params::CurveParameters;

use super::{Curve, CurveDomain};

/// Largest denominator considered when looking for a closing period.
const MAX_PERIOD_DENOMINATOR: u32 = 1000;

/// Frequency ratio `(R - r) / r` of the pen term.
fn pen_frequency(params: &CurveParameters) -> f64 {
    params.orbit_radius() / params.inner_radius
}

/// Position of the pen at parameter `t`.
///
/// A hypotrochoid in the X-Z plane with an out-of-plane oscillation on Y:
///
/// ```text
/// x = (R - r)·cos(t) + d·cos(k·t)
/// z = (R - r)·sin(t) - d·sin(k·t)
/// y = h·sin(3t)·cos(2t)
/// ```
///
/// where `k = (R - r) / r`.
#[must_use]
pub fn position(t: f64, params: &CurveParameters) -> Point3 {
    let orbit = params.orbit_radius();
    let k = pen_frequency(params);
    let d = params.pen_offset;

    let x = orbit * t.cos() + d * (k * t).cos();
    let z = orbit * t.sin() - d * (k * t).sin();
    let y = params.height_amplitude * (3.0 * t).sin() * (2.0 * t).cos();
    Point3::new(x, y, z)
}

/// Raw (unnormalized) first derivative of [`position`] with respect to `t`.
#[must_use]
pub fn velocity(t: f64, params: &CurveParameters) -> Vector3 {
    let orbit = params.orbit_radius();
    let k = pen_frequency(params);
    let d = params.pen_offset;
    let h = params.height_amplitude;

    let dx = -orbit * t.sin() - d * k * (k * t).sin();
    let dz = orbit * t.cos() - d * k * (k * t).cos();
    let dy = h * (3.0 * (3.0 * t).cos() * (2.0 * t).cos() - 2.0 * (3.0 * t).sin() * (2.0 * t).sin());
    Vector3::new(dx, dy, dz)
}

/// Unit tangent of the curve at parameter `t`.
///
/// # Errors
///
/// Returns [`GeometryError::DegenerateTangent`] when the derivative magnitude
/// falls below [`DEGENERATE_EPSILON`]. Callers are expected to fall back to a
/// previously known direction.
pub fn derivative(t: f64, params: &CurveParameters) -> Result<Vector3> {
    let v = velocity(t, params);
    let magnitude = v.norm();
    if !magnitude.is_finite() || magnitude < DEGENERATE_EPSILON {
        return Err(GeometryError::DegenerateTangent { t, magnitude }.into());
    }
    Ok(v / magnitude)
}

/// Center of the rolling (driving) gear at parameter `t`.
///
/// Same orbit as the pen without the pen-offset term, with the vertical
/// amplitude damped to 30%.
#[must_use]
pub fn driving_gear_position(t: f64, params: &CurveParameters) -> Point3 {
    let orbit = params.orbit_radius();
    Point3::new(
        orbit * t.cos(),
        0.3 * params.height_amplitude * (3.0 * t).sin(),
        orbit * t.sin(),
    )
}

/// The 3D spirograph as a [`Curve`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpirographCurve {
    params: CurveParameters,
}

impl SpirographCurve {
    /// Creates a curve over an already-validated parameter snapshot.
    #[must_use]
    pub fn new(params: CurveParameters) -> Self {
        Self { params }
    }

    /// Returns the parameters this curve evaluates with.
    #[must_use]
    pub fn params(&self) -> &CurveParameters {
        &self.params
    }

    /// Smallest `T > 0` with `position(t + T) == position(t)`, if the pen
    /// frequency is rational with a small enough denominator.
    ///
    /// For `k = p/q` in lowest terms the planar part repeats after `2π·q` and
    /// the height term after `2π`, so the whole curve closes after `2π·q`.
    #[must_use]
    pub fn period(&self) -> Option<f64> {
        let k = pen_frequency(&self.params);
        if !k.is_finite() {
            return None;
        }
        (1..=MAX_PERIOD_DENOMINATOR)
            .find(|&q| {
                let scaled = k * f64::from(q);
                (scaled - scaled.round()).abs() < 1e-9 * f64::from(q)
            })
            .map(|q| TAU * f64::from(q))
    }

    /// Evaluates `segments + 1` evenly spaced points on `[t0, t1]`.
    #[must_use]
    pub fn sample(&self, t0: f64, t1: f64, segments: u32) -> Vec<Point3> {
        if segments == 0 {
            return vec![position(t0, &self.params)];
        }
        (0..=segments)
            .map(|i| {
                let t = t0 + (t1 - t0) * f64::from(i) / f64::from(segments);
                position(t, &self.params)
            })
            .collect()
    }
}

impl Curve for SpirographCurve {
    fn evaluate(&self, t: f64) -> Result<Point3> {
        Ok(position(t, &self.params))
    }

    fn tangent(&self, t: f64) -> Result<Vector3> {
        derivative(t, &self.params)
    }

    fn domain(&self) -> CurveDomain {
        CurveDomain::new(0.0, self.period().unwrap_or(f64::INFINITY))
    }

    fn is_closed(&self) -> bool {
        self.period().is_some()
    }
}
