//! Driving-gear annotation: where the rolling gear is and how far it has turned.
//!
//! Purely illustrative. Nothing in the curve or camera depends on it, and the
//! engine only evaluates it while gear display is switched on.

use crate::geometry::curve::{driving_gear_position, position};
use crate::math::Point3;
use crate::params::CurveParameters;

/// Width of the drawn gear rims.
const RING_WIDTH: f64 = 1.0;

/// A flat annulus in the X-Z plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ring {
    pub inner_radius: f64,
    pub outer_radius: f64,
}

impl Ring {
    /// A rim of [`RING_WIDTH`] whose outer edge sits at `radius`.
    #[must_use]
    pub fn rim(radius: f64) -> Self {
        Self {
            inner_radius: (radius - RING_WIDTH).max(0.0),
            outer_radius: radius,
        }
    }
}

/// Everything the renderer needs to draw the gears for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GearPose {
    /// Center of the rolling gear.
    pub center: Point3,
    /// Current pen position, i.e. the curve point at the same `t`.
    pub pen: Point3,
    /// Self-rotation of the rolling gear about its own axis, in radians.
    pub rotation: f64,
    /// Fixed outer gear rim.
    pub outer_ring: Ring,
    /// Rolling inner gear rim.
    pub inner_ring: Ring,
}

impl GearPose {
    /// The pen arm, from gear center to pen.
    #[must_use]
    pub fn arm(&self) -> [Point3; 2] {
        [self.center, self.pen]
    }
}

/// Stateless gear kinematics.
#[derive(Debug, Clone, Copy, Default)]
pub struct GearKinematics;

impl GearKinematics {
    /// Rolling-without-slipping rotation of the inner gear, `-t·R/r`.
    #[must_use]
    pub fn rotation(t: f64, params: &CurveParameters) -> f64 {
        -t * (params.outer_radius / params.inner_radius)
    }

    /// Evaluates the gear pose at `t`.
    #[must_use]
    pub fn evaluate(t: f64, params: &CurveParameters) -> GearPose {
        GearPose {
            center: driving_gear_position(t, params),
            pen: position(t, params),
            rotation: Self::rotation(t, params),
            outer_ring: Ring::rim(params.outer_radius),
            inner_ring: Ring::rim(params.inner_radius),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn rotation_rate() {
        let params = CurveParameters::default();
        assert_relative_eq!(GearKinematics::rotation(0.0, &params), 0.0);
        assert_relative_eq!(GearKinematics::rotation(1.5, &params), -3.0);
    }

    #[test]
    fn arm_connects_center_and_pen() {
        let params = CurveParameters::default();
        let pose = GearKinematics::evaluate(0.7, &params);
        let [from, to] = pose.arm();
        assert_eq!(from, driving_gear_position(0.7, &params));
        assert_eq!(to, position(0.7, &params));
        // In the plane the arm is exactly the pen offset long.
        let planar = (to - from).xz().norm();
        assert_relative_eq!(planar, params.pen_offset, epsilon = 1e-9);
    }

    #[test]
    fn rims_track_radii() {
        let pose = GearKinematics::evaluate(0.0, &CurveParameters::default());
        assert_eq!(
            pose.outer_ring,
            Ring {
                inner_radius: 79.0,
                outer_radius: 80.0
            }
        );
        assert_eq!(
            pose.inner_ring,
            Ring {
                inner_radius: 39.0,
                outer_radius: 40.0
            }
        );
        assert_relative_eq!(Ring::rim(0.5).inner_radius, 0.0);
    }
}
