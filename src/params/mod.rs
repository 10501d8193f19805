//! Tunable inputs: curve shape, drawing speed, camera offsets and view flags.

mod store;
mod update;

pub use store::{ChangeSet, ParameterStore, MAX_SPEED};
pub use update::ParameterUpdate;

use crate::error::{ParameterError, Result};
use crate::math::TOLERANCE;

/// Geometric parameters of the spirograph curve.
///
/// Immutable per evaluation: every curve function takes a `&CurveParameters`
/// snapshot instead of reading shared state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveParameters {
    /// Radius of the fixed outer circle (`R`).
    pub outer_radius: f64,
    /// Radius of the rolling inner circle (`r`).
    pub inner_radius: f64,
    /// Distance of the pen from the inner circle's center (`d`).
    pub pen_offset: f64,
    /// Amplitude of the out-of-plane oscillation (`h`).
    pub height_amplitude: f64,
}

impl CurveParameters {
    /// Creates validated curve parameters.
    ///
    /// # Errors
    ///
    /// Returns [`ParameterError`] if a value is non-finite, the outer radius is
    /// not positive, the inner radius is zero or negative, or the pen offset or
    /// height amplitude is negative.
    pub fn new(
        outer_radius: f64,
        inner_radius: f64,
        pen_offset: f64,
        height_amplitude: f64,
    ) -> Result<Self> {
        let params = Self {
            outer_radius,
            inner_radius,
            pen_offset,
            height_amplitude,
        };
        params.validate()?;
        Ok(params)
    }

    /// Checks the invariants the curve equations rely on.
    ///
    /// # Errors
    ///
    /// See [`CurveParameters::new`].
    pub fn validate(&self) -> Result<()> {
        check_finite("outerRadius", self.outer_radius)?;
        check_finite("innerRadius", self.inner_radius)?;
        check_finite("penOffset", self.pen_offset)?;
        check_finite("heightAmplitude", self.height_amplitude)?;

        if self.inner_radius.abs() < TOLERANCE {
            return Err(ParameterError::ZeroInnerRadius.into());
        }
        check_positive("innerRadius", self.inner_radius)?;
        check_positive("outerRadius", self.outer_radius)?;
        check_non_negative("penOffset", self.pen_offset)?;
        check_non_negative("heightAmplitude", self.height_amplitude)?;

        // The equations divide by r and scale the pen term by d·k; both must
        // stay representable or every sample turns into NaN.
        let k = self.orbit_radius() / self.inner_radius;
        check_derived("penFrequency", k)?;
        check_derived("penOffset * penFrequency", self.pen_offset * k)
    }

    /// Orbit radius of the rolling circle's center, `R - r`.
    #[must_use]
    pub fn orbit_radius(&self) -> f64 {
        self.outer_radius - self.inner_radius
    }
}

impl Default for CurveParameters {
    fn default() -> Self {
        Self {
            outer_radius: 80.0,
            inner_radius: 40.0,
            pen_offset: 60.0,
            height_amplitude: 30.0,
        }
    }
}

/// User-tunable offsets of the tangent-follow camera.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraOffsets {
    /// Distance above the curve along the frame's up axis.
    pub height_offset: f64,
    /// Distance along the tangent (positive is ahead of the pen).
    pub longitudinal_offset: f64,
    /// Blend between the frame's up vector and the banking vector, in `[0, 1]`.
    pub tilt_blend: f64,
    /// How far the camera parameter trails the draw parameter.
    pub lag: f64,
}

impl CameraOffsets {
    /// Checks that all offsets are usable.
    ///
    /// # Errors
    ///
    /// Returns [`ParameterError`] if a value is non-finite, the tilt blend is
    /// outside `[0, 1]`, or the lag is negative.
    pub fn validate(&self) -> Result<()> {
        check_finite("cameraHeightOffset", self.height_offset)?;
        check_finite("cameraLongitudinalOffset", self.longitudinal_offset)?;
        check_finite("cameraTiltBlend", self.tilt_blend)?;
        check_finite("cameraLag", self.lag)?;
        if !(0.0..=1.0).contains(&self.tilt_blend) {
            return Err(ParameterError::TiltBlendOutOfRange {
                value: self.tilt_blend,
            }
            .into());
        }
        check_non_negative("cameraLag", self.lag)
    }
}

impl Default for CameraOffsets {
    fn default() -> Self {
        Self {
            height_offset: 10.0,
            longitudinal_offset: 0.0,
            tilt_blend: 0.2,
            lag: 0.0,
        }
    }
}

fn check_finite(parameter: &'static str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ParameterError::NonFinite { parameter, value }.into())
    }
}

fn check_derived(derived: &'static str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ParameterError::DerivedNonFinite { derived }.into())
    }
}

fn check_positive(parameter: &'static str, value: f64) -> Result<()> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(ParameterError::NonPositive { parameter, value }.into())
    }
}

fn check_non_negative(parameter: &'static str, value: f64) -> Result<()> {
    if value >= 0.0 {
        Ok(())
    } else {
        Err(ParameterError::Negative { parameter, value }.into())
    }
}
