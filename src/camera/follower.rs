use tracing::{debug, trace, warn};

use crate::geometry::curve::{derivative, position};
use crate::math::{is_finite, lerp, try_normalize, Point3, Vector3};
use crate::params::{CameraOffsets, CurveParameters};

use super::TangentFrame;

/// How far ahead along the tangent the camera looks.
pub const LOOK_AHEAD_DISTANCE: f64 = 5.0;

/// Which update path owns the camera transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CameraMode {
    /// Orbit controls drive the camera.
    #[default]
    Free,
    /// The camera rides the curve's tangent frame.
    TangentFollow,
}

/// Camera placement handed to the renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    pub position: Point3,
    pub look_target: Point3,
    /// Unit up vector.
    pub up: Vector3,
}

impl CameraPose {
    /// Overview pose used whenever tangent-follow is switched off.
    #[must_use]
    pub fn free_default() -> Self {
        Self {
            position: Point3::new(100.0, 100.0, 200.0),
            look_target: Point3::origin(),
            up: Vector3::y(),
        }
    }

    /// Returns whether every component of the pose is finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        is_finite(&self.position.coords) && is_finite(&self.look_target.coords) && is_finite(&self.up)
    }
}

impl Default for CameraPose {
    fn default() -> Self {
        Self::free_default()
    }
}

/// Mutable camera state between frames.
#[derive(Debug, Clone, PartialEq)]
pub struct CameraState {
    pub mode: CameraMode,
    /// Curve parameter the camera was last evaluated at.
    pub camera_t: f64,
    pub offsets: CameraOffsets,
    pub pose: CameraPose,
    /// Last non-degenerate tangent, reused at stationary points.
    last_tangent: Option<Vector3>,
}

impl CameraState {
    fn new(offsets: CameraOffsets) -> Self {
        Self {
            mode: CameraMode::Free,
            camera_t: 0.0,
            offsets,
            pose: CameraPose::free_default(),
            last_tangent: None,
        }
    }
}

/// Computes a banked camera pose that rides the curve.
#[derive(Debug, Clone, PartialEq)]
pub struct CameraFollower {
    state: CameraState,
}

impl CameraFollower {
    #[must_use]
    pub fn new(offsets: CameraOffsets) -> Self {
        Self {
            state: CameraState::new(offsets),
        }
    }

    /// Switches tangent-follow on or off and returns the pose to apply now.
    ///
    /// Entering snaps `camera_t` to the (lagged) draw parameter `t`. Leaving
    /// restores [`CameraPose::free_default`].
    pub fn set_tangent_follow(
        &mut self,
        enabled: bool,
        t: f64,
        params: &CurveParameters,
    ) -> CameraPose {
        if enabled {
            self.state.mode = CameraMode::TangentFollow;
            self.follow(t, params);
            debug!(camera_t = self.state.camera_t, "tangent-follow camera enabled");
        } else {
            self.state.mode = CameraMode::Free;
            self.state.pose = CameraPose::free_default();
            self.state.last_tangent = None;
            debug!("tangent-follow camera disabled");
        }
        self.state.pose
    }

    /// Per-frame update. Only produces a pose while in tangent-follow mode.
    pub fn update(&mut self, t: f64, params: &CurveParameters) -> Option<CameraPose> {
        match self.state.mode {
            CameraMode::Free => None,
            CameraMode::TangentFollow => Some(self.follow(t, params)),
        }
    }

    /// Replaces the offsets. While following, the pose is recomputed at the
    /// current `camera_t` and returned.
    pub fn set_offsets(
        &mut self,
        offsets: CameraOffsets,
        params: &CurveParameters,
    ) -> Option<CameraPose> {
        self.state.offsets = offsets;
        match self.state.mode {
            CameraMode::Free => None,
            CameraMode::TangentFollow => {
                let pose = self.pose_at(self.state.camera_t, params);
                self.state.pose = pose;
                Some(pose)
            }
        }
    }

    /// Camera parameter for a given draw parameter, after applying the lag.
    #[must_use]
    pub fn lagged_t(&self, t: f64) -> f64 {
        (t - self.state.offsets.lag).max(0.0)
    }

    fn follow(&mut self, t: f64, params: &CurveParameters) -> CameraPose {
        self.state.camera_t = self.lagged_t(t);
        let pose = self.pose_at(self.state.camera_t, params);
        self.state.pose = pose;
        pose
    }

    /// Computes the pose at curve parameter `t`.
    ///
    /// At a stationary point the previous tangent is reused (or `+X` before
    /// any tangent is known). If the curve point itself is not finite the
    /// previous pose is kept, so the result is always finite.
    pub fn pose_at(&mut self, t: f64, params: &CurveParameters) -> CameraPose {
        let pos = position(t, params);
        if !is_finite(&pos.coords) {
            warn!(t, "non-finite curve point, keeping previous camera pose");
            return self.state.pose;
        }
        let tangent = match derivative(t, params) {
            Ok(tangent) => {
                self.state.last_tangent = Some(tangent);
                tangent
            }
            Err(err) => {
                trace!(%err, "reusing previous tangent");
                self.state.last_tangent.unwrap_or_else(Vector3::x)
            }
        };

        let frame = TangentFrame::from_tangent(pos, tangent);
        let offsets = &self.state.offsets;

        CameraPose {
            position: pos + frame.up * offsets.height_offset + frame.tangent * offsets.longitudinal_offset,
            look_target: pos + frame.tangent * LOOK_AHEAD_DISTANCE,
            up: banked_up(&frame, offsets.tilt_blend),
        }
    }

    #[must_use]
    pub fn state(&self) -> &CameraState {
        &self.state
    }

    #[must_use]
    pub fn mode(&self) -> CameraMode {
        self.state.mode
    }

    #[must_use]
    pub fn is_following(&self) -> bool {
        self.state.mode == CameraMode::TangentFollow
    }

    #[must_use]
    pub fn camera_t(&self) -> f64 {
        self.state.camera_t
    }

    #[must_use]
    pub fn pose(&self) -> &CameraPose {
        &self.state.pose
    }

    #[must_use]
    pub fn offsets(&self) -> &CameraOffsets {
        &self.state.offsets
    }
}

/// Leans the frame's up vector into the turn.
///
/// The bank vector is `tangent × toward_center`; the result is the linear
/// blend `lerp(up, bank, tilt)` renormalized. Falls back to the plain up
/// vector when the pen sits on the axis or moves straight toward it.
fn banked_up(frame: &TangentFrame, tilt_blend: f64) -> Vector3 {
    if tilt_blend <= 0.0 {
        return frame.up;
    }
    try_normalize(&(-frame.position.coords))
        .and_then(|toward_center| try_normalize(&frame.tangent.cross(&toward_center)))
        .and_then(|bank| try_normalize(&lerp(&frame.up, &bank, tilt_blend)))
        .unwrap_or(frame.up)
}
