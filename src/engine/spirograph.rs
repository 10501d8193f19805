use tracing::debug;

use crate::camera::{CameraFollower, CameraPose};
use crate::drawing::DrawState;
use crate::error::Result;
use crate::gears::{GearKinematics, GearPose};
use crate::geometry::curve::SpirographCurve;
use crate::math::Point3;
use crate::params::{ChangeSet, ParameterStore, ParameterUpdate};

/// Pattern rotation per tick while auto-rotate is on, in radians.
pub const AUTO_ROTATE_STEP: f64 = 0.001;

/// What one tick produced for the rendering layer.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameOutput<'a> {
    /// The full ordered point sequence.
    pub points: &'a [Point3],
    /// Points appended during this tick.
    pub appended: usize,
    /// Draw parameter after the tick.
    pub t: f64,
    /// Gear annotation, present only while gears are shown.
    pub gears: Option<GearPose>,
    /// Camera pose, present only while tangent-follow is active.
    pub camera: Option<CameraPose>,
    /// Accumulated Y rotation of the pattern.
    pub pattern_rotation: f64,
}

/// Result of an accepted parameter update.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UpdateOutcome {
    pub changes: ChangeSet,
    /// Pose to apply right away, when the update moved the camera.
    pub camera: Option<CameraPose>,
}

/// The animated spirograph.
///
/// Owns the parameter store, the drawing and the camera follower, and
/// advances them once per [`Spirograph::tick`]. Parameter updates are
/// applied between ticks through [`Spirograph::apply_parameter_update`].
#[derive(Debug, Clone)]
pub struct Spirograph {
    store: ParameterStore,
    draw: DrawState,
    camera: CameraFollower,
    pattern_rotation: f64,
    paused: bool,
}

impl Spirograph {
    /// Creates a spirograph with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_store(ParameterStore::default())
    }

    /// Creates a spirograph from an existing (already validated) store.
    ///
    /// Drawing starts at `t = 0` with one sample per tick until the first
    /// parameter update recomputes the sub-step count.
    #[must_use]
    pub fn with_store(store: ParameterStore) -> Self {
        let draw = DrawState::new(*store.curve(), store.speed(), store.max_points());
        let mut camera = CameraFollower::new(*store.camera());
        if store.tangent_follow() {
            camera.set_tangent_follow(true, draw.t(), draw.params());
        }
        Self {
            store,
            draw,
            camera,
            pattern_rotation: 0.0,
            paused: false,
        }
    }

    /// Advances one animation frame.
    ///
    /// While paused nothing advances: no points are appended and the pattern
    /// does not rotate, but gears and the follow camera are still reported
    /// at the current `t`.
    pub fn tick(&mut self) -> FrameOutput<'_> {
        let appended = if self.paused { 0 } else { self.draw.tick() };
        let t = self.draw.t();
        let params = *self.draw.params();

        let gears = self
            .store
            .show_gears()
            .then(|| GearKinematics::evaluate(t, &params));
        let camera = self.camera.update(t, &params);

        if !self.paused && self.store.auto_rotate() && !self.camera.is_following() {
            self.pattern_rotation += AUTO_ROTATE_STEP;
        }

        FrameOutput {
            points: self.draw.points(),
            appended,
            t,
            gears,
            camera,
            pattern_rotation: self.pattern_rotation,
        }
    }

    /// Merges a partial update into the store and propagates it.
    ///
    /// Already-drawn points are never touched; new points use the new
    /// parameters and drawing resumes if it had stopped.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::ParameterError`] if the merged configuration is
    /// invalid. Nothing is changed in that case.
    pub fn apply_parameter_update(&mut self, update: &ParameterUpdate) -> Result<UpdateOutcome> {
        let changes = self.store.apply(update)?;
        if !update.is_empty() {
            self.draw.set_parameters(
                *self.store.curve(),
                self.store.speed(),
                self.store.max_points(),
            );
        }

        let mut camera = None;
        if changes.camera || changes.curve {
            camera = self.camera.set_offsets(*self.store.camera(), self.draw.params());
        }
        if changes.tangent_follow {
            camera = Some(self.set_follow_mode(self.store.tangent_follow()));
        }
        Ok(UpdateOutcome { changes, camera })
    }

    /// Re-reads all parameters from the store, then empties the drawing.
    pub fn reset(&mut self) {
        debug!("reset");
        self.draw.reset(
            *self.store.curve(),
            self.store.speed(),
            self.store.max_points(),
        );
        self.camera.update(self.draw.t(), self.draw.params());
    }

    /// Empties the drawing and rewinds `t`, leaving parameters untouched.
    pub fn clear(&mut self) {
        debug!("clear");
        self.draw.clear();
        self.camera.update(self.draw.t(), self.draw.params());
    }

    /// Switches tangent-follow on or off; returns the pose to apply now.
    pub fn set_tangent_follow(&mut self, enabled: bool) -> CameraPose {
        self.store.set_tangent_follow(enabled);
        self.set_follow_mode(enabled)
    }

    /// Stops or resumes the animation. Updates, `reset` and `clear` still
    /// apply while paused.
    pub fn set_paused(&mut self, paused: bool) {
        if self.paused != paused {
            debug!(paused, "animation paused state changed");
        }
        self.paused = paused;
    }

    /// Restores default camera offsets; returns the new pose while following.
    pub fn reset_camera_offsets(&mut self) -> Option<CameraPose> {
        self.store.reset_camera_offsets();
        self.camera.set_offsets(*self.store.camera(), self.draw.params())
    }

    fn set_follow_mode(&mut self, enabled: bool) -> CameraPose {
        self.camera
            .set_tangent_follow(enabled, self.draw.t(), self.draw.params())
    }

    /// The curve new points are sampled from.
    #[must_use]
    pub fn curve(&self) -> SpirographCurve {
        SpirographCurve::new(*self.draw.params())
    }

    #[must_use]
    pub fn store(&self) -> &ParameterStore {
        &self.store
    }

    #[must_use]
    pub fn draw_state(&self) -> &DrawState {
        &self.draw
    }

    #[must_use]
    pub fn camera(&self) -> &CameraFollower {
        &self.camera
    }

    #[must_use]
    pub fn points(&self) -> &[Point3] {
        self.draw.points()
    }

    #[must_use]
    pub fn t(&self) -> f64 {
        self.draw.t()
    }

    #[must_use]
    pub fn is_drawing(&self) -> bool {
        self.draw.is_drawing()
    }

    #[must_use]
    pub fn pattern_rotation(&self) -> f64 {
        self.pattern_rotation
    }

    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.paused
    }
}

impl Default for Spirograph {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::camera::CameraMode;
    use crate::error::{ParameterError, SpiroError};
    use approx::assert_relative_eq;

    fn update() -> ParameterUpdate {
        ParameterUpdate::default()
    }

    #[test]
    fn gears_only_while_shown() {
        let mut spiro = Spirograph::new();
        assert!(spiro.tick().gears.is_none());

        spiro
            .apply_parameter_update(&ParameterUpdate {
                show_gears: Some(true),
                ..update()
            })
            .unwrap();
        let frame = spiro.tick();
        let gears = frame.gears.unwrap();
        assert!((gears.pen - frame.points[frame.points.len() - 1]).norm() < 1e-12);
    }

    #[test]
    fn rejected_update_keeps_drawing_going() {
        let mut spiro = Spirograph::new();
        spiro.tick();
        let err = spiro
            .apply_parameter_update(&ParameterUpdate {
                speed: Some(0.0),
                ..update()
            })
            .unwrap_err();
        assert!(matches!(
            err,
            SpiroError::Parameter(ParameterError::NonPositiveSpeed { .. })
        ));
        assert_eq!(spiro.draw_state().steps_per_tick(), 1);
        assert_eq!(spiro.points().len(), 1);
    }

    #[test]
    fn update_keeps_history_and_resumes() {
        let mut spiro = Spirograph::with_store(
            ParameterStore::with_values(Default::default(), 1.0, 5).unwrap(),
        );
        for _ in 0..10 {
            spiro.tick();
        }
        assert!(!spiro.is_drawing());
        let history = spiro.points().to_vec();

        spiro
            .apply_parameter_update(&ParameterUpdate {
                outer_radius: Some(120.0),
                max_points: Some(8),
                ..update()
            })
            .unwrap();
        assert!(spiro.is_drawing());
        assert_eq!(&spiro.points()[..5], history.as_slice());

        let frame = spiro.tick();
        assert_eq!(frame.appended, 3);
        assert!(!spiro.is_drawing());
    }

    #[test]
    fn clear_keeps_parameters_reset_reapplies() {
        let mut spiro = Spirograph::new();
        spiro
            .apply_parameter_update(&ParameterUpdate {
                outer_radius: Some(95.0),
                speed: Some(2.0),
                ..update()
            })
            .unwrap();
        for _ in 0..20 {
            spiro.tick();
        }

        spiro.clear();
        assert!(spiro.points().is_empty());
        assert!(spiro.t().abs() < f64::EPSILON);
        assert!(spiro.is_drawing());
        assert_relative_eq!(spiro.store().curve().outer_radius, 95.0);
        assert_relative_eq!(spiro.draw_state().params().outer_radius, 95.0);

        spiro.tick();
        spiro.reset();
        assert!(spiro.points().is_empty());
        assert_eq!(spiro.draw_state().steps_per_tick(), 6);
    }

    #[test]
    fn auto_rotate_pauses_while_following() {
        let mut spiro = Spirograph::new();
        spiro.tick();
        spiro.tick();
        assert_relative_eq!(spiro.pattern_rotation(), 2.0 * AUTO_ROTATE_STEP);

        spiro.set_tangent_follow(true);
        let frame = spiro.tick();
        assert!(frame.camera.is_some());
        assert_relative_eq!(frame.pattern_rotation, 2.0 * AUTO_ROTATE_STEP);

        spiro
            .apply_parameter_update(&ParameterUpdate {
                auto_rotate: Some(false),
                tangent_follow_enabled: Some(false),
                ..update()
            })
            .unwrap();
        assert!(spiro.tick().camera.is_none());
        assert_relative_eq!(spiro.pattern_rotation(), 2.0 * AUTO_ROTATE_STEP);
    }

    #[test]
    fn follow_via_update_snaps_to_current_t() {
        let mut spiro = Spirograph::new();
        for _ in 0..30 {
            spiro.tick();
        }
        let outcome = spiro
            .apply_parameter_update(&ParameterUpdate {
                tangent_follow_enabled: Some(true),
                ..update()
            })
            .unwrap();
        assert!(outcome.changes.tangent_follow);
        assert!(outcome.camera.is_some());
        assert_eq!(spiro.camera().mode(), CameraMode::TangentFollow);
        assert_relative_eq!(spiro.camera().camera_t(), spiro.t());

        let frame = spiro.tick();
        let t = frame.t;
        assert_relative_eq!(spiro.camera().camera_t(), t);
    }

    #[test]
    fn leaving_follow_returns_free_pose() {
        let mut spiro = Spirograph::new();
        spiro.set_tangent_follow(true);
        spiro.tick();
        let pose = spiro.set_tangent_follow(false);
        assert_eq!(pose, CameraPose::free_default());
        assert!(!spiro.store().tangent_follow());
    }

    #[test]
    fn camera_offset_update_reposes_immediately() {
        let mut spiro = Spirograph::new();
        assert!(spiro
            .apply_parameter_update(&ParameterUpdate {
                camera_height_offset: Some(4.0),
                ..update()
            })
            .unwrap()
            .camera
            .is_none());

        spiro.set_tangent_follow(true);
        let outcome = spiro
            .apply_parameter_update(&ParameterUpdate {
                camera_height_offset: Some(15.0),
                ..update()
            })
            .unwrap();
        assert!(outcome.changes.camera);
        assert!(outcome.camera.is_some());

        assert!(spiro.reset_camera_offsets().is_some());
        assert_relative_eq!(spiro.store().camera().height_offset, 10.0);
    }

    #[test]
    fn curve_matches_drawn_points() {
        let mut spiro = Spirograph::new();
        let frame = spiro.tick();
        let t = frame.t;
        let expected = crate::geometry::curve::position(t, spiro.curve().params());
        assert!((spiro.points()[0] - expected).norm() < 1e-12);
    }

    #[test]
    fn paused_tick_freezes_drawing_and_rotation() {
        let mut spiro = Spirograph::new();
        spiro.tick();
        spiro.set_tangent_follow(true);
        spiro
            .apply_parameter_update(&ParameterUpdate {
                show_gears: Some(true),
                ..update()
            })
            .unwrap();
        spiro.set_paused(true);
        assert!(spiro.is_paused());

        let t = spiro.t();
        let rotation = spiro.pattern_rotation();
        let pose = *spiro.camera().pose();
        for _ in 0..5 {
            let frame = spiro.tick();
            assert_eq!(frame.appended, 0);
            assert!(frame.gears.is_some());
            assert_eq!(frame.camera, Some(pose));
        }
        assert_eq!(spiro.points().len(), 1);
        assert_relative_eq!(spiro.t(), t);
        assert_relative_eq!(spiro.pattern_rotation(), rotation);

        spiro.set_paused(false);
        assert!(spiro.tick().appended > 0);
    }

    #[test]
    fn clear_applies_while_paused() {
        let mut spiro = Spirograph::new();
        for _ in 0..3 {
            spiro.tick();
        }
        spiro.set_paused(true);
        spiro.clear();
        assert!(spiro.points().is_empty());
        assert_eq!(spiro.tick().appended, 0);
        assert!(spiro.is_paused());
    }
}
