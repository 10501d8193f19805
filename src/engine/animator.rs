use crate::camera::CameraPose;
use crate::error::Result;
use crate::gears::GearPose;
use crate::math::Point3;
use crate::params::{ChangeSet, ParameterUpdate};

use super::Spirograph;

/// The rendering side of the application, injected at construction.
///
/// Scene graph, materials and draw calls live behind this trait; the core
/// only pushes geometry and camera updates through it.
pub trait RenderBackend {
    /// Enables or disables user orbit controls.
    fn set_orbit_controls_enabled(&mut self, enabled: bool);

    /// Steps the orbit controller (damping etc.). Never called while the
    /// camera follows the curve.
    fn update_orbit_controls(&mut self);

    /// Places the camera.
    fn apply_camera_pose(&mut self, pose: &CameraPose);

    /// Rebuilds the line/point geometry from the full point sequence.
    fn rebuild_curve(&mut self, points: &[Point3]);

    /// Shows the gears at `pose`, or hides them when `None`.
    fn update_gears(&mut self, pose: Option<&GearPose>);

    /// Rotates the pattern group about Y.
    fn set_pattern_rotation(&mut self, angle: f64);

    /// Sets the point sprite size of the drawn curve.
    fn set_particle_size(&mut self, size: f64);

    /// Draws the frame.
    fn render(&mut self);
}

/// Drives a [`Spirograph`] against a [`RenderBackend`], one call per frame.
#[derive(Debug)]
pub struct Animator<B: RenderBackend> {
    core: Spirograph,
    backend: B,
}

impl<B: RenderBackend> Animator<B> {
    /// Wires the core to its backend and applies the initial camera state.
    pub fn new(core: Spirograph, mut backend: B) -> Self {
        let following = core.camera().is_following();
        backend.set_orbit_controls_enabled(!following);
        backend.apply_camera_pose(core.camera().pose());
        backend.rebuild_curve(core.points());
        backend.set_particle_size(core.store().particle_size());
        Self { core, backend }
    }

    /// Runs one animation frame.
    pub fn frame(&mut self) {
        let output = self.core.tick();
        if output.appended > 0 {
            self.backend.rebuild_curve(output.points);
        }
        self.backend.update_gears(output.gears.as_ref());
        match output.camera {
            Some(pose) => self.backend.apply_camera_pose(&pose),
            None => self.backend.update_orbit_controls(),
        }
        self.backend.set_pattern_rotation(output.pattern_rotation);
        self.backend.render();
    }

    /// Applies a UI update between frames.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::ParameterError`] when the update is rejected.
    pub fn apply_parameter_update(&mut self, update: &ParameterUpdate) -> Result<ChangeSet> {
        let outcome = self.core.apply_parameter_update(update)?;
        if outcome.changes.tangent_follow {
            self.backend
                .set_orbit_controls_enabled(!self.core.camera().is_following());
        }
        if let Some(pose) = outcome.camera {
            self.backend.apply_camera_pose(&pose);
        }
        if outcome.changes.show_gears && !self.core.store().show_gears() {
            self.backend.update_gears(None);
        }
        if outcome.changes.line_thickness {
            self.backend
                .set_particle_size(self.core.store().particle_size());
        }
        Ok(outcome.changes)
    }

    pub fn reset(&mut self) {
        self.core.reset();
        self.after_rewind();
    }

    pub fn clear(&mut self) {
        self.core.clear();
        self.after_rewind();
    }

    pub fn set_tangent_follow(&mut self, enabled: bool) {
        let pose = self.core.set_tangent_follow(enabled);
        self.backend.set_orbit_controls_enabled(!enabled);
        self.backend.apply_camera_pose(&pose);
    }

    /// Stops or resumes the animation; frames keep rendering the still state.
    pub fn set_paused(&mut self, paused: bool) {
        self.core.set_paused(paused);
    }

    fn after_rewind(&mut self) {
        self.backend.rebuild_curve(self.core.points());
        if self.core.camera().is_following() {
            self.backend.apply_camera_pose(self.core.camera().pose());
        }
    }

    #[must_use]
    pub fn core(&self) -> &Spirograph {
        &self.core
    }

    #[must_use]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Splits the animator back into its parts.
    pub fn into_parts(self) -> (Spirograph, B) {
        (self.core, self.backend)
    }
}
