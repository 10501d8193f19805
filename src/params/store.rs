use tracing::{debug, warn};

use crate::error::{ParameterError, Result};

use super::{CameraOffsets, CurveParameters, ParameterUpdate};

/// Largest accepted speed. Keeps the per-tick sub-step count (`3 * speed`)
/// and the parameter increment bounded.
pub const MAX_SPEED: f64 = 1000.0;

/// Which groups of settings an accepted update actually changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct ChangeSet {
    pub curve: bool,
    pub speed: bool,
    pub max_points: bool,
    pub show_gears: bool,
    pub tangent_follow: bool,
    pub camera: bool,
    pub auto_rotate: bool,
    pub line_thickness: bool,
}

impl ChangeSet {
    /// Returns whether nothing changed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// The validated set of tunable inputs.
///
/// This is the only place updates are applied. Readers receive copies or
/// references; an update is validated as a whole and either committed
/// entirely or rejected without touching the stored values.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterStore {
    curve: CurveParameters,
    speed: f64,
    max_points: usize,
    show_gears: bool,
    tangent_follow: bool,
    camera: CameraOffsets,
    auto_rotate: bool,
    line_thickness: f64,
}

impl ParameterStore {
    /// Creates a store holding the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store from explicit values.
    ///
    /// # Errors
    ///
    /// Returns [`ParameterError`] if any value is invalid.
    pub fn with_values(curve: CurveParameters, speed: f64, max_points: usize) -> Result<Self> {
        let store = Self {
            curve,
            speed,
            max_points,
            ..Self::default()
        };
        store.validate()?;
        Ok(store)
    }

    /// Merges `update` into the stored values.
    ///
    /// Returns which groups changed. On error nothing is written.
    ///
    /// # Errors
    ///
    /// Returns [`ParameterError`] if the merged configuration is invalid,
    /// e.g. `innerRadius == 0` or `speed <= 0`.
    pub fn apply(&mut self, update: &ParameterUpdate) -> Result<ChangeSet> {
        let candidate = self.merged(update);
        if let Err(err) = candidate.validate() {
            warn!(%err, "rejected parameter update");
            return Err(err);
        }

        let changes = ChangeSet {
            curve: candidate.curve != self.curve,
            speed: candidate.speed.to_bits() != self.speed.to_bits(),
            max_points: candidate.max_points != self.max_points,
            show_gears: candidate.show_gears != self.show_gears,
            tangent_follow: candidate.tangent_follow != self.tangent_follow,
            camera: candidate.camera != self.camera,
            auto_rotate: candidate.auto_rotate != self.auto_rotate,
            line_thickness: candidate.line_thickness.to_bits() != self.line_thickness.to_bits(),
        };
        debug!(?changes, "parameter update applied");
        *self = candidate;
        Ok(changes)
    }

    /// Records the camera mode flag. Always valid, so no update round-trip.
    pub fn set_tangent_follow(&mut self, enabled: bool) {
        self.tangent_follow = enabled;
    }

    /// Restores the camera offsets (not the lag) to their defaults.
    pub fn reset_camera_offsets(&mut self) {
        let defaults = CameraOffsets::default();
        self.camera = CameraOffsets {
            lag: self.camera.lag,
            ..defaults
        };
    }

    fn merged(&self, update: &ParameterUpdate) -> Self {
        let mut next = self.clone();
        if let Some(v) = update.outer_radius {
            next.curve.outer_radius = v;
        }
        if let Some(v) = update.inner_radius {
            next.curve.inner_radius = v;
        }
        if let Some(v) = update.pen_offset {
            next.curve.pen_offset = v;
        }
        if let Some(v) = update.height_amplitude {
            next.curve.height_amplitude = v;
        }
        if let Some(v) = update.speed {
            next.speed = v;
        }
        if let Some(v) = update.max_points {
            next.max_points = v;
        }
        if let Some(v) = update.show_gears {
            next.show_gears = v;
        }
        if let Some(v) = update.tangent_follow_enabled {
            next.tangent_follow = v;
        }
        if let Some(v) = update.camera_height_offset {
            next.camera.height_offset = v;
        }
        if let Some(v) = update.camera_longitudinal_offset {
            next.camera.longitudinal_offset = v;
        }
        if let Some(v) = update.camera_tilt_blend {
            next.camera.tilt_blend = v;
        }
        if let Some(v) = update.camera_lag {
            next.camera.lag = v;
        }
        if let Some(v) = update.auto_rotate {
            next.auto_rotate = v;
        }
        if let Some(v) = update.line_thickness {
            next.line_thickness = v;
        }
        next
    }

    fn validate(&self) -> Result<()> {
        self.curve.validate()?;
        if !self.speed.is_finite() {
            return Err(ParameterError::NonFinite {
                parameter: "speed",
                value: self.speed,
            }
            .into());
        }
        if self.speed <= 0.0 {
            return Err(ParameterError::NonPositiveSpeed { value: self.speed }.into());
        }
        if self.speed > MAX_SPEED {
            return Err(ParameterError::SpeedTooHigh {
                value: self.speed,
                max: MAX_SPEED,
            }
            .into());
        }
        if self.max_points == 0 {
            return Err(ParameterError::ZeroMaxPoints.into());
        }
        if !(self.line_thickness.is_finite() && self.line_thickness > 0.0) {
            return Err(ParameterError::NonPositive {
                parameter: "lineThickness",
                value: self.line_thickness,
            }
            .into());
        }
        self.camera.validate()
    }

    #[must_use]
    pub fn curve(&self) -> &CurveParameters {
        &self.curve
    }

    #[must_use]
    pub fn speed(&self) -> f64 {
        self.speed
    }

    #[must_use]
    pub fn max_points(&self) -> usize {
        self.max_points
    }

    #[must_use]
    pub fn show_gears(&self) -> bool {
        self.show_gears
    }

    #[must_use]
    pub fn tangent_follow(&self) -> bool {
        self.tangent_follow
    }

    #[must_use]
    pub fn camera(&self) -> &CameraOffsets {
        &self.camera
    }

    #[must_use]
    pub fn auto_rotate(&self) -> bool {
        self.auto_rotate
    }

    #[must_use]
    pub fn line_thickness(&self) -> f64 {
        self.line_thickness
    }

    /// Point sprite size derived from the line thickness.
    #[must_use]
    pub fn particle_size(&self) -> f64 {
        self.line_thickness * 0.5
    }
}

impl Default for ParameterStore {
    fn default() -> Self {
        Self {
            curve: CurveParameters::default(),
            speed: 1.0,
            max_points: 10_000,
            show_gears: false,
            tangent_follow: false,
            camera: CameraOffsets::default(),
            auto_rotate: true,
            line_thickness: 3.0,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::SpiroError;

    #[test]
    fn merge_leaves_unspecified_fields() {
        let mut store = ParameterStore::new();
        let changes = store
            .apply(&ParameterUpdate {
                outer_radius: Some(100.0),
                ..ParameterUpdate::default()
            })
            .unwrap();

        assert!(changes.curve);
        assert!(!changes.speed);
        assert!((store.curve().outer_radius - 100.0).abs() < f64::EPSILON);
        assert!((store.curve().inner_radius - 40.0).abs() < f64::EPSILON);
        assert!((store.curve().pen_offset - 60.0).abs() < f64::EPSILON);
    }

    #[test]
    fn zero_inner_radius_leaves_store_untouched() {
        let mut store = ParameterStore::new();
        let before = store.clone();
        let err = store
            .apply(&ParameterUpdate {
                outer_radius: Some(120.0),
                inner_radius: Some(0.0),
                ..ParameterUpdate::default()
            })
            .unwrap_err();

        assert_eq!(err, SpiroError::Parameter(ParameterError::ZeroInnerRadius));
        assert_eq!(store, before);
    }

    #[test]
    fn non_positive_speed_rejected() {
        let mut store = ParameterStore::new();
        for speed in [0.0, -1.0] {
            let err = store
                .apply(&ParameterUpdate {
                    speed: Some(speed),
                    ..ParameterUpdate::default()
                })
                .unwrap_err();
            assert!(matches!(
                err,
                SpiroError::Parameter(ParameterError::NonPositiveSpeed { .. })
            ));
        }
        assert!((store.speed() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn huge_radius_ratio_rejected() {
        let mut store = ParameterStore::new();
        let before = store.clone();
        let err = store
            .apply(&ParameterUpdate {
                outer_radius: Some(1e300),
                inner_radius: Some(1e-9),
                ..ParameterUpdate::default()
            })
            .unwrap_err();
        assert!(matches!(
            err,
            SpiroError::Parameter(ParameterError::DerivedNonFinite { .. })
        ));
        assert_eq!(store, before);
    }

    #[test]
    fn huge_speed_rejected() {
        let mut store = ParameterStore::new();
        let err = store
            .apply(&ParameterUpdate {
                speed: Some(1e308),
                ..ParameterUpdate::default()
            })
            .unwrap_err();
        assert_eq!(
            err,
            SpiroError::Parameter(ParameterError::SpeedTooHigh {
                value: 1e308,
                max: MAX_SPEED
            })
        );
        assert!(store
            .apply(&ParameterUpdate {
                speed: Some(MAX_SPEED),
                ..ParameterUpdate::default()
            })
            .is_ok());
    }

    #[test]
    fn zero_max_points_rejected() {
        assert_eq!(
            ParameterStore::with_values(CurveParameters::default(), 1.0, 0),
            Err(SpiroError::Parameter(ParameterError::ZeroMaxPoints))
        );
    }

    #[test]
    fn empty_update_changes_nothing() {
        let mut store = ParameterStore::new();
        let changes = store.apply(&ParameterUpdate::default()).unwrap();
        assert!(changes.is_empty());
    }

    #[test]
    fn reset_camera_offsets_keeps_lag() {
        let mut store = ParameterStore::new();
        store
            .apply(&ParameterUpdate {
                camera_height_offset: Some(25.0),
                camera_tilt_blend: Some(0.9),
                camera_lag: Some(0.3),
                ..ParameterUpdate::default()
            })
            .unwrap();

        store.reset_camera_offsets();

        let camera = store.camera();
        assert!((camera.height_offset - 10.0).abs() < f64::EPSILON);
        assert!((camera.tilt_blend - 0.2).abs() < f64::EPSILON);
        assert!((camera.lag - 0.3).abs() < f64::EPSILON);
    }

    #[test]
    fn particle_size_follows_thickness() {
        let mut store = ParameterStore::new();
        store
            .apply(&ParameterUpdate {
                line_thickness: Some(5.0),
                ..ParameterUpdate::default()
            })
            .unwrap();
        assert!((store.particle_size() - 2.5).abs() < f64::EPSILON);
    }
}
