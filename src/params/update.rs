use serde::Deserialize;

/// A partial configuration sent by the UI layer.
///
/// Fields left as `None` keep their current value (merge, not replace).
/// Deserializes from the camelCase object the controls emit, e.g.
/// `{"outerRadius": 90, "showGears": true}`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterUpdate {
    pub outer_radius: Option<f64>,
    pub inner_radius: Option<f64>,
    pub pen_offset: Option<f64>,
    pub height_amplitude: Option<f64>,
    pub speed: Option<f64>,
    pub max_points: Option<usize>,
    pub show_gears: Option<bool>,
    pub tangent_follow_enabled: Option<bool>,
    pub camera_height_offset: Option<f64>,
    pub camera_longitudinal_offset: Option<f64>,
    pub camera_tilt_blend: Option<f64>,
    pub camera_lag: Option<f64>,
    pub auto_rotate: Option<bool>,
    pub line_thickness: Option<f64>,
}

impl ParameterUpdate {
    /// Returns whether the update carries no fields at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
