use thiserror::Error;

/// Top-level error type for the spirograph core.
#[derive(Debug, Error, PartialEq)]
pub enum SpiroError {
    #[error(transparent)]
    Parameter(#[from] ParameterError),

    #[error(transparent)]
    Geometry(#[from] GeometryError),
}

/// Rejected configuration values.
///
/// Raised at the parameter-update boundary before anything is written into
/// the store.
#[derive(Debug, Error, PartialEq)]
pub enum ParameterError {
    #[error("inner radius must be non-zero")]
    ZeroInnerRadius,

    #[error("speed must be strictly positive, got {value}")]
    NonPositiveSpeed { value: f64 },

    #[error("parameter {parameter} must be finite, got {value}")]
    NonFinite { parameter: &'static str, value: f64 },

    #[error("parameter {parameter} must be non-negative, got {value}")]
    Negative { parameter: &'static str, value: f64 },

    #[error("parameter {parameter} must be positive, got {value}")]
    NonPositive { parameter: &'static str, value: f64 },

    #[error("derived value {derived} is not finite for these parameters")]
    DerivedNonFinite { derived: &'static str },

    #[error("speed {value} exceeds the maximum of {max}")]
    SpeedTooHigh { value: f64, max: f64 },

    #[error("max points must be at least 1")]
    ZeroMaxPoints,

    #[error("camera tilt blend {value} is out of range [0, 1]")]
    TiltBlendOutOfRange { value: f64 },
}

/// Errors related to curve evaluation.
#[derive(Debug, Error, PartialEq)]
pub enum GeometryError {
    #[error("degenerate tangent at t = {t} (derivative magnitude {magnitude})")]
    DegenerateTangent { t: f64, magnitude: f64 },
}

/// Convenience type alias for results using [`SpiroError`].
pub type Result<T> = std::result::Result<T, SpiroError>;
