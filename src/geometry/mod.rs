pub mod curve;

pub use curve::{Curve, CurveDomain, SpirographCurve};
