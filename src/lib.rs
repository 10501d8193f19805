//! Kinematics core of an animated 3D spirograph.
//!
//! - [`geometry::curve`]: closed-form position, tangent and driving-gear equations
//! - [`drawing`]: incremental point accumulation, a few samples per tick
//! - [`gears`]: rolling-gear annotation
//! - [`camera`]: tangent-frame ("rollercoaster") camera
//! - [`params`]: validated parameter store with partial updates
//! - [`engine`]: per-frame orchestration and the injected render backend

pub mod camera;
pub mod drawing;
pub mod engine;
pub mod error;
pub mod gears;
pub mod geometry;
pub mod math;
pub mod params;

pub use engine::{Animator, FrameOutput, RenderBackend, Spirograph};
pub use error::{GeometryError, ParameterError, Result, SpiroError};
pub use params::{CameraOffsets, CurveParameters, ParameterStore, ParameterUpdate};
