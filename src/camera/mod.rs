//! Tangent-follow ("rollercoaster") camera.

mod follower;
mod frame;

pub use follower::{CameraFollower, CameraMode, CameraPose, CameraState, LOOK_AHEAD_DISTANCE};
pub use frame::TangentFrame;
