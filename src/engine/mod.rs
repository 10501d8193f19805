//! Per-frame orchestration of drawing, gears and camera.

mod animator;
mod spirograph;

pub use animator::{Animator, RenderBackend};
pub use spirograph::{FrameOutput, Spirograph, UpdateOutcome, AUTO_ROTATE_STEP};
