//! Incremental drawing of the curve, a few samples per animation tick.

mod draw_state;

pub use draw_state::{draw_speed, step_size, DrawState};
