//! Headless spirograph run: drives the animator against a logging backend.
//!
//! Usage:
//! ```text
//! cargo run --example headless                                   # 600 frames, defaults
//! cargo run --example headless -- 1200                           # frame count
//! cargo run --example headless -- 600 '{"speed": 2, "showGears": true}'
//! ```

use spiro3d::camera::CameraPose;
use spiro3d::gears::GearPose;
use spiro3d::math::Point3;
use spiro3d::{Animator, ParameterUpdate, RenderBackend, Spirograph};
use tracing::{debug, error, info};

#[derive(Debug, Default)]
struct LogBackend {
    frame: u64,
    points: usize,
}

impl RenderBackend for LogBackend {
    fn set_orbit_controls_enabled(&mut self, enabled: bool) {
        debug!(enabled, "orbit controls");
    }

    fn update_orbit_controls(&mut self) {}

    fn apply_camera_pose(&mut self, pose: &CameraPose) {
        debug!(
            frame = self.frame,
            position = ?pose.position,
            target = ?pose.look_target,
            "camera pose"
        );
    }

    fn rebuild_curve(&mut self, points: &[Point3]) {
        self.points = points.len();
    }

    fn update_gears(&mut self, pose: Option<&GearPose>) {
        if let Some(pose) = pose {
            debug!(center = ?pose.center, rotation = pose.rotation, "gears");
        }
    }

    fn set_pattern_rotation(&mut self, _angle: f64) {}

    fn set_particle_size(&mut self, size: f64) {
        debug!(size, "particle size");
    }

    fn render(&mut self) {
        self.frame += 1;
        if self.frame % 100 == 0 {
            info!(frame = self.frame, points = self.points, "rendered");
        }
    }
}

fn main() {
    // Default: WARN for everything, INFO for the crate and this demo.
    // Override with RUST_LOG (e.g. RUST_LOG=spiro3d=debug).
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("headless=info".parse().unwrap_or_default())
        .add_directive("spiro3d=info".parse().unwrap_or_default());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let mut args = std::env::args().skip(1);
    let frames: u64 = args.next().and_then(|a| a.parse().ok()).unwrap_or(600);

    let mut animator = Animator::new(Spirograph::new(), LogBackend::default());

    if let Some(json) = args.next() {
        match serde_json::from_str::<ParameterUpdate>(&json) {
            Ok(update) => {
                if let Err(err) = animator.apply_parameter_update(&update) {
                    error!(%err, "update rejected");
                }
            }
            Err(err) => error!(%err, "could not parse update"),
        }
    }

    for _ in 0..frames {
        animator.frame();
    }

    let core = animator.core();
    info!(
        points = core.points().len(),
        t = core.t(),
        drawing = core.is_drawing(),
        "done"
    );
}
