use tracing::{debug, info, warn};

use crate::geometry::curve::position;
use crate::math::{is_finite, Point3};
use crate::params::CurveParameters;

/// Parameter increment per sub-step for a given speed.
#[must_use]
pub fn step_size(speed: f64) -> f64 {
    0.01 * speed
}

/// Number of sub-steps per tick for a given speed: `max(1, floor(speed * 3))`.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn draw_speed(speed: f64) -> u32 {
    let steps = (speed * 3.0).floor();
    if steps >= 1.0 {
        steps as u32
    } else {
        1
    }
}

/// The growing sequence of sampled curve points and the current parameter.
///
/// Points are append-only between [`DrawState::clear`]/[`DrawState::reset`]
/// calls and are kept in the order they were sampled. Parameter updates only
/// affect points drawn afterwards.
///
/// The sub-step count per tick is latched: it starts at 1 and is recomputed
/// from the speed whenever parameters are (re)applied.
#[derive(Debug, Clone)]
pub struct DrawState {
    params: CurveParameters,
    speed: f64,
    steps_per_tick: u32,
    max_points: usize,
    t: f64,
    points: Vec<Point3>,
    is_drawing: bool,
}

impl DrawState {
    /// Creates an empty drawing at `t = 0`.
    ///
    /// `speed` must be positive and `max_points` non-zero; both are checked by
    /// [`crate::params::ParameterStore`] before they reach here.
    #[must_use]
    pub fn new(params: CurveParameters, speed: f64, max_points: usize) -> Self {
        Self {
            params,
            speed,
            steps_per_tick: 1,
            max_points,
            t: 0.0,
            points: Vec::new(),
            is_drawing: true,
        }
    }

    /// Advances the drawing by one animation tick.
    ///
    /// Appends up to `steps_per_tick` points, stopping immediately once
    /// `max_points` is reached. A sample that is not finite is never
    /// appended; drawing latches off instead. Returns the number of points
    /// appended.
    pub fn tick(&mut self) -> usize {
        if !self.is_drawing {
            return 0;
        }

        let step = step_size(self.speed);
        let mut appended = 0;
        for _ in 0..self.steps_per_tick {
            if self.is_full() {
                self.finish();
                break;
            }
            let t = self.t + step;
            let point = position(t, &self.params);
            if !(t.is_finite() && is_finite(&point.coords)) {
                warn!(t, "non-finite sample, drawing stopped");
                self.is_drawing = false;
                break;
            }
            self.t = t;
            self.points.push(point);
            appended += 1;
            if self.is_full() {
                self.finish();
                break;
            }
        }
        appended
    }

    /// Switches to new parameters without touching already-drawn points.
    ///
    /// Resumes drawing; if the point count is already at (or above) a lowered
    /// cap, the next tick latches drawing off again without appending.
    pub fn set_parameters(&mut self, params: CurveParameters, speed: f64, max_points: usize) {
        self.params = params;
        self.speed = speed;
        self.steps_per_tick = draw_speed(speed);
        self.max_points = max_points;
        self.is_drawing = true;
    }

    /// Empties the points and rewinds `t`, keeping the current parameters.
    pub fn clear(&mut self) {
        debug!(discarded = self.points.len(), "drawing cleared");
        self.points.clear();
        self.t = 0.0;
        self.is_drawing = true;
    }

    /// Re-applies parameters and then clears.
    pub fn reset(&mut self, params: CurveParameters, speed: f64, max_points: usize) {
        self.set_parameters(params, speed, max_points);
        self.clear();
    }

    fn is_full(&self) -> bool {
        self.points.len() >= self.max_points
    }

    fn finish(&mut self) {
        if self.is_drawing {
            info!(points = self.points.len(), t = self.t, "finished drawing");
        }
        self.is_drawing = false;
    }

    /// Current curve parameter.
    #[must_use]
    pub fn t(&self) -> f64 {
        self.t
    }

    /// All points drawn so far, oldest first.
    #[must_use]
    pub fn points(&self) -> &[Point3] {
        &self.points
    }

    #[must_use]
    pub fn is_drawing(&self) -> bool {
        self.is_drawing
    }

    #[must_use]
    pub fn max_points(&self) -> usize {
        self.max_points
    }

    #[must_use]
    pub fn steps_per_tick(&self) -> u32 {
        self.steps_per_tick
    }

    #[must_use]
    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Parameters new points are sampled with.
    #[must_use]
    pub fn params(&self) -> &CurveParameters {
        &self.params
    }
}
