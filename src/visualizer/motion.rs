//! Per-item motion state and the frame integrator.
//!
//! Items enter above the viewport and fall under gravity into their cell,
//! bounce a little, then snap to rest. Horizontal moves and upward retargets
//! ease exponentially instead. Once settled an item costs nothing per frame.

use super::Point;
use crate::constants::{layout::RETARGET_EPSILON, motion};
use serde::Serialize;

/// Integrator tuning. Velocities are pixels per tick (one 60 Hz frame).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Physics {
    pub gravity: f64,
    pub bounce: f64,
    pub ease: f64,
    pub tolerance: f64,
    pub rest_velocity: f64,
    pub bounce_decay: f64,
    pub max_dt: f64,
}

impl Default for Physics {
    fn default() -> Self {
        Self {
            gravity: motion::GRAVITY,
            bounce: motion::BOUNCE,
            ease: motion::EASE,
            tolerance: motion::TOLERANCE,
            rest_velocity: motion::REST_VELOCITY,
            bounce_decay: motion::BOUNCE_DECAY,
            max_dt: motion::MAX_DT,
        }
    }
}

/// Animated position of one item.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct MotionState {
    pub x: f64,
    pub y: f64,
    pub velocity_y: f64,
    pub settled: bool,
    pub target_x: f64,
    pub target_y: f64,
}

impl MotionState {
    /// Fresh state for a newly seen item: horizontally in place, vertically
    /// `jitter` pixels above a one-cell gap over the top edge.
    pub fn spawn(target: Point, cell_size: f64, jitter: f64) -> Self {
        Self {
            x: target.x,
            y: -cell_size - jitter,
            velocity_y: 0.0,
            settled: false,
            target_x: target.x,
            target_y: target.y,
        }
    }

    pub fn position(&self) -> Point {
        Point {
            x: self.x,
            y: self.y,
        }
    }

    pub fn target(&self) -> Point {
        Point {
            x: self.target_x,
            y: self.target_y,
        }
    }

    /// Point the state at a new cell. Returns `true` when the target actually
    /// moved, in which case the item is woken up; the current position is left
    /// untouched so the next frame continues from where the item is.
    pub fn retarget(&mut self, target: Point) -> bool {
        let moved = (self.target_x - target.x).abs() > RETARGET_EPSILON
            || (self.target_y - target.y).abs() > RETARGET_EPSILON;
        if moved {
            self.target_x = target.x;
            self.target_y = target.y;
            self.settled = false;
        }
        moved
    }

    /// Jump straight to the target and stop.
    pub fn settle(&mut self) {
        self.x = self.target_x;
        self.y = self.target_y;
        self.velocity_y = 0.0;
        self.settled = true;
    }

    /// Advance one frame. `dt` is in ticks and must already be clamped.
    pub fn step(&mut self, dt: f64, physics: &Physics) {
        if self.settled {
            return;
        }

        self.x += (self.target_x - self.x) * physics.ease;

        let target_y = self.target_y;
        if self.y < target_y - physics.tolerance {
            // falling
            self.velocity_y += physics.gravity * dt;
            self.y += self.velocity_y;
            if self.y > target_y {
                self.bounce(physics);
            }
        } else if self.y > target_y + physics.tolerance {
            // target moved up: pull, don't bounce
            self.y += (target_y - self.y) * physics.ease;
            self.velocity_y = 0.0;
        } else if self.velocity_y.abs() > physics.rest_velocity {
            self.velocity_y *= physics.bounce_decay;
            self.y += self.velocity_y;
            if self.y > target_y {
                self.bounce(physics);
            }
        } else {
            self.y = target_y;
            self.velocity_y = 0.0;
        }

        if self.velocity_y == 0.0
            && (self.x - self.target_x).abs() < physics.tolerance
            && (self.y - target_y).abs() <= physics.tolerance
        {
            self.settle();
        }
    }

    fn bounce(&mut self, physics: &Physics) {
        self.velocity_y = -self.velocity_y.abs() * physics.bounce;
        self.y = self.target_y;
    }
}

/// Clamp a frame delta into `[0, max_dt]`; garbage deltas become 0.
pub fn clamp_dt(dt: f64, max_dt: f64) -> f64 {
    if dt.is_finite() && dt > 0.0 {
        dt.min(max_dt)
    } else {
        0.0
    }
}

/// Run one frame over every unsettled state and return how many are still
/// moving afterwards. A zero (or invalid) delta leaves everything untouched.
pub fn advance<'a, I>(states: I, dt: f64, physics: &Physics) -> usize
where
    I: IntoIterator<Item = &'a mut MotionState>,
{
    let dt = clamp_dt(dt, physics.max_dt);
    let mut active = 0;
    for state in states {
        if state.settled {
            continue;
        }
        if dt > 0.0 {
            state.step(dt, physics);
        }
        if !state.settled {
            active += 1;
        }
    }
    active
}
