#![forbid(unsafe_code)]

//! Critically damped smoothing for the cursor indicator.
//!
//! [`smooth_damp`] moves a value toward a target like a critically damped
//! spring: it reaches the target in roughly `smooth_time` seconds, never
//! overshoots, and keeps its velocity across calls so a target that changes
//! several times inside one smoothing window still produces a continuous
//! path.
//!
//! The exponential decay uses the usual rational approximation
//! `1 / (1 + x + 0.48x² + 0.235x³)`, which is stable for large `dt`.

use serde::{Deserialize, Serialize};

use crate::geometry::Vec2;

const MIN_SMOOTH_TIME: f32 = 1e-4;

#[inline]
fn decay(omega: f32, dt: f32) -> f32 {
    let x = omega * dt;
    1.0 / (1.0 + x + 0.48 * x * x + 0.235 * x * x * x)
}

/// One smoothing step for a 2D point.
///
/// `velocity` carries state between calls. `max_speed` caps the approach
/// speed (`f32::INFINITY` for no cap). A non-positive `dt` returns `current`
/// unchanged.
#[must_use]
pub fn smooth_damp(
    current: Vec2,
    target: Vec2,
    velocity: &mut Vec2,
    smooth_time: f32,
    dt: f32,
    max_speed: f32,
) -> Vec2 {
    if dt <= 0.0 {
        return current;
    }
    let smooth_time = smooth_time.max(MIN_SMOOTH_TIME);
    let omega = 2.0 / smooth_time;
    let exp = decay(omega, dt);

    let goal = target;
    let change = (current - target).clamp_length(max_speed * smooth_time);
    let target = current - change;

    let temp = (*velocity + change * omega) * dt;
    *velocity = (*velocity - temp * omega) * exp;
    let mut output = target + (change + temp) * exp;

    // Clamp overshoot.
    if (goal - current).dot(output - goal) > 0.0 {
        output = goal;
        *velocity = Vec2::ZERO;
    }
    output
}

/// Scalar variant of [`smooth_damp`].
#[must_use]
pub fn smooth_damp_scalar(
    current: f32,
    target: f32,
    velocity: &mut f32,
    smooth_time: f32,
    dt: f32,
    max_speed: f32,
) -> f32 {
    if dt <= 0.0 {
        return current;
    }
    let smooth_time = smooth_time.max(MIN_SMOOTH_TIME);
    let omega = 2.0 / smooth_time;
    let exp = decay(omega, dt);

    let goal = target;
    let max_change = max_speed * smooth_time;
    let change = (current - target).clamp(-max_change, max_change);
    let target = current - change;

    let temp = (*velocity + omega * change) * dt;
    *velocity = (*velocity - omega * temp) * exp;
    let mut output = target + (change + temp) * exp;

    if (goal - current > 0.0) == (output > goal) {
        output = goal;
        *velocity = 0.0;
    }
    output
}

/// A point that follows a moving target with [`smooth_damp`].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SmoothedPosition {
    pub position: Vec2,
    pub velocity: Vec2,
}

impl SmoothedPosition {
    #[must_use]
    pub fn new(position: Vec2) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
        }
    }

    /// Advance one step toward `target`; returns the new position.
    pub fn update(&mut self, target: Vec2, smooth_time: f32, dt: f32) -> Vec2 {
        if self.position != target {
            self.position = smooth_damp(
                self.position,
                target,
                &mut self.velocity,
                smooth_time,
                dt,
                f32::INFINITY,
            );
        }
        self.position
    }

    /// Jump to `position` and drop any residual velocity.
    pub fn snap(&mut self, position: Vec2) {
        self.position = position;
        self.velocity = Vec2::ZERO;
    }
}
