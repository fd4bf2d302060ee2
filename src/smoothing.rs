//! Critically damped velocity smoothing.

use bevy::prelude::*;

/// Smallest smoothing time accepted; shorter times snap to the target.
const MIN_SMOOTH_TIME: f32 = 1e-4;

/// Move `current` toward `target` like a critically damped spring.
///
/// `velocity` is the spring's own state and must be kept between calls.
/// `smooth_time` is roughly the time needed to reach the target. The
/// result never overshoots `target`.
///
/// Uses the polynomial approximation of `exp(-omega * dt)` from
/// Game Programming Gems 4, chapter 1.10.
pub fn smooth_damp(current: Vec2, target: Vec2, velocity: &mut Vec2, smooth_time: f32, delta: f32) -> Vec2 {
    if delta <= 0.0 {
        return current;
    }

    let smooth_time = smooth_time.max(MIN_SMOOTH_TIME);
    let omega = 2.0 / smooth_time;
    let x = omega * delta;
    let decay = 1.0 / (1.0 + x + 0.48 * x * x + 0.235 * x * x * x);

    let change = current - target;
    let temp = (*velocity + omega * change) * delta;
    *velocity = (*velocity - omega * temp) * decay;
    let mut output = target + (change + temp) * decay;

    // Passing the target means we would oscillate: snap instead.
    if (target - current).dot(output - target) > 0.0 {
        output = target;
        *velocity = Vec2::ZERO;
    }

    output
}
