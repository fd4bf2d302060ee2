//! Configuration for horizontal movement.

use bevy::prelude::*;

/// Maximum accepted smoothing time (seconds).
pub const MAX_SMOOTHING: f32 = 0.3;

/// Configuration for horizontal movement.
#[derive(Reflect, Debug, Clone, Copy)]
pub struct MovementConfig {
    /// Horizontal speed at full axis input (units/second).
    pub speed: f32,

    /// Time (seconds) the velocity needs to roughly reach its target.
    /// Clamped to `0.0..=MAX_SMOOTHING`.
    pub smoothing: f32,

    /// Whether the character can be steered while airborne.
    pub air_control: bool,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            speed: 10.0,
            smoothing: 0.05,
            air_control: true,
        }
    }
}
