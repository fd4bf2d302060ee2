//! Configuration for crouching.

use bevy::prelude::*;

/// Configuration for crouching.
#[derive(Reflect, Debug, Clone, Copy)]
pub struct CrouchingConfig {
    /// Multiplier applied to the movement axis while crouched (0.0-1.0).
    pub speed_multiplier: f32,
}

impl Default for CrouchingConfig {
    fn default() -> Self {
        Self {
            speed_multiplier: 0.4,
        }
    }
}
