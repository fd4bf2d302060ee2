//! Configuration for jumping.

use bevy::prelude::*;

/// Configuration for jumping.
#[derive(Reflect, Debug, Clone, Copy)]
pub struct JumpingConfig {
    /// Upward force applied for a single fixed step when a grounded jump
    /// is requested. The resulting impulse is `force * timestep`.
    pub force: f32,
}

impl Default for JumpingConfig {
    fn default() -> Self {
        Self { force: 500.0 }
    }
}
