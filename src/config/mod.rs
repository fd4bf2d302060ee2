//! Controller configuration components.
//!
//! The values here are static per character: they are set when the
//! character is spawned (or tweaked through reflection) and only read by
//! the controller systems.

use bevy::prelude::*;

mod crouching;
mod jumping;
mod movement;
mod sensors;

pub use crouching::CrouchingConfig;
pub use jumping::JumpingConfig;
pub use movement::{MAX_SMOOTHING, MovementConfig};
pub use sensors::SensorConfig;

/// Configuration parameters for the character controller.
///
/// # Example
///
/// ```rust
/// use platformer_controller_2d::prelude::*;
///
/// let config = ControllerConfig::default()
///     .with_speed(12.0)
///     .with_smoothing(0.1)
///     .with_air_control(false);
///
/// assert_eq!(config.movement.speed, 12.0);
/// assert!(!config.movement.air_control);
/// ```
#[derive(Component, Reflect, Debug, Clone, Copy, Default)]
#[reflect(Component)]
pub struct ControllerConfig {
    /// Horizontal movement settings.
    pub movement: MovementConfig,
    /// Jump settings.
    pub jumping: JumpingConfig,
    /// Crouch settings.
    pub crouching: CrouchingConfig,
    /// Ground and ceiling sensor settings.
    pub sensors: SensorConfig,
}

impl ControllerConfig {
    /// Builder: set movement speed.
    pub fn with_speed(mut self, speed: f32) -> Self {
        self.movement.speed = speed;
        self
    }

    /// Builder: set the smoothing time, clamped to `0.0..=MAX_SMOOTHING`.
    pub fn with_smoothing(mut self, smoothing: f32) -> Self {
        self.movement.smoothing = smoothing.clamp(0.0, MAX_SMOOTHING);
        self
    }

    /// Builder: enable or disable air control.
    pub fn with_air_control(mut self, enabled: bool) -> Self {
        self.movement.air_control = enabled;
        self
    }

    /// Builder: set jump force.
    pub fn with_jump_force(mut self, force: f32) -> Self {
        self.jumping.force = force;
        self
    }

    /// Builder: set the crouch speed multiplier, clamped to `0.0..=1.0`.
    pub fn with_crouch_speed_multiplier(mut self, multiplier: f32) -> Self {
        self.crouching.speed_multiplier = multiplier.clamp(0.0, 1.0);
        self
    }

    /// Builder: set the ground sensor placement.
    pub fn with_ground_sensor(mut self, offset: Vec2, radius: f32) -> Self {
        self.sensors.ground_offset = offset;
        self.sensors.ground_radius = radius;
        self
    }

    /// Builder: set the ceiling sensor placement.
    pub fn with_ceiling_sensor(mut self, offset: Vec2, radius: f32) -> Self {
        self.sensors.ceiling_offset = offset;
        self.sensors.ceiling_radius = radius;
        self
    }

    /// Builder: set the layer mask used by both sensors.
    pub fn with_ground_layers(mut self, layers: u32) -> Self {
        self.sensors.ground_layers = layers;
        self
    }
}
