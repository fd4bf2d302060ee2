//! Configuration for the ground and ceiling overlap sensors.

use bevy::prelude::*;

/// Configuration for the ground and ceiling overlap sensors.
///
/// Both sensors are circles placed relative to the character in its local
/// space, so they follow the transform (including horizontal flips).
#[derive(Reflect, Debug, Clone, Copy)]
pub struct SensorConfig {
    /// Offset of the ground sensor from the character origin (the feet).
    pub ground_offset: Vec2,

    /// Radius of the ground sensor circle.
    pub ground_radius: f32,

    /// Offset of the ceiling sensor from the character origin (the head).
    pub ceiling_offset: Vec2,

    /// Radius of the ceiling sensor circle.
    pub ceiling_radius: f32,

    /// Bitmask of the physics layers that count as ground and ceiling.
    pub ground_layers: u32,
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            ground_offset: Vec2::new(0.0, -1.0),
            ground_radius: 0.2,
            ceiling_offset: Vec2::new(0.0, 1.0),
            ceiling_radius: 0.2,
            ground_layers: u32::MAX,
        }
    }
}
