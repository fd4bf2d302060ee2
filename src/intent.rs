//! Movement intent component.
//!
//! Intents represent the desired movement from player input or AI.
//! The controller systems read these intents and apply appropriate physics.

use bevy::prelude::*;

/// Movement intent for a single character.
///
/// The axis and crouch flag are held until changed. The jump flag is a
/// one-shot request: the move step consumes it whether or not the jump
/// could be performed.
///
/// # Example
///
/// ```rust
/// use platformer_controller_2d::prelude::*;
///
/// let mut intent = MovementIntent::new();
/// intent.set_axis(-1.0);
/// intent.set_crouch(true);
/// intent.request_jump();
/// assert!(intent.is_moving());
///
/// assert!(intent.take_jump());
/// assert!(!intent.take_jump());
///
/// intent.clear();
/// assert!(!intent.is_moving());
/// assert!(!intent.crouch);
/// ```
#[derive(Component, Reflect, Debug, Clone, Copy, Default, PartialEq)]
#[reflect(Component)]
pub struct MovementIntent {
    /// Horizontal movement axis (-1.0 = left, 1.0 = right).
    pub axis: f32,
    /// Whether the character wants to crouch.
    pub crouch: bool,
    /// Whether a jump is requested for the next move step.
    pub jump: bool,
}

impl MovementIntent {
    /// Create a new empty movement intent.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the movement axis (-1.0 = left, 1.0 = right).
    pub fn set_axis(&mut self, axis: f32) {
        self.axis = if axis.is_finite() {
            axis.clamp(-1.0, 1.0)
        } else {
            0.0
        };
    }

    /// Set whether the character wants to crouch.
    pub fn set_crouch(&mut self, crouch: bool) {
        self.crouch = crouch;
    }

    /// Request a jump on the next move step.
    pub fn request_jump(&mut self) {
        self.jump = true;
    }

    /// Consume the pending jump request.
    pub fn take_jump(&mut self) -> bool {
        std::mem::take(&mut self.jump)
    }

    /// Clear all intents.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Check if there is active horizontal input.
    pub fn is_moving(&self) -> bool {
        self.axis.abs() > 0.001
    }
}
