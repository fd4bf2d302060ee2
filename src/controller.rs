//! Character state component.

use bevy::prelude::*;

#[cfg(feature = "avian2d")]
use avian2d::prelude::{LinearVelocity, LockedAxes, RigidBody};

use crate::config::ControllerConfig;
use crate::detection::SensorOverlap;
use crate::intent::MovementIntent;

/// Horizontal direction the character is facing.
#[derive(Reflect, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Facing {
    #[default]
    Right,
    Left,
}

impl Facing {
    /// `1.0` when facing right, `-1.0` when facing left.
    pub fn sign(self) -> f32 {
        match self {
            Facing::Right => 1.0,
            Facing::Left => -1.0,
        }
    }

    /// The opposite direction.
    pub fn flipped(self) -> Self {
        match self {
            Facing::Right => Facing::Left,
            Facing::Left => Facing::Right,
        }
    }

    /// Whether a movement axis points the other way.
    pub fn is_reversed_by(self, axis: f32) -> bool {
        match self {
            Facing::Right => axis < 0.0,
            Facing::Left => axis > 0.0,
        }
    }
}

/// Collider that is disabled while the character crouches.
///
/// Typically the upper half of the body. If the component is missing, or
/// the entity no longer exists, crouching simply skips the toggle.
#[derive(Component, Reflect, Debug, Clone, Copy)]
#[reflect(Component)]
pub struct CrouchCollider(pub Entity);

/// Core character controller component.
///
/// Holds the per-character state written by the sensor and movement
/// systems. Gameplay code reads it; only the controller writes it.
///
/// # Contact States
///
/// - `is_grounded`: the feet sensor overlapped a ground-layer collider this tick
///   (cleared early by a jump)
/// - `ceiling`: result of the last ceiling query (only taken while not
///   requesting crouch)
#[derive(Component, Reflect, Debug, Clone, Default)]
#[reflect(Component)]
#[require(ControllerConfig, MovementIntent)]
#[cfg_attr(
    feature = "avian2d",
    require(RigidBody, LinearVelocity, LockedAxes = LockedAxes::ROTATION_LOCKED)
)]
pub struct CharacterController {
    /// Whether the character is standing on ground.
    pub(crate) is_grounded: bool,
    /// Whether the character is currently crouched.
    pub(crate) crouching: bool,
    /// Direction the character faces.
    pub(crate) facing: Facing,
    /// Magnitude of the body velocity after the last move step.
    pub(crate) speed: f32,
    /// Accumulator owned by the velocity smoother.
    pub(crate) smoothing_velocity: Vec2,
    /// Last ground sensor result.
    pub(crate) ground: SensorOverlap,
    /// Last ceiling sensor result.
    pub(crate) ceiling: SensorOverlap,
}

impl CharacterController {
    /// Create a new controller: airborne, standing, facing right.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a controller facing the given direction.
    pub fn with_facing(facing: Facing) -> Self {
        Self {
            facing,
            ..default()
        }
    }

    /// Whether the character is standing on ground.
    pub fn is_grounded(&self) -> bool {
        self.is_grounded
    }

    /// Whether the character is crouched.
    pub fn is_crouching(&self) -> bool {
        self.crouching
    }

    /// Direction the character faces.
    pub fn facing_direction(&self) -> Facing {
        self.facing
    }

    /// Whether the character faces right.
    pub fn is_facing_right(&self) -> bool {
        self.facing == Facing::Right
    }

    /// Current speed (velocity magnitude after the last move step).
    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Collider the character is standing on, if grounded.
    pub fn ground_entity(&self) -> Option<Entity> {
        if self.is_grounded {
            self.ground.entity
        } else {
            None
        }
    }

    /// Last ground sensor result (for debugging/testing).
    pub fn ground(&self) -> SensorOverlap {
        self.ground
    }

    /// Whether something above prevents the character from standing up.
    pub fn ceiling_blocked(&self) -> bool {
        self.ceiling.hit
    }

    /// Record a ground sensor result.
    ///
    /// Returns `true` exactly when the character goes from airborne to
    /// grounded, i.e. when a landing should be reported.
    pub fn update_grounded(&mut self, overlap: SensorOverlap) -> bool {
        let was_grounded = self.is_grounded;
        self.ground = overlap;
        self.is_grounded = overlap.hit;
        !was_grounded && self.is_grounded
    }

    /// Record a ceiling sensor result.
    pub fn update_ceiling(&mut self, overlap: SensorOverlap) {
        self.ceiling = overlap;
    }

    /// Reverse the facing direction.
    pub(crate) fn flip(&mut self) {
        self.facing = self.facing.flipped();
    }
}
