//! Physics backend abstraction.
//!
//! This module defines the trait that physics backends must implement
//! to work with the character controller. The controller logic itself
//! never touches physics components directly.

use bevy::prelude::*;

/// Trait for physics backend implementations.
///
/// Implement this trait to integrate a physics engine with the character
/// controller. The backend handles velocity access, impulses and collider
/// toggling. Its plugin is also responsible for the ground and ceiling
/// sensors, since overlap queries are engine specific.
///
/// All getters return neutral values when the entity lacks the relevant
/// component; setters silently do nothing.
pub trait CharacterPhysicsBackend: 'static + Send + Sync {
    /// Returns the plugin that sets up this backend.
    fn plugin() -> impl Plugin;

    /// Get the current velocity of an entity.
    fn get_velocity(world: &World, entity: Entity) -> Vec2;

    /// Set the velocity of an entity.
    fn set_velocity(world: &mut World, entity: Entity, velocity: Vec2);

    /// Apply an impulse to an entity.
    ///
    /// Impulse is an instantaneous change in momentum (velocity).
    fn apply_impulse(world: &mut World, entity: Entity, impulse: Vec2);

    /// Get the mass of an entity, or `0.0` if it has none.
    fn get_mass(world: &World, entity: Entity) -> f32;

    /// Get the fixed timestep delta time.
    fn get_fixed_timestep(world: &World) -> f32;

    /// Enable or disable a collider.
    ///
    /// Returns `false` when the collider entity does not exist, in which
    /// case nothing happens.
    fn set_collider_enabled(world: &mut World, collider: Entity, enabled: bool) -> bool;
}
