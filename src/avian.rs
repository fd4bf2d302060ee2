//! Avian2D physics backend implementation.
//!
//! This module provides the physics backend for Avian2D.
//! Enable with the `avian2d` feature.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::backend::CharacterPhysicsBackend;
use crate::config::ControllerConfig;
use crate::controller::CharacterController;
use crate::detection::SensorOverlap;
use crate::intent::MovementIntent;
use crate::messages::Landed;

/// Avian2D physics backend for the character controller.
///
/// Velocity changes go straight to `LinearVelocity`, crouch colliders are
/// toggled with `ColliderDisabled`, and the ground and ceiling sensors are
/// circle overlap queries through `SpatialQuery`.
pub struct Avian2dBackend;

impl CharacterPhysicsBackend for Avian2dBackend {
    fn plugin() -> impl Plugin {
        Avian2dBackendPlugin
    }

    fn get_velocity(world: &World, entity: Entity) -> Vec2 {
        world
            .get::<LinearVelocity>(entity)
            .map(|v| v.0)
            .unwrap_or(Vec2::ZERO)
    }

    fn set_velocity(world: &mut World, entity: Entity, velocity: Vec2) {
        if let Some(mut vel) = world.get_mut::<LinearVelocity>(entity) {
            vel.0 = velocity;
        }
    }

    fn apply_impulse(world: &mut World, entity: Entity, impulse: Vec2) {
        // Impulse = mass * delta_v, so delta_v = impulse / mass
        let mass = Self::get_mass(world, entity);
        if mass <= 0.0 {
            return;
        }
        if let Some(mut vel) = world.get_mut::<LinearVelocity>(entity) {
            vel.0 += impulse / mass;
        }
    }

    fn get_mass(world: &World, entity: Entity) -> f32 {
        let Some(computed_mass) = world.get::<ComputedMass>(entity) else {
            return 0.0;
        };
        let mass = computed_mass.value();
        if mass <= 0.0 || !mass.is_finite() {
            return 0.0;
        }
        mass
    }

    fn get_fixed_timestep(world: &World) -> f32 {
        world
            .get_resource::<Time<Fixed>>()
            .map(|t| t.delta_secs())
            .filter(|&d| d > 0.0)
            .unwrap_or(1.0 / 60.0)
    }

    fn set_collider_enabled(world: &mut World, collider: Entity, enabled: bool) -> bool {
        let Ok(mut collider) = world.get_entity_mut(collider) else {
            return false;
        };
        // Only touch the marker on a real change, so its hooks don't run every step
        match (enabled, collider.contains::<ColliderDisabled>()) {
            (true, true) => {
                collider.remove::<ColliderDisabled>();
            }
            (false, false) => {
                collider.insert(ColliderDisabled);
            }
            _ => {}
        }
        true
    }
}

/// Plugin that sets up Avian2D-specific systems for the character controller.
pub struct Avian2dBackendPlugin;

impl Plugin for Avian2dBackendPlugin {
    fn build(&self, app: &mut App) {
        use crate::CharacterControllerSet;

        app.add_systems(
            FixedUpdate,
            avian_sensor_detection.in_set(CharacterControllerSet::Sensors),
        );
    }
}

/// Query all colliders overlapping a circle, keeping only foreign ones.
fn avian_overlap(
    spatial_query: &SpatialQuery,
    origin: Vec2,
    radius: f32,
    filter: &SpatialQueryFilter,
    is_own: impl FnMut(Entity) -> bool,
) -> SensorOverlap {
    let hits = spatial_query.shape_intersections(&Collider::circle(radius), origin, 0.0, filter);
    SensorOverlap::from_hits(hits, is_own)
}

/// Avian-specific ground and ceiling detection.
///
/// The ground circle is queried every tick and drives `is_grounded` and
/// the [`Landed`] message. The ceiling circle is only queried while the
/// character is not asking to crouch, since only then can it force a
/// crouch.
///
/// Colliders belonging to the character itself (the body and any collider
/// attached to it) never count.
fn avian_sensor_detection(
    spatial_query: SpatialQuery,
    mut q_controllers: Query<(
        Entity,
        &GlobalTransform,
        &ControllerConfig,
        &MovementIntent,
        &mut CharacterController,
    )>,
    q_attached: Query<&ColliderOf>,
    mut landed: MessageWriter<Landed>,
) {
    for (entity, transform, config, intent, mut controller) in &mut q_controllers {
        let sensors = &config.sensors;
        let filter = SpatialQueryFilter::from_mask(LayerMask(sensors.ground_layers))
            .with_excluded_entities([entity]);
        let is_own = |hit: Entity| {
            hit == entity || q_attached.get(hit).is_ok_and(|attached| attached.body == entity)
        };

        let feet = transform.transform_point(sensors.ground_offset.extend(0.0)).truncate();
        let ground = avian_overlap(&spatial_query, feet, sensors.ground_radius, &filter, &is_own);
        trace!("{entity}: {} ground overlaps", ground.count);

        if controller.update_grounded(ground) {
            debug!("{entity}: landed on {:?}", ground.entity);
            landed.write(Landed { entity });
        }

        let ceiling = if intent.crouch {
            SensorOverlap::miss()
        } else {
            let head = transform.transform_point(sensors.ceiling_offset.extend(0.0)).truncate();
            avian_overlap(&spatial_query, head, sensors.ceiling_radius, &filter, &is_own)
        };
        controller.update_ceiling(ceiling);
    }
}
