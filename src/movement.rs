//! Movement, crouch and jump resolution.
//!
//! [`resolve_move`] holds the per-step state machine and is free of any
//! engine access. [`apply_movement`] runs it for every character and
//! applies the outcome through the physics backend.

use bevy::prelude::*;

use crate::backend::CharacterPhysicsBackend;
use crate::config::ControllerConfig;
use crate::controller::{CharacterController, CrouchCollider};
use crate::intent::MovementIntent;
use crate::messages::CrouchChanged;
use crate::smoothing::smooth_damp;

/// What a single move step wants done to the world.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MoveOutcome {
    /// New body velocity. `None` when the character had no control this step.
    pub velocity: Option<Vec2>,
    /// One-shot upward impulse from a jump.
    pub jump_impulse: Option<Vec2>,
    /// Desired state of the crouch collider. `None` when not controlled.
    pub crouch_collider_enabled: Option<bool>,
    /// New crouch state, if it changed this step.
    pub crouch_changed: Option<bool>,
    /// Whether the facing direction flipped this step.
    pub flipped: bool,
}

/// Resolve one move step.
///
/// `intent.jump` is read as-is; callers are expected to consume it.
/// `velocity` is the body velocity before the step and `delta` the fixed
/// timestep.
pub fn resolve_move(
    controller: &mut CharacterController,
    config: &ControllerConfig,
    intent: MovementIntent,
    velocity: Vec2,
    delta: f32,
) -> MoveOutcome {
    let mut outcome = MoveOutcome::default();
    let mut axis = intent.axis;

    // Something overhead: the character cannot stand up.
    let crouch = intent.crouch || controller.ceiling_blocked();

    if controller.is_grounded || config.movement.air_control {
        if crouch {
            if !controller.crouching {
                controller.crouching = true;
                outcome.crouch_changed = Some(true);
            }
            axis *= config.crouching.speed_multiplier;
            outcome.crouch_collider_enabled = Some(false);
        } else {
            outcome.crouch_collider_enabled = Some(true);
            if controller.crouching {
                controller.crouching = false;
                outcome.crouch_changed = Some(false);
            }
        }

        let target = Vec2::new(axis * config.movement.speed, velocity.y);
        let smoothed = smooth_damp(
            velocity,
            target,
            &mut controller.smoothing_velocity,
            config.movement.smoothing,
            delta,
        );
        controller.speed = smoothed.length();
        outcome.velocity = Some(smoothed);

        if controller.facing.is_reversed_by(axis) {
            controller.flip();
            outcome.flipped = true;
        }
    }

    if controller.is_grounded && intent.jump {
        controller.is_grounded = false;
        outcome.jump_impulse = Some(Vec2::new(0.0, config.jumping.force * delta));
    }

    outcome
}

/// Run the move step for every character and apply the results.
///
/// Consumes each character's pending jump request.
pub fn apply_movement<B: CharacterPhysicsBackend>(world: &mut World) {
    let delta = B::get_fixed_timestep(world);

    let entities: Vec<Entity> = world
        .query_filtered::<Entity, With<CharacterController>>()
        .iter(world)
        .collect();

    let mut characters = world.query::<(
        &mut CharacterController,
        &ControllerConfig,
        &mut MovementIntent,
        Option<&CrouchCollider>,
    )>();

    for entity in entities {
        let velocity = B::get_velocity(world, entity);

        let Ok((mut controller, config, mut intent, crouch_collider)) =
            characters.get_mut(world, entity)
        else {
            continue;
        };

        let input = *intent;
        intent.take_jump();
        let crouch_collider = crouch_collider.map(|c| c.0);
        let outcome = resolve_move(&mut controller, config, input, velocity, delta);

        if let Some(velocity) = outcome.velocity {
            B::set_velocity(world, entity, velocity);
        }

        if let (Some(enabled), Some(collider)) = (outcome.crouch_collider_enabled, crouch_collider) {
            B::set_collider_enabled(world, collider, enabled);
        }

        if let Some(crouching) = outcome.crouch_changed {
            debug!("{entity}: crouching={crouching}");
            world.write_message(CrouchChanged { entity, crouching });
        }

        if outcome.flipped {
            if let Some(mut transform) = world.get_mut::<Transform>(entity) {
                transform.scale.x *= -1.0;
            }
        }

        if let Some(impulse) = outcome.jump_impulse {
            debug!("{entity}: jump impulse {impulse}");
            B::apply_impulse(world, entity, impulse);
        }
    }
}

#[cfg(test)]
mod tests {
    use bevy::ecs::message::Messages;

    use super::*;
    use crate::controller::Facing;
    use crate::detection::SensorOverlap;
    use crate::messages::Landed;

    const DT: f32 = 1.0 / 60.0;

    fn overlap(world: &mut World) -> SensorOverlap {
        let other = world.spawn_empty().id();
        SensorOverlap::from_hits([other], |_| false)
    }

    fn grounded(world: &mut World) -> CharacterController {
        let mut controller = CharacterController::new();
        controller.update_grounded(overlap(world));
        controller
    }

    fn intent(axis: f32, crouch: bool, jump: bool) -> MovementIntent {
        MovementIntent { axis, crouch, jump }
    }

    // ==================== resolve_move ====================

    #[test]
    fn walking_moves_toward_target_speed() {
        let mut world = World::new();
        let mut controller = grounded(&mut world);
        let config = ControllerConfig::default();

        let out = resolve_move(&mut controller, &config, intent(1.0, false, false), Vec2::ZERO, DT);
        let velocity = out.velocity.unwrap();

        assert!(velocity.x > 0.0 && velocity.x <= config.movement.speed);
        assert_eq!(velocity.y, 0.0);
        assert_eq!(controller.speed(), velocity.length());
        assert_eq!(out.crouch_collider_enabled, Some(true));
        assert!(out.crouch_changed.is_none());
        assert!(!out.flipped);
    }

    #[test]
    fn vertical_velocity_is_preserved() {
        let mut world = World::new();
        let mut controller = grounded(&mut world);
        let config = ControllerConfig::default();

        let out = resolve_move(&mut controller, &config, intent(1.0, false, false), Vec2::new(0.0, -7.5), DT);
        assert_eq!(out.velocity.unwrap().y, -7.5);
    }

    #[test]
    fn repeated_steps_reach_full_speed() {
        let mut world = World::new();
        let mut controller = grounded(&mut world);
        let config = ControllerConfig::default();
        let mut velocity = Vec2::ZERO;

        for _ in 0..60 {
            velocity = resolve_move(&mut controller, &config, intent(1.0, false, false), velocity, DT)
                .velocity
                .unwrap();
        }

        assert!((velocity.x - config.movement.speed).abs() < 0.01);
    }

    #[test]
    fn crouch_fires_once_and_slows_down() {
        let mut world = World::new();
        let mut controller = grounded(&mut world);
        let config = ControllerConfig::default().with_smoothing(0.0);

        let out = resolve_move(&mut controller, &config, intent(1.0, true, false), Vec2::ZERO, DT);
        assert_eq!(out.crouch_changed, Some(true));
        assert_eq!(out.crouch_collider_enabled, Some(false));
        assert!(controller.is_crouching());

        let expected = config.movement.speed * config.crouching.speed_multiplier;
        assert!((out.velocity.unwrap().x - expected).abs() < 0.01);

        // Still crouching: no second message
        let out = resolve_move(&mut controller, &config, intent(1.0, true, false), Vec2::ZERO, DT);
        assert_eq!(out.crouch_changed, None);
        assert_eq!(out.crouch_collider_enabled, Some(false));
    }

    #[test]
    fn standing_up_fires_uncrouch() {
        let mut world = World::new();
        let mut controller = grounded(&mut world);
        let config = ControllerConfig::default();

        resolve_move(&mut controller, &config, intent(0.0, true, false), Vec2::ZERO, DT);
        let out = resolve_move(&mut controller, &config, intent(0.0, false, false), Vec2::ZERO, DT);

        assert_eq!(out.crouch_changed, Some(false));
        assert_eq!(out.crouch_collider_enabled, Some(true));
        assert!(!controller.is_crouching());
    }

    #[test]
    fn ceiling_forces_crouch() {
        let mut world = World::new();
        let mut controller = grounded(&mut world);
        let config = ControllerConfig::default();

        controller.update_ceiling(overlap(&mut world));
        let out = resolve_move(&mut controller, &config, intent(0.0, false, false), Vec2::ZERO, DT);

        assert_eq!(out.crouch_changed, Some(true));
        assert!(controller.is_crouching());

        // Ceiling gone: stand up again
        controller.update_ceiling(SensorOverlap::miss());
        let out = resolve_move(&mut controller, &config, intent(0.0, false, false), Vec2::ZERO, DT);
        assert_eq!(out.crouch_changed, Some(false));
    }

    #[test]
    fn no_air_control_leaves_airborne_character_alone() {
        let mut controller = CharacterController::new();
        let config = ControllerConfig::default().with_air_control(false);

        let out = resolve_move(&mut controller, &config, intent(-1.0, true, true), Vec2::new(3.0, 1.0), DT);

        assert_eq!(out, MoveOutcome::default());
        assert!(!controller.is_crouching());
        assert!(controller.is_facing_right());
    }

    #[test]
    fn air_control_steers_airborne_character() {
        let mut controller = CharacterController::new();
        let config = ControllerConfig::default();

        let out = resolve_move(&mut controller, &config, intent(-1.0, false, false), Vec2::ZERO, DT);

        assert!(out.velocity.unwrap().x < 0.0);
        assert!(out.flipped);
        assert_eq!(controller.facing_direction(), Facing::Left);
    }

    #[test]
    fn facing_flips_only_on_reversal() {
        let mut world = World::new();
        let mut controller = grounded(&mut world);
        let config = ControllerConfig::default();

        assert!(!resolve_move(&mut controller, &config, intent(1.0, false, false), Vec2::ZERO, DT).flipped);
        assert!(resolve_move(&mut controller, &config, intent(-1.0, false, false), Vec2::ZERO, DT).flipped);
        assert!(!resolve_move(&mut controller, &config, intent(-1.0, false, false), Vec2::ZERO, DT).flipped);
        assert!(!resolve_move(&mut controller, &config, intent(0.0, false, false), Vec2::ZERO, DT).flipped);
        assert!(resolve_move(&mut controller, &config, intent(0.5, false, false), Vec2::ZERO, DT).flipped);
        assert!(controller.is_facing_right());
    }

    #[test]
    fn grounded_jump_applies_impulse_and_clears_grounded() {
        let mut world = World::new();
        let mut controller = grounded(&mut world);
        let config = ControllerConfig::default();

        let out = resolve_move(&mut controller, &config, intent(0.0, false, true), Vec2::ZERO, DT);

        assert_eq!(out.jump_impulse, Some(Vec2::new(0.0, config.jumping.force * DT)));
        assert!(!controller.is_grounded());

        // Cannot jump again until grounded
        let out = resolve_move(&mut controller, &config, intent(0.0, false, true), Vec2::ZERO, DT);
        assert!(out.jump_impulse.is_none());
    }

    #[test]
    fn ground_still_under_feet_after_jump_lands_again() {
        let mut world = World::new();
        let mut controller = grounded(&mut world);
        let config = ControllerConfig::default();

        resolve_move(&mut controller, &config, intent(0.0, false, true), Vec2::ZERO, DT);
        assert!(!controller.is_grounded());

        // The feet sensor has not left the ground yet on the next step
        assert!(controller.update_grounded(overlap(&mut world)));
        let out = resolve_move(&mut controller, &config, intent(0.0, false, true), Vec2::ZERO, DT);
        assert!(out.jump_impulse.is_some());
    }

    #[test]
    fn airborne_jump_is_ignored() {
        let mut controller = CharacterController::new();
        let config = ControllerConfig::default();

        let out = resolve_move(&mut controller, &config, intent(0.0, false, true), Vec2::ZERO, DT);
        assert!(out.jump_impulse.is_none());
    }

    // ==================== apply_movement ====================

    /// Velocity storage for the test backend.
    #[derive(Component, Default)]
    struct TestVelocity(Vec2);

    /// Marker for disabled colliders in the test backend.
    #[derive(Component)]
    struct TestColliderDisabled;

    struct TestBackend;

    impl CharacterPhysicsBackend for TestBackend {
        fn plugin() -> impl Plugin {
            crate::backend::NoOpBackendPlugin
        }

        fn get_velocity(world: &World, entity: Entity) -> Vec2 {
            world.get::<TestVelocity>(entity).map(|v| v.0).unwrap_or(Vec2::ZERO)
        }

        fn set_velocity(world: &mut World, entity: Entity, velocity: Vec2) {
            if let Some(mut v) = world.get_mut::<TestVelocity>(entity) {
                v.0 = velocity;
            }
        }

        fn apply_impulse(world: &mut World, entity: Entity, impulse: Vec2) {
            let mass = Self::get_mass(world, entity);
            if let Some(mut v) = world.get_mut::<TestVelocity>(entity) {
                v.0 += impulse / mass;
            }
        }

        fn get_mass(_world: &World, _entity: Entity) -> f32 {
            1.0
        }

        fn get_fixed_timestep(_world: &World) -> f32 {
            DT
        }

        fn set_collider_enabled(world: &mut World, collider: Entity, enabled: bool) -> bool {
            let Ok(mut entity) = world.get_entity_mut(collider) else {
                return false;
            };
            if enabled {
                entity.remove::<TestColliderDisabled>();
            } else {
                entity.insert(TestColliderDisabled);
            }
            true
        }
    }

    fn create_test_world() -> World {
        let mut world = World::new();
        world.init_resource::<Messages<Landed>>();
        world.init_resource::<Messages<CrouchChanged>>();
        world
    }

    fn crouch_messages(world: &mut World) -> Vec<bool> {
        world
            .resource_mut::<Messages<CrouchChanged>>()
            .drain()
            .map(|m| m.crouching)
            .collect()
    }

    #[test]
    fn apply_movement_writes_velocity_and_consumes_jump() {
        let mut world = create_test_world();
        let ground = overlap(&mut world);
        let mut controller = CharacterController::new();
        controller.update_grounded(ground);

        let character = world
            .spawn((
                Transform::default(),
                controller,
                ControllerConfig::default(),
                MovementIntent { axis: 1.0, crouch: false, jump: true },
                TestVelocity::default(),
            ))
            .id();

        apply_movement::<TestBackend>(&mut world);

        let velocity = world.get::<TestVelocity>(character).unwrap().0;
        assert!(velocity.x > 0.0);
        assert!((velocity.y - 500.0 * DT).abs() < 1e-4);

        let intent = world.get::<MovementIntent>(character).unwrap();
        assert!(!intent.jump);
        assert_eq!(intent.axis, 1.0);
        assert!(!world.get::<CharacterController>(character).unwrap().is_grounded());
    }

    #[test]
    fn apply_movement_toggles_crouch_collider_and_writes_messages() {
        let mut world = create_test_world();
        let ground = overlap(&mut world);
        let head = world.spawn_empty().id();
        let mut controller = CharacterController::new();
        controller.update_grounded(ground);

        let character = world
            .spawn((
                Transform::default(),
                controller,
                ControllerConfig::default(),
                MovementIntent { axis: 0.0, crouch: true, jump: false },
                TestVelocity::default(),
                CrouchCollider(head),
            ))
            .id();

        apply_movement::<TestBackend>(&mut world);
        assert!(world.get::<TestColliderDisabled>(head).is_some());
        assert_eq!(crouch_messages(&mut world), vec![true]);

        apply_movement::<TestBackend>(&mut world);
        assert!(crouch_messages(&mut world).is_empty());

        world.get_mut::<MovementIntent>(character).unwrap().set_crouch(false);
        apply_movement::<TestBackend>(&mut world);
        assert!(world.get::<TestColliderDisabled>(head).is_none());
        assert_eq!(crouch_messages(&mut world), vec![false]);
    }

    #[test]
    fn apply_movement_skips_missing_crouch_collider() {
        let mut world = create_test_world();
        let head = world.spawn_empty().id();
        world.despawn(head);

        let character = world
            .spawn((
                Transform::default(),
                CharacterController::new(),
                ControllerConfig::default(),
                MovementIntent { axis: 0.0, crouch: true, jump: false },
                TestVelocity::default(),
                CrouchCollider(head),
            ))
            .id();

        apply_movement::<TestBackend>(&mut world);

        assert!(world.get::<CharacterController>(character).unwrap().is_crouching());
        assert_eq!(crouch_messages(&mut world), vec![true]);
    }

    #[test]
    fn apply_movement_crouches_without_crouch_collider() {
        let mut world = create_test_world();
        let character = world
            .spawn((
                Transform::default(),
                CharacterController::new(),
                ControllerConfig::default(),
                MovementIntent { axis: 1.0, crouch: true, jump: false },
                TestVelocity::default(),
            ))
            .id();

        apply_movement::<TestBackend>(&mut world);

        assert!(world.get::<CharacterController>(character).unwrap().is_crouching());
        assert!(world.get::<TestVelocity>(character).unwrap().0.x > 0.0);
        assert_eq!(crouch_messages(&mut world), vec![true]);
    }

    #[test]
    fn apply_movement_flips_transform_scale() {
        let mut world = create_test_world();
        let character = world
            .spawn((
                Transform::from_scale(Vec3::new(2.0, 2.0, 1.0)),
                CharacterController::new(),
                ControllerConfig::default(),
                MovementIntent { axis: -1.0, crouch: false, jump: false },
                TestVelocity::default(),
            ))
            .id();

        apply_movement::<TestBackend>(&mut world);
        assert_eq!(world.get::<Transform>(character).unwrap().scale.x, -2.0);

        // Same direction: no further flip
        apply_movement::<TestBackend>(&mut world);
        assert_eq!(world.get::<Transform>(character).unwrap().scale.x, -2.0);

        world.get_mut::<MovementIntent>(character).unwrap().set_axis(1.0);
        apply_movement::<TestBackend>(&mut world);
        assert_eq!(world.get::<Transform>(character).unwrap().scale.x, 2.0);
    }
}
