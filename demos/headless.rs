//! Headless Example
//!
//! A scripted run without a window: the character drops onto a floor,
//! walks right, crouches under a low ceiling, walks back out, turns
//! around and jumps. Every controller message is logged.
//!
//! ## Running
//! ```bash
//! cargo run --example headless
//! RUST_LOG=platformer_controller_2d=debug cargo run --example headless
//! ```

use std::time::Duration;

use avian2d::prelude::*;
use bevy::app::ScheduleRunnerPlugin;
use bevy::log::LogPlugin;
use bevy::prelude::*;
use platformer_controller_2d::prelude::*;

// ==================== Constants ====================

const FIXED_UPDATE_HZ: f64 = 60.0;

/// Fixed steps after which the script ends.
const SCRIPT_LENGTH: u32 = 480;

// ==================== Components ====================

#[derive(Component)]
struct Player;

/// Fixed steps elapsed since startup.
#[derive(Resource, Default)]
struct StepCounter(u32);

// ==================== Main ====================

fn main() {
    App::new()
        .add_plugins(
            MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(Duration::from_secs_f64(
                1.0 / FIXED_UPDATE_HZ,
            ))),
        )
        .add_plugins(LogPlugin::default())
        .add_plugins(bevy::transform::TransformPlugin)
        // Avian's ColliderHierarchyPlugin expects a SceneSpawner
        .insert_resource(bevy::scene::SceneSpawner::default())
        .add_plugins(PhysicsPlugins::default())
        .add_plugins(CharacterControllerPlugin::<Avian2dBackend>::default())
        .insert_resource(Time::<Fixed>::from_hz(FIXED_UPDATE_HZ))
        .init_resource::<StepCounter>()
        .add_systems(Startup, setup)
        .add_systems(
            FixedUpdate,
            (
                drive_script.before(CharacterControllerSet::Sensors),
                log_messages.after(CharacterControllerSet::Movement),
            ),
        )
        .run();
}

// ==================== Setup ====================

fn setup(mut commands: Commands) {
    // Floor, top surface at y = 0.5
    commands.spawn((
        Transform::default(),
        RigidBody::Static,
        Collider::rectangle(100.0, 1.0),
    ));

    // Low ceiling from x = 6 to x = 10, bottom at y = 2.6
    commands.spawn((
        Transform::from_xyz(8.0, 3.1, 0.0),
        RigidBody::Static,
        Collider::rectangle(4.0, 1.0),
    ));

    let player = commands
        .spawn((
            Player,
            Transform::from_xyz(0.0, 3.0, 0.0),
            CharacterController::new(),
            ControllerConfig::default()
                .with_speed(6.0)
                .with_ground_sensor(Vec2::new(0.0, -1.0), 0.2)
                .with_ceiling_sensor(Vec2::new(0.0, 1.0), 0.2),
            Collider::capsule(0.5, 1.0),
        ))
        .id();

    // Upper body, disabled while crouching
    let head = commands
        .spawn((
            Transform::from_xyz(0.0, 0.6, 0.0),
            Collider::circle(0.3),
            ChildOf(player),
        ))
        .id();
    commands.entity(player).insert(CrouchCollider(head));
}

// ==================== Systems ====================

/// Feed the player's intent from a fixed timeline.
fn drive_script(
    mut counter: ResMut<StepCounter>,
    mut q_player: Query<&mut MovementIntent, With<Player>>,
    mut exit: MessageWriter<AppExit>,
) {
    counter.0 += 1;
    let step = counter.0;

    for mut intent in &mut q_player {
        match step {
            // Let the character settle, then walk right under the ceiling
            60 => intent.set_axis(1.0),
            // Crouch on approach so the upper body fits
            90 => intent.set_crouch(true),
            // Release crouch while still underneath: the ceiling keeps it down
            150 => intent.set_crouch(false),
            // Walk back out the other way
            200 => intent.set_axis(-1.0),
            // Stop and jump
            330 => {
                intent.set_axis(0.0);
                intent.request_jump();
            }
            _ => {}
        }
    }

    if step >= SCRIPT_LENGTH {
        exit.write(AppExit::Success);
    }
}

fn log_messages(
    mut landed: MessageReader<Landed>,
    mut crouch: MessageReader<CrouchChanged>,
    counter: Res<StepCounter>,
    q_player: Query<(&CharacterController, &Transform), With<Player>>,
) {
    for message in landed.read() {
        info!("[step {}] {} landed", counter.0, message.entity);
    }
    for message in crouch.read() {
        info!(
            "[step {}] {} crouching={}",
            counter.0, message.entity, message.crouching
        );
    }

    if counter.0 % 60 == 0 {
        for (controller, transform) in &q_player {
            info!(
                "[step {}] x={:.2} y={:.2} speed={:.2} grounded={} crouching={} facing={:?}",
                counter.0,
                transform.translation.x,
                transform.translation.y,
                controller.speed(),
                controller.is_grounded(),
                controller.is_crouching(),
                controller.facing_direction(),
            );
        }
    }
}
