//! A 2D platformer character controller for Bevy.
//!
//! Each fixed step the controller:
//!
//! 1. checks a small circle at the character's feet for ground and fires
//!    [`Landed`] when the character touches down;
//! 2. checks a circle above its head when it wants to stand, forcing a
//!    crouch if something is in the way;
//! 3. turns the [`MovementIntent`] into a smoothed horizontal velocity,
//!    crouch transitions ([`CrouchChanged`]), sprite flips and jumps.
//!
//! Physics access goes through a [`CharacterPhysicsBackend`]; the
//! `avian2d` feature (enabled by default) provides [`Avian2dBackend`].
//!
//! # Example
//!
//! ```rust,no_run
//! use bevy::prelude::*;
//! use avian2d::prelude::*;
//! use platformer_controller_2d::prelude::*;
//!
//! fn spawn_player(mut commands: Commands) {
//!     commands.spawn((
//!         Transform::from_xyz(0.0, 2.0, 0.0),
//!         CharacterController::new(),
//!         ControllerConfig::default().with_speed(8.0),
//!         Collider::capsule(0.5, 1.0),
//!     ));
//! }
//!
//! App::new()
//!     .add_plugins((
//!         MinimalPlugins,
//!         PhysicsPlugins::default(),
//!         CharacterControllerPlugin::<Avian2dBackend>::default(),
//!     ))
//!     .add_systems(Startup, spawn_player);
//! ```

use std::marker::PhantomData;

use bevy::prelude::*;

pub mod backend;
pub mod config;
pub mod controller;
pub mod detection;
pub mod intent;
pub mod messages;
pub mod movement;
pub mod smoothing;

#[cfg(feature = "avian2d")]
pub mod avian;

pub use backend::CharacterPhysicsBackend;
pub use config::ControllerConfig;
pub use controller::{CharacterController, CrouchCollider, Facing};
pub use intent::MovementIntent;
pub use messages::{CrouchChanged, Landed};

/// Commonly used types.
pub mod prelude {
    pub use crate::backend::{CharacterPhysicsBackend, NoOpBackendPlugin};
    pub use crate::config::{
        ControllerConfig, CrouchingConfig, JumpingConfig, MovementConfig, SensorConfig,
    };
    pub use crate::controller::{CharacterController, CrouchCollider, Facing};
    pub use crate::detection::SensorOverlap;
    pub use crate::intent::MovementIntent;
    pub use crate::messages::{CrouchChanged, Landed};
    pub use crate::movement::{MoveOutcome, resolve_move};
    pub use crate::{CharacterControllerPlugin, CharacterControllerSet};

    #[cfg(feature = "avian2d")]
    pub use crate::avian::Avian2dBackend;
}

/// System sets of the controller, run in order inside `FixedUpdate`.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharacterControllerSet {
    /// Ground and ceiling queries (backend specific).
    Sensors,
    /// Movement, crouch and jump resolution.
    Movement,
}

/// Plugin adding the character controller for physics backend `B`.
pub struct CharacterControllerPlugin<B: CharacterPhysicsBackend> {
    _backend: PhantomData<B>,
}

impl<B: CharacterPhysicsBackend> Default for CharacterControllerPlugin<B> {
    fn default() -> Self {
        Self {
            _backend: PhantomData,
        }
    }
}

impl<B: CharacterPhysicsBackend> Plugin for CharacterControllerPlugin<B> {
    fn build(&self, app: &mut App) {
        app.register_type::<CharacterController>()
            .register_type::<ControllerConfig>()
            .register_type::<MovementIntent>()
            .register_type::<CrouchCollider>();

        app.add_message::<Landed>().add_message::<CrouchChanged>();

        app.configure_sets(
            FixedUpdate,
            (CharacterControllerSet::Sensors, CharacterControllerSet::Movement).chain(),
        );

        app.add_plugins(B::plugin());

        app.add_systems(
            FixedUpdate,
            movement::apply_movement::<B>.in_set(CharacterControllerSet::Movement),
        );
    }
}
