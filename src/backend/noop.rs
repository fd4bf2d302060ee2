use bevy::prelude::*;

/// Empty plugin for backends that don't need additional setup.
///
/// Backends using it must fill in the sensor results themselves, e.g. with
/// [`CharacterController::update_grounded`](crate::CharacterController::update_grounded).
pub struct NoOpBackendPlugin;

impl Plugin for NoOpBackendPlugin {
    fn build(&self, _app: &mut App) {}
}
