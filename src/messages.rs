//! Messages emitted by the character controller.
//!
//! Read them with a `MessageReader` in any system that runs after
//! [`CharacterControllerSet::Movement`](crate::CharacterControllerSet).

use bevy::prelude::*;

/// Fired when a character goes from airborne to grounded.
///
/// A jump clears the grounded state immediately, but the feet sensor
/// usually still overlaps the ground for a step or two while the body
/// rises. `Landed` then fires again right after the jump, and the
/// character counts as grounded (and can jump) during those steps.
/// Check the vertical velocity if a landing must mean "falling onto
/// ground".
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Landed {
    /// The character that landed.
    pub entity: Entity,
}

/// Fired each time a character starts or stops crouching.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CrouchChanged {
    /// The character whose crouch state changed.
    pub entity: Entity,
    /// `true` when the character crouched, `false` when it stood up.
    pub crouching: bool,
}
