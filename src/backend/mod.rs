//! Physics backends.

mod noop;
mod traits;

pub use noop::NoOpBackendPlugin;
pub use traits::CharacterPhysicsBackend;

#[cfg(feature = "avian2d")]
pub use crate::avian::Avian2dBackend;
