//! Detection result structures.
//!
//! These structures hold the results of the circle overlap queries used
//! for ground and ceiling detection.

use bevy::prelude::*;

/// Result of a circle overlap query.
#[derive(Reflect, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SensorOverlap {
    /// Whether any foreign collider overlapped the sensor.
    pub hit: bool,
    /// Number of foreign colliders that overlapped the sensor.
    pub count: usize,
    /// First overlapping collider entity (if any).
    pub entity: Option<Entity>,
}

impl SensorOverlap {
    /// Create an empty (no overlap) result.
    pub fn miss() -> Self {
        Self::default()
    }

    /// Build a result from raw query hits, dropping the ones `is_own`
    /// reports as belonging to the querying character.
    pub fn from_hits(
        hits: impl IntoIterator<Item = Entity>,
        mut is_own: impl FnMut(Entity) -> bool,
    ) -> Self {
        let mut overlap = Self::miss();
        for entity in hits.into_iter().filter(|&e| !is_own(e)) {
            if overlap.entity.is_none() {
                overlap.entity = Some(entity);
            }
            overlap.hit = true;
            overlap.count += 1;
        }
        overlap
    }
}
