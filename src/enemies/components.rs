//! Enemy-related components.

use bevy::prelude::*;

use super::brain::BehaviorState;

/// Marker component for all enemies.
#[derive(Component)]
pub struct Enemy;

/// Who the enemy hunts. Set at spawn.
#[derive(Component, Debug, Clone, Default)]
pub struct PerceptionTarget {
    pub target: Option<Entity>,
    /// A missing target has already been logged
    pub reported_missing: bool,
}

impl PerceptionTarget {
    pub fn new(target: Option<Entity>) -> Self {
        Self {
            target,
            reported_missing: false,
        }
    }
}

/// Links an enemy to its detection zone child entity.
#[derive(Component, Debug, Clone, Copy)]
pub struct DetectionLink(pub Entity);

/// Sent whenever an enemy brain enters a new state.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct BehaviorChanged {
    pub entity: Entity,
    pub state: BehaviorState,
}

/// Request to stun an enemy for `duration` seconds.
#[derive(Event, Debug, Clone, Copy)]
pub struct StunEvent {
    pub target: Entity,
    pub duration: f32,
}
