//! Combat-related components.

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

// Re-export from core to avoid duplication
pub use crate::core::{DamageEvent, DeathEvent, HealEvent, HealedEvent, HurtEvent, KillEvent, ReviveEvent};

/// Collision groups used across the game.
pub mod layers {
    use bevy_rapier2d::prelude::Group;

    pub const PLAYER: Group = Group::GROUP_1;
    pub const ENEMY: Group = Group::GROUP_2;
    pub const NEUTRAL: Group = Group::GROUP_3;
    pub const WORLD: Group = Group::GROUP_4;
    /// Hitboxes, detection zones, pickups and kill zones.
    pub const SENSOR: Group = Group::GROUP_5;
}

/// Which side a character fights for.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Faction {
    Player,
    Enemy,
    #[default]
    Neutral,
}

impl Faction {
    pub fn group(self) -> Group {
        match self {
            Faction::Player => layers::PLAYER,
            Faction::Enemy => layers::ENEMY,
            Faction::Neutral => layers::NEUTRAL,
        }
    }

    /// Collision groups for a character body of this faction.
    ///
    /// Bodies collide with the world and are seen by every sensor, but
    /// characters pass through each other.
    pub fn body_groups(self) -> CollisionGroups {
        CollisionGroups::new(self.group(), layers::WORLD | layers::SENSOR)
    }
}

/// Set of factions an attack or sensor cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetMask(pub Group);

impl TargetMask {
    pub fn of(factions: &[Faction]) -> Self {
        Self(factions.iter().fold(Group::NONE, |acc, f| acc | f.group()))
    }

    pub fn contains(&self, faction: Faction) -> bool {
        self.0.contains(faction.group())
    }

    /// Collision groups for a sensor that should overlap these factions.
    pub fn sensor_groups(&self) -> CollisionGroups {
        CollisionGroups::new(layers::SENSOR, self.0)
    }
}

/// Marker component for entities that have died (prevents multiple death events).
#[derive(Component)]
pub struct Dead;

/// Heals the first living character that touches it.
#[derive(Component, Debug, Clone)]
pub struct HealthPickup {
    pub amount: f32,
}

/// Instantly kills any character that touches it.
#[derive(Component, Debug, Clone, Default)]
pub struct KillZone;

/// Links a character to its melee hitbox child entity.
#[derive(Component, Debug, Clone, Copy)]
pub struct HitboxLink(pub Entity);
