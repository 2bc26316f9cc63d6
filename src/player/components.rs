//! Player-related components and configuration.

use bevy::prelude::*;
use serde::Deserialize;

use crate::enemies::brain::AttackSpec;
use crate::enemies::data::AttackDefinition;

/// Marker component for the player entity.
#[derive(Component)]
pub struct Player;

/// Abstract input for the player, filled by whatever input adapter is active.
///
/// `movement` is held; the other fields are one-shot triggers cleared by the
/// systems that consume them.
#[derive(Component, Debug, Clone, Default)]
pub struct PlayerIntent {
    pub movement: Vec2,
    pub toggle_run: bool,
    pub jump: bool,
    pub attack: bool,
}

/// Player tuning, loaded from `assets/data/player.ron`.
#[derive(Resource, Deserialize, Clone, Debug)]
pub struct PlayerConfig {
    pub max_health: f32,
    /// Seconds of invincibility after a hit
    pub invincibility: f32,
    pub walk_speed: f32,
    pub run_speed: f32,
    pub acceleration: f32,
    pub deceleration: f32,
    /// Upward velocity set by a jump
    pub jump_velocity: f32,
    /// Movement lock after taking a hit
    pub hurt_stagger: f32,
    pub attack: AttackDefinition,
    pub half_extents: (f32, f32),
    pub hitbox_offset: (f32, f32),
    pub hitbox_size: (f32, f32),
    pub color: (f32, f32, f32),
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            max_health: 100.0,
            invincibility: 0.6,
            walk_speed: 3.5,
            run_speed: 6.0,
            acceleration: 40.0,
            deceleration: 50.0,
            jump_velocity: 9.0,
            hurt_stagger: 0.3,
            attack: AttackDefinition {
                damage: 15.0,
                duration: 0.45,
                window: (0.3, 0.7),
                knockback: (5.0, 2.5),
                below_health: None,
            },
            half_extents: (0.4, 0.9),
            hitbox_offset: (0.9, 0.0),
            hitbox_size: (0.6, 0.5),
            color: (0.9, 0.75, 0.3),
        }
    }
}

impl PlayerConfig {
    pub fn attack_spec(&self) -> AttackSpec {
        self.attack.to_spec()
    }
}
