//! Player spawning.

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use super::combat::PlayerCombat;
use super::components::{Player, PlayerConfig, PlayerIntent};
use crate::animation::Animator;
use crate::combat::{Faction, Health, HitboxLink, MeleeHitbox, TargetMask};
use crate::movement::{ContactSensor, ContactState, FacingOffset, MovementController};

/// Spawn the player body and its melee hitbox child.
pub fn spawn_player(commands: &mut Commands, config: &PlayerConfig, position: Vec2) -> Entity {
    let half = Vec2::new(config.half_extents.0, config.half_extents.1);
    let (r, g, b) = config.color;
    let prey = TargetMask::of(&[Faction::Enemy]);

    let player = commands
        .spawn((
            Player,
            Name::new("Player"),
            Sprite::from_color(Color::srgb(r, g, b), half * 2.0),
            Transform::from_translation(position.extend(2.0)),
            Faction::Player,
            Health::new(config.max_health, config.invincibility),
            MovementController::new(config.walk_speed, config.run_speed)
                .with_acceleration(config.acceleration, config.deceleration),
            PlayerIntent::default(),
            PlayerCombat::default(),
            Animator::default(),
        ))
        .insert((
            RigidBody::Dynamic,
            Collider::cuboid(half.x, half.y),
            Faction::Player.body_groups(),
            LockedAxes::ROTATION_LOCKED,
            Friction::coefficient(0.0),
            Velocity::zero(),
            ExternalImpulse::default(),
            ContactSensor::new(half),
            ContactState::default(),
        ))
        .id();

    let offset = Vec2::new(config.hitbox_offset.0, config.hitbox_offset.1);
    let hitbox = commands
        .spawn((
            MeleeHitbox::new(player, prey),
            Collider::cuboid(config.hitbox_size.0, config.hitbox_size.1),
            Sensor,
            ActiveEvents::COLLISION_EVENTS,
            ColliderDisabled,
            prey.sensor_groups(),
            FacingOffset(offset),
            Transform::from_translation(offset.extend(0.0)),
        ))
        .id();

    commands
        .entity(player)
        .insert(HitboxLink(hitbox))
        .add_children(&[hitbox]);

    info!("Spawned player at {:?}", position);
    player
}
