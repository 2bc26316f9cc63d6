//! Arena construction from an `ArenaDefinition`.

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use super::data::{ArenaDefinition, BoxDefinition, CurrentArena};
use crate::combat::{layers, HealthPickup, KillZone};
use crate::enemies::{spawn_enemy, EnemyRegistry};
use crate::player::{spawn_player, PlayerConfig};

/// Marker for everything that belongs to the current arena.
#[derive(Component)]
pub struct ArenaEntity;

const SOLID_COLOR: Color = Color::srgb(0.25, 0.22, 0.28);
const PICKUP_COLOR: Color = Color::srgb(0.3, 0.9, 0.4);
const PICKUP_RADIUS: f32 = 0.3;

/// Solid geometry collides with everything.
fn solid_groups() -> CollisionGroups {
    CollisionGroups::new(layers::WORLD, Group::ALL)
}

/// Trigger volumes that any character can touch.
fn trigger_groups() -> CollisionGroups {
    CollisionGroups::new(layers::SENSOR, layers::PLAYER | layers::ENEMY | layers::NEUTRAL)
}

/// Spawn the whole arena. Returns the player entity.
pub fn build_arena(
    commands: &mut Commands,
    arena: &ArenaDefinition,
    player_config: &PlayerConfig,
    enemy_registry: &EnemyRegistry,
) -> Entity {
    info!("Building arena: {}", arena.name);

    for solid in &arena.solids {
        spawn_solid(commands, solid);
    }

    for zone in &arena.kill_zones {
        let half = zone.half_extents();
        commands.spawn((
            KillZone,
            Transform::from_translation(zone.center().extend(0.0)),
            Collider::cuboid(half.x, half.y),
            Sensor,
            ActiveEvents::COLLISION_EVENTS,
            trigger_groups(),
            ArenaEntity,
        ));
    }

    for pickup in &arena.pickups {
        commands.spawn((
            HealthPickup {
                amount: pickup.amount,
            },
            Sprite::from_color(PICKUP_COLOR, Vec2::splat(PICKUP_RADIUS * 2.0)),
            Transform::from_xyz(pickup.position.0, pickup.position.1, 0.5),
            Collider::ball(PICKUP_RADIUS),
            Sensor,
            ActiveEvents::COLLISION_EVENTS,
            trigger_groups(),
            ArenaEntity,
        ));
    }

    let player_position = Vec2::new(arena.player_spawn.0, arena.player_spawn.1);
    let player = spawn_player(commands, player_config, player_position);
    commands.entity(player).insert(ArenaEntity);

    for spawn in &arena.enemies {
        let Some(definition) = enemy_registry.get(&spawn.kind) else {
            warn!("Unknown enemy type '{}' in arena '{}'", spawn.kind, arena.name);
            continue;
        };
        let position = Vec2::new(spawn.position.0, spawn.position.1);
        let enemy = spawn_enemy(commands, &spawn.kind, definition, position, Some(player));
        commands.entity(enemy).insert(ArenaEntity);
    }

    player
}

fn spawn_solid(commands: &mut Commands, solid: &BoxDefinition) {
    let half = solid.half_extents();
    commands.spawn((
        Sprite::from_color(SOLID_COLOR, half * 2.0),
        Transform::from_translation(solid.center().extend(0.0)),
        RigidBody::Fixed,
        Collider::cuboid(half.x, half.y),
        solid_groups(),
        ArenaEntity,
    ));
}

/// Build the loaded arena.
pub fn spawn_arena(
    mut commands: Commands,
    arena: Res<CurrentArena>,
    player_config: Res<PlayerConfig>,
    enemy_registry: Res<EnemyRegistry>,
) {
    build_arena(&mut commands, &arena.0, &player_config, &enemy_registry);
}

/// Remove the previous arena before a reload.
pub fn cleanup_arena(mut commands: Commands, query: Query<Entity, With<ArenaEntity>>) {
    for entity in query.iter() {
        commands.entity(entity).despawn_recursive();
    }
}
