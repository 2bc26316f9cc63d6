//! Enemy spawning.
//!
//! An enemy is a dynamic body with two sensor children: a detection zone that
//! watches for the player and a melee hitbox that is only enabled while an
//! attack window is open.

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use super::brain::EnemyBrain;
use super::components::{DetectionLink, Enemy, PerceptionTarget};
use super::data::EnemyDefinition;
use crate::animation::Animator;
use crate::combat::{Faction, Health, HitboxLink, MeleeHitbox, TargetMask};
use crate::movement::{ContactSensor, ContactState, FacingOffset, MovementController};
use crate::perception::DetectionZone;

/// Spawn an enemy from its definition at `position`, hunting `target`.
pub fn spawn_enemy(
    commands: &mut Commands,
    enemy_type: &str,
    definition: &EnemyDefinition,
    position: Vec2,
    target: Option<Entity>,
) -> Entity {
    let half = Vec2::new(definition.collider.half_width, definition.collider.half_height);
    let (r, g, b) = definition.color;
    let prey = TargetMask::of(&[Faction::Player]);

    let enemy = commands
        .spawn((
            Enemy,
            Name::new(definition.name.clone()),
            Sprite::from_color(Color::srgb(r, g, b), half * 2.0),
            Transform::from_translation(position.extend(1.0)),
            Faction::Enemy,
            Health::new(definition.max_health, definition.invincibility),
            EnemyBrain::new(definition.to_config(), definition.waypoints(position), position),
            MovementController::new(definition.walk_speed, definition.run_speed),
            PerceptionTarget::new(target),
            Animator::default(),
        ))
        .insert((
            RigidBody::Dynamic,
            Collider::cuboid(half.x, half.y),
            Faction::Enemy.body_groups(),
            LockedAxes::ROTATION_LOCKED,
            Friction::coefficient(0.0),
            Velocity::zero(),
            ExternalImpulse::default(),
            ContactSensor::new(half),
            ContactState::default(),
        ))
        .id();

    let (dx, dy) = definition.detection;
    let detection = commands
        .spawn((
            DetectionZone::new(enemy).with_filter(prey),
            Collider::cuboid(dx, dy),
            Sensor,
            ActiveEvents::COLLISION_EVENTS,
            prey.sensor_groups(),
            Transform::default(),
        ))
        .id();

    let offset = Vec2::new(definition.hitbox_offset.0, definition.hitbox_offset.1);
    let (hx, hy) = definition.hitbox_size;
    let hitbox = commands
        .spawn((
            MeleeHitbox::new(enemy, prey),
            Collider::cuboid(hx, hy),
            Sensor,
            ActiveEvents::COLLISION_EVENTS,
            ColliderDisabled,
            prey.sensor_groups(),
            FacingOffset(offset),
            Transform::from_translation(offset.extend(0.0)),
        ))
        .id();

    commands
        .entity(enemy)
        .insert((DetectionLink(detection), HitboxLink(hitbox)))
        .add_children(&[detection, hitbox]);

    info!("Spawned {} ({}) at {:?}", definition.name, enemy_type, position);
    enemy
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enemies::data::parse_enemy_definition;

    const BAT: &str = r#"(
        name: "Cave Bat",
        max_health: 12.0,
        walk_speed: 2.0,
        run_speed: 4.0,
        sight_range: 5.0,
        attack_range: 0.8,
        attack_cooldown: 1.0,
        attacks: [(damage: 4.0, duration: 0.5, knockback: (2.0, 1.0))],
        patrol: (distance: 2.0, hold: 0.5),
    )"#;

    #[test]
    fn spawned_enemy_is_wired_to_its_sensors() {
        let definition = parse_enemy_definition("bat.ron", BAT).unwrap();
        let mut world = World::new();
        let enemy = {
            let mut commands = world.commands();
            spawn_enemy(&mut commands, "bat", &definition, Vec2::new(3.0, 1.0), None)
        };
        world.flush();

        let entity = world.entity(enemy);
        assert!(entity.contains::<Enemy>());
        assert_eq!(entity.get::<Name>().unwrap().as_str(), "Cave Bat");
        assert_eq!(entity.get::<Health>().unwrap().maximum(), 12.0);

        let detection = entity.get::<DetectionLink>().unwrap().0;
        let hitbox = entity.get::<HitboxLink>().unwrap().0;
        let children = entity.get::<Children>().unwrap();
        assert!(children.contains(&detection));
        assert!(children.contains(&hitbox));
        assert!(world.entity(hitbox).contains::<ColliderDisabled>());
        assert_eq!(world.entity(detection).get::<DetectionZone>().unwrap().owner, enemy);
    }
}
