//! Combat systems - hit detection, damage, healing and death.

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use super::components::*;
use super::health::{DamageOutcome, Health};
use super::hitbox::{knockback_impulse, MeleeHitbox};
use crate::core::GameState;
use crate::movement::MovementController;
use crate::player::Player;

/// System set ordering for combat.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum CombatSet {
    /// Turn overlaps into damage/heal/kill requests.
    Hits,
    /// Apply requests to health and raise lifecycle events.
    Damage,
    /// Invincibility countdowns.
    Timers,
}

/// Configure combat systems.
pub fn setup_combat_systems(app: &mut App) {
    app
        // System ordering
        .configure_sets(
            Update,
            (CombatSet::Hits, CombatSet::Damage, CombatSet::Timers)
                .chain()
                .run_if(in_state(GameState::InGame)),
        )

        // Overlap systems
        .add_systems(
            Update,
            (process_hitbox_overlaps, process_pickups, process_kill_zones).in_set(CombatSet::Hits),
        )

        // Health systems
        .add_systems(
            Update,
            (apply_kills, apply_damage, apply_heals, apply_revives, check_deaths)
                .chain()
                .in_set(CombatSet::Damage),
        )

        .add_systems(Update, tick_invincibility.in_set(CombatSet::Timers));
}

/// Order a collision pair so the entity accepted by `is_first` comes first.
pub(crate) fn ordered_pair(
    e1: Entity,
    e2: Entity,
    is_first: impl Fn(Entity) -> bool,
) -> Option<(Entity, Entity)> {
    if is_first(e1) {
        Some((e1, e2))
    } else if is_first(e2) {
        Some((e2, e1))
    } else {
        None
    }
}

/// Turn hitbox overlaps into damage requests, once per target per swing.
pub fn process_hitbox_overlaps(
    mut collision_events: EventReader<CollisionEvent>,
    mut hitbox_query: Query<&mut MeleeHitbox>,
    target_query: Query<&Faction, With<Health>>,
    transform_query: Query<&GlobalTransform>,
    facing_query: Query<&MovementController>,
    mut damage_events: EventWriter<DamageEvent>,
) {
    for event in collision_events.read() {
        let CollisionEvent::Started(e1, e2, _) = event else {
            continue;
        };

        let Some((hitbox_entity, target)) = ordered_pair(*e1, *e2, |e| hitbox_query.contains(e)) else {
            continue;
        };
        let Ok(faction) = target_query.get(target) else {
            continue;
        };
        let Ok(mut hitbox) = hitbox_query.get_mut(hitbox_entity) else {
            continue;
        };

        if !hitbox.try_hit(target, *faction) {
            continue;
        }

        let knockback = match (transform_query.get(hitbox.owner), transform_query.get(target)) {
            (Ok(attacker), Ok(victim)) if hitbox.knockback() != Vec2::ZERO => {
                let facing = facing_query
                    .get(hitbox.owner)
                    .map_or(1.0, |controller| controller.facing().sign());
                Some(knockback_impulse(
                    hitbox.knockback(),
                    attacker.translation().truncate(),
                    victim.translation().truncate(),
                    facing,
                ))
            }
            _ => None,
        };

        debug!("Hitbox of {} struck {} for {}", hitbox.owner, target, hitbox.damage());
        damage_events.send(DamageEvent {
            target,
            source: Some(hitbox.owner),
            amount: hitbox.damage(),
            knockback,
        });
    }
}

/// Heal characters that touch a pickup; the pickup is used up only if it healed.
pub fn process_pickups(
    mut commands: Commands,
    mut collision_events: EventReader<CollisionEvent>,
    pickup_query: Query<&HealthPickup>,
    health_query: Query<&Health>,
    mut heal_events: EventWriter<HealEvent>,
    mut consumed: Local<Vec<Entity>>,
) {
    consumed.clear();

    for event in collision_events.read() {
        let CollisionEvent::Started(e1, e2, _) = event else {
            continue;
        };
        let Some((pickup_entity, target)) = ordered_pair(*e1, *e2, |e| pickup_query.contains(e)) else {
            continue;
        };
        if consumed.contains(&pickup_entity) {
            continue;
        }
        let (Ok(pickup), Ok(health)) = (pickup_query.get(pickup_entity), health_query.get(target)) else {
            continue;
        };

        if health.is_alive() && health.current() < health.maximum() {
            heal_events.send(HealEvent {
                target,
                amount: pickup.amount,
            });
            consumed.push(pickup_entity);
            commands.entity(pickup_entity).despawn_recursive();
        }
    }
}

/// Kill any character entering a kill zone.
pub fn process_kill_zones(
    mut collision_events: EventReader<CollisionEvent>,
    zone_query: Query<(), With<KillZone>>,
    health_query: Query<(), With<Health>>,
    mut kill_events: EventWriter<KillEvent>,
) {
    for event in collision_events.read() {
        let CollisionEvent::Started(e1, e2, _) = event else {
            continue;
        };
        let Some((_, target)) = ordered_pair(*e1, *e2, |e| zone_query.contains(e)) else {
            continue;
        };
        if health_query.contains(target) {
            kill_events.send(KillEvent { target, source: None });
        }
    }
}

/// Apply damage requests to health.
pub fn apply_damage(
    mut commands: Commands,
    mut damage_events: EventReader<DamageEvent>,
    mut health_query: Query<(&mut Health, Option<&mut ExternalImpulse>)>,
    mut hurt_events: EventWriter<HurtEvent>,
    mut death_events: EventWriter<DeathEvent>,
) {
    for event in damage_events.read() {
        let Ok((mut health, impulse)) = health_query.get_mut(event.target) else {
            continue;
        };

        let outcome = health.take_damage(event.amount);
        match outcome {
            DamageOutcome::Ignored => continue,
            DamageOutcome::Hurt { dealt } => {
                debug!("{} took {} damage, {} left", event.target, dealt, health.current());
                hurt_events.send(HurtEvent {
                    entity: event.target,
                    amount: dealt,
                    source: event.source,
                });
            }
            DamageOutcome::Died { dealt } => {
                debug!("{} took {} damage and died", event.target, dealt);
                commands.entity(event.target).insert(Dead);
                death_events.send(DeathEvent {
                    entity: event.target,
                    killed_by: event.source,
                });
            }
        }

        if let (Some(knockback), Some(mut impulse)) = (event.knockback, impulse) {
            impulse.impulse += knockback;
        }
    }
}

/// Apply instant-death requests.
pub fn apply_kills(
    mut commands: Commands,
    mut kill_events: EventReader<KillEvent>,
    mut health_query: Query<&mut Health>,
    mut death_events: EventWriter<DeathEvent>,
) {
    for event in kill_events.read() {
        let Ok(mut health) = health_query.get_mut(event.target) else {
            continue;
        };
        if health.kill().applied() {
            debug!("{} was killed outright", event.target);
            commands.entity(event.target).insert(Dead);
            death_events.send(DeathEvent {
                entity: event.target,
                killed_by: event.source,
            });
        }
    }
}

/// Apply heal requests.
pub fn apply_heals(
    mut heal_events: EventReader<HealEvent>,
    mut health_query: Query<&mut Health>,
    mut healed_events: EventWriter<HealedEvent>,
) {
    for event in heal_events.read() {
        let Ok(mut health) = health_query.get_mut(event.target) else {
            continue;
        };
        let restored = health.heal(event.amount);
        if restored > 0.0 {
            debug!("{} healed {}, now {}", event.target, restored, health.current());
            healed_events.send(HealedEvent {
                entity: event.target,
                amount: restored,
            });
        }
    }
}

/// Apply revive requests.
pub fn apply_revives(
    mut commands: Commands,
    mut revive_events: EventReader<ReviveEvent>,
    mut health_query: Query<&mut Health>,
) {
    for event in revive_events.read() {
        let Ok(mut health) = health_query.get_mut(event.target) else {
            continue;
        };
        if health.revive(event.amount) {
            info!("{} revived with {} health", event.target, health.current());
            commands.entity(event.target).remove::<Dead>();
        }
    }
}

/// End the run when the player dies.
fn check_deaths(
    mut death_events: EventReader<DeathEvent>,
    player_query: Query<Entity, With<Player>>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    for event in death_events.read() {
        if player_query.contains(event.entity) {
            info!("Player died! Transitioning to Game Over...");
            next_state.set(GameState::GameOver);
        }
    }
}

/// Count down invincibility windows.
pub fn tick_invincibility(time: Res<Time>, mut query: Query<&mut Health>) {
    let dt = time.delta_secs();
    for mut health in query.iter_mut() {
        health.tick(dt);
    }
}
