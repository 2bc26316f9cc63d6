//! Enemy AI systems - feed brains, run them, apply what they ask for.

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use super::brain::{BrainSignal, EnemyBrain, Perception};
use super::components::{BehaviorChanged, DetectionLink, Enemy, PerceptionTarget, StunEvent};
use crate::combat::{Dead, DeathEvent, Faction, Health, HitboxLink, HurtEvent, MeleeHitbox, TargetMask};
use crate::movement::MovementController;
use crate::perception::DetectionZone;

/// Forward health lifecycle events and stun requests to brains.
///
/// Deaths are applied after hurts so a same-frame hurt never overrides death.
pub fn forward_health_events(
    mut hurt_events: EventReader<HurtEvent>,
    mut death_events: EventReader<DeathEvent>,
    mut stun_events: EventReader<StunEvent>,
    mut enemy_query: Query<(&mut EnemyBrain, &mut MovementController), With<Enemy>>,
) {
    for event in stun_events.read() {
        if let Ok((mut brain, mut movement)) = enemy_query.get_mut(event.target) {
            brain.stun(event.duration, &mut movement);
        }
    }

    for event in hurt_events.read() {
        if let Ok((mut brain, mut movement)) = enemy_query.get_mut(event.entity) {
            brain.on_hurt(&mut movement);
        }
    }

    for event in death_events.read() {
        if let Ok((mut brain, mut movement)) = enemy_query.get_mut(event.entity) {
            info!("Enemy {} died", event.entity);
            brain.on_die(&mut movement);
        }
    }
}

/// Run one decision tick for every enemy.
#[allow(clippy::type_complexity)]
pub fn run_brains(
    mut commands: Commands,
    time: Res<Time>,
    mut enemy_query: Query<
        (
            Entity,
            &mut EnemyBrain,
            &mut MovementController,
            &GlobalTransform,
            &Health,
            &mut PerceptionTarget,
            Option<&DetectionLink>,
            Option<&HitboxLink>,
        ),
        With<Enemy>,
    >,
    target_query: Query<(&GlobalTransform, Has<Dead>), Without<Enemy>>,
    zone_query: Query<&DetectionZone>,
    mut hitbox_query: Query<&mut MeleeHitbox>,
    mut changed_events: EventWriter<BehaviorChanged>,
) {
    let dt = time.delta_secs();
    let mut rng = rand::thread_rng();

    for (entity, mut brain, mut movement, transform, health, mut perception_target, detection, hitbox) in
        enemy_query.iter_mut()
    {
        let target = resolve_target(entity, &mut perception_target, &target_query);
        let target_detected = match (perception_target.target, detection) {
            (Some(target), Some(link)) => zone_query
                .get(link.0)
                .is_ok_and(|zone| zone.contains(target)),
            _ => false,
        };

        let perception = Perception {
            position: transform.translation().truncate(),
            target: target.filter(|_| !brain.is_dead()),
            target_detected,
            health_fraction: health.percentage(),
        };

        for signal in brain.decide(&perception, &mut movement, &mut rng, dt) {
            apply_signal(
                &mut commands,
                entity,
                signal,
                hitbox.copied(),
                &mut hitbox_query,
                &mut changed_events,
            );
        }
    }
}

/// Position of the enemy's living target. A missing target is logged once.
fn resolve_target(
    entity: Entity,
    perception_target: &mut PerceptionTarget,
    target_query: &Query<(&GlobalTransform, Has<Dead>), Without<Enemy>>,
) -> Option<Vec2> {
    let found = perception_target
        .target
        .and_then(|target| target_query.get(target).ok());

    match found {
        Some((_, true)) => None,
        Some((transform, false)) => Some(transform.translation().truncate()),
        None => {
            if !perception_target.reported_missing {
                warn!("Enemy {} has no target to perceive; staying passive", entity);
                perception_target.reported_missing = true;
            }
            None
        }
    }
}

fn apply_signal(
    commands: &mut Commands,
    entity: Entity,
    signal: BrainSignal,
    hitbox: Option<HitboxLink>,
    hitbox_query: &mut Query<&mut MeleeHitbox>,
    changed_events: &mut EventWriter<BehaviorChanged>,
) {
    match signal {
        BrainSignal::ArmHitbox { damage, knockback } => {
            let Some(HitboxLink(hitbox_entity)) = hitbox else {
                return;
            };
            if let Ok(mut hitbox) = hitbox_query.get_mut(hitbox_entity) {
                hitbox.start_attack(damage, TargetMask::of(&[Faction::Player]), knockback);
                commands.entity(hitbox_entity).remove::<ColliderDisabled>();
            }
        }
        BrainSignal::DisarmHitbox => {
            let Some(HitboxLink(hitbox_entity)) = hitbox else {
                return;
            };
            if let Ok(mut hitbox) = hitbox_query.get_mut(hitbox_entity) {
                hitbox.disarm();
                commands.entity(hitbox_entity).insert(ColliderDisabled);
            }
        }
        BrainSignal::DisableBody => {
            commands.entity(entity).insert((ColliderDisabled, RigidBodyDisabled));
        }
        BrainSignal::Despawn => {
            debug!("Despawning enemy {}", entity);
            commands.entity(entity).despawn_recursive();
        }
        BrainSignal::Entered(state) => {
            changed_events.send(BehaviorChanged { entity, state });
        }
    }
}
