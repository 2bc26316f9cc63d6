//! Detection systems - keep zones in sync with sensor overlaps.

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use super::detection::DetectionZone;
use crate::combat::{ordered_pair, Dead, Faction};

/// A character became visible to a detection zone.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetEnterEvent {
    pub zone: Entity,
    pub owner: Entity,
    pub target: Entity,
}

/// A character left a detection zone, or was destroyed/disabled inside it.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetExitEvent {
    pub zone: Entity,
    pub owner: Entity,
    pub target: Entity,
}

/// Track sensor overlaps. Colliders without a faction are treated as neutral.
pub fn track_detection_overlaps(
    mut collision_events: EventReader<CollisionEvent>,
    mut zone_query: Query<&mut DetectionZone>,
    faction_query: Query<&Faction>,
    mut enter_events: EventWriter<TargetEnterEvent>,
    mut exit_events: EventWriter<TargetExitEvent>,
) {
    for event in collision_events.read() {
        let (e1, e2, started) = match event {
            CollisionEvent::Started(e1, e2, _) => (*e1, *e2, true),
            CollisionEvent::Stopped(e1, e2, _) => (*e1, *e2, false),
        };

        let Some((zone_entity, target)) = ordered_pair(e1, e2, |e| zone_query.contains(e)) else {
            continue;
        };
        let Ok(mut zone) = zone_query.get_mut(zone_entity) else {
            continue;
        };

        if started {
            let faction = faction_query.get(target).copied().unwrap_or_default();
            if zone.enter(target, faction) {
                debug!("{} detected {}", zone.owner, target);
                enter_events.send(TargetEnterEvent {
                    zone: zone_entity,
                    owner: zone.owner,
                    target,
                });
            }
        } else if zone.exit(target) {
            debug!("{} lost sight of {}", zone.owner, target);
            exit_events.send(TargetExitEvent {
                zone: zone_entity,
                owner: zone.owner,
                target,
            });
        }
    }
}

/// Drop tracked entities that were despawned, disabled or killed while inside.
pub fn prune_detection_zones(
    mut zone_query: Query<(Entity, &mut DetectionZone)>,
    live_query: Query<(), (Without<ColliderDisabled>, Without<Dead>)>,
    mut exit_events: EventWriter<TargetExitEvent>,
) {
    for (zone_entity, mut zone) in zone_query.iter_mut() {
        if zone.tracked().all(|entity| live_query.contains(entity)) {
            continue;
        }
        let owner = zone.owner;
        for target in zone.retain_live(|entity| live_query.contains(entity)) {
            exit_events.send(TargetExitEvent {
                zone: zone_entity,
                owner,
                target,
            });
        }
    }
}
