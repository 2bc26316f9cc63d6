//! Detection zone - the set of characters currently inside a sensor volume.
//!
//! The zone only tracks overlaps and reports enter/exit edges. Deciding what
//! to do about a target is left to whoever owns the zone.

use bevy::prelude::*;

use crate::combat::{Faction, TargetMask};

#[derive(Component, Debug, Clone)]
pub struct DetectionZone {
    pub owner: Entity,
    filter: Option<TargetMask>,
    tracked: Vec<(Entity, Faction)>,
}

impl DetectionZone {
    pub fn new(owner: Entity) -> Self {
        Self {
            owner,
            filter: None,
            tracked: Vec::new(),
        }
    }

    /// Only track characters of the given factions.
    pub fn with_filter(mut self, filter: TargetMask) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Record an overlap. Returns `true` if the entity was newly tracked.
    pub fn enter(&mut self, entity: Entity, faction: Faction) -> bool {
        if entity == self.owner || self.contains(entity) {
            return false;
        }
        if self.filter.is_some_and(|filter| !filter.contains(faction)) {
            return false;
        }
        self.tracked.push((entity, faction));
        true
    }

    /// Record an overlap ending. Returns `true` if the entity was tracked.
    pub fn exit(&mut self, entity: Entity) -> bool {
        let before = self.tracked.len();
        self.tracked.retain(|(tracked, _)| *tracked != entity);
        self.tracked.len() != before
    }

    pub fn contains(&self, entity: Entity) -> bool {
        self.tracked.iter().any(|(tracked, _)| *tracked == entity)
    }

    pub fn has_target(&self) -> bool {
        !self.tracked.is_empty()
    }

    pub fn has_target_in(&self, mask: TargetMask) -> bool {
        self.tracked.iter().any(|(_, faction)| mask.contains(*faction))
    }

    /// Earliest tracked entity, optionally restricted to `mask`.
    pub fn first_target(&self, mask: Option<TargetMask>) -> Option<Entity> {
        self.tracked
            .iter()
            .find(|(_, faction)| mask.map_or(true, |mask| mask.contains(*faction)))
            .map(|(entity, _)| *entity)
    }

    pub fn tracked(&self) -> impl Iterator<Item = Entity> + '_ {
        self.tracked.iter().map(|(entity, _)| *entity)
    }

    /// Drop entities that no longer exist or were disabled while inside.
    /// Returns the dropped entities so callers can raise exit notifications.
    pub fn retain_live(&mut self, is_live: impl Fn(Entity) -> bool) -> Vec<Entity> {
        let mut removed = Vec::new();
        self.tracked.retain(|(entity, _)| {
            let live = is_live(*entity);
            if !live {
                removed.push(*entity);
            }
            live
        });
        removed
    }
}
