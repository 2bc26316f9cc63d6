//! Melee hitbox with hit-once-per-swing tracking.
//!
//! The hitbox lives on a sensor child of the attacking character. Each
//! `start_attack` opens a new epoch; within an epoch a target is struck at
//! most once no matter how many times its collider re-enters the sensor.

use bevy::prelude::*;
use std::collections::HashSet;

use super::components::{Faction, TargetMask};

#[derive(Component, Debug, Clone)]
pub struct MeleeHitbox {
    pub owner: Entity,
    damage: f32,
    targets: TargetMask,
    knockback: Vec2,
    armed: bool,
    hit_set: HashSet<Entity>,
}

impl MeleeHitbox {
    pub fn new(owner: Entity, targets: TargetMask) -> Self {
        Self {
            owner,
            damage: 0.0,
            targets,
            knockback: Vec2::ZERO,
            armed: false,
            hit_set: HashSet::new(),
        }
    }

    /// Begin a fresh armed window.
    pub fn start_attack(&mut self, damage: f32, targets: TargetMask, knockback: Vec2) {
        self.hit_set.clear();
        self.damage = damage;
        self.targets = targets;
        self.knockback = knockback;
        self.armed = true;
    }

    pub fn disarm(&mut self) {
        self.armed = false;
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    pub fn damage(&self) -> f32 {
        self.damage
    }

    /// Knockback magnitude per axis; the horizontal sign is chosen per hit.
    pub fn knockback(&self) -> Vec2 {
        self.knockback
    }

    pub fn has_hit(&self, target: Entity) -> bool {
        self.hit_set.contains(&target)
    }

    /// Record an overlap with `target`. Returns `true` if it should take damage.
    pub fn try_hit(&mut self, target: Entity, faction: Faction) -> bool {
        if !self.armed || target == self.owner || !self.targets.contains(faction) {
            return false;
        }
        self.hit_set.insert(target)
    }
}

/// Knockback impulse for a hit, pushing the target away from the attacker.
///
/// Falls back to `facing_sign` when both stand at the same x.
pub fn knockback_impulse(strength: Vec2, attacker: Vec2, target: Vec2, facing_sign: f32) -> Vec2 {
    let dx = target.x - attacker.x;
    let sign = if dx.abs() > f32::EPSILON { dx.signum() } else { facing_sign.signum() };
    Vec2::new(strength.x * sign, strength.y)
}
