//! Global events used for cross-system communication.
//!
//! Request events (`DamageEvent`, `HealEvent`, `KillEvent`, `ReviveEvent`)
//! are the only way other modules touch a character's health. The health
//! systems answer with lifecycle events (`HurtEvent`, `DeathEvent`,
//! `HealedEvent`) that AI, UI and feedback systems listen to.

use bevy::prelude::*;

/// Request to damage an entity.
///
/// Applied by the combat damage system, which honours death and
/// invincibility before touching health.
#[derive(Event, Debug, Clone)]
pub struct DamageEvent {
    /// Entity receiving damage
    pub target: Entity,
    /// Entity that caused the damage (if any)
    pub source: Option<Entity>,
    /// Damage amount; non-positive amounts are ignored
    pub amount: f32,
    /// Impulse applied to the target's body when the hit lands
    pub knockback: Option<Vec2>,
}

/// Request to heal an entity.
#[derive(Event, Debug, Clone)]
pub struct HealEvent {
    pub target: Entity,
    pub amount: f32,
}

/// Request to kill an entity outright, ignoring invincibility.
#[derive(Event, Debug, Clone)]
pub struct KillEvent {
    pub target: Entity,
    pub source: Option<Entity>,
}

/// Request to bring a dead entity back.
#[derive(Event, Debug, Clone)]
pub struct ReviveEvent {
    pub target: Entity,
    /// Health to revive with; `None` means full health
    pub amount: Option<f32>,
}

/// Sent when an entity takes damage and survives.
#[derive(Event, Debug, Clone)]
pub struct HurtEvent {
    pub entity: Entity,
    /// Health actually removed
    pub amount: f32,
    pub source: Option<Entity>,
}

/// Sent once when an entity's health reaches zero.
///
/// Systems listen for this to start death behavior, end the run, etc.
#[derive(Event, Debug, Clone)]
pub struct DeathEvent {
    /// Entity that died
    pub entity: Entity,
    /// Entity that killed them (if any)
    pub killed_by: Option<Entity>,
}

/// Sent when a heal actually restored health.
#[derive(Event, Debug, Clone)]
pub struct HealedEvent {
    pub entity: Entity,
    /// Health actually restored
    pub amount: f32,
}
