//! Combat module - health, melee hitboxes, damage and healing.

mod components;
mod health;
mod hitbox;
mod plugin;
mod systems;

pub use components::*;
pub use health::{DamageOutcome, Health};
pub use hitbox::{knockback_impulse, MeleeHitbox};
pub use plugin::CombatPlugin;
pub use systems::CombatSet;
pub(crate) use systems::ordered_pair;
