//! Enemies module - behavior state machine, AI systems, data and spawning.

mod ai;
pub mod brain;
mod components;
pub mod data;
mod plugin;
mod spawning;

pub use brain::{BehaviorState, BrainSignal, EnemyBrain};
pub use components::*;
pub use data::EnemyRegistry;
pub use plugin::{EnemyPlugin, EnemySet};
pub use spawning::spawn_enemy;
