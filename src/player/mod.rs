//! Player module - the player's side of the combat pipeline.

mod combat;
mod components;
mod controller;
pub mod data;
mod input;
mod plugin;
mod spawn;

pub use combat::{HitboxChange, PlayerCombat};
pub use components::*;
pub use input::PlayerInputPlugin;
pub use plugin::{PlayerPlugin, PlayerSet};
pub use spawn::spawn_player;
