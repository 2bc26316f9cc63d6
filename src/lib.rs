//! Ember Knight - a 2D side-on action platformer core in Bevy.
//!
//! Player and enemy characters share one pipeline: a behavior layer issues
//! movement intents, arms melee hitboxes during attack windows and reacts to
//! health events.
//!
//! # Architecture
//!
//! The game is organized into plugins, each handling a specific aspect:
//!
//! - **Core**: Game states, global events, countdown timers
//! - **Movement**: Ground/wall/ceiling sensing, horizontal movement controller
//! - **Combat**: Health, melee hitboxes, pickups and kill zones
//! - **Perception**: Detection zones tracking nearby characters
//! - **Enemies**: Data-driven enemy and boss behavior state machines
//! - **Player**: Intent-driven walk, run, jump and attack
//! - **Animation**: Animator parameter sink fed from gameplay state
//! - **World**: Arena data, level spawning, camera
//! - **UI**: Health bar, floating combat numbers, pause and game-over overlays

pub mod animation;
pub mod combat;
pub mod core;
pub mod enemies;
pub mod movement;
pub mod perception;
pub mod player;
pub mod ui;
pub mod world;

use bevy::prelude::*;

/// Main game plugin that adds all sub-plugins.
///
/// Physics (`RapierPhysicsPlugin`) and input (`player::PlayerInputPlugin`) are
/// added by the host so the core can run headless.
pub struct EmberKnightPlugin;

impl Plugin for EmberKnightPlugin {
    fn build(&self, app: &mut App) {
        app
            // Core systems (must be first)
            .add_plugins(core::CorePlugin)

            // Character pipeline
            .add_plugins(movement::MovementPlugin)
            .add_plugins(combat::CombatPlugin)
            .add_plugins(perception::PerceptionPlugin)
            .add_plugins(enemies::EnemyPlugin)
            .add_plugins(player::PlayerPlugin)
            .add_plugins(animation::AnimationPlugin)

            // World systems
            .add_plugins(world::WorldPlugin)

            // UI systems
            .add_plugins(ui::UiPlugin);
    }
}
