//! World plugin - data loading, arena setup and the camera.

use bevy::prelude::*;

use super::builder::{cleanup_arena, spawn_arena};
use super::camera::{follow_player, spawn_camera};
use super::data::{load_arena, CurrentArena};
use crate::core::GameState;
use crate::enemies::data::load_enemy_definitions;
use crate::player::data::load_player_config;

/// World plugin - loads data and builds the arena on every entry to `Loading`.
pub struct WorldPlugin;

impl Plugin for WorldPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CurrentArena>()
            .add_systems(Startup, spawn_camera)
            .add_systems(
                OnEnter(GameState::Loading),
                (
                    cleanup_arena,
                    load_enemy_definitions,
                    load_player_config,
                    load_arena,
                    spawn_arena,
                    finish_loading,
                )
                    .chain(),
            )
            .add_systems(Update, follow_player.run_if(in_state(GameState::InGame)));
    }
}

fn finish_loading(mut next_state: ResMut<NextState<GameState>>) {
    info!("Arena ready, starting game");
    next_state.set(GameState::InGame);
}
