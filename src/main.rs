//! Ember Knight - Entry Point
//!
//! Controls:
//! - A/D or Left/Right: Move
//! - Shift: Toggle run
//! - Space: Jump
//! - J or Left Mouse: Attack
//! - Escape: Pause/Unpause
//! - R: Retry after death

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

fn main() {
    App::new()
        // Bevy default plugins
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Ember Knight".to_string(),
                resolution: (1280.0, 720.0).into(),
                ..default()
            }),
            ..default()
        }))

        // Physics, stepped in FixedUpdate after contact sensing and movement
        .add_plugins(RapierPhysicsPlugin::<NoUserData>::default().in_fixed_schedule())

        // Our game plugin
        .add_plugins(ember_knight::EmberKnightPlugin)
        .add_plugins(ember_knight::player::PlayerInputPlugin)

        .run();
}
