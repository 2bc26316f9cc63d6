//! Keyboard and mouse adapter for `PlayerIntent`.
//!
//! Controls:
//! - A/D or Left/Right: Move
//! - Shift: Toggle walk/run
//! - Space: Jump
//! - J or left mouse button: Attack

use bevy::prelude::*;

use super::components::{Player, PlayerIntent};
use crate::core::GameState;

/// Reads the keyboard into the player's intent. Added by the binary only.
pub struct PlayerInputPlugin;

impl Plugin for PlayerInputPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            PreUpdate,
            read_keyboard_intent
                .after(bevy::input::InputSystem)
                .run_if(in_state(GameState::InGame)),
        );
    }
}

fn read_keyboard_intent(
    keyboard: Res<ButtonInput<KeyCode>>,
    mouse: Res<ButtonInput<MouseButton>>,
    mut player_query: Query<&mut PlayerIntent, With<Player>>,
) {
    let Ok(mut intent) = player_query.get_single_mut() else {
        return;
    };

    let mut x = 0.0;
    if keyboard.any_pressed([KeyCode::KeyA, KeyCode::ArrowLeft]) {
        x -= 1.0;
    }
    if keyboard.any_pressed([KeyCode::KeyD, KeyCode::ArrowRight]) {
        x += 1.0;
    }
    intent.movement = Vec2::new(x, 0.0);

    // Triggers latch until consumed
    if keyboard.any_just_pressed([KeyCode::ShiftLeft, KeyCode::ShiftRight]) {
        intent.toggle_run = true;
    }
    if keyboard.just_pressed(KeyCode::Space) {
        intent.jump = true;
    }
    if keyboard.just_pressed(KeyCode::KeyJ) || mouse.just_pressed(MouseButton::Left) {
        intent.attack = true;
    }
}
