//! Core plugin that sets up game states, events, and fundamental systems.

use bevy::prelude::*;

use super::events::*;
use super::states::*;

/// Core plugin - must be added first as other plugins depend on it.
///
/// Registers the game state, the health request/notification events and the
/// Escape pause toggle.
pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<GameState>()
            // Requests
            .add_event::<DamageEvent>()
            .add_event::<HealEvent>()
            .add_event::<KillEvent>()
            .add_event::<ReviveEvent>()
            // Notifications
            .add_event::<HurtEvent>()
            .add_event::<DeathEvent>()
            .add_event::<HealedEvent>()
            .add_systems(
                Update,
                toggle_pause.run_if(in_state(GameState::InGame).or(in_state(GameState::Paused))),
            )
            .add_systems(Update, log_state_changes);
    }
}

fn toggle_pause(
    keyboard: Res<ButtonInput<KeyCode>>,
    current_state: Res<State<GameState>>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    if !keyboard.just_pressed(KeyCode::Escape) {
        return;
    }
    if let Some(next) = current_state.get().pause_toggled() {
        next_state.set(next);
    }
}

fn log_state_changes(mut transitions: EventReader<StateTransitionEvent<GameState>>) {
    for transition in transitions.read() {
        debug!("Game state {:?} -> {:?}", transition.exited, transition.entered);
    }
}
