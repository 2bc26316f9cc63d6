//! Animation plugin.

use bevy::prelude::*;

use super::systems::*;
use crate::core::GameState;
use crate::enemies::EnemySet;

pub struct AnimationPlugin;

impl Plugin for AnimationPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (
                play_behavior_states,
                trigger_health_reactions,
                sync_locomotion,
                sync_contact_parameters,
            )
                .after(EnemySet)
                .run_if(in_state(GameState::InGame)),
        )
        .add_systems(Last, clear_triggers);
    }
}
