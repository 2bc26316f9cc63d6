//! Player plugin - intent, combat and jumping.

use bevy::prelude::*;

use super::components::PlayerConfig;
use super::controller;
use crate::combat::CombatSet;
use crate::core::GameState;
use crate::movement::MovementSet;

/// System set for the player controller.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct PlayerSet;

/// Player plugin - turns `PlayerIntent` into movement and attacks.
///
/// Reading input is left to an adapter such as `PlayerInputPlugin`.
pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PlayerConfig>()
            .configure_sets(
                Update,
                PlayerSet
                    .after(CombatSet::Damage)
                    .run_if(in_state(GameState::InGame)),
            )
            .add_systems(
                Update,
                (
                    controller::react_to_health_events,
                    controller::apply_player_intent,
                    controller::tick_player_combat,
                    controller::animate_player,
                )
                    .chain()
                    .in_set(PlayerSet),
            )
            .add_systems(
                FixedUpdate,
                controller::player_jump
                    .after(MovementSet::Sense)
                    .before(MovementSet::Apply)
                    .run_if(in_state(GameState::InGame)),
            );
    }
}
