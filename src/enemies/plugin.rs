//! Enemy plugin - registers all enemy systems.

use bevy::prelude::*;

use super::ai;
use super::components::{BehaviorChanged, StunEvent};
use super::data::EnemyRegistry;
use crate::combat::CombatSet;
use crate::core::GameState;
use crate::perception::PerceptionSet;

/// System set for enemy decision making.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct EnemySet;

/// Enemy plugin - handles enemy AI, death and despawning.
///
/// Definitions are loaded and enemies spawned by the world plugin while in
/// `GameState::Loading`.
pub struct EnemyPlugin;

impl Plugin for EnemyPlugin {
    fn build(&self, app: &mut App) {
        app
            .init_resource::<EnemyRegistry>()
            .add_event::<BehaviorChanged>()
            .add_event::<StunEvent>()
            // Brains see this frame's hits and detections
            .configure_sets(
                Update,
                EnemySet
                    .after(CombatSet::Damage)
                    .after(PerceptionSet)
                    .run_if(in_state(GameState::InGame)),
            )
            .add_systems(
                Update,
                (ai::forward_health_events, ai::run_brains)
                    .chain()
                    .in_set(EnemySet),
            );
    }
}
