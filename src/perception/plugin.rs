//! Perception plugin.

use bevy::prelude::*;

use super::systems::*;
use crate::core::GameState;

/// System set for detection. Runs before AI so brains see fresh targets.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct PerceptionSet;

pub struct PerceptionPlugin;

impl Plugin for PerceptionPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<TargetEnterEvent>()
            .add_event::<TargetExitEvent>()
            .configure_sets(Update, PerceptionSet.run_if(in_state(GameState::InGame)))
            .add_systems(
                Update,
                (track_detection_overlaps, prune_detection_zones)
                    .chain()
                    .in_set(PerceptionSet),
            );
    }
}
