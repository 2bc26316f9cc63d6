//! Movement plugin - contact sensing and horizontal movement.

use bevy::prelude::*;

use super::contact::sense_contacts;
use super::controller::{apply_movement, sync_facing};
use crate::core::GameState;

/// Ordering of the fixed-rate physics step.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum MovementSet {
    /// Shape casts refresh `ContactState`.
    Sense,
    /// Controllers write horizontal velocity.
    Apply,
}

/// Movement plugin - sensors read before movement writes, every fixed tick.
pub struct MovementPlugin;

impl Plugin for MovementPlugin {
    fn build(&self, app: &mut App) {
        app.configure_sets(
            FixedUpdate,
            (MovementSet::Sense, MovementSet::Apply)
                .chain()
                .run_if(in_state(GameState::InGame)),
        )
        .add_systems(FixedUpdate, sense_contacts.in_set(MovementSet::Sense))
        .add_systems(FixedUpdate, apply_movement.in_set(MovementSet::Apply))
        .add_systems(Update, sync_facing.run_if(in_state(GameState::InGame)));
    }
}
