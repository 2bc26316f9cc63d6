//! Movement-related components.

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use crate::combat::layers;

/// Which way a character is facing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

impl Facing {
    pub fn sign(self) -> f32 {
        match self {
            Facing::Left => -1.0,
            Facing::Right => 1.0,
        }
    }

    /// Facing for a horizontal direction; `None` when the direction is ~0.
    pub fn from_x(x: f32) -> Option<Self> {
        if x > f32::EPSILON {
            Some(Facing::Right)
        } else if x < -f32::EPSILON {
            Some(Facing::Left)
        } else {
            None
        }
    }
}

/// Desired movement for the current tick.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MovementIntent {
    /// Movement direction, normalized when longer than 1
    pub direction: Vec2,
    pub running: bool,
    /// Speed to use instead of walk/run speed
    pub speed_override: Option<f32>,
}

/// A single shape-cast hit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactHit {
    pub entity: Entity,
    /// Surface normal of the hit geometry
    pub normal: Vec2,
    /// Distance travelled before the hit
    pub distance: f32,
}

/// What the character is touching this physics tick.
#[derive(Component, Debug, Clone, Default, PartialEq)]
pub struct ContactState {
    pub grounded: bool,
    pub on_wall_left: bool,
    pub on_wall_right: bool,
    pub on_ceiling: bool,
    pub ground: Option<ContactHit>,
    pub ceiling: Option<ContactHit>,
    pub wall_left: Option<ContactHit>,
    pub wall_right: Option<ContactHit>,
}

impl ContactState {
    pub fn from_hits(
        ground: Option<ContactHit>,
        ceiling: Option<ContactHit>,
        wall_left: Option<ContactHit>,
        wall_right: Option<ContactHit>,
    ) -> Self {
        Self {
            grounded: ground.is_some(),
            on_wall_left: wall_left.is_some(),
            on_wall_right: wall_right.is_some(),
            on_ceiling: ceiling.is_some(),
            ground,
            ceiling,
            wall_left,
            wall_right,
        }
    }

    pub fn is_on_wall(&self) -> bool {
        self.on_wall_left || self.on_wall_right
    }

    /// Whether a wall blocks movement along `direction_x`.
    pub fn blocks(&self, direction_x: f32) -> bool {
        (direction_x > 0.0 && self.on_wall_right) || (direction_x < 0.0 && self.on_wall_left)
    }
}

/// Shape-cast probe configuration for ground, wall and ceiling detection.
#[derive(Component, Debug, Clone)]
pub struct ContactSensor {
    /// Half extents of the character's body
    pub half_extents: Vec2,
    /// How much the probe is shrunk on the axis it does not travel along
    pub skin: f32,
    pub ground_distance: f32,
    pub wall_distance: f32,
    pub ceiling_distance: f32,
    /// Groups the probes collide with
    pub filter: CollisionGroups,
}

impl ContactSensor {
    pub fn new(half_extents: Vec2) -> Self {
        Self {
            half_extents,
            ..default()
        }
    }
}

impl Default for ContactSensor {
    fn default() -> Self {
        Self {
            half_extents: Vec2::new(0.4, 0.9),
            skin: 0.05,
            ground_distance: 0.1,
            wall_distance: 0.1,
            ceiling_distance: 0.2,
            filter: CollisionGroups::new(Group::ALL, layers::WORLD),
        }
    }
}

/// Local offset of a child (e.g. a hitbox) given for a right-facing parent.
/// Mirrored on x whenever the parent turns around.
#[derive(Component, Debug, Clone, Copy)]
pub struct FacingOffset(pub Vec2);
