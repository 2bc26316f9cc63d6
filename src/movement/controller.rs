//! Horizontal movement controller shared by the player and enemies.
//!
//! The controller owns horizontal velocity only. Vertical velocity belongs to
//! gravity and the jump system.

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use super::components::{ContactState, Facing, FacingOffset, MovementIntent};

/// Intents shorter than this count as "not moving".
const MOVE_EPSILON: f32 = 0.1;

/// Converts a movement intent into horizontal body velocity.
#[derive(Component, Debug, Clone)]
pub struct MovementController {
    pub walk_speed: f32,
    pub run_speed: f32,
    /// Velocity change per second while there is an intent
    pub acceleration: f32,
    /// Velocity change per second while there is no intent
    pub deceleration: f32,
    /// Snap straight to the target velocity when false
    pub use_acceleration: bool,
    /// Movement is allowed (cleared during hurt, attack recovery, death)
    pub can_move: bool,
    /// Pin horizontal velocity at zero
    pub lock_velocity: bool,
    /// Facing does not follow movement (e.g. mid-swing)
    pub facing_locked: bool,
    intent: MovementIntent,
    velocity_x: f32,
    facing: Facing,
}

impl Default for MovementController {
    fn default() -> Self {
        Self {
            walk_speed: 3.0,
            run_speed: 6.0,
            acceleration: 30.0,
            deceleration: 30.0,
            use_acceleration: true,
            can_move: true,
            lock_velocity: false,
            facing_locked: false,
            intent: MovementIntent::default(),
            velocity_x: 0.0,
            facing: Facing::Right,
        }
    }
}

impl MovementController {
    pub fn new(walk_speed: f32, run_speed: f32) -> Self {
        Self {
            walk_speed: walk_speed.max(0.0),
            run_speed: run_speed.max(0.0),
            ..default()
        }
    }

    pub fn with_acceleration(mut self, acceleration: f32, deceleration: f32) -> Self {
        self.acceleration = acceleration.max(0.0);
        self.deceleration = deceleration.max(0.0);
        self.use_acceleration = true;
        self
    }

    pub fn without_acceleration(mut self) -> Self {
        self.use_acceleration = false;
        self
    }

    pub fn intent(&self) -> MovementIntent {
        self.intent
    }

    pub fn facing(&self) -> Facing {
        self.facing
    }

    /// Horizontal velocity written on the last physics step.
    pub fn velocity_x(&self) -> f32 {
        self.velocity_x
    }

    /// Move along `direction`; vectors longer than 1 are normalized.
    pub fn move_in(&mut self, direction: Vec2) {
        let direction = if direction.length_squared() > 1.0 {
            direction.normalize()
        } else {
            direction
        };
        self.intent.direction = direction;
        self.intent.speed_override = None;
        self.face(direction.x);
    }

    /// Move along `direction` at a custom speed for this intent only.
    pub fn move_with_speed(&mut self, direction: Vec2, speed: f32) {
        self.move_in(direction);
        self.intent.speed_override = Some(speed.max(0.0));
    }

    /// Head horizontally toward `to`.
    pub fn move_towards(&mut self, from: Vec2, to: Vec2) {
        let dx = to.x - from.x;
        let direction = if dx.abs() > f32::EPSILON {
            Vec2::new(dx.signum(), 0.0)
        } else {
            Vec2::ZERO
        };
        self.move_in(direction);
    }

    pub fn set_running(&mut self, running: bool) {
        self.intent.running = running;
    }

    pub fn is_running(&self) -> bool {
        self.intent.running
    }

    /// Clear the intent. Without smoothing, velocity drops to zero at once.
    pub fn stop(&mut self) {
        self.intent.direction = Vec2::ZERO;
        self.intent.speed_override = None;
        if !self.use_acceleration {
            self.velocity_x = 0.0;
        }
    }

    /// Turn toward `direction_x` unless facing is locked.
    pub fn face(&mut self, direction_x: f32) {
        if self.facing_locked {
            return;
        }
        if let Some(facing) = Facing::from_x(direction_x) {
            self.facing = facing;
        }
    }

    pub fn is_moving(&self) -> bool {
        self.intent.direction.length() > MOVE_EPSILON
    }

    pub fn is_facing_right(&self) -> bool {
        self.facing == Facing::Right
    }

    pub fn is_facing_left(&self) -> bool {
        self.facing == Facing::Left
    }

    /// Horizontal distance check used for waypoints and home points.
    pub fn has_reached(from: Vec2, to: Vec2, threshold: f32) -> bool {
        (to.x - from.x).abs() <= threshold
    }

    fn speed(&self) -> f32 {
        match self.intent.speed_override {
            Some(speed) => speed,
            None if self.intent.running => self.run_speed,
            None => self.walk_speed,
        }
    }

    /// Horizontal velocity the controller is steering toward.
    pub fn target_velocity_x(&self, contact: Option<&ContactState>) -> f32 {
        if !self.can_move || !self.is_moving() {
            return 0.0;
        }
        let direction_x = self.intent.direction.x;
        if contact.is_some_and(|contact| contact.blocks(direction_x)) {
            return 0.0;
        }
        direction_x * self.speed()
    }

    /// Advance one physics step from the body's current horizontal velocity.
    pub fn step(&mut self, current_x: f32, contact: Option<&ContactState>, dt: f32) -> f32 {
        if self.lock_velocity {
            self.velocity_x = 0.0;
            return 0.0;
        }

        let target = self.target_velocity_x(contact);
        self.velocity_x = if self.use_acceleration {
            let rate = if self.is_moving() && self.can_move {
                self.acceleration
            } else {
                self.deceleration
            };
            move_towards(current_x, target, rate * dt)
        } else {
            target
        };
        self.velocity_x
    }
}

fn move_towards(current: f32, target: f32, max_delta: f32) -> f32 {
    let delta = target - current;
    if delta.abs() <= max_delta {
        target
    } else {
        current + delta.signum() * max_delta
    }
}

/// Write controller output into rapier velocities. Runs after contact sensing.
pub fn apply_movement(
    time: Res<Time>,
    mut query: Query<(&mut MovementController, &mut Velocity, Option<&ContactState>)>,
) {
    let dt = time.delta_secs();
    for (mut controller, mut velocity, contact) in query.iter_mut() {
        velocity.linvel.x = controller.step(velocity.linvel.x, contact, dt);
    }
}

/// Mirror sprites and facing-dependent children to match controller facing.
pub fn sync_facing(
    mut sprite_query: Query<(&MovementController, &mut Sprite), Changed<MovementController>>,
    controller_query: Query<&MovementController>,
    mut offset_query: Query<(&Parent, &FacingOffset, &mut Transform)>,
) {
    for (controller, mut sprite) in sprite_query.iter_mut() {
        let flip = controller.is_facing_left();
        if sprite.flip_x != flip {
            sprite.flip_x = flip;
        }
    }

    for (parent, offset, mut transform) in offset_query.iter_mut() {
        let Ok(controller) = controller_query.get(parent.get()) else {
            continue;
        };
        let x = offset.0.x * controller.facing().sign();
        if transform.translation.x != x {
            transform.translation.x = x;
            transform.translation.y = offset.0.y;
        }
    }
}
