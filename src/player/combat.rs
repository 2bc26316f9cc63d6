//! Player attack, stagger and death handling.
//!
//! Mirrors the enemy pipeline with the decision coming from `PlayerIntent`
//! instead of a brain: attacks lock movement for their duration and arm the
//! hitbox during the hit window, a hit cancels the attack and staggers.

use bevy::prelude::*;

use crate::core::Countdown;
use crate::enemies::brain::AttackSpec;
use crate::movement::MovementController;

/// Change the hitbox should undergo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitboxChange {
    Arm,
    Disarm,
}

#[derive(Component, Debug, Clone, Default)]
pub struct PlayerCombat {
    attack: Countdown,
    stagger: Countdown,
    swinging: bool,
    /// The current swing has reached its hit window
    window_opened: bool,
    armed: bool,
    dead: bool,
}

impl PlayerCombat {
    pub fn is_attacking(&self) -> bool {
        self.swinging
    }

    pub fn is_staggered(&self) -> bool {
        self.stagger.is_running()
    }

    pub fn is_dead(&self) -> bool {
        self.dead
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    pub fn can_attack(&self, grounded: bool) -> bool {
        grounded && !self.dead && !self.is_attacking() && !self.is_staggered()
    }

    /// Begin a swing. Returns `false` if an attack is not allowed right now.
    pub fn start_attack(
        &mut self,
        attack: &AttackSpec,
        grounded: bool,
        movement: &mut MovementController,
    ) -> bool {
        if !self.can_attack(grounded) {
            return false;
        }
        self.attack.start(attack.duration);
        self.swinging = true;
        self.window_opened = false;
        movement.stop();
        movement.lock_velocity = true;
        movement.facing_locked = true;
        true
    }

    fn end_attack(&mut self, movement: &mut MovementController) -> Option<HitboxChange> {
        self.attack.cancel();
        self.swinging = false;
        movement.lock_velocity = false;
        movement.facing_locked = false;
        self.disarm()
    }

    fn disarm(&mut self) -> Option<HitboxChange> {
        if self.armed {
            self.armed = false;
            Some(HitboxChange::Disarm)
        } else {
            None
        }
    }

    /// A survivable hit: cancel any swing and lock movement for `stagger` seconds.
    pub fn hurt(&mut self, stagger: f32, movement: &mut MovementController) -> Option<HitboxChange> {
        if self.dead {
            return None;
        }
        let change = self.end_attack(movement);
        self.stagger.start(stagger);
        movement.can_move = false;
        change
    }

    pub fn die(&mut self, movement: &mut MovementController) -> Option<HitboxChange> {
        if self.dead {
            return None;
        }
        self.dead = true;
        let change = self.end_attack(movement);
        self.stagger.cancel();
        movement.stop();
        movement.can_move = false;
        change
    }

    pub fn revive(&mut self, movement: &mut MovementController) {
        self.dead = false;
        movement.can_move = true;
    }

    /// Advance timers and report hitbox window edges.
    pub fn tick(
        &mut self,
        dt: f32,
        attack: &AttackSpec,
        movement: &mut MovementController,
    ) -> Option<HitboxChange> {
        if self.stagger.tick(dt) && !self.dead {
            movement.can_move = true;
        }

        if !self.swinging {
            return None;
        }

        let finished = self.attack.tick(dt) || !self.attack.is_running();
        let progress = self.attack.progress();
        let (start, end) = attack.window;

        // Every swing gets one armed tick, even when a long frame jumps
        // past the window or the end of the swing.
        if !self.window_opened && progress >= start {
            self.window_opened = true;
            self.armed = true;
            return Some(HitboxChange::Arm);
        }
        if finished {
            return self.end_attack(movement);
        }
        if progress >= end {
            return self.disarm();
        }
        None
    }
}
