//! Health and damage model shared by the player, enemies and bosses.

use bevy::prelude::*;

/// Result of a damage application.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DamageOutcome {
    /// Dead, invincible, or a non-positive amount. Nothing changed.
    Ignored,
    /// Took damage and survived. Invincibility has started.
    Hurt { dealt: f32 },
    /// Health reached zero on this hit.
    Died { dealt: f32 },
}

impl DamageOutcome {
    pub fn applied(&self) -> bool {
        !matches!(self, DamageOutcome::Ignored)
    }
}

/// Component for entities that can take damage.
///
/// `current` is clamped to `[0, maximum]` after every mutation. Once the
/// entity dies, only `revive` brings it back; `take_damage` and `heal` are
/// no-ops on a dead entity.
#[derive(Component, Debug, Clone)]
pub struct Health {
    current: f32,
    maximum: f32,
    alive: bool,
    invincibility_duration: f32,
    invincibility_remaining: f32,
}

impl Health {
    pub fn new(max: f32, invincibility_duration: f32) -> Self {
        let maximum = max.max(f32::EPSILON);
        Self {
            current: maximum,
            maximum,
            alive: true,
            invincibility_duration: invincibility_duration.max(0.0),
            invincibility_remaining: 0.0,
        }
    }

    pub fn current(&self) -> f32 {
        self.current
    }

    pub fn maximum(&self) -> f32 {
        self.maximum
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn is_dead(&self) -> bool {
        !self.alive
    }

    pub fn is_invincible(&self) -> bool {
        self.invincibility_remaining > 0.0
    }

    pub fn invincibility_remaining(&self) -> f32 {
        self.invincibility_remaining
    }

    pub fn percentage(&self) -> f32 {
        self.current / self.maximum
    }

    pub fn take_damage(&mut self, amount: f32) -> DamageOutcome {
        if !self.alive || self.is_invincible() || amount <= 0.0 || amount.is_nan() {
            return DamageOutcome::Ignored;
        }
        self.apply_damage(amount)
    }

    /// Force death regardless of invincibility.
    pub fn kill(&mut self) -> DamageOutcome {
        if !self.alive {
            return DamageOutcome::Ignored;
        }
        self.apply_damage(self.current)
    }

    fn apply_damage(&mut self, amount: f32) -> DamageOutcome {
        let before = self.current;
        self.current = (self.current - amount).clamp(0.0, self.maximum);
        let dealt = before - self.current;

        if self.current > 0.0 {
            self.invincibility_remaining = self.invincibility_duration;
            DamageOutcome::Hurt { dealt }
        } else {
            self.alive = false;
            self.invincibility_remaining = 0.0;
            DamageOutcome::Died { dealt }
        }
    }

    /// Restore health. Returns the amount actually restored.
    pub fn heal(&mut self, amount: f32) -> f32 {
        if !self.alive || amount <= 0.0 || amount.is_nan() {
            return 0.0;
        }
        let before = self.current;
        self.current = (self.current + amount).clamp(0.0, self.maximum);
        self.current - before
    }

    /// Bring a dead entity back with `amount` health (full health when `None`).
    ///
    /// Returns `false` when the entity was not dead, or when the clamped
    /// amount would leave it at zero health.
    pub fn revive(&mut self, amount: Option<f32>) -> bool {
        if self.alive {
            return false;
        }
        let restored = amount.unwrap_or(self.maximum).clamp(0.0, self.maximum);
        if restored <= 0.0 {
            return false;
        }
        self.alive = true;
        self.current = restored;
        self.invincibility_remaining = 0.0;
        true
    }

    /// Count down the invincibility window.
    pub fn tick(&mut self, dt: f32) {
        if self.invincibility_remaining > 0.0 {
            self.invincibility_remaining -= dt;
            if self.invincibility_remaining <= 0.0 {
                self.invincibility_remaining = 0.0;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn damage_that_leaves_health_hurts() {
        let mut health = Health::new(100.0, 1.0);
        let outcome = health.take_damage(30.0);

        assert_eq!(outcome, DamageOutcome::Hurt { dealt: 30.0 });
        assert_eq!(health.current(), 70.0);
        assert!(health.is_alive());
        assert!(health.is_invincible());
    }

    #[test]
    fn lethal_damage_dies_without_hurt() {
        let mut health = Health::new(100.0, 1.0);
        health.take_damage(80.0);
        health.tick(1.0);
        assert_eq!(health.current(), 20.0);

        let outcome = health.take_damage(30.0);
        assert_eq!(outcome, DamageOutcome::Died { dealt: 20.0 });
        assert_eq!(health.current(), 0.0);
        assert!(health.is_dead());
        assert!(!health.is_invincible());
    }

    #[test]
    fn heal_on_dead_entity_changes_nothing() {
        let mut health = Health::new(100.0, 0.0);
        health.take_damage(100.0);

        assert_eq!(health.heal(50.0), 0.0);
        assert_eq!(health.current(), 0.0);
        assert!(health.is_dead());
    }

    #[test]
    fn heal_clamps_and_reports_restored_amount() {
        let mut health = Health::new(100.0, 0.0);
        health.take_damage(10.0);

        assert_eq!(health.heal(50.0), 10.0);
        assert_eq!(health.current(), 100.0);
        assert_eq!(health.heal(5.0), 0.0);
    }

    #[test]
    fn non_positive_amounts_are_ignored() {
        let mut health = Health::new(100.0, 0.5);
        assert_eq!(health.take_damage(0.0), DamageOutcome::Ignored);
        assert_eq!(health.take_damage(-5.0), DamageOutcome::Ignored);
        assert_eq!(health.heal(-5.0), 0.0);
        assert_eq!(health.current(), 100.0);
        assert!(!health.is_invincible());
    }

    #[test]
    fn invincibility_window_blocks_until_elapsed() {
        let mut health = Health::new(100.0, 1.0);
        health.take_damage(10.0);

        // Three quarter-second ticks: still inside the window.
        for _ in 0..3 {
            health.tick(0.25);
            assert_eq!(health.take_damage(10.0), DamageOutcome::Ignored);
        }
        assert_eq!(health.current(), 90.0);

        // The fourth tick closes the window.
        health.tick(0.25);
        assert!(!health.is_invincible());
        assert_eq!(health.take_damage(10.0), DamageOutcome::Hurt { dealt: 10.0 });
        assert_eq!(health.current(), 80.0);
    }

    #[test]
    fn kill_ignores_invincibility() {
        let mut health = Health::new(100.0, 5.0);
        health.take_damage(10.0);
        assert!(health.is_invincible());

        assert_eq!(health.kill(), DamageOutcome::Died { dealt: 90.0 });
        assert!(health.is_dead());
        assert_eq!(health.kill(), DamageOutcome::Ignored);
    }

    #[test]
    fn revive_only_applies_to_dead() {
        let mut health = Health::new(100.0, 0.0);
        assert!(!health.revive(None));

        health.kill();
        assert!(!health.revive(Some(0.0)));
        assert!(health.is_dead());

        assert!(health.revive(Some(250.0)));
        assert!(health.is_alive());
        assert_eq!(health.current(), 100.0);

        health.kill();
        assert!(health.revive(Some(40.0)));
        assert_eq!(health.current(), 40.0);
    }

    #[test]
    fn health_stays_in_range_for_random_sequences() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let mut health = Health::new(rng.gen_range(1.0..200.0), rng.gen_range(0.0..0.5));
            let mut died = false;
            for _ in 0..200 {
                let amount = rng.gen_range(-20.0..60.0);
                let before = health.current();
                match rng.gen_range(0..3) {
                    0 => {
                        health.take_damage(amount);
                    }
                    1 => {
                        health.heal(amount);
                    }
                    _ => health.tick(rng.gen_range(0.0..0.3)),
                }
                assert!(health.current() >= 0.0);
                assert!(health.current() <= health.maximum());
                if died {
                    assert_eq!(health.current(), before);
                    assert!(health.is_dead());
                }
                died = health.is_dead();
            }
        }
    }
}
