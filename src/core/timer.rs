//! Explicit countdown timers.
//!
//! Every timed sequence in the game (attack windows, hurt and death delays,
//! patrol holds, cooldowns) is a `Countdown` owned by the component that
//! started it and decremented once per tick by that component.

/// A monotonically decreasing countdown in seconds.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Countdown {
    remaining: f32,
    duration: f32,
    running: bool,
}

impl Countdown {
    /// Start (or restart) the countdown.
    pub fn start(&mut self, duration: f32) {
        self.duration = duration.max(0.0);
        self.remaining = self.duration;
        self.running = true;
    }

    /// Create an already running countdown.
    pub fn started(duration: f32) -> Self {
        let mut countdown = Self::default();
        countdown.start(duration);
        countdown
    }

    /// Stop without firing.
    pub fn cancel(&mut self) {
        self.running = false;
        self.remaining = 0.0;
    }

    /// Advance by `dt` seconds. Returns `true` on the tick the countdown reaches zero.
    pub fn tick(&mut self, dt: f32) -> bool {
        if !self.running {
            return false;
        }
        self.remaining -= dt;
        if self.remaining <= 0.0 {
            self.remaining = 0.0;
            self.running = false;
            return true;
        }
        false
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn remaining(&self) -> f32 {
        self.remaining
    }

    /// Fraction of the duration already elapsed (0.0-1.0).
    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        (1.0 - self.remaining / self.duration).clamp(0.0, 1.0)
    }
}
