//! Write-only animator parameter sink.
//!
//! Gameplay code reports what a character is doing; clip playback reads it.
//! Nothing in the gameplay core ever reads an `Animator` back to make a
//! decision. Triggers are one-shot: they last for the frame they were raised
//! in and are cleared in `Last`.

use bevy::prelude::*;
use std::collections::HashMap;

#[derive(Component, Debug, Clone, Default)]
pub struct Animator {
    state: String,
    bools: HashMap<&'static str, bool>,
    floats: HashMap<&'static str, f32>,
    triggers: Vec<&'static str>,
}

impl Animator {
    /// Switch to a named state. Replaying the current state does nothing.
    pub fn play(&mut self, state: &str) {
        if self.state != state {
            self.state.clear();
            self.state.push_str(state);
        }
    }

    pub fn set_bool(&mut self, name: &'static str, value: bool) {
        self.bools.insert(name, value);
    }

    pub fn set_float(&mut self, name: &'static str, value: f32) {
        self.floats.insert(name, value);
    }

    /// Raise a one-shot trigger. Raising it again in the same frame does nothing.
    pub fn trigger(&mut self, name: &'static str) {
        if !self.triggers.contains(&name) {
            self.triggers.push(name);
        }
    }

    pub fn state(&self) -> &str {
        &self.state
    }

    pub fn bool(&self, name: &str) -> Option<bool> {
        self.bools.get(name).copied()
    }

    pub fn float(&self, name: &str) -> Option<f32> {
        self.floats.get(name).copied()
    }

    /// Triggers raised this frame, in order.
    pub fn triggers(&self) -> &[&'static str] {
        &self.triggers
    }

    pub fn is_triggered(&self, name: &str) -> bool {
        self.triggers.contains(&name)
    }

    pub fn clear_triggers(&mut self) {
        self.triggers.clear();
    }
}
