//! Core game module - states, health events and countdown timers.

mod events;
mod plugin;
mod states;
mod timer;

pub use events::*;
pub use plugin::CorePlugin;
pub use states::*;
pub use timer::Countdown;
