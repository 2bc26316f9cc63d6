//! UI module - HUD, floating combat numbers and overlays.

pub mod floating_text;
pub mod hud;
mod plugin;

pub use plugin::UiPlugin;
