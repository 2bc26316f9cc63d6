//! Movement module - collision sensing and the horizontal movement controller.

mod components;
mod contact;
mod controller;
mod plugin;

pub use components::*;
pub use contact::{probe_contacts, ShapeCaster};
pub use controller::MovementController;
pub use plugin::{MovementPlugin, MovementSet};
