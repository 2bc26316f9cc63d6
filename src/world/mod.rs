//! World module - arena data, construction and camera.

mod builder;
mod camera;
pub mod data;
mod error;
mod plugin;

pub use builder::{build_arena, ArenaEntity};
pub use camera::GameCamera;
pub use data::{ArenaDefinition, CurrentArena};
pub use error::DataLoadError;
pub use plugin::WorldPlugin;
