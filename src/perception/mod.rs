//! Perception - sensor volumes that notice characters.

pub mod detection;
pub mod plugin;
pub mod systems;

pub use detection::DetectionZone;
pub use plugin::{PerceptionPlugin, PerceptionSet};
pub use systems::{TargetEnterEvent, TargetExitEvent};
