//! Animation - parameters handed to external clip playback.

mod animator;
mod plugin;
mod systems;

pub use animator::Animator;
pub use plugin::AnimationPlugin;
