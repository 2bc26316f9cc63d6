//! Game state definitions that control the overall flow of the game.
//!
//! States determine which systems run at any given time. Character AI,
//! combat and movement only run in `InGame`.

use bevy::prelude::*;

/// Main game states - controls overall game flow.
///
/// - Start in `Loading` to read data files
/// - Enter `InGame` once data is loaded and the arena is spawned
/// - `Paused` freezes gameplay but keeps the world visible
/// - `GameOver` when the player dies
#[derive(States, Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
pub enum GameState {
    /// Initial state - loading data files
    #[default]
    Loading,
    /// Active gameplay
    InGame,
    /// Game is paused (overlay on gameplay)
    Paused,
    /// Player has died
    GameOver,
}

impl GameState {
    /// State reached by pressing pause, if pausing means anything here.
    pub fn pause_toggled(self) -> Option<GameState> {
        match self {
            GameState::InGame => Some(GameState::Paused),
            GameState::Paused => Some(GameState::InGame),
            GameState::Loading | GameState::GameOver => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pause_only_toggles_during_play() {
        assert_eq!(GameState::InGame.pause_toggled(), Some(GameState::Paused));
        assert_eq!(GameState::Paused.pause_toggled(), Some(GameState::InGame));
        assert_eq!(GameState::GameOver.pause_toggled(), None);
        assert_eq!(GameState::Loading.pause_toggled(), None);
    }
}
