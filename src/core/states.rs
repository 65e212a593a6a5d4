//! Game state definitions that control the overall flow of the game.
//!
//! States determine which systems run at any given time. For example,
//! player movement only runs while a level is being played, while menu
//! systems only run in the MainMenu state.

use bevy::prelude::*;

/// Main game states - controls overall game flow.
///
/// - Start in `Loading` while data files are read
/// - Move to `MainMenu` when loading completes
/// - Enter `InGame` when the player starts a run
/// - `LevelTransition` sits between two levels so the old level is torn
///   down (OnExit) before the next one is built (OnEnter)
#[derive(States, Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
pub enum GameState {
    /// Initial state - loading data files
    #[default]
    Loading,
    /// Main menu / title screen
    MainMenu,
    /// A level is being played
    InGame,
    /// Switching to the next level
    LevelTransition,
}

/// Sub-states for gameplay - only active when GameState::InGame.
///
/// Pausing is a sub-state so that the level stays alive while the pause
/// menu is shown.
#[derive(SubStates, Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
#[source(GameState = GameState::InGame)]
pub enum PlayState {
    /// Normal gameplay
    #[default]
    Running,
    /// Pause menu is open, virtual time is frozen
    Paused,
}
