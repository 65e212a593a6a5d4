//! System sets shared by all gameplay plugins.

use bevy::prelude::*;

use super::states::{GameState, PlayState};

/// Per-frame ordering of gameplay systems.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum GameplaySet {
    /// Deferred events that became due are emitted
    Dispatch,
    /// Keyboard input and AI decisions
    Input,
    /// Velocity integration and character controller requests
    Movement,
    /// Hits, damage, deaths
    Combat,
    /// Reactions to gameplay events (effects, respawn, level flow)
    Reactions,
    /// Visual sync that also runs while paused (HUD, camera)
    Presentation,
}

/// Configure gameplay set ordering and run conditions.
pub fn configure_gameplay_sets(app: &mut App) {
    app.configure_sets(
        Update,
        (
            GameplaySet::Dispatch,
            GameplaySet::Input,
            GameplaySet::Movement,
            GameplaySet::Combat,
            GameplaySet::Reactions,
        )
            .chain()
            .run_if(in_state(GameState::InGame))
            .run_if(in_state(PlayState::Running)),
    )
    .configure_sets(
        Update,
        GameplaySet::Presentation
            .after(GameplaySet::Reactions)
            .run_if(in_state(GameState::InGame)),
    );
}
