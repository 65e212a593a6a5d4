//! Player plugin - movement, jumping, shooting and respawning.

use bevy::prelude::*;

use super::movement;
use super::respawn::{handle_player_death, handle_player_spawn};
use crate::core::GameplaySet;

/// Player plugin - handles player input, movement and the respawn flow.
pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        // Set up movement systems
        movement::setup_movement_systems(app);

        app.add_systems(
            Update,
            (handle_player_death, handle_player_spawn)
                .chain()
                .in_set(GameplaySet::Reactions),
        );
    }
}
