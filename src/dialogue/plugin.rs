//! Dialogue plugin - registers NPC range, dialogue input and typewriter systems.

use bevy::prelude::*;

use crate::core::{GameState, GameplaySet};

use super::components::DialogueBox;
use super::npc::{close_dialogue, handle_dialogue_input, type_dialogue, update_npc_range};

/// Dialogue plugin - NPC conversations and checkpoint dialogue.
pub struct DialoguePlugin;

impl Plugin for DialoguePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DialogueBox>()
            .add_systems(OnExit(GameState::InGame), close_dialogue)
            .add_systems(
                Update,
                (
                    update_npc_range.in_set(GameplaySet::Reactions),
                    handle_dialogue_input.in_set(GameplaySet::Input),
                    type_dialogue.in_set(GameplaySet::Presentation),
                ),
            );
    }
}
