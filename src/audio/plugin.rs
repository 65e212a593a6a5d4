//! Audio plugin - sound effect reactions and the background music channel.

use bevy::prelude::*;
use bevy_kira_audio::AudioApp;

use crate::core::{GameState, GameplaySet};

use super::music::*;
use super::sfx::{load_sound_effects, play_sound_effects};

/// Audio plugin - sound effects and background music.
///
/// Expects `bevy_kira_audio::AudioPlugin` to be added by the app.
pub struct GameAudioPlugin;

impl Plugin for GameAudioPlugin {
    fn build(&self, app: &mut App) {
        app.add_audio_channel::<MusicChannel>()
            .init_resource::<MusicState>()
            .add_systems(Startup, load_sound_effects)
            .add_systems(OnEnter(GameState::InGame), start_level_music)
            .add_systems(OnExit(GameState::InGame), stop_music)
            .add_systems(
                Update,
                (
                    play_sound_effects,
                    (update_music_zones, apply_music).chain(),
                )
                    .in_set(GameplaySet::Reactions),
            );
    }
}
