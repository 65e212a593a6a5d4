//! Sound effects played in reaction to gameplay events.

use bevy::prelude::*;
use bevy_kira_audio::{Audio, AudioControl, AudioSource};

use crate::core::{PlayerDeath, PlayerJumped, PlayerLanded, PlayerSpawn, PotionCollected};

const JUMP_SOUND: &str = "audio/sfx/jump.ogg";
const LAND_SOUND: &str = "audio/sfx/land.ogg";
const OUCH_SOUND: &str = "audio/sfx/ouch.ogg";
const RESPAWN_SOUND: &str = "audio/sfx/respawn.ogg";
const COLLECT_SOUND: &str = "audio/sfx/collect.ogg";

#[derive(Resource)]
pub struct SoundEffects {
    jump: Handle<AudioSource>,
    land: Handle<AudioSource>,
    ouch: Handle<AudioSource>,
    respawn: Handle<AudioSource>,
    collect: Handle<AudioSource>,
}

pub fn load_sound_effects(mut commands: Commands, asset_server: Res<AssetServer>) {
    commands.insert_resource(SoundEffects {
        jump: asset_server.load(JUMP_SOUND),
        land: asset_server.load(LAND_SOUND),
        ouch: asset_server.load(OUCH_SOUND),
        respawn: asset_server.load(RESPAWN_SOUND),
        collect: asset_server.load(COLLECT_SOUND),
    });
}

/// Play one sound per event received this frame.
#[allow(clippy::too_many_arguments)]
pub fn play_sound_effects(
    audio: Res<Audio>,
    sounds: Option<Res<SoundEffects>>,
    mut jumped: EventReader<PlayerJumped>,
    mut landed: EventReader<PlayerLanded>,
    mut deaths: EventReader<PlayerDeath>,
    mut spawns: EventReader<PlayerSpawn>,
    mut collected: EventReader<PotionCollected>,
) {
    let Some(sounds) = sounds else {
        return;
    };

    let play = |handle: &Handle<AudioSource>, count: usize| {
        for _ in 0..count {
            audio.play(handle.clone());
        }
    };

    play(&sounds.jump, jumped.read().count());
    play(&sounds.land, landed.read().count());
    play(&sounds.ouch, deaths.read().count());
    play(&sounds.respawn, spawns.read().count());
    play(&sounds.collect, collected.read().count());
}
