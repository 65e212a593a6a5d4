//! Background music: one track per level, overridden inside music zones.

use std::time::Duration;

use bevy::prelude::*;
use bevy_kira_audio::{AudioChannel, AudioControl, AudioSource, AudioTween};

use crate::world::{CurrentLevel, LevelRegistry, MusicZone, TriggerEntered, TriggerExited};

/// Music plays on its own channel so sound effects never cut it off.
#[derive(Resource)]
pub struct MusicChannel;

const MUSIC_FADE: Duration = Duration::from_millis(500);

/// Which track should be playing and which one is.
#[derive(Resource, Debug, Default)]
pub struct MusicState {
    level_track: Option<String>,
    zone_track: Option<String>,
    playing: Option<String>,
}

impl MusicState {
    pub fn set_level_track(&mut self, track: Option<String>) {
        self.level_track = track;
        self.zone_track = None;
    }

    pub fn enter_zone(&mut self, track: &str) {
        self.zone_track = Some(track.to_string());
    }

    pub fn exit_zone(&mut self, track: &str) {
        if self.zone_track.as_deref() == Some(track) {
            self.zone_track = None;
        }
    }

    /// Zone music wins over level music.
    pub fn desired(&self) -> Option<&str> {
        self.zone_track.as_deref().or(self.level_track.as_deref())
    }

    /// Mark the desired track as playing. Returns it if that is a change.
    pub fn take_change(&mut self) -> Option<Option<String>> {
        let desired = self.desired().map(str::to_string);
        if desired == self.playing {
            return None;
        }
        self.playing = desired.clone();
        Some(desired)
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Pick up the current level's track.
pub fn start_level_music(
    levels: Res<LevelRegistry>,
    current_level: Res<CurrentLevel>,
    mut state: ResMut<MusicState>,
) {
    let track = levels
        .get(&current_level.name)
        .and_then(|level| level.music.clone());
    if track.is_none() {
        debug!("Level {} has no music", current_level.name);
    }
    state.set_level_track(track);
}

/// Switch to a zone's track while the player is inside it.
pub fn update_music_zones(
    mut entered: EventReader<TriggerEntered>,
    mut exited: EventReader<TriggerExited>,
    zones: Query<&MusicZone>,
    mut state: ResMut<MusicState>,
) {
    for event in entered.read() {
        if let Ok(zone) = zones.get(event.trigger) {
            state.enter_zone(&zone.track);
        }
    }
    for event in exited.read() {
        if let Ok(zone) = zones.get(event.trigger) {
            state.exit_zone(&zone.track);
        }
    }
}

/// Crossfade the music channel whenever the desired track changes.
pub fn apply_music(
    asset_server: Res<AssetServer>,
    channel: Res<AudioChannel<MusicChannel>>,
    mut state: ResMut<MusicState>,
) {
    let Some(change) = state.take_change() else {
        return;
    };

    channel.stop().fade_out(AudioTween::linear(MUSIC_FADE));
    if let Some(track) = change {
        info!("Playing music: {}", track);
        let handle: Handle<AudioSource> = asset_server.load(track);
        channel
            .play(handle)
            .looped()
            .fade_in(AudioTween::linear(MUSIC_FADE));
    }
}

/// Silence the music when the level is left.
pub fn stop_music(channel: Res<AudioChannel<MusicChannel>>, mut state: ResMut<MusicState>) {
    channel.stop().fade_out(AudioTween::linear(MUSIC_FADE));
    state.clear();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zone_overrides_level_track_until_left() {
        let mut state = MusicState::default();
        state.set_level_track(Some("level.ogg".into()));
        assert_eq!(state.take_change(), Some(Some("level.ogg".into())));
        assert_eq!(state.take_change(), None);

        state.enter_zone("cave.ogg");
        assert_eq!(state.take_change(), Some(Some("cave.ogg".into())));

        state.exit_zone("cave.ogg");
        assert_eq!(state.take_change(), Some(Some("level.ogg".into())));
    }

    #[test]
    fn leaving_an_older_zone_keeps_the_newer_track() {
        let mut state = MusicState::default();
        state.enter_zone("a.ogg");
        state.enter_zone("b.ogg");
        state.exit_zone("a.ogg");
        assert_eq!(state.desired(), Some("b.ogg"));
    }

    #[test]
    fn silent_level_requests_stop_once() {
        let mut state = MusicState::default();
        state.set_level_track(Some("level.ogg".into()));
        state.take_change();

        state.set_level_track(None);
        assert_eq!(state.take_change(), Some(None));
        assert_eq!(state.take_change(), None);
    }
}
