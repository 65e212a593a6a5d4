//! Audio module - sound effects and background music.

mod music;
mod plugin;
mod sfx;

pub use music::{MusicChannel, MusicState};
pub use plugin::GameAudioPlugin;
