//! Player module - player entity, movement, jumping and respawning.

mod components;
mod distortion;
mod movement;
mod plugin;
mod respawn;

pub use components::*;
pub use distortion::ControlDistortion;
pub use movement::spawn_player;
pub use plugin::PlayerPlugin;
