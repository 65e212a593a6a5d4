//! World module - levels, triggers, checkpoints and progression.

mod builder;
mod components;
mod data;
mod plugin;
mod progression;
mod triggers;

pub use builder::trigger_zone_bundle;
pub use components::*;
pub use data::{BoxDef, CurrentLevel, LevelDefinition, LevelRegistry};
pub use plugin::WorldPlugin;
