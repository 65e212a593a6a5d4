//! Enemies module - enemy definitions, patrols, contact, bosses and death.

mod ai;
mod boss;
mod components;
pub mod data;
mod plugin;
mod spawning;

pub use components::*;
pub use data::{EnemyDefinition, EnemyRegistry};
pub use plugin::EnemyPlugin;
pub use spawning::spawn_enemy;
