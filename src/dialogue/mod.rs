//! Dialogue module - NPCs, checkpoint lines and the typewriter dialogue box.

mod components;
mod npc;
mod plugin;

pub use components::{DialogueBox, DialogueEntry};
pub use npc::{spawn_npc, type_dialogue, Npc};
pub use plugin::DialoguePlugin;
