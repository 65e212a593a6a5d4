//! Potions module - pickups, inventory, usage counters and side effects.

mod components;
mod effects;
mod inventory;
mod plugin;
mod systems;
mod usage;

pub use components::{PotionEffectType, PotionInstance, PotionPickup};
pub use effects::ActiveEffects;
pub use inventory::PlayerInventory;
pub use plugin::PotionPlugin;
pub use systems::spawn_potion;
pub use usage::PotionUsage;
