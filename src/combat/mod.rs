//! Combat module - health, damage, projectiles and ammo.

mod components;
mod plugin;
mod projectiles;
mod systems;

pub use components::*;
pub use plugin::CombatPlugin;
pub use projectiles::{spawn_projectile, Projectile, ProjectileOwner};
