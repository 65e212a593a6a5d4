//! Potion Platformer - a 2D platformer in Bevy.
//!
//! The player runs, jumps and wall-jumps through short levels, collecting
//! potions that grant temporary powers. Drinking too many of them leaves
//! permanent scars: the screen bleeds colour, the controls turn on you and
//! sometimes a potion simply kills you.
//!
//! # Architecture
//!
//! The game is organized into plugins, each handling a specific aspect:
//!
//! - **Core**: Game states, gameplay events, deferred event scheduler, config
//! - **Player**: Platformer movement, jump/wall-jump state machine, shooting
//! - **Combat**: Health, damage, projectiles, ammo
//! - **Enemies**: Patrolling enemies, boss phases, enemy death
//! - **Potions**: Pickups, inventory, effects and escalating side effects
//! - **Dialogue**: NPC conversations and checkpoint dialogue
//! - **World**: Level loading, triggers, checkpoints, victory and music zones
//! - **Rendering**: Camera follow, parallax, side-effect post-processing
//! - **Audio**: Sound effects and background music
//! - **UI**: Menus, HUD, dialogue panel

pub mod audio;
pub mod combat;
pub mod core;
pub mod dialogue;
pub mod enemies;
pub mod player;
pub mod potions;
pub mod rendering;
pub mod ui;
pub mod world;

use bevy::prelude::*;

/// Main game plugin that adds all sub-plugins.
pub struct PotionPlatformerPlugin;

impl Plugin for PotionPlatformerPlugin {
    fn build(&self, app: &mut App) {
        app
            // Core systems (must be first)
            .add_plugins(core::CorePlugin)

            // Player systems
            .add_plugins(player::PlayerPlugin)

            // Combat systems
            .add_plugins(combat::CombatPlugin)

            // Enemy systems
            .add_plugins(enemies::EnemyPlugin)

            // Potion systems
            .add_plugins(potions::PotionPlugin)

            // Dialogue systems
            .add_plugins(dialogue::DialoguePlugin)

            // World systems
            .add_plugins(world::WorldPlugin)

            // Rendering systems
            .add_plugins(rendering::RenderingPlugin)

            // Audio systems
            .add_plugins(audio::GameAudioPlugin)

            // UI systems
            .add_plugins(ui::UiPlugin);
    }
}
