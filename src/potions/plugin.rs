//! Potion plugin - registers pickup, drinking and effect systems.

use bevy::prelude::*;

use super::components::PotionAnimationTimer;
use super::inventory::PlayerInventory;
use super::systems::*;
use super::usage::PotionUsage;
use crate::core::{GameConfig, GameState, GameplaySet};

/// Potion plugin - pickups, inventory, drinking and side effects.
pub struct PotionPlugin;

impl Plugin for PotionPlugin {
    fn build(&self, app: &mut App) {
        let frame_rate = app
            .world()
            .get_resource::<GameConfig>()
            .map_or(12.0, |config| config.potions.frame_rate);

        app.insert_resource(PotionAnimationTimer::new(frame_rate))
            .init_resource::<PlayerInventory>()
            .init_resource::<PotionUsage>()
            // Counters and inventory carry over between levels, not between runs
            .add_systems(OnExit(GameState::MainMenu), reset_potion_progress)
            .add_systems(
                Update,
                (prepare_new_player, drink_potions, update_active_effects)
                    .chain()
                    .in_set(GameplaySet::Input),
            )
            .add_systems(
                Update,
                (collect_potions, drop_potions).in_set(GameplaySet::Reactions),
            )
            .add_systems(Update, animate_potions.in_set(GameplaySet::Presentation));
    }
}
