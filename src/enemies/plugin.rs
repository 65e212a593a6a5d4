//! Enemy plugin - registers all enemy systems.

use bevy::prelude::*;

use super::ai;
use super::boss;
use super::data::load_enemy_definitions;
use crate::core::GameplaySet;

/// Enemy plugin - handles enemy definitions, patrols, contact, bosses and death.
pub struct EnemyPlugin;

impl Plugin for EnemyPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, load_enemy_definitions)
            .add_systems(
                Update,
                ai::patrol_enemies.in_set(GameplaySet::Movement),
            )
            .add_systems(
                Update,
                (
                    ai::resolve_player_contact,
                    boss::update_boss_phase,
                    boss::boss_special_attack,
                )
                    .chain()
                    .in_set(GameplaySet::Combat),
            )
            .add_systems(
                Update,
                (ai::handle_enemy_death, ai::despawn_dead_enemies)
                    .chain()
                    .in_set(GameplaySet::Reactions),
            );
    }
}
