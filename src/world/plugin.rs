//! World plugin - level loading, triggers and level progression.

use bevy::prelude::*;

use crate::core::{GameConfig, GameState, GameplaySet};
use crate::enemies::EnemyRegistry;
use crate::player::spawn_player;

use super::builder::build_level_from_data;
use super::components::{KillHeight, LevelEntity, SpawnPoint, TriggerEntered, TriggerExited};
use super::data::{load_level_definitions, CurrentLevel, LevelRegistry};
use super::progression::*;
use super::triggers::route_trigger_events;

/// World plugin - handles level loading and world setup.
pub struct WorldPlugin;

impl Plugin for WorldPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<TriggerEntered>()
            .add_event::<TriggerExited>()
            .init_resource::<CurrentLevel>()
            .init_resource::<SpawnPoint>()
            .init_resource::<KillHeight>()
            .add_systems(Startup, load_level_definitions)
            .add_systems(OnEnter(GameState::InGame), setup_level)
            .add_systems(OnExit(GameState::InGame), cleanup_level)
            .add_systems(Update, route_trigger_events.in_set(GameplaySet::Input))
            .add_systems(Update, check_kill_height.in_set(GameplaySet::Combat))
            .add_systems(
                Update,
                (
                    reach_checkpoint,
                    enter_victory_zone,
                    celebrate_victory,
                    load_next_level,
                )
                    .in_set(GameplaySet::Reactions),
            );
    }
}

/// Set up the level from data.
pub fn setup_level(
    mut commands: Commands,
    config: Res<GameConfig>,
    level_registry: Res<LevelRegistry>,
    current_level: Res<CurrentLevel>,
    enemy_registry: Res<EnemyRegistry>,
) {
    let Some(level) = level_registry.get(&current_level.name) else {
        error!("Level '{}' not found in registry!", current_level.name);
        return;
    };

    if let Err(e) = level.validate_enemies(&enemy_registry) {
        warn!("{}", e);
    }

    info!("Building level: {}", level.name);

    let player_start = build_level_from_data(&mut commands, level, &enemy_registry);

    commands.insert_resource(SpawnPoint(player_start));
    commands.insert_resource(KillHeight(level.kill_height));
    spawn_player(&mut commands, player_start, &config);
}

/// Clean up level entities when leaving InGame state.
fn cleanup_level(mut commands: Commands, level_query: Query<Entity, With<LevelEntity>>) {
    for entity in level_query.iter() {
        commands.entity(entity).despawn_recursive();
    }
}
