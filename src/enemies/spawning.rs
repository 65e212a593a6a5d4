//! Enemy spawning from level data.

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use super::components::{Enemy, EnemyType, PatrolPath, PotionDrop};
use super::data::EnemyDefinition;
use crate::combat::Health;
use crate::world::{layers, LevelEntity};

/// Spawn a single enemy, optionally patrolling between two points.
pub fn spawn_enemy(
    commands: &mut Commands,
    enemy_type: &str,
    definition: &EnemyDefinition,
    position: Vec2,
    patrol: Option<(Vec2, Vec2)>,
) -> Entity {
    let stats = definition.to_stats();
    let half_size = stats.half_size;
    let (r, g, b) = definition.color;

    let mut enemy = commands.spawn((
        Enemy,
        EnemyType(enemy_type.to_string()),
        stats,
        Health::new(definition.max_health),
        PotionDrop(definition.drop),
        Sprite {
            color: Color::srgb(r, g, b),
            custom_size: Some(half_size * 2.0),
            ..default()
        },
        Transform::from_translation(position.extend(5.0)),
        RigidBody::KinematicPositionBased,
        Collider::cuboid(half_size.x, half_size.y),
        CollisionGroups::new(layers::ENEMY, Group::ALL),
        LevelEntity,
    ));

    if let Some((start, end)) = patrol {
        enemy.insert(PatrolPath::new(start, end));
    }
    if let Some(boss) = &definition.boss {
        enemy.insert(boss.to_boss());
    }

    info!("Spawned {} at ({:.1}, {:.1})", definition.name, position.x, position.y);
    enemy.id()
}
