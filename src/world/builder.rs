//! Level construction from data definitions.

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use super::components::{Checkpoint, LevelEntity, MusicZone, TriggerZone, VictoryZone, Wall};
use super::data::{BlockDef, BoxDef, LevelDefinition, ParallaxDef};
use crate::dialogue::spawn_npc;
use crate::enemies::{spawn_enemy, EnemyRegistry};
use crate::potions::spawn_potion;
use crate::rendering::ParallaxLayer;

/// Sensor components shared by every trigger zone.
pub fn trigger_zone_bundle(area: BoxDef) -> impl Bundle {
    let half_size = area.half_size();
    (
        Transform::from_translation(area.center().extend(1.0)),
        Collider::cuboid(half_size.x, half_size.y),
        Sensor,
        ActiveEvents::COLLISION_EVENTS,
        // The player is kinematic and zones are fixed
        ActiveCollisionTypes::default() | ActiveCollisionTypes::KINEMATIC_STATIC,
        TriggerZone,
        LevelEntity,
    )
}

fn zone_sprite(area: BoxDef, color: Color) -> Sprite {
    Sprite {
        color,
        custom_size: Some(area.half_size() * 2.0),
        ..default()
    }
}

/// Build a level from a level definition. Returns the player start.
pub fn build_level_from_data(
    commands: &mut Commands,
    level: &LevelDefinition,
    enemy_registry: &EnemyRegistry,
) -> Vec2 {
    for platform in &level.platforms {
        spawn_block(commands, platform);
    }
    for wall in &level.walls {
        let entity = spawn_block(commands, wall);
        commands.entity(entity).insert(Wall);
    }

    for layer in &level.parallax {
        spawn_parallax_layer(commands, layer);
    }

    for potion in &level.potions {
        spawn_potion(
            commands,
            potion.potion,
            Vec2::new(potion.position.0, potion.position.1),
        );
    }

    for enemy in &level.enemies {
        let Some(definition) = enemy_registry.get(&enemy.kind) else {
            warn!("Unknown enemy type in level {}: {}", level.name, enemy.kind);
            continue;
        };
        let patrol = enemy
            .patrol
            .map(|(a, b)| (Vec2::new(a.0, a.1), Vec2::new(b.0, b.1)));
        spawn_enemy(
            commands,
            &enemy.kind,
            definition,
            Vec2::new(enemy.position.0, enemy.position.1),
            patrol,
        );
    }

    for npc in &level.npcs {
        spawn_npc(commands, &npc.name, npc.area(), npc.dialogue.clone());
    }

    for checkpoint in &level.checkpoints {
        let area = checkpoint.area();
        commands.spawn((
            trigger_zone_bundle(area),
            zone_sprite(area, Color::srgba(0.3, 0.9, 0.5, 0.35)),
            Checkpoint {
                dialogue: checkpoint.dialogue.clone(),
                dialogue_played: false,
            },
        ));
    }

    for zone in &level.music_zones {
        commands.spawn((
            trigger_zone_bundle(zone.area()),
            MusicZone {
                track: zone.track.clone(),
            },
        ));
    }

    if let Some(area) = level.victory_zone {
        commands.spawn((
            trigger_zone_bundle(area),
            zone_sprite(area, Color::srgba(1.0, 0.85, 0.2, 0.4)),
            VictoryZone::default(),
        ));
    }

    level.player_start()
}

/// Spawn a solid block of level geometry.
fn spawn_block(commands: &mut Commands, block: &BlockDef) -> Entity {
    let area = block.area();
    let half_size = area.half_size();
    let (r, g, b) = block.color;

    commands
        .spawn((
            zone_sprite(area, Color::srgb(r, g, b)),
            Transform::from_translation(area.center().extend(0.0)),
            RigidBody::Fixed,
            Collider::cuboid(half_size.x, half_size.y),
            LevelEntity,
        ))
        .id()
}

fn spawn_parallax_layer(commands: &mut Commands, layer: &ParallaxDef) {
    let area = layer.area();
    let (r, g, b) = layer.color;

    commands.spawn((
        zone_sprite(area, Color::srgb(r, g, b)),
        Transform::from_translation(area.center().extend(layer.depth)),
        ParallaxLayer {
            start: area.center(),
            movement_scale: Vec2::new(layer.movement_scale.0, layer.movement_scale.1),
            width: layer.size.0,
        },
        LevelEntity,
    ));
}
