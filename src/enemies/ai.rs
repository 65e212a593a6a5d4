//! Enemy behaviour: patrols, player contact and death.

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use super::components::{DeathTimer, Enemy, EnemyStats, PatrolPath};
use crate::combat::{DamageEvent, Dead};
use crate::core::{EnemyDeath, GameConfig};
use crate::player::{KinematicBody, Phasing, Player};

/// Extra reach around the player so resting contact still counts.
const CONTACT_MARGIN: f32 = 0.05;

/// Walk patrolling enemies along their path.
pub fn patrol_enemies(
    time: Res<Time>,
    mut enemy_query: Query<
        (&mut Transform, &mut PatrolPath, &EnemyStats, &mut Sprite),
        (With<Enemy>, Without<Dead>),
    >,
) {
    for (mut transform, mut path, stats, mut sprite) in enemy_query.iter_mut() {
        path.advance(stats.move_speed * time.delta_secs());
        let position = path.position();
        transform.translation.x = position.x;
        transform.translation.y = position.y;

        let heading = path.heading();
        if heading != 0.0 {
            sprite.flip_x = heading < 0.0;
        }
    }
}

/// Contact with the player above the enemy's top edge is a stomp. Anything
/// else hurts the player.
pub fn is_stomp(player_y: f32, enemy_top: f32) -> bool {
    player_y >= enemy_top
}

/// Resolve contact between the player and enemies.
pub fn resolve_player_contact(
    config: Res<GameConfig>,
    rapier_context: Query<&RapierContext>,
    mut player_query: Query<
        (Entity, &Transform, &mut KinematicBody, Has<Phasing>),
        (With<Player>, Without<Dead>),
    >,
    enemy_query: Query<(&Transform, &EnemyStats), (With<Enemy>, Without<Dead>)>,
    mut damage_events: EventWriter<DamageEvent>,
) {
    let Ok((player_entity, transform, mut body, phasing)) = player_query.get_single_mut() else {
        return;
    };
    if phasing {
        return;
    }
    let Ok(context) = rapier_context.get_single() else {
        return;
    };

    let half_size = Vec2::new(config.player.half_size.0, config.player.half_size.1);
    let shape = Collider::cuboid(half_size.x + CONTACT_MARGIN, half_size.y + CONTACT_MARGIN);
    let player_position = transform.translation.truncate();

    let mut touching = Vec::new();
    context.intersections_with_shape(
        player_position,
        0.0,
        &shape,
        QueryFilter::default()
            .exclude_collider(player_entity)
            .exclude_sensors(),
        |hit_entity| {
            if enemy_query.contains(hit_entity) {
                touching.push(hit_entity);
            }
            true
        },
    );

    for enemy in touching {
        let Ok((enemy_transform, stats)) = enemy_query.get(enemy) else {
            continue;
        };
        let enemy_top = enemy_transform.translation.y + stats.half_size.y;

        if is_stomp(player_position.y, enemy_top) {
            damage_events.send(DamageEvent {
                target: enemy,
                source: Some(player_entity),
            });
            body.velocity.y = config.player.bounce_velocity;
            debug!("Stomped {:?}", enemy);
            // One bounce per frame
            break;
        }

        damage_events.send(DamageEvent {
            target: player_entity,
            source: Some(enemy),
        });
    }
}

/// Disable a dead enemy's collider and start its fade.
pub fn handle_enemy_death(
    mut commands: Commands,
    mut events: EventReader<EnemyDeath>,
    enemy_query: Query<(), (With<Enemy>, Without<DeathTimer>)>,
) {
    for event in events.read() {
        if !enemy_query.contains(event.enemy) {
            continue;
        }
        commands
            .entity(event.enemy)
            .insert((ColliderDisabled, DeathTimer::default()));
    }
}

/// Fade out and despawn enemies after their death timer.
pub fn despawn_dead_enemies(
    mut commands: Commands,
    time: Res<Time>,
    mut query: Query<(Entity, &mut DeathTimer, &mut Sprite)>,
) {
    for (entity, mut death_timer, mut sprite) in query.iter_mut() {
        death_timer.0.tick(time.delta());
        sprite.color.set_alpha(1.0 - death_timer.0.fraction());

        if death_timer.0.finished() {
            commands.entity(entity).despawn_recursive();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contact_above_the_top_edge_is_a_stomp() {
        assert!(is_stomp(1.5, 1.0));
        assert!(is_stomp(1.0, 1.0));
    }

    #[test]
    fn side_contact_is_not_a_stomp() {
        assert!(!is_stomp(0.8, 1.0));
    }
}
