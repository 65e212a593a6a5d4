//! Combat systems - damage, invulnerability windows and death routing.

use bevy::prelude::*;

use super::components::*;
use super::projectiles::{expire_projectiles, projectile_hits};
use crate::core::{Deferred, EnemyDeath, GameConfig, GameplaySet, PlayerDeath};
use crate::player::Player;

/// Configure combat systems.
pub fn setup_combat_systems(app: &mut App) {
    app.add_systems(
        Update,
        (
            expire_projectiles,
            projectile_hits,
            apply_damage,
            tick_invulnerability,
        )
            .chain()
            .in_set(GameplaySet::Combat),
    )
    .add_systems(Update, route_health_is_zero.in_set(GameplaySet::Reactions));
}

/// Apply damage events, one hit point each.
fn apply_damage(
    mut commands: Commands,
    config: Res<GameConfig>,
    mut damage_events: EventReader<DamageEvent>,
    mut health_query: Query<(&mut Health, Has<Player>, Has<Dead>)>,
    mut health_is_zero: Deferred<HealthIsZero>,
) {
    for event in damage_events.read() {
        let Ok((mut health, is_player, is_dead)) = health_query.get_mut(event.target) else {
            continue;
        };

        if is_dead {
            continue;
        }

        match health.decrement() {
            HealthChange::Ignored => {}
            HealthChange::Changed => {
                debug!("{:?} hit, {} hp left", event.target, health.current);
                if is_player {
                    // Short grace period so one contact doesn't drain every heart
                    health.invulnerable = true;
                    commands
                        .entity(event.target)
                        .insert(Invulnerability::new(config.player.hurt_invincibility));
                }
            }
            HealthChange::Depleted => {
                commands.entity(event.target).insert(Dead);
                health_is_zero.schedule(HealthIsZero {
                    entity: event.target,
                });
            }
        }
    }
}

/// Keep `Health::invulnerable` in sync with active invulnerability windows.
fn tick_invulnerability(
    mut commands: Commands,
    time: Res<Time>,
    mut query: Query<(Entity, &mut Health, &mut Invulnerability)>,
) {
    for (entity, mut health, mut window) in query.iter_mut() {
        health.invulnerable = true;
        window.timer.tick(time.delta());
        if window.timer.finished() {
            health.invulnerable = false;
            commands.entity(entity).remove::<Invulnerability>();
        }
    }
}

/// Decide what a depleted health bar means.
fn route_health_is_zero(
    mut events: EventReader<HealthIsZero>,
    player_query: Query<(), With<Player>>,
    mut player_death: Deferred<PlayerDeath>,
    mut enemy_death: Deferred<EnemyDeath>,
) {
    for event in events.read() {
        if player_query.contains(event.entity) {
            player_death.schedule(PlayerDeath {
                player: event.entity,
            });
        } else {
            enemy_death.schedule(EnemyDeath {
                enemy: event.entity,
            });
        }
    }
}
