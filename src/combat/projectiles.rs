//! Projectiles fired by the player and the boss.

use std::collections::HashSet;

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use super::components::DamageEvent;
use crate::enemies::Enemy;
use crate::player::Player;
use crate::world::LevelEntity;

/// Default projectile speed in units per second.
pub const PROJECTILE_SPEED: f32 = 10.0;
/// Seconds before an unhit projectile disappears.
pub const PROJECTILE_LIFETIME: f32 = 2.0;
const PROJECTILE_RADIUS: f32 = 0.15;

/// Who fired a projectile, which decides what it can hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectileOwner {
    Player,
    Enemy,
}

/// A projectile in flight.
#[derive(Component, Debug)]
pub struct Projectile {
    pub direction: Vec2,
    pub speed: f32,
    pub owner: ProjectileOwner,
    pub lifetime: Timer,
}

impl Projectile {
    pub fn new(direction: Vec2, owner: ProjectileOwner) -> Self {
        Self {
            direction: direction.normalize_or_zero(),
            speed: PROJECTILE_SPEED,
            owner,
            lifetime: Timer::from_seconds(PROJECTILE_LIFETIME, TimerMode::Once),
        }
    }

    pub fn velocity(&self) -> Vec2 {
        self.direction * self.speed
    }

    /// Whether this projectile damages a target of the given kind.
    pub fn hits(&self, target_is_player: bool, target_is_enemy: bool) -> bool {
        match self.owner {
            ProjectileOwner::Player => target_is_enemy,
            ProjectileOwner::Enemy => target_is_player,
        }
    }
}

/// Spawn a projectile at `position` flying along `direction`.
pub fn spawn_projectile(
    commands: &mut Commands,
    position: Vec2,
    direction: Vec2,
    owner: ProjectileOwner,
) -> Entity {
    let projectile = Projectile::new(direction, owner);
    let color = match owner {
        ProjectileOwner::Player => Color::srgb(0.5, 0.8, 1.0),
        ProjectileOwner::Enemy => Color::srgb(0.9, 0.3, 0.6),
    };

    commands
        .spawn((
            Sprite {
                color,
                custom_size: Some(Vec2::splat(PROJECTILE_RADIUS * 2.0)),
                ..default()
            },
            Transform::from_translation(position.extend(5.0)),
            RigidBody::KinematicVelocityBased,
            Velocity::linear(projectile.velocity()),
            Collider::ball(PROJECTILE_RADIUS),
            Sensor,
            ActiveEvents::COLLISION_EVENTS,
            // Player and enemies are kinematic, so kinematic pairs must be enabled
            ActiveCollisionTypes::all(),
            projectile,
            LevelEntity,
        ))
        .id()
}

/// Despawn projectiles whose lifetime expired.
pub fn expire_projectiles(
    mut commands: Commands,
    time: Res<Time>,
    mut query: Query<(Entity, &mut Projectile)>,
) {
    for (entity, mut projectile) in query.iter_mut() {
        projectile.lifetime.tick(time.delta());
        if projectile.lifetime.finished() {
            commands.entity(entity).despawn_recursive();
        }
    }
}

/// Turn projectile sensor contacts into damage.
pub fn projectile_hits(
    mut commands: Commands,
    mut collision_events: EventReader<CollisionEvent>,
    projectile_query: Query<&Projectile>,
    player_query: Query<(), With<Player>>,
    enemy_query: Query<(), With<Enemy>>,
    mut damage_events: EventWriter<DamageEvent>,
) {
    // A projectile can overlap several colliders in one frame but only hits once
    let mut spent = HashSet::new();

    for event in collision_events.read() {
        let CollisionEvent::Started(a, b, _) = *event else {
            continue;
        };

        let (projectile_entity, projectile, other) = if let Ok(p) = projectile_query.get(a) {
            (a, p, b)
        } else if let Ok(p) = projectile_query.get(b) {
            (b, p, a)
        } else {
            continue;
        };

        if spent.contains(&projectile_entity) {
            continue;
        }

        let is_player = player_query.contains(other);
        let is_enemy = enemy_query.contains(other);
        if !projectile.hits(is_player, is_enemy) {
            continue;
        }

        damage_events.send(DamageEvent {
            target: other,
            source: Some(projectile_entity),
        });
        spent.insert(projectile_entity);
        commands.entity(projectile_entity).despawn_recursive();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_is_normalized() {
        let projectile = Projectile::new(Vec2::new(3.0, 4.0), ProjectileOwner::Enemy);
        assert!((projectile.direction.length() - 1.0).abs() < 1e-5);
        assert!((projectile.velocity().length() - PROJECTILE_SPEED).abs() < 1e-4);
    }

    #[test]
    fn owners_only_hit_the_other_side() {
        let from_player = Projectile::new(Vec2::X, ProjectileOwner::Player);
        assert!(from_player.hits(false, true));
        assert!(!from_player.hits(true, false));

        let from_enemy = Projectile::new(Vec2::NEG_X, ProjectileOwner::Enemy);
        assert!(from_enemy.hits(true, false));
        assert!(!from_enemy.hits(false, true));
    }
}
