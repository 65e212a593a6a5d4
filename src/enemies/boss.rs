//! Boss phases and the radial special attack.

use bevy::prelude::*;

use super::components::{radial_directions, Boss, Enemy, EnemyStats};
use crate::combat::{spawn_projectile, Dead, Health, ProjectileOwner};

/// Speed multiplier applied when the boss enters phase two.
const PHASE_TWO_SPEED_MULTIPLIER: f32 = 1.5;

/// Switch bosses to phase two once their health drops far enough.
pub fn update_boss_phase(
    mut boss_query: Query<(&mut Boss, &mut EnemyStats, &Health), (With<Enemy>, Without<Dead>)>,
) {
    for (mut boss, mut stats, health) in boss_query.iter_mut() {
        if boss.check_phase(health) {
            stats.move_speed *= PHASE_TWO_SPEED_MULTIPLIER;
            info!(
                "Boss enters phase two: speed {:.1}, attack every {:.1}s",
                stats.move_speed, boss.special_attack_cooldown
            );
        }
    }
}

/// Fire a ring of projectiles whenever the special attack comes off cooldown.
pub fn boss_special_attack(
    mut commands: Commands,
    time: Res<Time>,
    mut boss_query: Query<(&Transform, &EnemyStats, &mut Boss), (With<Enemy>, Without<Dead>)>,
) {
    for (transform, stats, mut boss) in boss_query.iter_mut() {
        if !boss.tick(time.delta_secs()) {
            continue;
        }

        // Spawn outside the boss body
        let position = transform.translation.truncate();
        let spawn_radius = stats.half_size.max_element() + 0.3;
        for direction in radial_directions(boss.projectile_count) {
            spawn_projectile(
                &mut commands,
                position + direction * spawn_radius,
                direction,
                ProjectileOwner::Enemy,
            );
        }
        debug!("Boss fired {} projectiles", boss.projectile_count);
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::combat::Projectile;

    fn boss_app() -> (App, Entity) {
        let mut app = App::new();
        app.init_resource::<Time>()
            .add_systems(Update, (update_boss_phase, boss_special_attack).chain());

        let boss = app
            .world_mut()
            .spawn((
                Enemy,
                EnemyStats {
                    move_speed: 2.0,
                    half_size: Vec2::new(1.0, 1.25),
                },
                Health::new(10),
                Boss {
                    phase_threshold: 0.5,
                    special_attack_cooldown: 5.0,
                    projectile_count: 8,
                    attack_timer: 0.0,
                    phase_two: false,
                },
                Transform::default(),
            ))
            .id();
        (app, boss)
    }

    fn step(app: &mut App, seconds: f32) {
        app.world_mut()
            .resource_mut::<Time>()
            .advance_by(Duration::from_secs_f32(seconds));
        app.update();
    }

    fn projectile_count(app: &mut App) -> usize {
        app.world_mut()
            .query::<&Projectile>()
            .iter(app.world())
            .count()
    }

    #[test]
    fn volley_fires_every_cooldown_without_a_player() {
        let (mut app, _) = boss_app();

        step(&mut app, 4.0);
        assert_eq!(projectile_count(&mut app), 0);

        step(&mut app, 1.0);
        assert_eq!(projectile_count(&mut app), 8);

        step(&mut app, 5.0);
        assert_eq!(projectile_count(&mut app), 16);
    }

    #[test]
    fn phase_two_speeds_up_boss_once() {
        let (mut app, boss) = boss_app();
        app.world_mut().get_mut::<Health>(boss).unwrap().current = 5;

        step(&mut app, 0.1);
        step(&mut app, 0.1);

        let entity = app.world().entity(boss);
        assert_eq!(entity.get::<EnemyStats>().unwrap().move_speed, 3.0);
        assert_eq!(entity.get::<Boss>().unwrap().special_attack_cooldown, 2.5);
    }
}
