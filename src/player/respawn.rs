//! Player death and respawn flow.

use bevy::prelude::*;

use super::components::{KinematicBody, Player, PlayerController};
use crate::combat::{Dead, Health};
use crate::core::{Deferred, GameConfig, PlayerDeath, PlayerSpawn};
use crate::world::SpawnPoint;

/// Freeze the player and queue a respawn.
pub fn handle_player_death(
    mut commands: Commands,
    config: Res<GameConfig>,
    mut events: EventReader<PlayerDeath>,
    mut player_query: Query<(&mut PlayerController, &mut KinematicBody, &mut Health), With<Player>>,
    mut spawn_events: Deferred<PlayerSpawn>,
) {
    for event in events.read() {
        let Ok((mut controller, mut body, mut health)) = player_query.get_mut(event.player) else {
            continue;
        };

        info!("Player died, respawning in {:.1}s", config.respawn_delay);
        controller.control_enabled = false;
        body.velocity = Vec2::ZERO;
        // Falling out of the world skips the health bar entirely
        health.current = 0;
        commands.entity(event.player).insert(Dead);

        spawn_events.schedule_in(
            PlayerSpawn {
                player: event.player,
            },
            config.respawn_delay,
        );
    }
}

/// Put the player back at the spawn point with full health.
pub fn handle_player_spawn(
    mut commands: Commands,
    spawn_point: Res<SpawnPoint>,
    mut events: EventReader<PlayerSpawn>,
    mut player_query: Query<
        (
            &mut Transform,
            &mut PlayerController,
            &mut KinematicBody,
            &mut Health,
        ),
        With<Player>,
    >,
) {
    for event in events.read() {
        let Ok((mut transform, mut controller, mut body, mut health)) =
            player_query.get_mut(event.player)
        else {
            continue;
        };

        transform.translation.x = spawn_point.0.x;
        transform.translation.y = spawn_point.0.y;
        body.velocity = Vec2::ZERO;
        body.grounded = false;
        health.restore();
        controller.reset();
        commands.entity(event.player).remove::<Dead>();

        info!("Player respawned at {:?}", spawn_point.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::DeferredQueue;

    fn player_app() -> (App, Entity) {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .insert_resource(GameConfig::default())
            .insert_resource(SpawnPoint(Vec2::new(4.0, 2.0)))
            .add_event::<PlayerDeath>()
            .add_event::<PlayerSpawn>()
            .init_resource::<DeferredQueue<PlayerSpawn>>()
            .add_systems(Update, (handle_player_death, handle_player_spawn).chain());

        let tuning = GameConfig::default().player;
        let player = app
            .world_mut()
            .spawn((
                Player,
                PlayerController::from_tuning(&tuning),
                KinematicBody {
                    velocity: Vec2::new(3.0, -9.0),
                    grounded: false,
                },
                Health::new(3),
                Transform::from_xyz(-1.0, -30.0, 10.0),
            ))
            .id();
        (app, player)
    }

    #[test]
    fn death_freezes_player_and_queues_respawn() {
        let (mut app, player) = player_app();
        app.world_mut().send_event(PlayerDeath { player });
        app.update();

        let entity = app.world().entity(player);
        assert!(!entity.get::<PlayerController>().unwrap().control_enabled);
        assert_eq!(entity.get::<KinematicBody>().unwrap().velocity, Vec2::ZERO);
        assert_eq!(entity.get::<Health>().unwrap().current, 0);
        assert!(entity.contains::<Dead>());
        assert_eq!(app.world().resource::<DeferredQueue<PlayerSpawn>>().len(), 1);
    }

    #[test]
    fn spawn_restores_player_at_spawn_point() {
        let (mut app, player) = player_app();
        app.world_mut().send_event(PlayerDeath { player });
        app.update();

        app.world_mut().send_event(PlayerSpawn { player });
        app.update();

        let entity = app.world().entity(player);
        let transform = entity.get::<Transform>().unwrap();
        assert_eq!(transform.translation, Vec3::new(4.0, 2.0, 10.0));
        assert!(entity.get::<PlayerController>().unwrap().control_enabled);
        assert_eq!(entity.get::<Health>().unwrap().current, 3);
        assert!(!entity.contains::<Dead>());
    }
}
