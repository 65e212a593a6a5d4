//! Checkpoints, falling out of the level and moving on to the next one.

use bevy::prelude::*;

use super::components::{Checkpoint, KillHeight, SpawnPoint, TriggerEntered, VictoryZone};
use super::data::CurrentLevel;
use crate::combat::{Ammo, Dead};
use crate::core::{
    Deferred, GameConfig, GameState, LoadNextLevel, PlayerDeath, PlayerEnteredVictoryZone,
};
use crate::dialogue::DialogueBox;
use crate::player::{Player, PlayerController};

/// Move the spawn point, refill ammo and play the checkpoint dialogue once.
pub fn reach_checkpoint(
    mut triggers: EventReader<TriggerEntered>,
    mut checkpoint_query: Query<(&Transform, &mut Checkpoint)>,
    mut ammo_query: Query<&mut Ammo, With<Player>>,
    mut spawn_point: ResMut<SpawnPoint>,
    mut dialogue: ResMut<DialogueBox>,
) {
    for trigger in triggers.read() {
        let Ok((transform, mut checkpoint)) = checkpoint_query.get_mut(trigger.trigger) else {
            continue;
        };

        spawn_point.0 = transform.translation.truncate();
        info!("Checkpoint reached, spawn point moved to {:?}", spawn_point.0);

        if let Ok(mut ammo) = ammo_query.get_mut(trigger.player) {
            ammo.refill();
            debug!("Ammo refilled at checkpoint");
        }

        if !checkpoint.dialogue_played && !checkpoint.dialogue.is_empty() {
            if dialogue.is_active() {
                dialogue.end();
            }
            dialogue.start(checkpoint.dialogue.clone());
            checkpoint.dialogue_played = true;
        }
    }
}

/// Kill the player once they fall below the level.
pub fn check_kill_height(
    mut commands: Commands,
    kill_height: Res<KillHeight>,
    player_query: Query<(Entity, &Transform), (With<Player>, Without<Dead>)>,
    mut death_events: Deferred<PlayerDeath>,
) {
    let Ok((entity, transform)) = player_query.get_single() else {
        return;
    };
    if transform.translation.y >= kill_height.0 {
        return;
    }

    info!("Player fell out of the level");
    commands.entity(entity).insert(Dead);
    death_events.schedule(PlayerDeath { player: entity });
}

/// Report the first time the player enters a victory zone.
pub fn enter_victory_zone(
    mut triggers: EventReader<TriggerEntered>,
    mut zone_query: Query<&mut VictoryZone>,
    mut victory_events: Deferred<PlayerEnteredVictoryZone>,
) {
    for trigger in triggers.read() {
        let Ok(mut zone) = zone_query.get_mut(trigger.trigger) else {
            continue;
        };
        if zone.reached {
            continue;
        }
        zone.reached = true;
        victory_events.schedule(PlayerEnteredVictoryZone {
            player: trigger.player,
        });
    }
}

/// Freeze the player and queue the next level.
pub fn celebrate_victory(
    config: Res<GameConfig>,
    mut events: EventReader<PlayerEnteredVictoryZone>,
    mut player_query: Query<&mut PlayerController, With<Player>>,
    mut load_events: Deferred<LoadNextLevel>,
) {
    for event in events.read() {
        if let Ok(mut controller) = player_query.get_mut(event.player) {
            controller.control_enabled = false;
            controller.move_input = 0.0;
        }
        info!("Level complete!");
        load_events.schedule_in(LoadNextLevel, config.victory_delay);
    }
}

/// Switch to the next level in the configured order, or finish the run.
pub fn load_next_level(
    config: Res<GameConfig>,
    mut events: EventReader<LoadNextLevel>,
    mut current_level: ResMut<CurrentLevel>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    // Several queued loads still only advance once
    if events.read().count() == 0 {
        return;
    }

    match config.next_level(&current_level.name) {
        Some(next) => {
            info!("Loading next level: {}", next);
            current_level.name = next.to_string();
            next_state.set(GameState::LevelTransition);
        }
        None => {
            info!("Last level finished, back to the main menu");
            next_state.set(GameState::MainMenu);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::DeferredQueue;
    use crate::dialogue::DialogueEntry;

    fn progression_app() -> App {
        let mut app = App::new();
        app.init_resource::<Time>()
            .insert_resource(GameConfig {
                level_order: vec!["cellar".into(), "caves".into(), "tower".into()],
                ..default()
            })
            .insert_resource(CurrentLevel {
                name: "cellar".into(),
            })
            .insert_resource(SpawnPoint(Vec2::ZERO))
            .insert_resource(KillHeight(-10.0))
            .init_resource::<DialogueBox>()
            .init_resource::<NextState<GameState>>()
            .add_event::<TriggerEntered>()
            .add_event::<PlayerEnteredVictoryZone>()
            .add_event::<LoadNextLevel>()
            .init_resource::<DeferredQueue<PlayerDeath>>()
            .init_resource::<DeferredQueue<PlayerEnteredVictoryZone>>()
            .init_resource::<DeferredQueue<LoadNextLevel>>();
        app
    }

    fn spawn_player(app: &mut App, position: Vec2) -> Entity {
        let tuning = GameConfig::default().player;
        let mut ammo = Ammo::new(1);
        ammo.consume();
        app.world_mut()
            .spawn((
                Player,
                PlayerController::from_tuning(&tuning),
                ammo,
                Transform::from_translation(position.extend(10.0)),
            ))
            .id()
    }

    #[test]
    fn checkpoint_moves_spawn_refills_ammo_and_talks_once() {
        let mut app = progression_app();
        app.add_systems(Update, reach_checkpoint);
        let player = spawn_player(&mut app, Vec2::ZERO);
        let checkpoint = app
            .world_mut()
            .spawn((
                Transform::from_xyz(5.0, 1.0, 1.0),
                Checkpoint {
                    dialogue: vec![DialogueEntry::new("Player", "Safe, for now.")],
                    dialogue_played: false,
                },
            ))
            .id();
        app.world_mut()
            .resource_mut::<DialogueBox>()
            .start(vec![DialogueEntry::new("Old Alchemist", "Wait!")]);

        app.world_mut().send_event(TriggerEntered {
            trigger: checkpoint,
            player,
        });
        app.update();

        assert_eq!(app.world().resource::<SpawnPoint>().0, Vec2::new(5.0, 1.0));
        assert_eq!(app.world().entity(player).get::<Ammo>().unwrap().current, 1);
        let dialogue = app.world().resource::<DialogueBox>();
        assert_eq!(dialogue.current().map(|e| e.speaker.as_str()), Some("Player"));

        app.world_mut().resource_mut::<DialogueBox>().end();
        app.world_mut().send_event(TriggerEntered {
            trigger: checkpoint,
            player,
        });
        app.update();
        assert!(!app.world().resource::<DialogueBox>().is_active());
    }

    #[test]
    fn falling_below_kill_height_kills_once() {
        let mut app = progression_app();
        app.add_systems(Update, check_kill_height);
        let player = spawn_player(&mut app, Vec2::new(0.0, -12.0));

        app.update();
        app.update();

        assert!(app.world().entity(player).contains::<Dead>());
        assert_eq!(app.world().resource::<DeferredQueue<PlayerDeath>>().len(), 1);
    }

    #[test]
    fn victory_freezes_player_and_waits_before_loading() {
        let mut app = progression_app();
        app.add_systems(Update, celebrate_victory);
        let player = spawn_player(&mut app, Vec2::ZERO);

        app.world_mut().send_event(PlayerEnteredVictoryZone { player });
        app.update();

        let controller = app.world().entity(player).get::<PlayerController>().unwrap();
        assert!(!controller.control_enabled);

        let delay = app.world().resource::<GameConfig>().victory_delay;
        let mut queue = app.world_mut().resource_mut::<DeferredQueue<LoadNextLevel>>();
        assert!(queue.drain_due(delay - 0.1).is_empty());
        assert_eq!(queue.drain_due(delay).len(), 1);
    }

    #[test]
    fn several_loads_in_one_frame_advance_once() {
        let mut app = progression_app();
        app.add_systems(Update, load_next_level);

        app.world_mut().send_event(LoadNextLevel);
        app.world_mut().send_event(LoadNextLevel);
        app.update();

        assert_eq!(app.world().resource::<CurrentLevel>().name, "caves");
        assert!(matches!(
            app.world().resource::<NextState<GameState>>(),
            NextState::Pending(GameState::LevelTransition)
        ));
    }

    #[test]
    fn finishing_the_last_level_returns_to_menu() {
        let mut app = progression_app();
        app.add_systems(Update, load_next_level);
        app.world_mut().resource_mut::<CurrentLevel>().name = "tower".into();

        app.world_mut().send_event(LoadNextLevel);
        app.update();

        assert_eq!(app.world().resource::<CurrentLevel>().name, "tower");
        assert!(matches!(
            app.world().resource::<NextState<GameState>>(),
            NextState::Pending(GameState::MainMenu)
        ));
    }
}
