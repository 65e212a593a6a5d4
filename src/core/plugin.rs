//! Core plugin that sets up game states, events, and fundamental systems.

use bevy::prelude::*;

use super::config::GameConfig;
use super::events::*;
use super::scheduler::DeferredEventAppExt;
use super::sets::{configure_gameplay_sets, GameplaySet};
use super::states::*;
use super::tween::update_smooth_follow;

/// Core plugin - must be added first as other plugins depend on it.
///
/// This plugin sets up:
/// - Game states (Loading, MainMenu, InGame, ...)
/// - Gameplay events and their deferred queues
/// - Gameplay system sets
/// - Gameplay config
pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        configure_gameplay_sets(app);

        app
            // Config is needed by almost every plugin, load it eagerly
            .insert_resource(GameConfig::load_or_default())

            // Initialize game states
            .init_state::<GameState>()
            .add_sub_state::<PlayState>()

            // Direct events
            .add_event::<DamageEvent>()

            // Deferred events
            .add_deferred_event::<PlayerJumped>()
            .add_deferred_event::<PlayerLanded>()
            .add_deferred_event::<PlayerStopJump>()
            .add_deferred_event::<HealthIsZero>()
            .add_deferred_event::<PlayerDeath>()
            .add_deferred_event::<PlayerSpawn>()
            .add_deferred_event::<EnemyDeath>()
            .add_deferred_event::<PotionCollected>()
            .add_deferred_event::<PlayerEnteredVictoryZone>()
            .add_deferred_event::<LoadNextLevel>()

            // Loading state - data files are read at Startup, so move on
            .add_systems(OnEnter(GameState::Loading), transition_to_main_menu)

            // Between two levels - go straight back into the game
            .add_systems(OnEnter(GameState::LevelTransition), transition_to_in_game)

            // Pause/unpause with Escape key
            .add_systems(
                Update,
                handle_pause_input.run_if(in_state(GameState::InGame)),
            )
            .add_systems(OnEnter(PlayState::Paused), pause_virtual_time)
            .add_systems(OnExit(PlayState::Paused), resume_virtual_time)

            // Smoothed followers (camera)
            .add_systems(Update, update_smooth_follow.in_set(GameplaySet::Presentation));
    }
}

/// Immediately transition from Loading to MainMenu.
fn transition_to_main_menu(mut next_state: ResMut<NextState<GameState>>) {
    next_state.set(GameState::MainMenu);
}

/// Re-enter gameplay after the previous level has been cleaned up.
fn transition_to_in_game(mut next_state: ResMut<NextState<GameState>>) {
    next_state.set(GameState::InGame);
}

/// Handle Escape key to pause/unpause the game.
fn handle_pause_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    current_state: Res<State<PlayState>>,
    mut next_state: ResMut<NextState<PlayState>>,
) {
    if keyboard.just_pressed(KeyCode::Escape) {
        match current_state.get() {
            PlayState::Running => next_state.set(PlayState::Paused),
            PlayState::Paused => next_state.set(PlayState::Running),
        }
    }
}

/// Freeze timers and deferred events while paused.
fn pause_virtual_time(mut time: ResMut<Time<Virtual>>) {
    time.pause();
}

fn resume_virtual_time(mut time: ResMut<Time<Virtual>>) {
    time.unpause();
}
