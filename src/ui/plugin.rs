//! UI plugin - menus, HUD and the dialogue panel.

use bevy::prelude::*;

use crate::core::{GameConfig, GameState, PlayState};
use crate::world::CurrentLevel;
use super::{dialogue_panel, hud};

/// UI plugin - handles all user interface.
pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        hud::setup_hud_systems(app);
        dialogue_panel::setup_dialogue_panel_systems(app);

        app
            // Shared button feedback
            .add_systems(Update, highlight_buttons)

            // Main menu
            .add_systems(OnEnter(GameState::MainMenu), setup_main_menu)
            .add_systems(Update, main_menu_input.run_if(in_state(GameState::MainMenu)))
            .add_systems(OnExit(GameState::MainMenu), cleanup_menu::<MainMenuUi>)

            // Pause menu
            .add_systems(OnEnter(PlayState::Paused), setup_pause_menu)
            .add_systems(Update, pause_menu_input.run_if(in_state(PlayState::Paused)))
            .add_systems(OnExit(PlayState::Paused), cleanup_menu::<PauseMenuUi>);
    }
}

/// Marker for main menu UI entities.
#[derive(Component)]
struct MainMenuUi;

/// Marker for pause menu UI entities.
#[derive(Component)]
struct PauseMenuUi;

/// Marker for menu buttons.
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq)]
enum MenuButton {
    NewGame,
    Quit,
    Resume,
    MainMenu,
}

const BUTTON_IDLE: Color = Color::srgb(0.15, 0.15, 0.2);
const BUTTON_HOVERED: Color = Color::srgb(0.25, 0.25, 0.3);
const BUTTON_PRESSED: Color = Color::srgb(0.3, 0.3, 0.35);

/// Full-screen column that centres its children.
fn menu_overlay(background: Color) -> (Node, BackgroundColor) {
    (
        Node {
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            flex_direction: FlexDirection::Column,
            justify_content: JustifyContent::Center,
            align_items: AlignItems::Center,
            ..default()
        },
        BackgroundColor(background),
    )
}

fn menu_text(text: &str, size: f32, color: Color, gap_below: f32) -> impl Bundle {
    (
        Text::new(text),
        TextFont {
            font_size: size,
            ..default()
        },
        TextColor(color),
        Node {
            margin: UiRect::bottom(Val::Px(gap_below)),
            ..default()
        },
    )
}

fn setup_main_menu(mut commands: Commands) {
    commands
        .spawn((menu_overlay(Color::srgb(0.06, 0.04, 0.1)), MainMenuUi))
        .with_children(|parent| {
            parent.spawn(menu_text(
                "POTION PLATFORMER",
                72.0,
                Color::srgb(0.55, 0.85, 0.95),
                30.0,
            ));
            parent.spawn(menu_text(
                "Every sip helps a little less",
                24.0,
                Color::srgb(0.5, 0.5, 0.55),
                60.0,
            ));

            spawn_menu_button(parent, "New Game", MenuButton::NewGame);
            spawn_menu_button(parent, "Quit", MenuButton::Quit);
        });
}

fn spawn_menu_button(parent: &mut ChildBuilder, text: &str, button: MenuButton) {
    parent
        .spawn((
            Button,
            Node {
                width: Val::Px(200.0),
                height: Val::Px(50.0),
                margin: UiRect::all(Val::Px(10.0)),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
            BackgroundColor(BUTTON_IDLE),
            button,
        ))
        .with_children(|button| {
            button.spawn((
                Text::new(text),
                TextFont {
                    font_size: 24.0,
                    ..default()
                },
                TextColor(Color::srgb(0.8, 0.8, 0.85)),
            ));
        });
}

fn highlight_buttons(
    mut interaction_query: Query<
        (&Interaction, &mut BackgroundColor),
        (Changed<Interaction>, With<MenuButton>),
    >,
) {
    for (interaction, mut bg_color) in interaction_query.iter_mut() {
        *bg_color = match interaction {
            Interaction::Pressed => BUTTON_PRESSED,
            Interaction::Hovered => BUTTON_HOVERED,
            Interaction::None => BUTTON_IDLE,
        }
        .into();
    }
}

/// Buttons pressed this frame.
fn pressed_buttons(
    query: &Query<(&Interaction, &MenuButton), Changed<Interaction>>,
) -> Vec<MenuButton> {
    query
        .iter()
        .filter(|(interaction, _)| **interaction == Interaction::Pressed)
        .map(|(_, button)| *button)
        .collect()
}

/// Start a fresh run from the first level, or quit.
fn main_menu_input(
    interaction_query: Query<(&Interaction, &MenuButton), Changed<Interaction>>,
    config: Res<GameConfig>,
    mut current_level: ResMut<CurrentLevel>,
    mut next_state: ResMut<NextState<GameState>>,
    mut exit: EventWriter<AppExit>,
) {
    for button in pressed_buttons(&interaction_query) {
        match button {
            MenuButton::NewGame => {
                match config.first_level() {
                    Some(first) => current_level.name = first.to_string(),
                    None => warn!("Level order is empty, starting {}", current_level.name),
                }
                next_state.set(GameState::InGame);
            }
            MenuButton::Quit => {
                exit.send(AppExit::Success);
            }
            _ => {}
        }
    }
}

fn setup_pause_menu(mut commands: Commands) {
    commands
        .spawn((menu_overlay(Color::srgba(0.0, 0.0, 0.0, 0.7)), PauseMenuUi))
        .with_children(|parent| {
            parent.spawn(menu_text("PAUSED", 48.0, Color::srgb(0.8, 0.8, 0.85), 40.0));

            spawn_menu_button(parent, "Resume", MenuButton::Resume);
            spawn_menu_button(parent, "Main Menu", MenuButton::MainMenu);
        });
}

fn pause_menu_input(
    interaction_query: Query<(&Interaction, &MenuButton), Changed<Interaction>>,
    mut next_play_state: ResMut<NextState<PlayState>>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    for button in pressed_buttons(&interaction_query) {
        match button {
            MenuButton::Resume => next_play_state.set(PlayState::Running),
            // Leaving InGame removes the pause sub-state and its menu
            MenuButton::MainMenu => next_state.set(GameState::MainMenu),
            _ => {}
        }
    }
}

fn cleanup_menu<M: Component>(mut commands: Commands, query: Query<Entity, With<M>>) {
    for entity in query.iter() {
        commands.entity(entity).despawn_recursive();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn menu_app(config: GameConfig) -> App {
        let mut app = App::new();
        app.insert_resource(config)
            .insert_resource(CurrentLevel {
                name: "level2".to_string(),
            })
            .init_resource::<NextState<GameState>>()
            .add_event::<AppExit>()
            .add_systems(Update, main_menu_input);
        app
    }

    #[test]
    fn new_game_restarts_from_first_level() {
        let mut app = menu_app(GameConfig::default());
        app.world_mut()
            .spawn((Interaction::Pressed, MenuButton::NewGame));
        app.update();

        assert_eq!(app.world().resource::<CurrentLevel>().name, "level1");
        assert!(matches!(
            app.world().resource::<NextState<GameState>>(),
            NextState::Pending(GameState::InGame)
        ));
    }

    #[test]
    fn hovering_does_not_start_a_game() {
        let mut app = menu_app(GameConfig::default());
        app.world_mut()
            .spawn((Interaction::Hovered, MenuButton::NewGame));
        app.update();

        assert_eq!(app.world().resource::<CurrentLevel>().name, "level2");
        assert!(matches!(
            app.world().resource::<NextState<GameState>>(),
            NextState::Unchanged
        ));
    }
}
