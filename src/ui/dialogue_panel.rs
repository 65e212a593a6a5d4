//! Bottom-of-screen panel that shows the active dialogue line.

use bevy::prelude::*;

use crate::core::{GameState, GameplaySet};
use crate::dialogue::DialogueBox;

#[derive(Component)]
pub struct DialoguePanel;

#[derive(Component)]
pub struct SpeakerText;

#[derive(Component)]
pub struct LineText;

pub fn setup_dialogue_panel_systems(app: &mut App) {
    app.add_systems(OnEnter(GameState::InGame), spawn_dialogue_panel)
        .add_systems(OnExit(GameState::InGame), cleanup_dialogue_panel)
        .add_systems(
            Update,
            update_dialogue_panel
                .in_set(GameplaySet::Presentation)
                .after(crate::dialogue::type_dialogue),
        );
}

fn spawn_dialogue_panel(mut commands: Commands) {
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                left: Val::Percent(15.0),
                right: Val::Percent(15.0),
                bottom: Val::Px(30.0),
                min_height: Val::Px(110.0),
                flex_direction: FlexDirection::Column,
                padding: UiRect::all(Val::Px(16.0)),
                row_gap: Val::Px(8.0),
                ..default()
            },
            BackgroundColor(Color::srgba(0.05, 0.05, 0.1, 0.85)),
            Visibility::Hidden,
            DialoguePanel,
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new(""),
                TextFont {
                    font_size: 20.0,
                    ..default()
                },
                TextColor(Color::srgb(0.95, 0.8, 0.4)),
                SpeakerText,
            ));
            parent.spawn((
                Text::new(""),
                TextFont {
                    font_size: 18.0,
                    ..default()
                },
                TextColor(Color::srgb(0.9, 0.9, 0.9)),
                LineText,
            ));
        });
}

fn update_dialogue_panel(
    dialogue: Res<DialogueBox>,
    mut panel_query: Query<&mut Visibility, With<DialoguePanel>>,
    mut speaker_query: Query<&mut Text, (With<SpeakerText>, Without<LineText>)>,
    mut line_query: Query<&mut Text, (With<LineText>, Without<SpeakerText>)>,
) {
    if !dialogue.is_changed() {
        return;
    }

    let visibility = if dialogue.is_active() {
        Visibility::Inherited
    } else {
        Visibility::Hidden
    };
    for mut panel in panel_query.iter_mut() {
        panel.set_if_neq(visibility);
    }

    let speaker = dialogue
        .current()
        .map(|entry| entry.speaker.clone())
        .unwrap_or_default();
    for mut text in speaker_query.iter_mut() {
        text.0.clone_from(&speaker);
    }
    for mut text in line_query.iter_mut() {
        text.0 = dialogue.visible_text().to_string();
    }
}

fn cleanup_dialogue_panel(mut commands: Commands, query: Query<Entity, With<DialoguePanel>>) {
    for entity in query.iter() {
        commands.entity(entity).despawn_recursive();
    }
}
