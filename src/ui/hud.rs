//! In-game HUD - health, ammo and potion inventory.

use bevy::prelude::*;

use crate::combat::{Ammo, Health};
use crate::core::{GameState, GameplaySet};
use crate::player::Player;
use crate::potions::{PlayerInventory, PotionEffectType};

/// Marker for HUD root entity.
#[derive(Component)]
pub struct HudRoot;

/// Marker for health bar fill.
#[derive(Component)]
pub struct HealthBar;

#[derive(Component)]
pub struct AmmoText;

/// Inventory count of one potion type.
#[derive(Component)]
pub struct PotionCountText(pub PotionEffectType);

/// Setup HUD systems.
pub fn setup_hud_systems(app: &mut App) {
    app.add_systems(OnEnter(GameState::InGame), spawn_hud)
        .add_systems(OnExit(GameState::InGame), cleanup_hud)
        .add_systems(
            Update,
            (update_health_bar, update_ammo_text, update_potion_counts)
                .in_set(GameplaySet::Presentation),
        );
}

fn spawn_hud(mut commands: Commands) {
    // Top-left corner
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(20.0),
                top: Val::Px(20.0),
                flex_direction: FlexDirection::Column,
                row_gap: Val::Px(6.0),
                ..default()
            },
            HudRoot,
        ))
        .with_children(|parent| {
            spawn_health_bar(parent);

            parent.spawn((
                Text::new(""),
                hud_font(),
                TextColor(Color::srgb(0.85, 0.85, 0.85)),
                AmmoText,
            ));

            parent
                .spawn(Node {
                    flex_direction: FlexDirection::Row,
                    column_gap: Val::Px(14.0),
                    ..default()
                })
                .with_children(|row| {
                    for effect in PotionEffectType::ALL {
                        row.spawn((
                            Text::new(""),
                            hud_font(),
                            TextColor(effect.color()),
                            PotionCountText(effect),
                        ));
                    }
                });
        });
}

fn hud_font() -> TextFont {
    TextFont {
        font_size: 16.0,
        ..default()
    }
}

fn spawn_health_bar(parent: &mut ChildBuilder) {
    parent
        .spawn(Node {
            flex_direction: FlexDirection::Row,
            align_items: AlignItems::Center,
            ..default()
        })
        .with_children(|bar_parent| {
            bar_parent.spawn((
                Text::new("Health"),
                TextFont {
                    font_size: 14.0,
                    ..default()
                },
                TextColor(Color::srgb(0.8, 0.8, 0.8)),
                Node {
                    width: Val::Px(60.0),
                    ..default()
                },
            ));

            // Bar background
            bar_parent
                .spawn((
                    Node {
                        width: Val::Px(150.0),
                        height: Val::Px(12.0),
                        ..default()
                    },
                    BackgroundColor(Color::srgb(0.1, 0.1, 0.1)),
                ))
                .with_children(|bg| {
                    bg.spawn((
                        Node {
                            width: Val::Percent(100.0),
                            height: Val::Percent(100.0),
                            ..default()
                        },
                        BackgroundColor(Color::srgb(0.8, 0.2, 0.2)),
                        HealthBar,
                    ));
                });
        });
}

pub fn ammo_label(ammo: &Ammo) -> String {
    if ammo.infinite {
        "Ammo: \u{221e}".to_string()
    } else {
        format!("Ammo: {}/{}", ammo.current, ammo.max)
    }
}

pub fn potion_label(effect: PotionEffectType, count: usize, key: usize) -> String {
    format!("[{}] {} x{}", key, effect.name(), count)
}

fn update_health_bar(
    player_query: Query<&Health, With<Player>>,
    mut bar_query: Query<&mut Node, With<HealthBar>>,
) {
    let Ok(health) = player_query.get_single() else {
        return;
    };
    let Ok(mut bar) = bar_query.get_single_mut() else {
        return;
    };

    bar.width = Val::Percent(health.fraction() * 100.0);
}

fn update_ammo_text(
    player_query: Query<&Ammo, With<Player>>,
    mut text_query: Query<&mut Text, With<AmmoText>>,
) {
    let Ok(ammo) = player_query.get_single() else {
        return;
    };
    for mut text in text_query.iter_mut() {
        text.0 = ammo_label(ammo);
    }
}

fn update_potion_counts(
    inventory: Res<PlayerInventory>,
    mut text_query: Query<(&mut Text, &PotionCountText)>,
) {
    for (mut text, count_text) in text_query.iter_mut() {
        let effect = count_text.0;
        let key = PotionEffectType::ALL
            .iter()
            .position(|e| *e == effect)
            .map_or(0, |index| index + 1);
        let label = potion_label(effect, inventory.count(effect), key);
        if text.0 != label {
            text.0 = label;
        }
    }
}

fn cleanup_hud(mut commands: Commands, query: Query<Entity, With<HudRoot>>) {
    for entity in query.iter() {
        commands.entity(entity).despawn_recursive();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ammo_label_shows_infinity_while_boosted() {
        let mut ammo = Ammo::new(1);
        assert_eq!(ammo_label(&ammo), "Ammo: 1/1");

        ammo.set_infinite(true);
        assert_eq!(ammo_label(&ammo), "Ammo: \u{221e}");
    }

    #[test]
    fn potion_label_names_key_and_count() {
        assert_eq!(
            potion_label(PotionEffectType::LiquidAether, 2, 2),
            format!("[2] {} x2", PotionEffectType::LiquidAether.name())
        );
    }
}
