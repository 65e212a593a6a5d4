//! Potion Platformer - Entry Point
//!
//! A 2D platformer where every potion helps a little less and hurts a little more.
//!
//! Controls:
//! - A/D or arrows: Move
//! - Space: Jump (press again against a wall to wall jump)
//! - Q: Shoot
//! - E / Enter: Talk, advance dialogue
//! - 1/2/3: Drink Blue Wonder / Liquid Aether / Phantom Brew
//! - Escape: Pause/Unpause

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

fn main() {
    App::new()
        // Bevy default plugins
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Potion Platformer".to_string(),
                resolution: (1280.0, 720.0).into(),
                ..default()
            }),
            ..default()
        }))

        // Physics
        .add_plugins(RapierPhysicsPlugin::<NoUserData>::default())

        // Audio
        .add_plugins(bevy_kira_audio::AudioPlugin)

        // Our game plugin
        .add_plugins(potion_platformer::PotionPlatformerPlugin)

        .run();
}
