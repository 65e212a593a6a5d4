//! Rendering plugin - camera, parallax and side-effect screen distortion.

use bevy::prelude::*;

use super::camera::{snap_to_new_player, spawn_camera, track_player};
use super::parallax::update_parallax_layers;
use super::side_effects::{SideEffectPostProcessPlugin, SideEffectVisuals};
use super::visual_config::VisualConfig;
use crate::core::{update_smooth_follow, GameState, GameplaySet};

/// Rendering plugin - sets up the camera and screen effects.
pub struct RenderingPlugin;

impl Plugin for RenderingPlugin {
    fn build(&self, app: &mut App) {
        let config = VisualConfig::load();

        app.insert_resource(ClearColor(config.clear_color()))
            .insert_resource(config)
            .add_plugins(SideEffectPostProcessPlugin)
            .add_systems(Startup, spawn_camera)
            // A fresh run starts with a clean screen
            .add_systems(OnExit(GameState::MainMenu), reset_side_effect_visuals)
            .add_systems(
                Update,
                (
                    snap_to_new_player,
                    track_player.before(update_smooth_follow),
                    update_parallax_layers.after(update_smooth_follow),
                )
                    .in_set(GameplaySet::Presentation),
            );
    }
}

fn reset_side_effect_visuals(mut visuals: ResMut<SideEffectVisuals>) {
    visuals.reset();
}
