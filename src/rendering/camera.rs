//! Game camera: orthographic 2D view that glides after the player.

use bevy::prelude::*;

use super::side_effects::SideEffectSettings;
use super::visual_config::VisualConfig;
use crate::core::SmoothFollow;
use crate::player::Player;

/// Marker for the single game camera.
#[derive(Component)]
pub struct MainCamera;

/// Spawn the camera. It lives for the whole session so menus render too.
pub fn spawn_camera(mut commands: Commands, config: Res<VisualConfig>) {
    commands.spawn((
        Camera2d,
        OrthographicProjection {
            scale: config.camera_scale,
            ..OrthographicProjection::default_2d()
        },
        SmoothFollow::new(
            config.camera_follow_speed,
            Vec2::new(config.camera_offset.0, config.camera_offset.1),
        ),
        SideEffectSettings::from_config(&config),
        MainCamera,
    ));
}

/// Point the camera's follow target at the player.
pub fn track_player(
    player_query: Query<&Transform, With<Player>>,
    mut camera_query: Query<&mut SmoothFollow, With<MainCamera>>,
) {
    let Ok(mut follow) = camera_query.get_single_mut() else {
        return;
    };
    follow.target = player_query
        .get_single()
        .ok()
        .map(|transform| transform.translation.truncate());
}

/// Jump straight to a freshly spawned player instead of gliding across the level.
pub fn snap_to_new_player(
    player_query: Query<&Transform, Added<Player>>,
    mut camera_query: Query<(&mut Transform, &SmoothFollow), (With<MainCamera>, Without<Player>)>,
) {
    let Ok(player_transform) = player_query.get_single() else {
        return;
    };
    let Ok((mut camera_transform, follow)) = camera_query.get_single_mut() else {
        return;
    };
    let target = player_transform.translation.truncate() + follow.offset;
    camera_transform.translation.x = target.x;
    camera_transform.translation.y = target.y;
}
