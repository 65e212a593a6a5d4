//! Parallax background layers that scroll slower than the camera and wrap
//! horizontally.

use bevy::prelude::*;

use super::camera::MainCamera;

/// A background layer moving at a fraction of the camera speed.
#[derive(Component, Debug, Clone)]
pub struct ParallaxLayer {
    /// Where the layer was placed in the level
    pub start: Vec2,
    /// 0.0 is fixed in the world, 1.0 is glued to the camera
    pub movement_scale: Vec2,
    /// Width after which the layer repeats
    pub width: f32,
}

/// Layer position for a given camera position.
///
/// Once the camera is a full width away from the layer, the layer jumps by
/// the truncated remainder so it keeps tiling under the camera.
pub fn parallax_position(layer: &ParallaxLayer, camera: Vec2) -> Vec2 {
    let mut position = layer.start + (camera - layer.start) * layer.movement_scale;

    if layer.width > 0.0 && (camera.x - position.x).abs() >= layer.width {
        position.x += (camera.x - position.x) % layer.width;
    }
    position
}

/// Move parallax layers after the camera has moved this frame.
pub fn update_parallax_layers(
    camera_query: Query<&Transform, With<MainCamera>>,
    mut layer_query: Query<(&mut Transform, &ParallaxLayer), Without<MainCamera>>,
) {
    let Ok(camera_transform) = camera_query.get_single() else {
        return;
    };
    let camera = camera_transform.translation.truncate();

    for (mut transform, layer) in layer_query.iter_mut() {
        let position = parallax_position(layer, camera);
        transform.translation.x = position.x;
        transform.translation.y = position.y;
    }
}
