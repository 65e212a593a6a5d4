//! Visual configuration loaded from external RON file.
//!
//! Allows tweaking camera and screen-effect parameters without recompilation.

use bevy::prelude::*;
use serde::Deserialize;

use crate::core::data::read_ron_file;

pub const VISUAL_CONFIG_PATH: &str = "assets/data/rendering/visual_config.ron";

/// Visual configuration loaded from assets/data/rendering/visual_config.ron.
#[derive(Resource, Clone, Debug, Deserialize)]
#[serde(default)]
pub struct VisualConfig {
    // Camera
    /// World units per screen pixel
    pub camera_scale: f32,
    pub camera_follow_speed: f32,
    pub camera_offset: (f32, f32),
    // Side-effect vignette shape
    pub vignette_smoothness: f32,
    pub vignette_roundness: f32,
    // Background
    pub clear_color: (f32, f32, f32),
}

impl Default for VisualConfig {
    fn default() -> Self {
        Self {
            camera_scale: 1.0 / 48.0,
            camera_follow_speed: 5.0,
            camera_offset: (0.0, 1.5),
            vignette_smoothness: 0.7,
            vignette_roundness: 0.9,
            clear_color: (0.16, 0.18, 0.26),
        }
    }
}

impl VisualConfig {
    /// Load visual config from RON file.
    pub fn load() -> Self {
        match read_ron_file(VISUAL_CONFIG_PATH) {
            Ok(config) => {
                info!("Loaded visual config from {}", VISUAL_CONFIG_PATH);
                config
            }
            Err(e) => {
                warn!("{}. Using default visuals.", e);
                Self::default()
            }
        }
    }

    pub fn clear_color(&self) -> Color {
        Color::srgb(self.clear_color.0, self.clear_color.1, self.clear_color.2)
    }
}
