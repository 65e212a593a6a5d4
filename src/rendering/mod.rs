//! Rendering module - camera follow, parallax and potion side-effect visuals.

mod camera;
mod parallax;
mod plugin;
mod side_effects;
pub mod visual_config;

pub use camera::MainCamera;
pub use parallax::{parallax_position, ParallaxLayer};
pub use plugin::RenderingPlugin;
pub use side_effects::{ScreenEffect, SideEffectSettings, SideEffectVisuals};
pub use visual_config::VisualConfig;
