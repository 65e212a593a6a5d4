//! UI module - main menu, pause menu, HUD and dialogue panel.

mod dialogue_panel;
mod hud;
mod plugin;

pub use plugin::UiPlugin;
