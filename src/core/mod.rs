//! Core game module - states, events, scheduling and config.
//!
//! This module provides the foundation that all other game systems build upon.

mod config;
pub mod data;
mod error;
mod events;
mod plugin;
mod scheduler;
mod sets;
mod states;
mod tween;

pub use config::{GameConfig, PlayerTuning, PotionTuning};
pub use error::DataLoadError;
pub use events::*;
pub use plugin::CorePlugin;
pub use scheduler::{Deferred, DeferredEventAppExt, DeferredQueue};
pub use sets::GameplaySet;
pub use states::*;
pub use tween::*;
