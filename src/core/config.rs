//! Gameplay tuning loaded from assets/data/config/game.ron.
//!
//! Every value has a default so a partial (or missing) file still yields a
//! playable game.

use bevy::prelude::*;
use serde::Deserialize;

use super::data::read_ron_file;
use super::error::DataLoadError;

/// Path of the gameplay config file.
pub const GAME_CONFIG_PATH: &str = "assets/data/config/game.ron";

/// Player movement, health and ammo tuning.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    /// Max horizontal speed
    pub max_speed: f32,
    /// Initial jump velocity at the start of a jump
    pub jump_take_off_speed: f32,
    /// Multiplier applied to the take-off speed
    pub jump_modifier: f32,
    /// Factor applied to upward velocity when jump is released early
    pub jump_deceleration: f32,
    /// Downward acceleration in units per second squared
    pub gravity: f32,
    /// Extra gravity scale while falling
    pub gravity_modifier: f32,
    /// How far past the body edge a wall is detected
    pub wall_check_distance: f32,
    pub wall_jump_horizontal_velocity: f32,
    pub wall_jump_vertical_velocity: f32,
    /// Seconds between two wall jumps
    pub wall_jump_cooldown: f32,
    /// Vertical velocity after stomping an enemy
    pub bounce_velocity: f32,
    pub max_hp: u32,
    pub max_ammo: u32,
    /// Invulnerability window after taking a hit
    pub hurt_invincibility: f32,
    /// Collider half extents (x, y)
    pub half_size: (f32, f32),
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            max_speed: 7.0,
            jump_take_off_speed: 7.0,
            jump_modifier: 1.5,
            jump_deceleration: 0.5,
            gravity: 9.81,
            gravity_modifier: 1.0,
            wall_check_distance: 0.1,
            wall_jump_horizontal_velocity: 7.0,
            wall_jump_vertical_velocity: 7.0,
            wall_jump_cooldown: 0.5,
            bounce_velocity: 6.0,
            max_hp: 3,
            max_ammo: 1,
            hurt_invincibility: 1.0,
            half_size: (0.35, 0.5),
        }
    }
}

/// Potion effects and side-effect escalation tuning.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PotionTuning {
    /// Hit points restored by Blue Wonder
    pub blue_wonder_heal: u32,
    /// Seconds of infinite ammo granted by Blue Wonder
    pub infinite_ammo_duration: f32,
    /// Speed and jump multiplier of Liquid Aether
    pub aether_multiplier: f32,
    pub aether_base_duration: f32,
    pub aether_min_duration: f32,
    /// Duration lost per Liquid Aether already consumed
    pub aether_duration_step: f32,
    /// Speed multiplier of the slowdown after Liquid Aether wears off
    pub aether_slow_factor: f32,
    pub aether_slow_base_duration: f32,
    pub aether_slow_per_intensity: f32,
    /// Liquid Aether uses before the slowdown starts growing
    pub aether_slow_safe_uses: u32,
    /// Seconds of invulnerability and phasing granted by Phantom Brew
    pub phantom_duration: f32,
    /// Total potions that can be drunk before permanent side effects
    pub safe_total_uses: u32,
    pub contrast_per_intensity: f32,
    pub color_filter_loss_per_intensity: f32,
    pub vignette_per_intensity: f32,
    pub death_chance_per_intensity: f32,
    pub speed_loss_per_intensity: f32,
    pub distortion_seconds_per_intensity: f32,
    /// Chance per frame that distorted input stutters
    pub stutter_chance: f32,
    /// Animation frames per second of potion pickups
    pub frame_rate: f32,
}

impl Default for PotionTuning {
    fn default() -> Self {
        Self {
            blue_wonder_heal: 2,
            infinite_ammo_duration: 10.0,
            aether_multiplier: 1.5,
            aether_base_duration: 10.0,
            aether_min_duration: 3.0,
            aether_duration_step: 1.0,
            aether_slow_factor: 0.5,
            aether_slow_base_duration: 3.0,
            aether_slow_per_intensity: 2.0,
            aether_slow_safe_uses: 5,
            phantom_duration: 8.0,
            safe_total_uses: 3,
            contrast_per_intensity: 10.0,
            color_filter_loss_per_intensity: 0.1,
            vignette_per_intensity: 0.3,
            death_chance_per_intensity: 0.1,
            speed_loss_per_intensity: 0.01,
            distortion_seconds_per_intensity: 5.0,
            stutter_chance: 0.1,
            frame_rate: 12.0,
        }
    }
}

/// All gameplay tuning.
#[derive(Resource, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub player: PlayerTuning,
    pub potions: PotionTuning,
    /// Level names in play order
    pub level_order: Vec<String>,
    /// Seconds between reaching the victory zone and loading the next level
    pub victory_delay: f32,
    /// Seconds between death and respawn
    pub respawn_delay: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            player: PlayerTuning::default(),
            potions: PotionTuning::default(),
            level_order: vec!["level1".to_string(), "level2".to_string()],
            victory_delay: 1.5,
            respawn_delay: 2.0,
        }
    }
}

impl GameConfig {
    /// Load config from disk.
    pub fn load() -> Result<Self, DataLoadError> {
        read_ron_file(GAME_CONFIG_PATH)
    }

    /// Level that follows `current` in the play order.
    pub fn next_level(&self, current: &str) -> Option<&str> {
        let index = self.level_order.iter().position(|name| name == current)?;
        self.level_order.get(index + 1).map(String::as_str)
    }

    /// First level of a new run.
    pub fn first_level(&self) -> Option<&str> {
        self.level_order.first().map(String::as_str)
    }

    /// Load config, falling back to defaults when the file is missing or broken.
    pub fn load_or_default() -> Self {
        match Self::load() {
            Ok(config) => {
                info!("Loaded game config from {}", GAME_CONFIG_PATH);
                config
            }
            Err(e) => {
                warn!("{}. Using default game config.", e);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::data::parse_ron;

    #[test]
    fn partial_config_keeps_defaults() {
        let config: GameConfig = parse_ron(
            r#"(
                player: (max_speed: 9.0),
                level_order: ["intro", "caves"],
            )"#,
            "inline",
        )
        .unwrap();

        assert_eq!(config.player.max_speed, 9.0);
        assert_eq!(config.player.jump_take_off_speed, 7.0);
        assert_eq!(config.potions.safe_total_uses, 3);
        assert_eq!(config.level_order, vec!["intro", "caves"]);
    }

    #[test]
    fn next_level_follows_order() {
        let config = GameConfig::default();
        assert_eq!(config.first_level(), Some("level1"));
        assert_eq!(config.next_level("level1"), Some("level2"));
        assert_eq!(config.next_level("level2"), None);
        assert_eq!(config.next_level("bonus"), None);
    }
}
