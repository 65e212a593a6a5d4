//! Enemy data loading from RON files.

use bevy::prelude::*;
use serde::Deserialize;
use std::collections::HashMap;

use super::components::{Boss, EnemyStats};
use crate::core::data::{read_ron_file, registry_key, ron_files_in};
use crate::core::DataLoadError;
use crate::potions::PotionEffectType;

pub const ENEMIES_DIR: &str = "assets/data/enemies";

/// Boss configuration for an enemy type.
#[derive(Deserialize, Clone, Debug)]
pub struct BossConfig {
    #[serde(default = "default_phase_threshold")]
    pub phase_threshold: f32,
    #[serde(default = "default_special_attack_cooldown")]
    pub special_attack_cooldown: f32,
    #[serde(default = "default_projectile_count")]
    pub projectile_count: u32,
}

fn default_phase_threshold() -> f32 {
    0.5
}

fn default_special_attack_cooldown() -> f32 {
    5.0
}

fn default_projectile_count() -> u32 {
    8
}

impl BossConfig {
    pub fn to_boss(&self) -> Boss {
        Boss {
            phase_threshold: self.phase_threshold,
            special_attack_cooldown: self.special_attack_cooldown,
            projectile_count: self.projectile_count,
            attack_timer: 0.0,
            phase_two: false,
        }
    }
}

/// Enemy definition loaded from RON file.
#[derive(Deserialize, Clone, Debug)]
pub struct EnemyDefinition {
    pub name: String,
    pub max_health: u32,
    pub move_speed: f32,
    pub size: (f32, f32),
    #[serde(default = "default_color")]
    pub color: (f32, f32, f32),
    /// Potion dropped on death; `None` drops a random type
    #[serde(default)]
    pub drop: Option<PotionEffectType>,
    #[serde(default)]
    pub boss: Option<BossConfig>,
}

fn default_color() -> (f32, f32, f32) {
    (0.8, 0.3, 0.3)
}

impl EnemyDefinition {
    /// Convert to EnemyStats component.
    pub fn to_stats(&self) -> EnemyStats {
        EnemyStats {
            move_speed: self.move_speed,
            half_size: Vec2::new(self.size.0, self.size.1) * 0.5,
        }
    }
}

/// Resource holding all loaded enemy definitions.
#[derive(Resource, Default)]
pub struct EnemyRegistry {
    pub definitions: HashMap<String, EnemyDefinition>,
}

impl EnemyRegistry {
    /// Get an enemy definition by type name.
    pub fn get(&self, enemy_type: &str) -> Option<&EnemyDefinition> {
        self.definitions.get(enemy_type)
    }

    /// Load every definition in a directory, skipping files that fail.
    pub fn load_from(dir: &str) -> Result<Self, DataLoadError> {
        let mut registry = Self::default();
        for path in ron_files_in(dir)? {
            let enemy_type = registry_key(&path);
            match read_ron_file::<EnemyDefinition>(&path) {
                Ok(definition) => {
                    info!("Loaded enemy definition: {} ({})", definition.name, enemy_type);
                    registry.definitions.insert(enemy_type, definition);
                }
                Err(e) => error!("Failed to load enemy definition: {}", e),
            }
        }
        Ok(registry)
    }
}

/// Load all enemy definitions from the assets/data/enemies/ directory.
pub fn load_enemy_definitions(mut commands: Commands) {
    let registry = match EnemyRegistry::load_from(ENEMIES_DIR) {
        Ok(registry) => registry,
        Err(e) => {
            warn!("Enemy definitions unavailable: {}", e);
            EnemyRegistry::default()
        }
    };

    info!("Loaded {} enemy definitions", registry.definitions.len());
    commands.insert_resource(registry);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::data::parse_ron;

    #[test]
    fn parses_boss_definition_with_defaults() {
        let definition: EnemyDefinition = parse_ron(
            r#"(
                name: "Potion Golem",
                max_health: 10,
                move_speed: 1.0,
                size: (2.0, 2.0),
                drop: Some(PhantomBrew),
                boss: Some((special_attack_cooldown: 4.0)),
            )"#,
            "boss",
        )
        .unwrap();

        assert_eq!(definition.max_health, 10);
        assert_eq!(definition.drop, Some(PotionEffectType::PhantomBrew));
        let boss = definition.boss.unwrap().to_boss();
        assert_eq!(boss.special_attack_cooldown, 4.0);
        assert_eq!(boss.projectile_count, 8);
        assert_eq!(boss.phase_threshold, 0.5);
    }

    #[test]
    fn stats_use_half_extents() {
        let definition: EnemyDefinition = parse_ron(
            r#"(name: "Slime", max_health: 1, move_speed: 1.5, size: (0.8, 0.6))"#,
            "slime",
        )
        .unwrap();

        let stats = definition.to_stats();
        assert_eq!(stats.half_size, Vec2::new(0.4, 0.3));
        assert!(definition.boss.is_none());
        assert!(definition.drop.is_none());
    }
}
