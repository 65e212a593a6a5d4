//! Level data structures and loading from RON files.

use bevy::prelude::*;
use serde::Deserialize;
use std::collections::HashMap;

use crate::core::data::{read_ron_file, registry_key, ron_files_in};
use crate::core::DataLoadError;
use crate::dialogue::DialogueEntry;
use crate::enemies::EnemyRegistry;
use crate::potions::PotionInstance;

pub const LEVELS_DIR: &str = "assets/data/levels";

/// An axis-aligned box placed in the level, centre and full size.
#[derive(Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct BoxDef {
    pub position: (f32, f32),
    pub size: (f32, f32),
}

impl BoxDef {
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.position.0, self.position.1)
    }

    pub fn half_size(&self) -> Vec2 {
        Vec2::new(self.size.0, self.size.1) * 0.5
    }
}

/// Solid ground or wall block.
#[derive(Deserialize, Clone, Debug)]
pub struct BlockDef {
    pub position: (f32, f32),
    pub size: (f32, f32),
    #[serde(default = "default_block_color")]
    pub color: (f32, f32, f32),
}

impl BlockDef {
    pub fn area(&self) -> BoxDef {
        BoxDef {
            position: self.position,
            size: self.size,
        }
    }
}

fn default_block_color() -> (f32, f32, f32) {
    (0.35, 0.3, 0.25)
}

/// A potion lying in the level.
#[derive(Deserialize, Clone, Debug)]
pub struct PotionSpawnDef {
    pub position: (f32, f32),
    pub potion: PotionInstance,
}

/// An enemy and its optional patrol route.
#[derive(Deserialize, Clone, Debug)]
pub struct EnemySpawnDef {
    /// Enemy type, the file stem of its definition
    pub kind: String,
    pub position: (f32, f32),
    #[serde(default)]
    pub patrol: Option<((f32, f32), (f32, f32))>,
}

/// A character the player can talk to.
#[derive(Deserialize, Clone, Debug)]
pub struct NpcDef {
    pub name: String,
    pub position: (f32, f32),
    pub size: (f32, f32),
    pub dialogue: Vec<DialogueEntry>,
}

impl NpcDef {
    pub fn area(&self) -> BoxDef {
        BoxDef {
            position: self.position,
            size: self.size,
        }
    }
}

/// Moves the spawn point and refills ammo.
#[derive(Deserialize, Clone, Debug)]
pub struct CheckpointDef {
    pub position: (f32, f32),
    pub size: (f32, f32),
    #[serde(default)]
    pub dialogue: Vec<DialogueEntry>,
}

impl CheckpointDef {
    pub fn area(&self) -> BoxDef {
        BoxDef {
            position: self.position,
            size: self.size,
        }
    }
}

/// Area with its own background music.
#[derive(Deserialize, Clone, Debug)]
pub struct MusicZoneDef {
    pub position: (f32, f32),
    pub size: (f32, f32),
    pub track: String,
}

impl MusicZoneDef {
    pub fn area(&self) -> BoxDef {
        BoxDef {
            position: self.position,
            size: self.size,
        }
    }
}

/// Background layer scrolling with the camera.
#[derive(Deserialize, Clone, Debug)]
pub struct ParallaxDef {
    pub position: (f32, f32),
    pub size: (f32, f32),
    pub movement_scale: (f32, f32),
    pub color: (f32, f32, f32),
    /// Z depth, lower is further back
    #[serde(default = "default_parallax_depth")]
    pub depth: f32,
}

impl ParallaxDef {
    pub fn area(&self) -> BoxDef {
        BoxDef {
            position: self.position,
            size: self.size,
        }
    }
}

fn default_parallax_depth() -> f32 {
    -50.0
}

/// Level definition as stored in the RON file.
#[derive(Deserialize, Clone, Debug)]
pub struct LevelDefinition {
    pub name: String,
    pub player_start: (f32, f32),
    /// Falling below this height kills the player
    #[serde(default = "default_kill_height")]
    pub kill_height: f32,
    #[serde(default)]
    pub music: Option<String>,
    #[serde(default)]
    pub platforms: Vec<BlockDef>,
    #[serde(default)]
    pub walls: Vec<BlockDef>,
    #[serde(default)]
    pub potions: Vec<PotionSpawnDef>,
    #[serde(default)]
    pub enemies: Vec<EnemySpawnDef>,
    #[serde(default)]
    pub npcs: Vec<NpcDef>,
    #[serde(default)]
    pub checkpoints: Vec<CheckpointDef>,
    #[serde(default)]
    pub music_zones: Vec<MusicZoneDef>,
    #[serde(default)]
    pub victory_zone: Option<BoxDef>,
    #[serde(default)]
    pub parallax: Vec<ParallaxDef>,
}

fn default_kill_height() -> f32 {
    -20.0
}

impl LevelDefinition {
    pub fn player_start(&self) -> Vec2 {
        Vec2::new(self.player_start.0, self.player_start.1)
    }

    /// Check that every zone and block has a usable shape.
    pub fn validate_shapes(&self) -> Result<(), DataLoadError> {
        let invalid = |what: &'static str, details: String| DataLoadError::InvalidShape {
            level: self.name.clone(),
            what,
            details,
        };

        let blocks = self.platforms.iter().chain(&self.walls).map(|b| ("block", b.area()));
        let zones = self
            .npcs
            .iter()
            .map(|n| ("npc zone", n.area()))
            .chain(self.checkpoints.iter().map(|c| ("checkpoint", c.area())))
            .chain(self.music_zones.iter().map(|m| ("music zone", m.area())))
            .chain(self.victory_zone.iter().map(|v| ("victory zone", *v)));

        for (what, area) in blocks.chain(zones) {
            if area.size.0 <= 0.0 || area.size.1 <= 0.0 {
                return Err(invalid(what, format!("size {:?} at {:?}", area.size, area.position)));
            }
        }

        for enemy in &self.enemies {
            if let Some((start, end)) = enemy.patrol {
                if start == end {
                    return Err(invalid(
                        "patrol",
                        format!("'{}' patrols a single point {:?}", enemy.kind, start),
                    ));
                }
            }
        }

        if self.kill_height >= self.player_start.1 {
            return Err(invalid(
                "kill height",
                format!("{} is not below the player start", self.kill_height),
            ));
        }

        Ok(())
    }

    /// Check that every enemy kind has a definition.
    pub fn validate_enemies(&self, enemies: &EnemyRegistry) -> Result<(), DataLoadError> {
        match self.enemies.iter().find(|e| enemies.get(&e.kind).is_none()) {
            Some(unknown) => Err(DataLoadError::UnknownEnemyType {
                level: self.name.clone(),
                enemy_type: unknown.kind.clone(),
            }),
            None => Ok(()),
        }
    }
}

/// Resource storing all loaded level definitions.
#[derive(Resource, Default)]
pub struct LevelRegistry {
    pub levels: HashMap<String, LevelDefinition>,
}

impl LevelRegistry {
    /// Get a level by name.
    pub fn get(&self, name: &str) -> Option<&LevelDefinition> {
        self.levels.get(name)
    }

    /// Load every valid level in a directory.
    pub fn load_from(dir: &str) -> Result<Self, DataLoadError> {
        let mut registry = Self::default();
        for path in ron_files_in(dir)? {
            let key = registry_key(&path);
            let level = read_ron_file::<LevelDefinition>(&path)
                .and_then(|level| level.validate_shapes().map(|_| level));
            match level {
                Ok(level) => {
                    info!("Loaded level: {} ({})", level.name, key);
                    registry.levels.insert(key, level);
                }
                Err(e) => error!("Skipping level {:?}: {}", path, e),
            }
        }
        Ok(registry)
    }
}

/// Resource indicating which level to load.
#[derive(Resource)]
pub struct CurrentLevel {
    pub name: String,
}

impl Default for CurrentLevel {
    fn default() -> Self {
        Self {
            name: "level1".to_string(),
        }
    }
}

/// Load all level definitions from assets/data/levels/.
pub fn load_level_definitions(mut commands: Commands) {
    let registry = match LevelRegistry::load_from(LEVELS_DIR) {
        Ok(registry) => registry,
        Err(e) => {
            warn!("Levels unavailable: {}", e);
            LevelRegistry::default()
        }
    };

    info!("Loaded {} level(s)", registry.levels.len());
    commands.insert_resource(registry);
}
