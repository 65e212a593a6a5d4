//! World components, resources and trigger events.

use bevy::prelude::*;

use crate::dialogue::DialogueEntry;

/// Marker for everything that belongs to the current level and is despawned
/// with it.
#[derive(Component)]
pub struct LevelEntity;

/// Solid block the player can wall jump off.
#[derive(Component)]
pub struct Wall;

/// Collision groups.
pub mod layers {
    use bevy_rapier2d::prelude::Group;

    pub const PLAYER: Group = Group::GROUP_1;
    pub const ENEMY: Group = Group::GROUP_2;
}

/// Where the player comes back after dying.
#[derive(Resource, Debug, Default, Clone, Copy)]
pub struct SpawnPoint(pub Vec2);

/// Falling below this height is fatal.
#[derive(Resource, Debug, Clone, Copy)]
pub struct KillHeight(pub f32);

impl Default for KillHeight {
    fn default() -> Self {
        Self(-20.0)
    }
}

/// Sensor whose overlaps with the player are reported as trigger events.
#[derive(Component)]
pub struct TriggerZone;

/// The player started overlapping a trigger zone.
#[derive(Event, Debug, Clone, Copy)]
pub struct TriggerEntered {
    pub trigger: Entity,
    pub player: Entity,
}

/// The player stopped overlapping a trigger zone.
#[derive(Event, Debug, Clone, Copy)]
pub struct TriggerExited {
    pub trigger: Entity,
    pub player: Entity,
}

/// Moves the spawn point here and refills ammo. Its dialogue plays once.
#[derive(Component, Debug, Default)]
pub struct Checkpoint {
    pub dialogue: Vec<DialogueEntry>,
    pub dialogue_played: bool,
}

/// Reaching this zone finishes the level.
#[derive(Component, Debug, Default)]
pub struct VictoryZone {
    pub reached: bool,
}

/// Area that swaps the background music while the player is inside.
#[derive(Component, Debug, Clone)]
pub struct MusicZone {
    pub track: String,
}
