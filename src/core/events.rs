//! Gameplay events used for cross-system communication.
//!
//! Most of these are not sent directly. Gameplay code hands them to a
//! [`Deferred`](super::Deferred) scheduler, which emits them once they are
//! due. Reactions (sounds, respawns, level changes) live in the systems that
//! read them, so the trigger never needs to know what happens next.

use bevy::prelude::*;

/// Sent when an entity should lose one hit point.
#[derive(Event, Debug, Clone, Copy)]
pub struct DamageEvent {
    /// Entity receiving damage
    pub target: Entity,
    /// Entity that caused the damage, if any
    pub source: Option<Entity>,
}

/// The player left the ground after a jump.
#[derive(Event, Debug, Clone, Copy)]
pub struct PlayerJumped {
    pub player: Entity,
}

/// The player touched the ground after being airborne.
#[derive(Event, Debug, Clone, Copy)]
pub struct PlayerLanded {
    pub player: Entity,
}

/// The player released the jump button mid-jump.
#[derive(Event, Debug, Clone, Copy)]
pub struct PlayerStopJump {
    pub player: Entity,
}

/// An entity's health reached zero.
#[derive(Event, Debug, Clone, Copy)]
pub struct HealthIsZero {
    pub entity: Entity,
}

/// The player died and will respawn.
#[derive(Event, Debug, Clone, Copy)]
pub struct PlayerDeath {
    pub player: Entity,
}

/// The player is put back at the current spawn point.
#[derive(Event, Debug, Clone, Copy)]
pub struct PlayerSpawn {
    pub player: Entity,
}

/// A non-player entity died.
#[derive(Event, Debug, Clone, Copy)]
pub struct EnemyDeath {
    pub enemy: Entity,
}

/// The player picked up a potion.
#[derive(Event, Debug, Clone, Copy)]
pub struct PotionCollected {
    pub potion: Entity,
    pub player: Entity,
    pub position: Vec2,
}

/// The player reached the end of the level.
#[derive(Event, Debug, Clone, Copy)]
pub struct PlayerEnteredVictoryZone {
    pub player: Entity,
}

/// Advance to the next level in the configured order.
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct LoadNextLevel;
