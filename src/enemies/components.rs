//! Enemy-related components.

use bevy::prelude::*;

use crate::combat::Health;
use crate::potions::PotionEffectType;

/// Marker component for all enemies.
#[derive(Component)]
pub struct Enemy;

/// Enemy type identifier (matches RON file name).
#[derive(Component, Clone)]
pub struct EnemyType(pub String);

/// Enemy stats loaded from RON data files.
#[derive(Component, Clone, Debug)]
pub struct EnemyStats {
    pub move_speed: f32,
    pub half_size: Vec2,
}

impl Default for EnemyStats {
    fn default() -> Self {
        Self {
            move_speed: 2.0,
            half_size: Vec2::new(0.4, 0.4),
        }
    }
}

/// Potion left behind when the enemy dies. `None` picks one at random.
#[derive(Component, Clone, Copy, Debug)]
pub struct PotionDrop(pub Option<PotionEffectType>);

/// Back-and-forth movement between two points.
#[derive(Component, Clone, Debug)]
pub struct PatrolPath {
    pub start: Vec2,
    pub end: Vec2,
    /// Distance covered since the patrol began
    pub travelled: f32,
}

impl PatrolPath {
    pub fn new(start: Vec2, end: Vec2) -> Self {
        Self {
            start,
            end,
            travelled: 0.0,
        }
    }

    pub fn advance(&mut self, distance: f32) {
        self.travelled += distance;
        let length = self.length();
        if length > f32::EPSILON {
            self.travelled = self.travelled.rem_euclid(length * 2.0);
        }
    }

    fn length(&self) -> f32 {
        self.start.distance(self.end)
    }

    /// Current position, bouncing between the two ends.
    pub fn position(&self) -> Vec2 {
        let length = self.length();
        if length <= f32::EPSILON {
            return self.start;
        }
        let travelled = self.travelled.rem_euclid(length * 2.0);
        let along = length - (travelled - length).abs();
        self.start.lerp(self.end, along / length)
    }

    /// Horizontal direction of travel, 1.0 when moving right.
    pub fn heading(&self) -> f32 {
        let length = self.length();
        if length <= f32::EPSILON {
            return 0.0;
        }
        let toward_end = if self.travelled.rem_euclid(length * 2.0) < length {
            1.0
        } else {
            -1.0
        };
        toward_end * (self.end.x - self.start.x).signum()
    }
}

/// Boss behaviour layered on top of a regular enemy.
#[derive(Component, Clone, Debug)]
pub struct Boss {
    /// Health fraction at or below which phase two starts
    pub phase_threshold: f32,
    pub special_attack_cooldown: f32,
    pub projectile_count: u32,
    pub attack_timer: f32,
    pub phase_two: bool,
}

impl Boss {
    /// Advance the special attack timer. Returns true when an attack is due.
    pub fn tick(&mut self, dt: f32) -> bool {
        self.attack_timer += dt;
        if self.attack_timer >= self.special_attack_cooldown {
            self.attack_timer = 0.0;
            true
        } else {
            false
        }
    }

    /// Enter phase two once health drops to the threshold.
    ///
    /// Returns true on the frame the phase changes. Attacks come twice as
    /// often afterwards; the caller speeds up movement.
    pub fn check_phase(&mut self, health: &Health) -> bool {
        if self.phase_two || health.fraction() > self.phase_threshold {
            return false;
        }
        self.phase_two = true;
        self.special_attack_cooldown /= 2.0;
        true
    }
}

/// Evenly spaced directions starting at +X, counter-clockwise.
pub fn radial_directions(count: u32) -> Vec<Vec2> {
    if count == 0 {
        return Vec::new();
    }
    let step = std::f32::consts::TAU / count as f32;
    (0..count)
        .map(|i| Vec2::from_angle(step * i as f32))
        .collect()
}

/// Timer for the death fade before despawn.
#[derive(Component)]
pub struct DeathTimer(pub Timer);

impl Default for DeathTimer {
    fn default() -> Self {
        Self(Timer::from_seconds(0.5, TimerMode::Once))
    }
}
