//! Combat-related components.

use bevy::prelude::*;

// Re-export from core to avoid duplication
pub use crate::core::{DamageEvent, HealthIsZero};

/// Result of a health change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthChange {
    /// Nothing happened (invulnerable, already full, already empty)
    Ignored,
    /// Hit points changed but the entity is still alive
    Changed,
    /// Hit points just reached zero
    Depleted,
}

/// Hit points of an entity. Always within `0..=max`.
#[derive(Component, Debug, Clone)]
pub struct Health {
    pub current: u32,
    pub max: u32,
    /// Damage is ignored while set
    pub invulnerable: bool,
}

impl Health {
    pub fn new(max: u32) -> Self {
        Self {
            current: max,
            max,
            invulnerable: false,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.current > 0
    }

    /// Fraction of health left, for HUD bars.
    pub fn fraction(&self) -> f32 {
        if self.max == 0 {
            return 0.0;
        }
        self.current as f32 / self.max as f32
    }

    /// Gain one hit point, never above max.
    pub fn increment(&mut self) -> HealthChange {
        if self.current >= self.max {
            return HealthChange::Ignored;
        }
        self.current += 1;
        HealthChange::Changed
    }

    /// Gain up to `amount` hit points. Returns how many were actually gained.
    pub fn heal(&mut self, amount: u32) -> u32 {
        let before = self.current;
        for _ in 0..amount {
            if self.increment() == HealthChange::Ignored {
                break;
            }
        }
        self.current - before
    }

    /// Lose one hit point unless invulnerable.
    ///
    /// Reports `Depleted` only on the hit that brings health to zero.
    pub fn decrement(&mut self) -> HealthChange {
        if self.invulnerable || self.current == 0 {
            return HealthChange::Ignored;
        }
        self.current -= 1;
        if self.current == 0 {
            HealthChange::Depleted
        } else {
            HealthChange::Changed
        }
    }

    /// Lose all hit points unless invulnerable.
    pub fn die(&mut self) -> HealthChange {
        let mut result = HealthChange::Ignored;
        while self.current > 0 {
            result = self.decrement();
            if result == HealthChange::Ignored {
                break;
            }
        }
        result
    }

    /// Back to full health, used on respawn.
    pub fn restore(&mut self) {
        self.current = self.max;
    }
}

/// Temporary invulnerability window.
///
/// While present, the owner's `Health::invulnerable` is kept set. When the
/// timer finishes the flag is cleared and the component removed.
#[derive(Component, Debug)]
pub struct Invulnerability {
    pub timer: Timer,
}

impl Invulnerability {
    pub fn new(duration: f32) -> Self {
        Self {
            timer: Timer::from_seconds(duration, TimerMode::Once),
        }
    }

    /// Make sure at least `duration` seconds are left.
    pub fn cover(&mut self, duration: f32) {
        if self.timer.remaining_secs() < duration {
            *self = Self::new(duration);
        }
    }
}

/// Marker for entities whose death is being handled.
#[derive(Component)]
pub struct Dead;

/// Ammunition for shooting projectiles.
#[derive(Component, Debug, Clone)]
pub struct Ammo {
    pub current: u32,
    pub max: u32,
    /// When set, shooting never consumes ammo
    pub infinite: bool,
}

impl Ammo {
    pub fn new(max: u32) -> Self {
        Self {
            current: max,
            max,
            infinite: false,
        }
    }

    pub fn can_shoot(&self) -> bool {
        self.infinite || self.current > 0
    }

    pub fn consume(&mut self) {
        if !self.infinite && self.current > 0 {
            self.current -= 1;
        }
    }

    pub fn refill(&mut self) {
        self.current = self.max;
    }

    pub fn set_infinite(&mut self, enabled: bool) {
        self.infinite = enabled;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn increment_is_clamped_to_max() {
        let mut health = Health::new(3);
        assert_eq!(health.increment(), HealthChange::Ignored);
        assert_eq!(health.current, 3);

        health.current = 1;
        assert_eq!(health.heal(5), 2);
        assert_eq!(health.current, 3);
    }

    #[test]
    fn decrement_reports_depletion_once() {
        let mut health = Health::new(2);
        assert_eq!(health.decrement(), HealthChange::Changed);
        assert_eq!(health.decrement(), HealthChange::Depleted);
        assert!(!health.is_alive());
        assert_eq!(health.decrement(), HealthChange::Ignored);
        assert_eq!(health.current, 0);
    }

    #[test]
    fn invulnerability_blocks_damage_and_death() {
        let mut health = Health::new(3);
        health.invulnerable = true;

        assert_eq!(health.decrement(), HealthChange::Ignored);
        assert_eq!(health.die(), HealthChange::Ignored);
        assert_eq!(health.current, 3);
    }

    #[test]
    fn die_drains_all_hit_points() {
        let mut health = Health::new(4);
        assert_eq!(health.die(), HealthChange::Depleted);
        assert_eq!(health.current, 0);

        health.restore();
        assert_eq!(health.current, 4);
        assert_eq!(health.fraction(), 1.0);
    }

    #[test]
    fn invulnerability_cover_only_extends() {
        let mut window = Invulnerability::new(8.0);
        window.cover(1.0);
        assert_eq!(window.timer.remaining_secs(), 8.0);

        let mut short = Invulnerability::new(1.0);
        short.cover(8.0);
        assert_eq!(short.timer.remaining_secs(), 8.0);
    }

    #[test]
    fn ammo_runs_out_unless_infinite() {
        let mut ammo = Ammo::new(1);
        assert!(ammo.can_shoot());
        ammo.consume();
        assert!(!ammo.can_shoot());
        ammo.consume();
        assert_eq!(ammo.current, 0);

        ammo.set_infinite(true);
        assert!(ammo.can_shoot());
        ammo.consume();
        assert_eq!(ammo.current, 0);

        ammo.set_infinite(false);
        ammo.refill();
        assert_eq!(ammo.current, 1);
    }
}
