//! Timed potion effects on the player.

use bevy::prelude::*;
use std::time::Duration;

use crate::core::PotionTuning;
use crate::player::MovementModifiers;

/// A timed effect that has just run out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpiredEffect {
    InfiniteAmmo,
    AetherBoost,
    AetherSlow,
    Phantom,
    Distortion,
}

/// Timers of every potion effect currently on the player.
#[derive(Component, Debug, Default)]
pub struct ActiveEffects {
    pub infinite_ammo: Option<Timer>,
    pub aether_boost: Option<Timer>,
    /// Slowdown waiting for the boost to end, in seconds
    pub pending_slow: Option<f32>,
    pub aether_slow: Option<Timer>,
    pub phantom: Option<Timer>,
    pub distortion: Option<Timer>,
}

fn once(seconds: f32) -> Option<Timer> {
    Some(Timer::from_seconds(seconds.max(0.0), TimerMode::Once))
}

impl ActiveEffects {
    pub fn start_infinite_ammo(&mut self, duration: f32) {
        self.infinite_ammo = once(duration);
    }

    /// Start (or restart) the Aether boost. The slowdown follows it.
    pub fn start_aether(&mut self, duration: f32, slow_duration: f32) {
        self.aether_boost = once(duration);
        self.aether_slow = None;
        self.pending_slow = Some(slow_duration);
    }

    pub fn start_phantom(&mut self, duration: f32) {
        self.phantom = once(duration);
    }

    pub fn start_distortion(&mut self, duration: f32) {
        self.distortion = once(duration);
    }

    pub fn is_phantom(&self) -> bool {
        self.phantom.is_some()
    }

    /// Advance every timer and report the effects that ended.
    pub fn tick(&mut self, delta: Duration) -> Vec<ExpiredEffect> {
        let mut expired = Vec::new();

        let mut tick_slot = |slot: &mut Option<Timer>, kind: ExpiredEffect| {
            if let Some(timer) = slot {
                timer.tick(delta);
                if timer.finished() {
                    *slot = None;
                    expired.push(kind);
                }
            }
        };

        tick_slot(&mut self.infinite_ammo, ExpiredEffect::InfiniteAmmo);
        tick_slot(&mut self.aether_boost, ExpiredEffect::AetherBoost);
        tick_slot(&mut self.aether_slow, ExpiredEffect::AetherSlow);
        tick_slot(&mut self.phantom, ExpiredEffect::Phantom);
        tick_slot(&mut self.distortion, ExpiredEffect::Distortion);

        if expired.contains(&ExpiredEffect::AetherBoost) {
            if let Some(slow) = self.pending_slow.take() {
                self.aether_slow = once(slow);
            }
        }

        expired
    }

    /// Movement multipliers implied by the active effects.
    pub fn movement_modifiers(&self, tuning: &PotionTuning) -> MovementModifiers {
        let mut modifiers = MovementModifiers::default();
        if self.aether_boost.is_some() {
            modifiers.speed *= tuning.aether_multiplier;
            modifiers.jump *= tuning.aether_multiplier;
        }
        if self.aether_slow.is_some() {
            modifiers.speed *= tuning.aether_slow_factor;
        }
        modifiers
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secs(s: f32) -> Duration {
        Duration::from_secs_f32(s)
    }

    #[test]
    fn aether_boost_is_followed_by_slowdown() {
        let tuning = PotionTuning::default();
        let mut effects = ActiveEffects::default();
        effects.start_aether(9.0, 3.0);

        let boosted = effects.movement_modifiers(&tuning);
        assert_eq!(boosted.speed, 1.5);
        assert_eq!(boosted.jump, 1.5);

        let expired = effects.tick(secs(9.5));
        assert_eq!(expired, vec![ExpiredEffect::AetherBoost]);
        let slowed = effects.movement_modifiers(&tuning);
        assert_eq!(slowed.speed, 0.5);
        assert_eq!(slowed.jump, 1.0);

        assert_eq!(effects.tick(secs(3.0)), vec![ExpiredEffect::AetherSlow]);
        let normal = effects.movement_modifiers(&tuning);
        assert_eq!(normal.speed, 1.0);
    }

    #[test]
    fn redrinking_aether_cancels_running_slowdown() {
        let tuning = PotionTuning::default();
        let mut effects = ActiveEffects::default();
        effects.start_aether(1.0, 3.0);
        effects.tick(secs(1.5));
        assert!(effects.aether_slow.is_some());

        effects.start_aether(5.0, 3.0);
        assert!(effects.aether_slow.is_none());
        assert_eq!(effects.movement_modifiers(&tuning).speed, 1.5);
    }

    #[test]
    fn independent_effects_expire_separately() {
        let mut effects = ActiveEffects::default();
        effects.start_infinite_ammo(10.0);
        effects.start_phantom(8.0);
        assert!(effects.is_phantom());

        assert_eq!(effects.tick(secs(8.0)), vec![ExpiredEffect::Phantom]);
        assert!(!effects.is_phantom());
        assert_eq!(effects.tick(secs(2.0)), vec![ExpiredEffect::InfiniteAmmo]);
        assert!(effects.tick(secs(5.0)).is_empty());
    }
}
