//! Usage counters and the escalation table that turns them into effects.

use bevy::prelude::*;
use std::collections::HashMap;

use super::components::{PotionEffectType, PotionInstance};
use crate::core::PotionTuning;
use crate::rendering::ScreenEffect;

/// How many potions have been drunk this run. Counters only ever grow.
#[derive(Resource, Debug, Default)]
pub struct PotionUsage {
    counts: HashMap<PotionEffectType, u32>,
    total: u32,
    /// Base speed lost to Liquid Aether side effects
    pub speed_loss: f32,
}

impl PotionUsage {
    /// Count one more drink. Returns the new count for that type.
    pub fn record(&mut self, effect: PotionEffectType) -> u32 {
        let count = self.counts.entry(effect).or_insert(0);
        *count += 1;
        self.total += 1;
        *count
    }

    pub fn count(&self, effect: PotionEffectType) -> u32 {
        self.counts.get(&effect).copied().unwrap_or(0)
    }

    pub fn total(&self) -> u32 {
        self.total
    }

    /// Start a new run.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Seconds of Liquid Aether boost; each drink shortens it down to a floor.
pub fn aether_duration(tuning: &PotionTuning, usage_count: u32) -> f32 {
    (tuning.aether_base_duration - usage_count as f32 * tuning.aether_duration_step)
        .max(tuning.aether_min_duration)
}

/// Seconds of slowdown after a Liquid Aether boost ends.
pub fn aether_slow_duration(tuning: &PotionTuning, usage_count: u32) -> f32 {
    let intensity = usage_count.saturating_sub(tuning.aether_slow_safe_uses);
    tuning.aether_slow_base_duration + intensity as f32 * tuning.aether_slow_per_intensity
}

/// Whether this drink causes a short overdose. `roll` is uniform in 0..1.
pub fn overdose_triggered(instance: &PotionInstance, usage_count: u32, roll: f32) -> bool {
    usage_count > instance.safe_usage_count && roll < instance.side_effect_chance
}

/// Permanent side-effect intensity once the total passes the safe limit.
pub fn permanent_intensity(tuning: &PotionTuning, total: u32) -> Option<u32> {
    (total > tuning.safe_total_uses).then(|| total - tuning.safe_total_uses)
}

/// Lasting screen distortion for a permanent side-effect intensity.
pub fn permanent_screen_effect(tuning: &PotionTuning, intensity: u32) -> ScreenEffect {
    let i = intensity as f32;
    let filter = (1.0 - tuning.color_filter_loss_per_intensity * i).max(0.0);
    ScreenEffect {
        contrast: tuning.contrast_per_intensity * i,
        color_filter: Vec3::new(1.0, filter, filter),
        vignette_intensity: (tuning.vignette_per_intensity * i).min(1.0),
    }
}

/// Chance of instant death when Blue Wonder is drunk past the limit.
pub fn death_chance(tuning: &PotionTuning, intensity: u32) -> f32 {
    tuning.death_chance_per_intensity * intensity as f32
}

/// Seconds of control distortion from Phantom Brew past the limit.
pub fn distortion_duration(tuning: &PotionTuning, intensity: u32) -> f32 {
    tuning.distortion_seconds_per_intensity * intensity as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_are_per_type_and_total() {
        let mut usage = PotionUsage::default();
        assert_eq!(usage.record(PotionEffectType::BlueWonder), 1);
        assert_eq!(usage.record(PotionEffectType::BlueWonder), 2);
        assert_eq!(usage.record(PotionEffectType::PhantomBrew), 1);

        assert_eq!(usage.count(PotionEffectType::BlueWonder), 2);
        assert_eq!(usage.count(PotionEffectType::LiquidAether), 0);
        assert_eq!(usage.total(), 3);

        usage.reset();
        assert_eq!(usage.total(), 0);
    }

    #[test]
    fn aether_gets_shorter_but_never_below_floor() {
        let tuning = PotionTuning::default();
        assert_eq!(aether_duration(&tuning, 1), 9.0);
        assert_eq!(aether_duration(&tuning, 7), 3.0);
        assert_eq!(aether_duration(&tuning, 12), 3.0);
    }

    #[test]
    fn aether_slowdown_grows_after_five_uses() {
        let tuning = PotionTuning::default();
        assert_eq!(aether_slow_duration(&tuning, 1), 3.0);
        assert_eq!(aether_slow_duration(&tuning, 5), 3.0);
        assert_eq!(aether_slow_duration(&tuning, 7), 7.0);
    }

    #[test]
    fn overdose_needs_usage_past_safe_count_and_a_bad_roll() {
        let mut instance = PotionInstance::new(PotionEffectType::LiquidAether);
        instance.safe_usage_count = 2;
        instance.side_effect_chance = 0.3;

        assert!(!overdose_triggered(&instance, 2, 0.0));
        assert!(overdose_triggered(&instance, 3, 0.1));
        assert!(!overdose_triggered(&instance, 3, 0.5));
    }

    #[test]
    fn permanent_side_effects_start_after_three_drinks() {
        let tuning = PotionTuning::default();
        assert_eq!(permanent_intensity(&tuning, 3), None);
        assert_eq!(permanent_intensity(&tuning, 4), Some(1));
        assert_eq!(permanent_intensity(&tuning, 6), Some(3));
    }

    #[test]
    fn permanent_screen_effect_escalates_and_clamps() {
        let tuning = PotionTuning::default();

        let mild = permanent_screen_effect(&tuning, 1);
        assert_eq!(mild.contrast, 10.0);
        assert!((mild.color_filter.y - 0.9).abs() < 1e-5);
        assert!((mild.vignette_intensity - 0.3).abs() < 1e-5);

        let severe = permanent_screen_effect(&tuning, 12);
        assert_eq!(severe.color_filter, Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(severe.vignette_intensity, 1.0);
    }

    #[test]
    fn intensity_scales_death_chance_and_distortion() {
        let tuning = PotionTuning::default();
        assert!((death_chance(&tuning, 2) - 0.2).abs() < 1e-6);
        assert_eq!(distortion_duration(&tuning, 3), 15.0);
    }
}
