//! Potion types, instances and pickups.

use bevy::prelude::*;
use serde::Deserialize;

/// Kinds of potion the player can find.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum PotionEffectType {
    /// Heals and grants infinite ammo
    BlueWonder,
    /// Faster running and higher jumps, followed by a slowdown
    LiquidAether,
    /// Invulnerable and passes through enemies
    PhantomBrew,
}

impl PotionEffectType {
    pub const ALL: [Self; 3] = [Self::BlueWonder, Self::LiquidAether, Self::PhantomBrew];

    pub fn name(self) -> &'static str {
        match self {
            Self::BlueWonder => "Blue Wonder",
            Self::LiquidAether => "Liquid Aether",
            Self::PhantomBrew => "Phantom Brew",
        }
    }

    pub fn color(self) -> Color {
        match self {
            Self::BlueWonder => Color::srgb(0.25, 0.45, 1.0),
            Self::LiquidAether => Color::srgb(0.95, 0.85, 0.3),
            Self::PhantomBrew => Color::srgb(0.7, 0.35, 0.9),
        }
    }

    /// Pick a type from a uniform sample in 0..1.
    pub fn from_roll(roll: f32) -> Self {
        let index = (roll.clamp(0.0, 1.0) * Self::ALL.len() as f32) as usize;
        Self::ALL[index.min(Self::ALL.len() - 1)]
    }
}

fn default_effect_duration() -> f32 {
    5.0
}

fn default_side_effect_chance() -> f32 {
    0.2
}

/// One collectable potion and how risky it is.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct PotionInstance {
    pub effect: PotionEffectType,
    /// Seconds an overdose side effect lasts
    #[serde(default = "default_effect_duration")]
    pub effect_duration: f32,
    /// Chance in 0..1 of an overdose once past the safe count
    #[serde(default = "default_side_effect_chance")]
    pub side_effect_chance: f32,
    /// Uses of this type that never cause an overdose
    #[serde(default)]
    pub safe_usage_count: u32,
}

impl PotionInstance {
    pub fn new(effect: PotionEffectType) -> Self {
        Self {
            effect,
            effect_duration: default_effect_duration(),
            side_effect_chance: default_side_effect_chance(),
            safe_usage_count: 0,
        }
    }
}

pub const IDLE_FRAMES: usize = 8;
pub const COLLECTED_FRAMES: usize = 6;

/// Result of advancing a pickup animation by one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameStep {
    Next,
    /// The collected animation has played out; remove the pickup
    Finished,
}

/// A potion lying in the level.
#[derive(Component, Debug, Clone)]
pub struct PotionPickup {
    pub instance: PotionInstance,
    pub frame: usize,
    pub collected: bool,
}

impl PotionPickup {
    pub fn new(instance: PotionInstance) -> Self {
        Self {
            instance,
            frame: 0,
            collected: false,
        }
    }

    pub fn frame_count(&self) -> usize {
        if self.collected {
            COLLECTED_FRAMES
        } else {
            IDLE_FRAMES
        }
    }

    /// Switch to the collected animation. Returns false if already collected.
    pub fn collect(&mut self) -> bool {
        if self.collected {
            return false;
        }
        self.collected = true;
        self.frame = 0;
        true
    }

    pub fn advance(&mut self) -> FrameStep {
        if self.collected && self.frame == COLLECTED_FRAMES - 1 {
            return FrameStep::Finished;
        }
        self.frame = (self.frame + 1) % self.frame_count();
        FrameStep::Next
    }

    /// Scale and alpha for the current frame.
    pub fn frame_visual(&self) -> (f32, f32) {
        if self.collected {
            let t = self.frame as f32 / (COLLECTED_FRAMES - 1) as f32;
            (1.0 + 0.6 * t, 1.0 - t)
        } else {
            let phase = self.frame as f32 / IDLE_FRAMES as f32 * std::f32::consts::TAU;
            (1.0 + 0.08 * phase.sin(), 1.0)
        }
    }
}

/// Drives pickup animations at a fixed frame rate.
#[derive(Resource)]
pub struct PotionAnimationTimer(pub Timer);

impl PotionAnimationTimer {
    pub fn new(frame_rate: f32) -> Self {
        Self(Timer::from_seconds(1.0 / frame_rate.max(1.0), TimerMode::Repeating))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_animation_loops() {
        let mut pickup = PotionPickup::new(PotionInstance::new(PotionEffectType::BlueWonder));
        for _ in 0..IDLE_FRAMES {
            assert_eq!(pickup.advance(), FrameStep::Next);
        }
        assert_eq!(pickup.frame, 0);
    }

    #[test]
    fn collected_animation_finishes_after_last_frame() {
        let mut pickup = PotionPickup::new(PotionInstance::new(PotionEffectType::PhantomBrew));
        pickup.frame = 5;
        assert!(pickup.collect());
        assert_eq!(pickup.frame, 0);
        assert!(!pickup.collect());

        for _ in 0..COLLECTED_FRAMES - 1 {
            assert_eq!(pickup.advance(), FrameStep::Next);
        }
        assert_eq!(pickup.frame, COLLECTED_FRAMES - 1);
        assert_eq!(pickup.advance(), FrameStep::Finished);
    }

    #[test]
    fn collected_frames_fade_out() {
        let mut pickup = PotionPickup::new(PotionInstance::new(PotionEffectType::LiquidAether));
        pickup.collect();
        pickup.frame = COLLECTED_FRAMES - 1;
        let (scale, alpha) = pickup.frame_visual();
        assert!(scale > 1.0);
        assert_eq!(alpha, 0.0);
    }

    #[test]
    fn rolls_cover_every_type() {
        assert_eq!(PotionEffectType::from_roll(0.0), PotionEffectType::BlueWonder);
        assert_eq!(PotionEffectType::from_roll(0.5), PotionEffectType::LiquidAether);
        assert_eq!(PotionEffectType::from_roll(0.99), PotionEffectType::PhantomBrew);
        assert_eq!(PotionEffectType::from_roll(1.0), PotionEffectType::PhantomBrew);
    }
}
