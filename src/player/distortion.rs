//! Input distortion caused by Phantom Brew overuse.

use bevy::prelude::*;

/// Scrambles horizontal input while enabled.
///
/// Intensity 1 inverts left and right. Intensity 2 and above also makes the
/// input randomly drop out for single frames.
#[derive(Component, Debug, Clone)]
pub struct ControlDistortion {
    pub intensity: u32,
    pub enabled: bool,
    pub invert_horizontal: bool,
    pub random_stutter: bool,
    /// Chance per frame that stuttering input drops to zero
    pub stutter_chance: f32,
}

impl Default for ControlDistortion {
    fn default() -> Self {
        Self {
            intensity: 0,
            enabled: false,
            invert_horizontal: false,
            random_stutter: false,
            stutter_chance: 0.1,
        }
    }
}

impl ControlDistortion {
    pub fn enable(&mut self, intensity: u32) {
        self.intensity = intensity;
        self.enabled = true;
        self.invert_horizontal = intensity >= 1;
        self.random_stutter = intensity >= 2;
    }

    pub fn disable(&mut self) {
        self.intensity = 0;
        self.enabled = false;
        self.invert_horizontal = false;
        self.random_stutter = false;
    }

    /// Distort a horizontal input value. `roll` is a uniform sample in 0..1.
    pub fn distort(&self, input: f32, roll: f32) -> f32 {
        if !self.enabled {
            return input;
        }

        let mut distorted = input;
        if self.invert_horizontal {
            distorted = -distorted;
        }
        if self.random_stutter && roll < self.stutter_chance {
            distorted = 0.0;
        }
        distorted
    }
}
