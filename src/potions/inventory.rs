//! Potions carried by the player.

use bevy::prelude::*;
use std::collections::HashMap;

use super::components::{PotionEffectType, PotionInstance};

/// Collected potions waiting to be drunk, grouped by type.
#[derive(Resource, Debug, Default)]
pub struct PlayerInventory {
    stacks: HashMap<PotionEffectType, Vec<PotionInstance>>,
}

impl PlayerInventory {
    pub fn add(&mut self, instance: PotionInstance) {
        self.stacks.entry(instance.effect).or_default().push(instance);
    }

    /// Take the most recently collected potion of a type.
    pub fn take(&mut self, effect: PotionEffectType) -> Option<PotionInstance> {
        self.stacks.get_mut(&effect).and_then(Vec::pop)
    }

    pub fn count(&self, effect: PotionEffectType) -> usize {
        self.stacks.get(&effect).map_or(0, Vec::len)
    }

    pub fn clear(&mut self) {
        self.stacks.clear();
    }
}

/// Keys that drink each potion type.
pub fn drink_key(effect: PotionEffectType) -> KeyCode {
    match effect {
        PotionEffectType::BlueWonder => KeyCode::Digit1,
        PotionEffectType::LiquidAether => KeyCode::Digit2,
        PotionEffectType::PhantomBrew => KeyCode::Digit3,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn take_returns_latest_instance_of_type() {
        let mut inventory = PlayerInventory::default();
        let mut risky = PotionInstance::new(PotionEffectType::BlueWonder);
        risky.side_effect_chance = 0.9;

        inventory.add(PotionInstance::new(PotionEffectType::BlueWonder));
        inventory.add(risky);
        inventory.add(PotionInstance::new(PotionEffectType::PhantomBrew));

        assert_eq!(inventory.count(PotionEffectType::BlueWonder), 2);
        assert_eq!(inventory.take(PotionEffectType::BlueWonder), Some(risky));
        assert_eq!(inventory.count(PotionEffectType::BlueWonder), 1);
        assert_eq!(inventory.count(PotionEffectType::PhantomBrew), 1);
    }

    #[test]
    fn taking_from_empty_stack_gives_nothing() {
        let mut inventory = PlayerInventory::default();
        assert_eq!(inventory.take(PotionEffectType::LiquidAether), None);
        assert_eq!(inventory.count(PotionEffectType::LiquidAether), 0);
    }
}
