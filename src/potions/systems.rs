//! Potion systems - pickup, animation, drinking and timed effects.

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use super::components::{
    FrameStep, PotionAnimationTimer, PotionEffectType, PotionInstance, PotionPickup,
};
use super::effects::{ActiveEffects, ExpiredEffect};
use super::inventory::{drink_key, PlayerInventory};
use super::usage::{
    aether_duration, aether_slow_duration, death_chance, distortion_duration, overdose_triggered,
    permanent_intensity, permanent_screen_effect, PotionUsage,
};
use crate::combat::{Ammo, Dead, Health, HealthChange, Invulnerability};
use crate::core::{Deferred, EnemyDeath, GameConfig, HealthIsZero, PotionCollected};
use crate::enemies::{Enemy, PotionDrop};
use crate::player::{ControlDistortion, MovementModifiers, Phasing, Player, PlayerController};
use crate::rendering::SideEffectVisuals;
use crate::world::{layers, LevelEntity, TriggerEntered, TriggerZone};

const PICKUP_SIZE: Vec2 = Vec2::new(0.4, 0.55);

/// Spawn a potion pickup.
pub fn spawn_potion(commands: &mut Commands, instance: PotionInstance, position: Vec2) -> Entity {
    commands
        .spawn((
            PotionPickup::new(instance),
            Sprite {
                color: instance.effect.color(),
                custom_size: Some(PICKUP_SIZE),
                ..default()
            },
            Transform::from_translation(position.extend(4.0)),
            Collider::cuboid(PICKUP_SIZE.x * 0.5, PICKUP_SIZE.y * 0.5),
            Sensor,
            ActiveEvents::COLLISION_EVENTS,
            ActiveCollisionTypes::default() | ActiveCollisionTypes::KINEMATIC_STATIC,
            TriggerZone,
            LevelEntity,
        ))
        .id()
}

/// Pick up potions the player walks into.
pub fn collect_potions(
    mut triggers: EventReader<TriggerEntered>,
    mut pickup_query: Query<(&mut PotionPickup, &Transform)>,
    mut inventory: ResMut<PlayerInventory>,
    mut collected_events: Deferred<PotionCollected>,
) {
    for trigger in triggers.read() {
        let Ok((mut pickup, transform)) = pickup_query.get_mut(trigger.trigger) else {
            continue;
        };
        if !pickup.collect() {
            continue;
        }

        inventory.add(pickup.instance);
        info!(
            "Collected {} ({} carried)",
            pickup.instance.effect.name(),
            inventory.count(pickup.instance.effect)
        );
        collected_events.schedule(PotionCollected {
            potion: trigger.trigger,
            player: trigger.player,
            position: transform.translation.truncate(),
        });
    }
}

/// Step every pickup animation at the configured frame rate.
pub fn animate_potions(
    mut commands: Commands,
    time: Res<Time>,
    mut animation_timer: ResMut<PotionAnimationTimer>,
    mut pickup_query: Query<(Entity, &mut PotionPickup, &mut Transform, &mut Sprite)>,
) {
    animation_timer.0.tick(time.delta());
    let frames = animation_timer.0.times_finished_this_tick();
    if frames == 0 {
        return;
    }

    for (entity, mut pickup, mut transform, mut sprite) in pickup_query.iter_mut() {
        let mut finished = false;
        for _ in 0..frames {
            if pickup.advance() == FrameStep::Finished {
                finished = true;
                break;
            }
        }
        if finished {
            commands.entity(entity).despawn_recursive();
            continue;
        }

        let (scale, alpha) = pickup.frame_visual();
        transform.scale = Vec3::new(scale, scale, 1.0);
        sprite.color.set_alpha(alpha);
    }
}

/// Drink a potion from the inventory with the number keys.
#[allow(clippy::too_many_arguments)]
pub fn drink_potions(
    mut commands: Commands,
    keyboard: Res<ButtonInput<KeyCode>>,
    config: Res<GameConfig>,
    mut inventory: ResMut<PlayerInventory>,
    mut usage: ResMut<PotionUsage>,
    mut visuals: ResMut<SideEffectVisuals>,
    mut player_query: Query<
        (
            Entity,
            &mut Health,
            &mut Ammo,
            &mut ActiveEffects,
            &mut PlayerController,
            &mut ControlDistortion,
            Option<&mut Invulnerability>,
        ),
        (With<Player>, Without<Dead>),
    >,
    mut health_is_zero: Deferred<HealthIsZero>,
) {
    let Ok((
        entity,
        mut health,
        mut ammo,
        mut effects,
        mut controller,
        mut distortion,
        mut invulnerability,
    )) = player_query.get_single_mut()
    else {
        return;
    };
    if !controller.control_enabled {
        return;
    }

    let tuning = &config.potions;

    for effect in PotionEffectType::ALL {
        if !keyboard.just_pressed(drink_key(effect)) {
            continue;
        }
        let Some(instance) = inventory.take(effect) else {
            info!("No {} left to drink", effect.name());
            continue;
        };

        let usage_count = usage.record(effect);
        info!("Drank {} (#{} of this type, #{} total)", effect.name(), usage_count, usage.total());

        // Immediate effect
        match effect {
            PotionEffectType::BlueWonder => {
                health.heal(tuning.blue_wonder_heal);
                ammo.set_infinite(true);
                effects.start_infinite_ammo(tuning.infinite_ammo_duration);
            }
            PotionEffectType::LiquidAether => {
                let duration = aether_duration(tuning, usage_count);
                effects.start_aether(duration, aether_slow_duration(tuning, usage_count));
                info!("Liquid Aether: faster and higher jumps for {:.0}s", duration);
            }
            PotionEffectType::PhantomBrew => {
                effects.start_phantom(tuning.phantom_duration);
                health.invulnerable = true;
                match invulnerability.as_deref_mut() {
                    Some(window) => window.cover(tuning.phantom_duration),
                    None => {
                        commands
                            .entity(entity)
                            .insert(Invulnerability::new(tuning.phantom_duration));
                    }
                }
            }
        }

        // Short overdose
        if overdose_triggered(&instance, usage_count, rand::random::<f32>()) {
            warn!("Overdose! Side effect for {:.0}s", instance.effect_duration);
            visuals.trigger_overdose(instance.effect_duration);
        }

        // Lasting damage
        let Some(intensity) = permanent_intensity(tuning, usage.total()) else {
            continue;
        };
        warn!("Permanent side effect intensity now {}", intensity);
        visuals.permanent = permanent_screen_effect(tuning, intensity);

        match effect {
            PotionEffectType::BlueWonder => {
                if rand::random::<f32>() < death_chance(tuning, intensity)
                    && health.die() == HealthChange::Depleted
                {
                    warn!("Blue Wonder side effect: instant death");
                    commands.entity(entity).insert(Dead);
                    health_is_zero.schedule(HealthIsZero { entity });
                    return;
                }
            }
            PotionEffectType::LiquidAether => {
                let loss = tuning.speed_loss_per_intensity * intensity as f32;
                usage.speed_loss += loss;
                controller.max_speed = (controller.max_speed - loss).max(0.0);
            }
            PotionEffectType::PhantomBrew => {
                distortion.enable(intensity);
                effects.start_distortion(distortion_duration(tuning, intensity));
            }
        }
    }
}

/// Tick timed effects, revert the expired ones and refresh movement modifiers.
pub fn update_active_effects(
    mut commands: Commands,
    time: Res<Time>,
    config: Res<GameConfig>,
    mut player_query: Query<
        (
            Entity,
            &mut ActiveEffects,
            &mut MovementModifiers,
            &mut Ammo,
            &mut ControlDistortion,
            &mut KinematicCharacterController,
            Has<Phasing>,
        ),
        With<Player>,
    >,
) {
    let Ok((entity, mut effects, mut modifiers, mut ammo, mut distortion, mut character, phasing)) =
        player_query.get_single_mut()
    else {
        return;
    };

    for expired in effects.tick(time.delta()) {
        match expired {
            ExpiredEffect::InfiniteAmmo => ammo.set_infinite(false),
            ExpiredEffect::Distortion => distortion.disable(),
            ExpiredEffect::AetherBoost => info!("Liquid Aether wore off"),
            ExpiredEffect::AetherSlow | ExpiredEffect::Phantom => {}
        }
        debug!("Potion effect ended: {:?}", expired);
    }

    *modifiers = effects.movement_modifiers(&config.potions);
    sync_phasing(&mut commands, entity, effects.is_phantom(), phasing, &mut character);
}

/// Let the character controller pass through enemies while phasing.
fn sync_phasing(
    commands: &mut Commands,
    entity: Entity,
    should_phase: bool,
    phasing: bool,
    character: &mut KinematicCharacterController,
) {
    if should_phase == phasing {
        return;
    }

    if should_phase {
        character.filter_groups = Some(CollisionGroups::new(
            layers::PLAYER,
            Group::ALL.difference(layers::ENEMY),
        ));
        commands.entity(entity).insert(Phasing);
    } else {
        character.filter_groups = None;
        commands.entity(entity).remove::<Phasing>();
    }
}

/// Give new player entities their effect tracker and the run's speed loss.
pub fn prepare_new_player(
    mut commands: Commands,
    config: Res<GameConfig>,
    usage: Res<PotionUsage>,
    mut player_query: Query<(Entity, &mut PlayerController), Added<Player>>,
) {
    for (entity, mut controller) in player_query.iter_mut() {
        controller.max_speed = (config.player.max_speed - usage.speed_loss).max(0.0);
        commands.entity(entity).insert(ActiveEffects::default());
    }
}

/// Leave a potion where an enemy died.
pub fn drop_potions(
    mut commands: Commands,
    mut events: EventReader<EnemyDeath>,
    enemy_query: Query<(&Transform, &PotionDrop), With<Enemy>>,
) {
    for event in events.read() {
        let Ok((transform, drop)) = enemy_query.get(event.enemy) else {
            continue;
        };
        let effect = drop
            .0
            .unwrap_or_else(|| PotionEffectType::from_roll(rand::random::<f32>()));
        spawn_potion(
            &mut commands,
            PotionInstance::new(effect),
            transform.translation.truncate(),
        );
        debug!("Enemy dropped {}", effect.name());
    }
}

/// Start every run with an empty bag and clean counters.
pub fn reset_potion_progress(
    mut inventory: ResMut<PlayerInventory>,
    mut usage: ResMut<PotionUsage>,
) {
    inventory.clear();
    usage.reset();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::DeferredQueue;

    fn drink_app() -> (App, Entity) {
        let config = GameConfig::default();
        let mut app = App::new();
        app.init_resource::<Time>()
            .init_resource::<ButtonInput<KeyCode>>()
            .init_resource::<PlayerInventory>()
            .init_resource::<PotionUsage>()
            .init_resource::<SideEffectVisuals>()
            .init_resource::<DeferredQueue<HealthIsZero>>()
            .add_systems(Update, drink_potions);

        let player = app
            .world_mut()
            .spawn((
                Player,
                Health::new(config.player.max_hp),
                Ammo::new(config.player.max_ammo),
                ActiveEffects::default(),
                PlayerController::from_tuning(&config.player),
                ControlDistortion::default(),
            ))
            .id();
        app.insert_resource(config);
        (app, player)
    }

    /// Put one potion that never overdoses in the bag.
    fn give(app: &mut App, effect: PotionEffectType) {
        let instance = PotionInstance {
            side_effect_chance: 0.0,
            ..PotionInstance::new(effect)
        };
        app.world_mut().resource_mut::<PlayerInventory>().add(instance);
    }

    /// Pretend `count` potions were already drunk this run.
    fn drank_before(app: &mut App, count: u32) {
        let mut usage = app.world_mut().resource_mut::<PotionUsage>();
        for _ in 0..count {
            usage.record(PotionEffectType::BlueWonder);
        }
    }

    fn drink(app: &mut App, effect: PotionEffectType) {
        let mut input = app.world_mut().resource_mut::<ButtonInput<KeyCode>>();
        input.release_all();
        input.clear();
        input.press(drink_key(effect));
        app.update();
    }

    #[test]
    fn empty_bag_changes_nothing() {
        let (mut app, player) = drink_app();
        drink(&mut app, PotionEffectType::BlueWonder);

        assert_eq!(app.world().resource::<PotionUsage>().total(), 0);
        let ammo = app.world().entity(player).get::<Ammo>().unwrap();
        assert!(!ammo.infinite);
    }

    #[test]
    fn blue_wonder_heals_and_counts() {
        let (mut app, player) = drink_app();
        app.world_mut().get_mut::<Health>(player).unwrap().current = 1;
        give(&mut app, PotionEffectType::BlueWonder);

        drink(&mut app, PotionEffectType::BlueWonder);

        let usage = app.world().resource::<PotionUsage>();
        assert_eq!(usage.count(PotionEffectType::BlueWonder), 1);
        assert_eq!(usage.total(), 1);
        assert_eq!(
            app.world()
                .resource::<PlayerInventory>()
                .count(PotionEffectType::BlueWonder),
            0
        );

        let entity = app.world().entity(player);
        assert_eq!(entity.get::<Health>().unwrap().current, 3);
        assert!(entity.get::<Ammo>().unwrap().infinite);
        assert!(entity.get::<ActiveEffects>().unwrap().infinite_ammo.is_some());
    }

    #[test]
    fn phantom_brew_starts_invulnerability() {
        let (mut app, player) = drink_app();
        give(&mut app, PotionEffectType::PhantomBrew);

        drink(&mut app, PotionEffectType::PhantomBrew);

        let entity = app.world().entity(player);
        assert!(entity.get::<Health>().unwrap().invulnerable);
        assert!(entity.contains::<Invulnerability>());
        assert!(entity.get::<ActiveEffects>().unwrap().is_phantom());
    }

    #[test]
    fn phantom_brew_extends_a_shorter_window() {
        let (mut app, player) = drink_app();
        app.world_mut()
            .entity_mut(player)
            .insert(Invulnerability::new(1.0));
        give(&mut app, PotionEffectType::PhantomBrew);

        drink(&mut app, PotionEffectType::PhantomBrew);

        let window = app.world().entity(player).get::<Invulnerability>().unwrap();
        let phantom_duration = GameConfig::default().potions.phantom_duration;
        assert!(window.timer.remaining_secs() >= phantom_duration - 1e-3);
    }

    #[test]
    fn liquid_aether_past_the_limit_costs_speed() {
        let (mut app, player) = drink_app();
        drank_before(&mut app, 3);
        give(&mut app, PotionEffectType::LiquidAether);

        drink(&mut app, PotionEffectType::LiquidAether);

        let tuning = GameConfig::default();
        let loss = tuning.potions.speed_loss_per_intensity;
        let usage = app.world().resource::<PotionUsage>();
        assert!((usage.speed_loss - loss).abs() < 1e-6);

        let controller = app.world().entity(player).get::<PlayerController>().unwrap();
        assert!((controller.max_speed - (tuning.player.max_speed - loss)).abs() < 1e-6);
    }

    #[test]
    fn phantom_brew_past_the_limit_distorts_controls() {
        let (mut app, player) = drink_app();
        drank_before(&mut app, 4);
        give(&mut app, PotionEffectType::PhantomBrew);

        drink(&mut app, PotionEffectType::PhantomBrew);

        let entity = app.world().entity(player);
        let distortion = entity.get::<ControlDistortion>().unwrap();
        assert!(distortion.enabled);
        assert_eq!(distortion.intensity, 2);
        assert!(entity.get::<ActiveEffects>().unwrap().distortion.is_some());
        assert!(app.world().resource::<SideEffectVisuals>().permanent.contrast > 0.0);
    }

    #[test]
    fn certain_death_roll_kills_a_vulnerable_player() {
        let (mut app, player) = drink_app();
        // Intensity 11 puts the death chance above 100 %
        drank_before(&mut app, 13);
        give(&mut app, PotionEffectType::BlueWonder);

        drink(&mut app, PotionEffectType::BlueWonder);

        let entity = app.world().entity(player);
        assert!(entity.contains::<Dead>());
        assert_eq!(entity.get::<Health>().unwrap().current, 0);
        assert_eq!(app.world().resource::<DeferredQueue<HealthIsZero>>().len(), 1);
    }

    #[test]
    fn death_roll_is_ignored_while_invulnerable() {
        let (mut app, player) = drink_app();
        drank_before(&mut app, 13);
        app.world_mut().get_mut::<Health>(player).unwrap().invulnerable = true;
        give(&mut app, PotionEffectType::BlueWonder);

        drink(&mut app, PotionEffectType::BlueWonder);

        let entity = app.world().entity(player);
        assert!(!entity.contains::<Dead>());
        assert!(entity.get::<Health>().unwrap().is_alive());
        assert!(app.world().resource::<DeferredQueue<HealthIsZero>>().is_empty());
    }
}
