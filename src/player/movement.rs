//! Platformer movement: input, jump state machine, wall jumps and shooting.

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use super::components::*;
use super::distortion::ControlDistortion;
use crate::combat::{spawn_projectile, Ammo, Health, ProjectileOwner};
use crate::core::{
    Deferred, GameConfig, GameplaySet, PlayerJumped, PlayerLanded, PlayerStopJump, PlayerTuning,
};
use crate::world::{layers, LevelEntity, Wall};

/// Set up player movement systems.
pub fn setup_movement_systems(app: &mut App) {
    app.add_systems(
        Update,
        (detect_walls, read_player_input)
            .chain()
            .in_set(GameplaySet::Input),
    )
    .add_systems(
        Update,
        (read_controller_output, update_jump_state, compute_velocity)
            .chain()
            .in_set(GameplaySet::Movement),
    );
}

/// Raw horizontal axis from the keyboard.
fn horizontal_axis(keyboard: &ButtonInput<KeyCode>) -> f32 {
    let mut axis = 0.0;
    if keyboard.any_pressed([KeyCode::KeyA, KeyCode::ArrowLeft]) {
        axis -= 1.0;
    }
    if keyboard.any_pressed([KeyCode::KeyD, KeyCode::ArrowRight]) {
        axis += 1.0;
    }
    axis
}

/// Check for a wall directly in front of the player.
fn detect_walls(
    config: Res<GameConfig>,
    rapier_context: Query<&RapierContext>,
    wall_query: Query<(), With<Wall>>,
    mut player_query: Query<(Entity, &Transform, &mut PlayerController), With<Player>>,
) {
    let Ok((player_entity, transform, mut controller)) = player_query.get_single_mut() else {
        return;
    };
    let Ok(context) = rapier_context.get_single() else {
        controller.touching_wall = false;
        return;
    };

    let half_width = config.player.half_size.0;
    let is_wall = |entity: Entity| wall_query.contains(entity);
    let filter = QueryFilter::default()
        .exclude_collider(player_entity)
        .exclude_sensors()
        .predicate(&is_wall);

    controller.touching_wall = context
        .cast_ray(
            transform.translation.truncate(),
            Vec2::new(controller.facing, 0.0),
            half_width + config.player.wall_check_distance,
            true,
            filter,
        )
        .is_some();
}

/// Read keyboard input into the controller: move axis, jumps, wall jumps, shooting.
fn read_player_input(
    mut commands: Commands,
    keyboard: Res<ButtonInput<KeyCode>>,
    time: Res<Time>,
    config: Res<GameConfig>,
    mut player_query: Query<
        (
            Entity,
            &Transform,
            &mut PlayerController,
            &mut KinematicBody,
            &ControlDistortion,
            &mut Ammo,
            &Health,
        ),
        With<Player>,
    >,
    mut stop_jump_events: Deferred<PlayerStopJump>,
) {
    let Ok((entity, transform, mut controller, mut body, distortion, mut ammo, health)) =
        player_query.get_single_mut()
    else {
        return;
    };

    if !controller.control_enabled || !health.is_alive() {
        controller.move_input = 0.0;
        return;
    }

    controller.move_input = distortion.distort(horizontal_axis(&keyboard), rand::random::<f32>());

    let jump_pressed = keyboard.just_pressed(KeyCode::Space);
    if controller.jump_state == JumpState::Grounded && jump_pressed {
        controller.jump_state = JumpState::PrepareToJump;
    } else if keyboard.just_released(KeyCode::Space) {
        controller.stop_jump = true;
        stop_jump_events.schedule(PlayerStopJump { player: entity });
    }

    if keyboard.just_pressed(KeyCode::KeyQ) {
        shoot(&mut commands, transform, &controller, &mut ammo, &config.player);
    }

    // Wall jump: airborne, against a wall, jump pressed
    if !body.grounded && controller.touching_wall && jump_pressed {
        let now = time.elapsed_secs();
        if controller.try_wall_jump(&mut body, now, &config.player) {
            debug!("Wall jump at {:.2}s", now);
        } else {
            debug!("Wall jump is on cooldown");
        }
    }
}

/// Fire a projectile in the facing direction if ammo allows.
fn shoot(
    commands: &mut Commands,
    transform: &Transform,
    controller: &PlayerController,
    ammo: &mut Ammo,
    tuning: &PlayerTuning,
) {
    if !ammo.can_shoot() {
        info!("No ammo left! Reach a checkpoint or drink a Blue Wonder.");
        return;
    }

    let direction = Vec2::new(controller.facing, 0.0);
    let muzzle = transform.translation.truncate() + direction * (tuning.half_size.0 + 0.2);
    spawn_projectile(commands, muzzle, direction, ProjectileOwner::Player);
    ammo.consume();
}

/// Pull grounded state from the character controller's last move.
fn read_controller_output(
    mut player_query: Query<
        (&mut KinematicBody, Option<&KinematicCharacterControllerOutput>),
        With<Player>,
    >,
) {
    let Ok((mut body, output)) = player_query.get_single_mut() else {
        return;
    };
    let Some(output) = output else {
        return;
    };

    body.grounded = output.grounded;
    if body.grounded && body.velocity.y < 0.0 {
        body.velocity.y = 0.0;
    }

    // Bumped a ceiling
    if body.velocity.y > 0.0
        && output.desired_translation.y > 0.0
        && output.effective_translation.y < output.desired_translation.y * 0.5
    {
        body.velocity.y = 0.0;
    }
}

/// Run the jump state machine and schedule jump/land events.
fn update_jump_state(
    mut player_query: Query<(Entity, &mut PlayerController, &KinematicBody), With<Player>>,
    mut jumped_events: Deferred<PlayerJumped>,
    mut landed_events: Deferred<PlayerLanded>,
) {
    let Ok((entity, mut controller, body)) = player_query.get_single_mut() else {
        return;
    };

    controller.jump = false;
    let (next, signal) = controller.jump_state.advance(body.grounded);
    controller.jump_state = next;

    match signal {
        JumpSignal::TakeOff => {
            controller.jump = true;
            controller.stop_jump = false;
        }
        JumpSignal::Jumped => jumped_events.schedule(PlayerJumped { player: entity }),
        JumpSignal::Landed => landed_events.schedule(PlayerLanded { player: entity }),
        JumpSignal::None => {}
    }
}

/// Turn controller state into velocity and a character controller move.
fn compute_velocity(
    time: Res<Time>,
    config: Res<GameConfig>,
    mut player_query: Query<
        (
            &mut PlayerController,
            &mut KinematicBody,
            &MovementModifiers,
            &mut KinematicCharacterController,
            &mut Sprite,
        ),
        With<Player>,
    >,
) {
    let Ok((mut controller, mut body, modifiers, mut character, mut sprite)) =
        player_query.get_single_mut()
    else {
        return;
    };

    let tuning = &config.player;
    let dt = time.delta_secs();
    let take_off_speed = controller.jump_take_off_speed * modifiers.jump * tuning.jump_modifier;

    let stop_jump = controller.stop_jump && !controller.jump;
    body.apply_jump(controller.jump, stop_jump, take_off_speed, tuning.jump_deceleration);
    if controller.jump {
        controller.jump = false;
    } else if controller.stop_jump {
        controller.stop_jump = false;
    }

    body.apply_gravity(tuning.gravity, tuning.gravity_modifier, dt);

    // Against a wall the horizontal velocity is kept so wall-jump kicks survive
    if !controller.touching_wall {
        body.velocity.x = controller.move_input * controller.max_speed * modifiers.speed;
    }

    if controller.move_input > 0.01 {
        controller.facing = 1.0;
        sprite.flip_x = false;
    } else if controller.move_input < -0.01 {
        controller.facing = -1.0;
        sprite.flip_x = true;
    }

    character.translation = Some(body.velocity * dt);
}

/// Spawn the player entity.
pub fn spawn_player(commands: &mut Commands, position: Vec2, config: &GameConfig) -> Entity {
    let tuning = &config.player;
    let half_size = Vec2::new(tuning.half_size.0, tuning.half_size.1);

    commands
        .spawn((
            Player,
            PlayerController::from_tuning(tuning),
            KinematicBody::default(),
            MovementModifiers::default(),
            ControlDistortion {
                stutter_chance: config.potions.stutter_chance,
                ..default()
            },
            Health::new(tuning.max_hp),
            Ammo::new(tuning.max_ammo),
            Sprite {
                color: Color::srgb(0.95, 0.85, 0.6),
                custom_size: Some(half_size * 2.0),
                ..default()
            },
            Transform::from_translation(position.extend(10.0)),
            // Rapier physics components
            RigidBody::KinematicPositionBased,
            Collider::cuboid(half_size.x, half_size.y),
            CollisionGroups::new(layers::PLAYER, Group::ALL),
            KinematicCharacterController {
                offset: CharacterLength::Absolute(0.01),
                snap_to_ground: Some(CharacterLength::Absolute(0.1)),
                filter_flags: QueryFilterFlags::EXCLUDE_SENSORS,
                ..default()
            },
            LevelEntity,
        ))
        .id()
}
