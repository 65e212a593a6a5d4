//! Player-related components.

use bevy::prelude::*;

use crate::core::PlayerTuning;

/// Marker component for the player entity.
#[derive(Component)]
pub struct Player;

/// Jump lifecycle of the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JumpState {
    #[default]
    Grounded,
    /// Jump was pressed, take-off happens this frame
    PrepareToJump,
    /// Take-off applied, waiting to leave the ground
    Jumping,
    InFlight,
    /// Touched down this frame
    Landed,
}

/// What a jump state transition asks the movement code to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JumpSignal {
    None,
    /// Apply take-off velocity
    TakeOff,
    /// Left the ground
    Jumped,
    /// Touched down
    Landed,
}

impl JumpState {
    /// Advance one frame given whether the body is on the ground.
    pub fn advance(self, grounded: bool) -> (Self, JumpSignal) {
        match self {
            JumpState::PrepareToJump => (JumpState::Jumping, JumpSignal::TakeOff),
            JumpState::Jumping if !grounded => (JumpState::InFlight, JumpSignal::Jumped),
            JumpState::InFlight if grounded => (JumpState::Landed, JumpSignal::Landed),
            JumpState::Landed => (JumpState::Grounded, JumpSignal::None),
            state => (state, JumpSignal::None),
        }
    }
}

/// Player tuning and control state.
///
/// `max_speed` and `jump_take_off_speed` are the player's own values.
/// Temporary potion boosts live in [`MovementModifiers`] and are applied
/// on top, so reverting a boost never drifts the base values.
#[derive(Component, Debug)]
pub struct PlayerController {
    pub max_speed: f32,
    pub jump_take_off_speed: f32,
    pub jump_state: JumpState,
    /// Jump released early, damp upward velocity
    pub stop_jump: bool,
    /// Take-off requested this frame
    pub jump: bool,
    pub control_enabled: bool,
    /// Horizontal input after distortion, in -1..=1
    pub move_input: f32,
    /// 1.0 facing right, -1.0 facing left
    pub facing: f32,
    pub touching_wall: bool,
    /// Game time of the last wall jump
    pub last_wall_jump: Option<f32>,
}

impl PlayerController {
    pub fn from_tuning(tuning: &PlayerTuning) -> Self {
        Self {
            max_speed: tuning.max_speed,
            jump_take_off_speed: tuning.jump_take_off_speed,
            jump_state: JumpState::Grounded,
            stop_jump: false,
            jump: false,
            control_enabled: true,
            move_input: 0.0,
            facing: 1.0,
            touching_wall: false,
            last_wall_jump: None,
        }
    }

    /// Whether enough time passed since the last wall jump.
    pub fn wall_jump_ready(&self, now: f32, cooldown: f32) -> bool {
        self.last_wall_jump
            .map_or(true, |last| now >= last + cooldown)
    }

    /// Kick off the wall in front of the player.
    ///
    /// Returns false when the cooldown is still running.
    pub fn try_wall_jump(
        &mut self,
        body: &mut KinematicBody,
        now: f32,
        tuning: &PlayerTuning,
    ) -> bool {
        if !self.wall_jump_ready(now, tuning.wall_jump_cooldown) {
            return false;
        }

        body.velocity.x = -self.facing * tuning.wall_jump_horizontal_velocity;
        body.velocity.y = tuning.wall_jump_vertical_velocity;
        self.jump_state = JumpState::InFlight;
        self.last_wall_jump = Some(now);
        true
    }

    /// Reset control state after a respawn.
    pub fn reset(&mut self) {
        self.jump_state = JumpState::Grounded;
        self.stop_jump = false;
        self.jump = false;
        self.control_enabled = true;
        self.move_input = 0.0;
        self.touching_wall = false;
    }
}

/// Velocity integrated by the movement systems and fed to the character
/// controller.
#[derive(Component, Debug, Default)]
pub struct KinematicBody {
    pub velocity: Vec2,
    pub grounded: bool,
}

impl KinematicBody {
    /// Apply take-off or early jump release to the vertical velocity.
    pub fn apply_jump(
        &mut self,
        take_off: bool,
        stop_jump: bool,
        take_off_speed: f32,
        deceleration: f32,
    ) {
        if take_off && self.grounded {
            self.velocity.y = take_off_speed;
        } else if stop_jump && self.velocity.y > 0.0 {
            self.velocity.y *= deceleration;
        }
    }

    /// Gravity pulls harder while falling when `fall_modifier` > 1.
    pub fn apply_gravity(&mut self, gravity: f32, fall_modifier: f32, dt: f32) {
        let scale = if self.velocity.y < 0.0 { fall_modifier } else { 1.0 };
        self.velocity.y -= gravity * scale * dt;
    }
}

/// Multipliers from temporary effects, recomputed every frame.
#[derive(Component, Debug, Clone, Copy)]
pub struct MovementModifiers {
    pub speed: f32,
    pub jump: f32,
}

impl Default for MovementModifiers {
    fn default() -> Self {
        Self {
            speed: 1.0,
            jump: 1.0,
        }
    }
}

/// Present while the player passes through enemies.
#[derive(Component)]
pub struct Phasing;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_jump_cycle() {
        let mut state = JumpState::PrepareToJump;
        let mut signals = Vec::new();

        for grounded in [true, true, false, false, true, true] {
            let (next, signal) = state.advance(grounded);
            state = next;
            signals.push(signal);
        }

        assert_eq!(
            signals,
            vec![
                JumpSignal::TakeOff,
                JumpSignal::None,
                JumpSignal::Jumped,
                JumpSignal::None,
                JumpSignal::Landed,
                JumpSignal::None,
            ]
        );
        assert_eq!(state, JumpState::Grounded);
    }

    #[test]
    fn grounded_stays_grounded() {
        assert_eq!(
            JumpState::Grounded.advance(false),
            (JumpState::Grounded, JumpSignal::None)
        );
    }

    #[test]
    fn wall_jump_respects_cooldown() {
        let tuning = PlayerTuning::default();
        let mut controller = PlayerController::from_tuning(&tuning);
        let mut body = KinematicBody::default();

        assert!(controller.try_wall_jump(&mut body, 1.0, &tuning));
        assert_eq!(controller.jump_state, JumpState::InFlight);
        assert_eq!(body.velocity.x, -tuning.wall_jump_horizontal_velocity);
        assert_eq!(body.velocity.y, tuning.wall_jump_vertical_velocity);

        body.velocity = Vec2::ZERO;
        assert!(!controller.try_wall_jump(&mut body, 1.2, &tuning));
        assert_eq!(body.velocity, Vec2::ZERO);

        controller.facing = -1.0;
        assert!(controller.try_wall_jump(&mut body, 1.5, &tuning));
        assert_eq!(body.velocity.x, tuning.wall_jump_horizontal_velocity);
    }

    #[test]
    fn take_off_requires_ground() {
        let mut body = KinematicBody::default();
        body.apply_jump(true, false, 10.0, 0.5);
        assert_eq!(body.velocity.y, 0.0);

        body.grounded = true;
        body.apply_jump(true, false, 10.0, 0.5);
        assert_eq!(body.velocity.y, 10.0);
    }

    #[test]
    fn releasing_jump_damps_only_upward_motion() {
        let mut body = KinematicBody {
            velocity: Vec2::new(0.0, 8.0),
            grounded: false,
        };
        body.apply_jump(false, true, 10.0, 0.5);
        assert_eq!(body.velocity.y, 4.0);

        body.velocity.y = -3.0;
        body.apply_jump(false, true, 10.0, 0.5);
        assert_eq!(body.velocity.y, -3.0);
    }

    #[test]
    fn falling_uses_gravity_modifier() {
        let mut body = KinematicBody {
            velocity: Vec2::new(0.0, -1.0),
            grounded: false,
        };
        body.apply_gravity(10.0, 2.0, 0.5);
        assert_eq!(body.velocity.y, -11.0);

        body.velocity.y = 1.0;
        body.apply_gravity(10.0, 2.0, 0.5);
        assert_eq!(body.velocity.y, -4.0);
    }
}
