//! Framerate-independent smoothing toward a moving target.

use bevy::prelude::*;

/// Component for entities that glide toward a target position.
///
/// The Z coordinate is left untouched so cameras and parallax layers keep
/// their depth ordering.
#[derive(Component)]
pub struct SmoothFollow {
    /// Target position (None = hold still)
    pub target: Option<Vec2>,
    /// Constant offset added to the target
    pub offset: Vec2,
    /// Interpolation speed multiplier (higher = snappier)
    pub speed: f32,
}

impl Default for SmoothFollow {
    fn default() -> Self {
        Self {
            target: None,
            offset: Vec2::ZERO,
            speed: 5.0,
        }
    }
}

impl SmoothFollow {
    pub fn new(speed: f32, offset: Vec2) -> Self {
        Self {
            speed,
            offset,
            ..default()
        }
    }
}

/// One smoothing step from `current` toward `target`.
pub fn smooth_step(current: Vec2, target: Vec2, speed: f32, dt: f32) -> Vec2 {
    let t = (speed * dt).clamp(0.0, 1.0);
    current.lerp(target, t)
}

/// System that moves followers toward their targets.
pub fn update_smooth_follow(time: Res<Time>, mut query: Query<(&mut Transform, &SmoothFollow)>) {
    let dt = time.delta_secs();

    for (mut transform, follow) in query.iter_mut() {
        let Some(target) = follow.target else {
            continue;
        };
        let next = smooth_step(
            transform.translation.truncate(),
            target + follow.offset,
            follow.speed,
            dt,
        );
        transform.translation.x = next.x;
        transform.translation.y = next.y;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_moves_part_of_the_way() {
        let next = smooth_step(Vec2::ZERO, Vec2::new(10.0, 0.0), 5.0, 0.1);
        assert!((next.x - 5.0).abs() < 1e-5);
    }

    #[test]
    fn large_steps_do_not_overshoot() {
        let next = smooth_step(Vec2::ZERO, Vec2::new(4.0, -2.0), 50.0, 1.0);
        assert_eq!(next, Vec2::new(4.0, -2.0));
    }
}
