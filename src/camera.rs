//! Lagging follow camera.

use bevy::prelude::*;

/// Makes an entity (usually a camera) trail another entity.
///
/// Each frame the follower moves towards `target + offset` by a fraction
/// `lag · dt` of the remaining distance, keeping its own z.
#[derive(Component, Reflect, Debug, Clone, Copy)]
#[reflect(Component)]
pub struct FollowCamera {
    /// Entity to follow.
    pub target: Entity,
    /// Catch-up rate per second. Higher is snappier.
    pub lag: f32,
    /// Offset from the target's position.
    pub offset: Vec2,
}

impl FollowCamera {
    /// Follow `target` with the default lag and offset.
    pub fn new(target: Entity) -> Self {
        Self {
            target,
            lag: 5.0,
            offset: Vec2::new(-2.0, 2.0),
        }
    }

    /// Builder: set the catch-up rate.
    pub fn with_lag(mut self, lag: f32) -> Self {
        self.lag = lag;
        self
    }

    /// Builder: set the offset from the target.
    pub fn with_offset(mut self, offset: Vec2) -> Self {
        self.offset = offset;
        self
    }
}

/// One follow step from `current` towards `target + offset`.
pub fn follow_step(current: Vec2, target: Vec2, offset: Vec2, lag: f32, dt: f32) -> Vec2 {
    current.lerp(target + offset, (lag * dt).clamp(0.0, 1.0))
}
