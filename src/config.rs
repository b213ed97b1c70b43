//! Controller configuration components.
//!
//! This module defines the tunables of a platformer controller: walking,
//! the jump budget and arc, and the probing distances and ray insets used
//! by the collision resolvers. Configuration is read when a controller is
//! created and treated as constant afterwards.

use std::f32::consts::FRAC_PI_2;

use bevy::prelude::*;

use crate::error::ControllerError;
use crate::jump::JumpKinematics;

/// Ray launch insets, one pair per probed edge.
///
/// Rays never start exactly on the body's own edge: a ray launched from a
/// surface the body rests against would report a hit at distance zero.
#[derive(Reflect, Debug, Clone, Copy, PartialEq)]
pub struct RayInsets {
    /// Outward offset of the left/right bottom anchors.
    pub bottom_x: f32,
    /// Upward offset of the bottom anchors from the bottom edge.
    pub bottom_y: f32,
    /// Outward offset of the left/right top anchors.
    pub top_x: f32,
    /// Downward offset of the top anchors from the top edge.
    pub top_y: f32,
    /// Inward offset of the side anchors from the leading edge.
    pub side_x: f32,
    /// Inward offset of the upper/lower side anchors from the top/bottom edges.
    pub side_y: f32,
}

impl Default for RayInsets {
    fn default() -> Self {
        Self {
            bottom_x: 0.005,
            bottom_y: 0.3,
            top_x: 0.005,
            top_y: 0.3,
            side_x: 0.05,
            side_y: 0.05,
        }
    }
}

impl RayInsets {
    fn scaled(self, factor: f32) -> Self {
        Self {
            bottom_x: self.bottom_x * factor,
            bottom_y: self.bottom_y * factor,
            top_x: self.top_x * factor,
            top_y: self.top_y * factor,
            side_x: self.side_x * factor,
            side_y: self.side_y * factor,
        }
    }
}

/// Configuration parameters for the platformer controller.
///
/// Lengths are in world units, speeds in units/second, angles in radians.
#[derive(Component, Reflect, Debug, Clone, Copy)]
#[reflect(Component)]
pub struct ControllerConfig {
    // === Walk ===
    /// Maximum horizontal walking speed.
    pub max_walk_speed: f32,

    /// Horizontal acceleration towards the input-derived target speed.
    /// Also used to decelerate when input is released.
    pub walk_acceleration: f32,

    /// Steepest surface the character can walk on (radians).
    /// Steeper side contacts are walls; steeper ground contacts are
    /// non-walkable slopes.
    pub max_slope_angle: f32,

    // === Jump ===
    /// Number of jumps available before touching the ground again.
    pub jump_max_count: u32,

    /// Apex height of a single jump.
    pub jump_max_height: f32,

    /// Time to reach the apex of a jump.
    pub jump_time_to_max_height: f32,

    /// Gravity multiplier applied after the jump button is released
    /// (only with `allow_hold_button_to_jump_higher`).
    pub jump_finish_gravity_multiplier: f32,

    /// Keep the full jump budget when walking off a ledge.
    /// When false, falling without jumping consumes the first jump.
    pub allow_double_jump_when_falling: bool,

    /// Releasing the jump button early switches to the finishing gravity,
    /// producing a shorter arc.
    pub allow_hold_button_to_jump_higher: bool,

    // === Probing ===
    /// Maximum length of every probe ray.
    pub probing_max_distance: f32,

    /// Vertical tolerance for ground and ceiling contacts.
    pub ground_offset_y: f32,

    /// Horizontal gap kept between the leading edge and a wall.
    pub ground_offset_x: f32,

    /// Minimum height a sloped left/right contact must sit above the
    /// center contact to be snapped to while on a slope.
    pub ground_slope_offset_y: f32,

    /// Ray launch insets.
    pub ray_insets: RayInsets,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            // Walk
            max_walk_speed: 8.0,
            walk_acceleration: 6.0,
            max_slope_angle: 60.0_f32.to_radians(),

            // Jump
            jump_max_count: 2,
            jump_max_height: 4.0,
            jump_time_to_max_height: 0.5,
            jump_finish_gravity_multiplier: 3.0,
            allow_double_jump_when_falling: false,
            allow_hold_button_to_jump_higher: false,

            // Probing
            probing_max_distance: 5.0,
            ground_offset_y: 0.01,
            ground_offset_x: 0.01,
            ground_slope_offset_y: 0.05,
            ray_insets: RayInsets::default(),
        }
    }
}

impl ControllerConfig {
    /// Create a config for a responsive player character.
    pub fn player() -> Self {
        Self {
            walk_acceleration: 40.0,
            allow_hold_button_to_jump_higher: true,
            ..default()
        }
    }

    /// Create a config with a single jump and no air jumps.
    pub fn single_jump() -> Self {
        Self {
            jump_max_count: 1,
            ..default()
        }
    }

    /// Multiply every length, speed and acceleration by `factor`.
    ///
    /// Useful to move between world scales, e.g. `scaled(32.0)` for a
    /// 32 pixels-per-unit sprite world. Angles, counts, flags and the
    /// jump timing are unchanged, so the arc keeps its duration.
    pub fn scaled(mut self, factor: f32) -> Self {
        self.max_walk_speed *= factor;
        self.walk_acceleration *= factor;
        self.jump_max_height *= factor;
        self.probing_max_distance *= factor;
        self.ground_offset_y *= factor;
        self.ground_offset_x *= factor;
        self.ground_slope_offset_y *= factor;
        self.ray_insets = self.ray_insets.scaled(factor);
        self
    }

    /// Check that the tunables describe a controller that can run.
    pub fn validate(&self) -> Result<(), ControllerError> {
        if !(self.jump_time_to_max_height > 0.0) {
            return Err(ControllerError::InvalidConfig(
                "jump_time_to_max_height must be positive",
            ));
        }
        if !(self.jump_max_height >= 0.0) {
            return Err(ControllerError::InvalidConfig(
                "jump_max_height must not be negative",
            ));
        }
        if !(self.probing_max_distance > 0.0) {
            return Err(ControllerError::InvalidConfig(
                "probing_max_distance must be positive",
            ));
        }
        if !(self.max_walk_speed >= 0.0 && self.walk_acceleration >= 0.0) {
            return Err(ControllerError::InvalidConfig(
                "walk speed and acceleration must not be negative",
            ));
        }
        if !(self.jump_finish_gravity_multiplier > 0.0) {
            return Err(ControllerError::InvalidConfig(
                "jump_finish_gravity_multiplier must be positive",
            ));
        }
        if !(0.0..=FRAC_PI_2).contains(&self.max_slope_angle) {
            return Err(ControllerError::InvalidConfig(
                "max_slope_angle must be within [0, PI/2]",
            ));
        }
        Ok(())
    }

    /// Derive gravity and launch velocity from the jump height and timing.
    pub fn jump_kinematics(&self) -> JumpKinematics {
        JumpKinematics::from_config(self)
    }

    /// Builder: set walk parameters.
    pub fn with_walk(mut self, max_speed: f32, acceleration: f32) -> Self {
        self.max_walk_speed = max_speed;
        self.walk_acceleration = acceleration;
        self
    }

    /// Builder: set max slope angle (radians).
    pub fn with_max_slope_angle(mut self, angle: f32) -> Self {
        self.max_slope_angle = angle;
        self
    }

    /// Builder: set the jump arc.
    pub fn with_jump(mut self, max_height: f32, time_to_max_height: f32) -> Self {
        self.jump_max_height = max_height;
        self.jump_time_to_max_height = time_to_max_height;
        self
    }

    /// Builder: set the jump budget.
    pub fn with_jump_max_count(mut self, count: u32) -> Self {
        self.jump_max_count = count;
        self
    }

    /// Builder: keep the full jump budget when falling off a ledge.
    pub fn with_double_jump_when_falling(mut self, allowed: bool) -> Self {
        self.allow_double_jump_when_falling = allowed;
        self
    }

    /// Builder: enable hold-to-jump-higher with the given finishing multiplier.
    pub fn with_hold_to_jump_higher(mut self, finish_gravity_multiplier: f32) -> Self {
        self.allow_hold_button_to_jump_higher = true;
        self.jump_finish_gravity_multiplier = finish_gravity_multiplier;
        self
    }

    /// Builder: set probing max distance.
    pub fn with_probing_max_distance(mut self, distance: f32) -> Self {
        self.probing_max_distance = distance;
        self
    }

    /// Builder: set ray insets.
    pub fn with_ray_insets(mut self, insets: RayInsets) -> Self {
        self.ray_insets = insets;
        self
    }
}
