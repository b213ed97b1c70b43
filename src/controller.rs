//! The per-frame movement integrator.
//!
//! [`PlatformerController`] owns a body's speeds and the state that carries
//! across frames (jump budget, slope memory, last motion flags). One call to
//! [`PlatformerController::step`] runs the full cycle:
//!
//! 1. jump press/release events
//! 2. speed integration
//! 3. probe anchor refresh from the *current* position
//! 4. ground, side (only when moving horizontally) and ceiling (only when
//!    ascending) resolution
//! 5. jump state reconciliation
//! 6. position commit

use bevy::prelude::*;

use crate::backend::RayCaster;
use crate::ceiling::resolve_ceiling;
use crate::config::ControllerConfig;
use crate::error::ControllerError;
use crate::ground::{resolve_ground, SlopeMemory};
use crate::intent::FrameInput;
use crate::jump::{JumpKinematics, JumpState};
use crate::probe::ProbeAnchors;
use crate::side::resolve_side;
use crate::state::MotionState;

/// Half-extents of the body's bounding box.
///
/// Read once when the controller starts; probe anchors are derived from it
/// every frame.
#[derive(Component, Reflect, Debug, Clone, Copy, PartialEq)]
#[reflect(Component)]
pub struct BodyBounds {
    half_extents: Vec2,
}

impl BodyBounds {
    /// Create bounds from half-extents, which must be positive and finite.
    pub fn new(half_extents: Vec2) -> Result<Self, ControllerError> {
        if half_extents.is_finite() && half_extents.cmpgt(Vec2::ZERO).all() {
            Ok(Self { half_extents })
        } else {
            Err(ControllerError::InvalidBounds(half_extents))
        }
    }

    /// Create bounds from a full box size.
    pub fn from_size(size: Vec2) -> Result<Self, ControllerError> {
        Self::new(size / 2.0)
    }

    /// Half-extents of the bounding box.
    #[inline]
    pub fn half_extents(&self) -> Vec2 {
        self.half_extents
    }
}

/// `-1`, `0` or `1`. Unlike [`f32::signum`], zero maps to zero.
#[inline]
fn sign_or_zero(value: f32) -> f32 {
    if value > 0.0 {
        1.0
    } else if value < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// Step horizontal speed towards `target` by `acceleration·dt`.
///
/// Never overshoots: when a step would cross `target`, `target` is returned.
/// A zero difference leaves the speed untouched.
pub fn integrate_horizontal_speed(speed: f32, target: f32, acceleration: f32, dt: f32) -> f32 {
    let direction = sign_or_zero(target - speed);
    if direction == 0.0 {
        return speed;
    }
    let next = speed + acceleration * dt * direction;
    if sign_or_zero(target - next) == direction {
        next
    } else {
        target
    }
}

/// Apply gravity to vertical speed.
///
/// A grounded body that is not ascending has zero vertical speed.
pub fn integrate_vertical_speed(speed: f32, gravity: f32, grounded: bool, dt: f32) -> f32 {
    if grounded && speed <= 0.0 {
        0.0
    } else {
        speed - gravity * dt
    }
}

/// Kinematic platformer controller.
///
/// Build it from the entity's [`ControllerConfig`] with
/// [`new`](Self::new); jump kinematics are derived once at that point.
/// The Bevy systems rebuild it from the config when the component is added,
/// so `PlatformerController::default()` is fine when spawning.
#[derive(Component, Reflect, Debug, Clone, Copy, PartialEq)]
#[reflect(Component)]
#[require(ControllerConfig)]
pub struct PlatformerController {
    speed: Vec2,
    speed_cap: f32,
    motion: MotionState,
    jump: JumpState,
    slope: SlopeMemory,
    kinematics: JumpKinematics,
}

impl Default for PlatformerController {
    fn default() -> Self {
        Self::with_kinematics(ControllerConfig::default().jump_kinematics())
    }
}

impl PlatformerController {
    /// Create a controller at rest for the given config.
    pub fn new(config: &ControllerConfig) -> Result<Self, ControllerError> {
        config.validate()?;
        Ok(Self::with_kinematics(config.jump_kinematics()))
    }

    fn with_kinematics(kinematics: JumpKinematics) -> Self {
        Self {
            speed: Vec2::ZERO,
            speed_cap: 0.0,
            motion: MotionState::default(),
            jump: JumpState::default(),
            slope: SlopeMemory::default(),
            kinematics,
        }
    }

    /// Current speed in units/second.
    #[inline]
    pub fn velocity(&self) -> Vec2 {
        self.speed
    }

    /// Current horizontal speed.
    #[inline]
    pub fn horizontal_speed(&self) -> f32 {
        self.speed.x
    }

    /// Current vertical speed.
    #[inline]
    pub fn vertical_speed(&self) -> f32 {
        self.speed.y
    }

    /// Horizontal speed cap derived from the last step's input.
    #[inline]
    pub fn speed_cap(&self) -> f32 {
        self.speed_cap
    }

    /// Contact flags from the last step.
    #[inline]
    pub fn motion(&self) -> &MotionState {
        &self.motion
    }

    /// Jump budget and phase.
    #[inline]
    pub fn jump_state(&self) -> &JumpState {
        &self.jump
    }

    /// Jumps used since the last ground contact.
    #[inline]
    pub fn jumps_used(&self) -> u32 {
        self.jump.jumps_used()
    }

    /// Gravity and launch velocity in use.
    #[inline]
    pub fn kinematics(&self) -> &JumpKinematics {
        &self.kinematics
    }

    /// Whether the last step left the body on the ground or a slope.
    #[inline]
    pub fn is_supported(&self) -> bool {
        self.motion.is_supported()
    }

    /// Jump press event.
    ///
    /// Launches the body if the budget allows it and returns `true`. A
    /// launch drops ground and slope support for the rest of the frame so
    /// the new upward speed survives integration.
    pub fn jump(&mut self, config: &ControllerConfig) -> bool {
        let launched = self
            .jump
            .try_jump(config.jump_max_count, self.motion.grounded);
        if launched {
            self.speed.y = self.kinematics.initial_velocity;
            self.motion.grounded = false;
            self.motion.on_slope = false;
            self.slope.on_slope = false;
            debug!(
                "jump {}/{}",
                self.jump.jumps_used(),
                config.jump_max_count
            );
        }
        launched
    }

    /// Jump release event. Only has an effect with
    /// `allow_hold_button_to_jump_higher`.
    pub fn stop_jump(&mut self, config: &ControllerConfig) {
        if config.allow_hold_button_to_jump_higher {
            self.jump.stop_jump();
        }
    }

    /// Run one frame and move `position`. Returns the applied movement.
    pub fn step(
        &mut self,
        config: &ControllerConfig,
        bounds: &BodyBounds,
        position: &mut Vec2,
        input: FrameInput,
        dt: f32,
        caster: &impl RayCaster,
    ) -> Vec2 {
        if input.jump_pressed {
            self.jump(config);
        }
        if input.jump_released {
            self.stop_jump(config);
        }

        self.speed_cap = input.horizontal.clamp(-1.0, 1.0) * config.max_walk_speed;
        self.speed.x =
            integrate_horizontal_speed(self.speed.x, self.speed_cap, config.walk_acceleration, dt);
        self.speed.y = integrate_vertical_speed(
            self.speed.y,
            self.jump.gravity(&self.kinematics),
            self.motion.grounded,
            dt,
        );

        let mut movement = self.speed * dt;
        let anchors = ProbeAnchors::refresh(
            *position,
            bounds.half_extents(),
            movement.x,
            &config.ray_insets,
        );

        let ground = resolve_ground(caster, &anchors.bottom, movement.y, self.slope, config);
        movement.y = ground.move_y;
        self.slope = ground.memory();

        let mut motion = MotionState {
            grounded: ground.grounded,
            grounded_points: ground.grounded_points,
            on_slope: ground.on_slope,
            above_slope: ground.above_slope,
            on_non_walkable_slope: ground.on_non_walkable_slope,
            non_walkable_points: ground.non_walkable,
            ..default()
        };

        if let Some(side_anchors) = &anchors.side {
            let side = resolve_side(
                caster,
                side_anchors,
                movement.x,
                ground.on_non_walkable_slope,
                config,
            );
            movement.x = side.move_x;
            motion.wall_direction = side.direction;
            motion.wall_points = side.bumped_points;
            motion.wall_bumped = side.bumped;
            if side.bumped {
                trace!("side bump at {:?}, direction {}", side.bumped_points, side.direction);
                self.speed.x = 0.0;
            }
        }

        if self.speed.y > 0.0 {
            let ceiling = resolve_ceiling(caster, &anchors.top, movement.y, config);
            movement.y = ceiling.move_y;
            motion.ceiling_points = ceiling.bumped_points;
            motion.ceiling_bumped = ceiling.bumped;
            if ceiling.bumped {
                trace!("ceiling bump at {:?}", ceiling.bumped_points);
                self.speed.y = 0.0;
            }
        }

        self.motion = motion;
        self.jump
            .reconcile(motion.is_supported(), self.speed.y, config);

        *position += movement;
        movement
    }
}
