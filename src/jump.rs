//! Jump budget state machine.
//!
//! Tracks how many jumps were used since the last ground contact, which
//! gravity regime is active, and whether the body is airborne because it
//! jumped or because it fell.

use bevy::prelude::*;

use crate::config::ControllerConfig;

/// Jump gravity and launch velocity, derived once from the jump arc.
///
/// Projectile kinematics for an apex height `h` reached after `t` seconds:
/// `gravity = 2h / t²`, `initial_velocity = 2h / t`.
#[derive(Reflect, Debug, Clone, Copy, PartialEq)]
pub struct JumpKinematics {
    /// Gravity while rising (and while grounded).
    pub gravity: f32,
    /// Gravity after the jump button is released early.
    pub finish_gravity: f32,
    /// Vertical speed given by a jump.
    pub initial_velocity: f32,
}

impl JumpKinematics {
    /// Derive kinematics from a config's jump arc.
    pub fn from_config(config: &ControllerConfig) -> Self {
        let height = config.jump_max_height;
        let time = config.jump_time_to_max_height;
        let gravity = 2.0 * height / (time * time);
        Self {
            gravity,
            finish_gravity: gravity * config.jump_finish_gravity_multiplier,
            initial_velocity: 2.0 * height / time,
        }
    }
}

/// Why the body is (or isn't) in the air.
#[derive(Reflect, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JumpPhase {
    /// Supported by ground or a slope.
    #[default]
    Grounded,
    /// Airborne after a jump, until the next landing.
    Jumping,
    /// Airborne without having jumped (walked off a ledge).
    Falling,
}

/// Which gravity magnitude applies.
#[derive(Reflect, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GravityRegime {
    /// Regular jump gravity.
    #[default]
    Rising,
    /// Steeper gravity after an early jump release.
    Finishing,
}

/// Jump counter, phase and gravity regime.
#[derive(Reflect, Debug, Clone, Copy, PartialEq, Default)]
pub struct JumpState {
    jumps_used: u32,
    phase: JumpPhase,
    regime: GravityRegime,
}

impl JumpState {
    /// Jumps used since the last ground contact.
    #[inline]
    pub fn jumps_used(&self) -> u32 {
        self.jumps_used
    }

    /// Current phase.
    #[inline]
    pub fn phase(&self) -> JumpPhase {
        self.phase
    }

    /// Current gravity regime.
    #[inline]
    pub fn regime(&self) -> GravityRegime {
        self.regime
    }

    /// Whether the body is airborne because it jumped.
    #[inline]
    pub fn is_jumping(&self) -> bool {
        self.phase == JumpPhase::Jumping
    }

    /// Gravity magnitude for the active regime.
    pub fn gravity(&self, kinematics: &JumpKinematics) -> f32 {
        match self.regime {
            GravityRegime::Rising => kinematics.gravity,
            GravityRegime::Finishing => kinematics.finish_gravity,
        }
    }

    /// Handle a jump press.
    ///
    /// Spends one jump when the budget allows it and returns `true`; the
    /// caller then launches the body. An exhausted budget is a no-op,
    /// except that it is refilled when the body is `grounded`.
    pub fn try_jump(&mut self, max_count: u32, grounded: bool) -> bool {
        if self.jumps_used < max_count {
            self.jumps_used += 1;
            self.phase = JumpPhase::Jumping;
            self.regime = GravityRegime::Rising;
            true
        } else {
            if grounded {
                self.jumps_used = 0;
            }
            false
        }
    }

    /// Handle a jump release: cut the arc short with the finishing gravity.
    ///
    /// Vertical speed is untouched; only the gravity regime changes.
    pub fn stop_jump(&mut self) {
        if self.is_jumping() {
            self.regime = GravityRegime::Finishing;
        }
    }

    /// Fold this frame's probe results into the jump state.
    ///
    /// `supported` is "grounded or on a slope" after probing. Falling
    /// without having jumped silently consumes the first jump unless the
    /// config allows the full budget while falling.
    pub fn reconcile(&mut self, supported: bool, vertical_speed: f32, config: &ControllerConfig) {
        if supported {
            self.jumps_used = 0;
            self.phase = JumpPhase::Grounded;
            self.regime = GravityRegime::Rising;
        } else if vertical_speed < 0.0 && !self.is_jumping() {
            self.phase = JumpPhase::Falling;
            if self.jumps_used == 0 && !config.allow_double_jump_when_falling {
                self.jumps_used = 1.min(config.jump_max_count);
            }
        }
    }
}
