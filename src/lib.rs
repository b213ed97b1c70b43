//! # `msg_platformer_controller`
//!
//! A deterministic kinematic 2D platformer controller with physics backend abstraction.
//!
//! This crate provides a tight, tuneable platformer controller that:
//! - Moves a body kinematically: no forces, no rigid-body dynamics
//! - Probes the world with short raycasts from the body's edges
//! - Lands on, walks along and climbs walkable slopes
//! - Stops at walls, steep slopes and ceilings
//! - Supports multi-jumps, coyote suppression and hold-to-jump-higher
//! - Passes through one-way platforms from below
//! - Abstracts physics backend for easy swapping (Rapier2D included)
//!
//! ## Architecture
//!
//! Every fixed step, per body:
//! 1. Horizontal speed approaches `input · max_walk_speed`; gravity pulls
//!    vertical speed down unless the body is supported
//! 2. Three ray sets (below, above, in front) clamp the tentative movement
//!    against floors, ceilings and walls
//! 3. Motion state (grounded, on slope, bumps) is rebuilt from the probes
//!    and the jump state machine reconciles against it
//! 4. The clamped movement is applied to the `Transform`
//!
//! The only thing a backend provides is a nearest-hit ray query; see
//! [`backend::RayCaster`].
//!
//! ## Usage
//!
//! ```rust
//! use bevy::prelude::*;
//! use msg_platformer_controller::prelude::*;
//!
//! // Create controller components for a player character
//! let config = ControllerConfig::player();
//! let controller = PlatformerController::new(&config).unwrap();
//! let bounds = BodyBounds::new(Vec2::new(0.5, 1.0)).unwrap();
//! let intent = PlatformerIntent::default();
//!
//! // These can be spawned together with physics components
//! ```

use bevy::prelude::*;
use bevy::transform::TransformSystem;

pub mod backend;
pub mod camera;
pub mod ceiling;
pub mod collision;
pub mod config;
pub mod controller;
pub mod error;
pub mod ground;
pub mod intent;
pub mod jump;
pub mod probe;
pub mod side;
pub mod slope;
pub mod state;
pub mod systems;

#[cfg(feature = "rapier2d")]
pub mod rapier;

#[cfg(test)]
mod test_support;

pub mod prelude {
    //! Convenient re-exports for common usage.

    pub use crate::backend::{PlatformerBackend, RayCaster};
    pub use crate::camera::FollowCamera;
    pub use crate::collision::{OneWayPlatform, ProbeHit, SurfaceKind};
    pub use crate::config::{ControllerConfig, RayInsets};
    pub use crate::controller::{BodyBounds, PlatformerController};
    pub use crate::error::ControllerError;
    pub use crate::intent::{FrameInput, PlatformerIntent};
    pub use crate::jump::{JumpKinematics, JumpPhase};
    pub use crate::state::{
        Airborne, Grounded, MotionState, OnSlope, TouchingCeiling, TouchingWall,
    };
    pub use crate::{PlatformerControllerPlugin, PlatformerControllerSet};

    #[cfg(feature = "rapier2d")]
    pub use crate::rapier::{Rapier2dBackend, Rapier2dPlatformerBundle};
}

/// System sets of the controller, chained in `FixedUpdate`.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlatformerControllerSet {
    /// New controllers are validated and their bounds derived.
    Preparation,
    /// Backends probe the world and move every controller.
    Movement,
    /// Marker components are synced with the step's motion state.
    Sync,
}

/// Main plugin for the platformer controller system.
///
/// This plugin is generic over a physics backend `B` which provides the
/// ray queries and drives the controllers.
///
/// # Type Parameters
/// - `B`: The physics backend implementation (e.g., `Rapier2dBackend`)
///
/// # Examples
///
/// With Rapier2D backend:
/// ```rust,no_run
/// use bevy::prelude::*;
/// use bevy_rapier2d::prelude::*;
/// use msg_platformer_controller::prelude::*;
///
/// App::new()
///     .add_plugins(DefaultPlugins)
///     .add_plugins(RapierPhysicsPlugin::<NoUserData>::default())
///     .add_plugins(PlatformerControllerPlugin::<Rapier2dBackend>::default())
///     .run();
/// ```
pub struct PlatformerControllerPlugin<B: backend::PlatformerBackend> {
    _marker: std::marker::PhantomData<B>,
}

impl<B: backend::PlatformerBackend> Default for PlatformerControllerPlugin<B> {
    fn default() -> Self {
        Self {
            _marker: std::marker::PhantomData,
        }
    }
}

impl<B: backend::PlatformerBackend> Plugin for PlatformerControllerPlugin<B> {
    fn build(&self, app: &mut App) {
        // Register core types
        app.register_type::<config::ControllerConfig>();
        app.register_type::<config::RayInsets>();
        app.register_type::<controller::PlatformerController>();
        app.register_type::<controller::BodyBounds>();
        app.register_type::<intent::PlatformerIntent>();
        app.register_type::<collision::OneWayPlatform>();
        app.register_type::<state::Grounded>();
        app.register_type::<state::Airborne>();
        app.register_type::<state::OnSlope>();
        app.register_type::<state::TouchingWall>();
        app.register_type::<state::TouchingCeiling>();
        app.register_type::<camera::FollowCamera>();

        app.configure_sets(
            FixedUpdate,
            (
                PlatformerControllerSet::Preparation,
                PlatformerControllerSet::Movement,
                PlatformerControllerSet::Sync,
            )
                .chain(),
        );

        // Add the physics backend plugin
        app.add_plugins(B::plugin());

        app.add_systems(
            FixedUpdate,
            systems::prepare_controllers.in_set(PlatformerControllerSet::Preparation),
        );
        app.add_systems(
            FixedUpdate,
            systems::sync_state_markers.in_set(PlatformerControllerSet::Sync),
        );

        // Cameras follow the committed positions once per rendered frame
        app.add_systems(
            PostUpdate,
            systems::follow_cameras.before(TransformSystem::TransformPropagate),
        );
    }
}
