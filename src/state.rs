//! Motion state and state marker components.
//!
//! [`MotionState`] is rebuilt from scratch every controller step from that
//! step's probe results. The marker components mirror it on the entity so
//! gameplay systems can filter with `With<Grounded>` and friends; they are
//! added/removed by [`sync_state_markers`](crate::systems::sync_state_markers).

use bevy::prelude::*;

/// Contact flags produced by one controller step.
///
/// Per-point arrays are indexed with [`slot`](crate::probe::slot): bottom and
/// top points by `LEFT`/`RIGHT`/`CENTER`, side points by `TOP`/`BOTTOM`/`CENTER`.
#[derive(Reflect, Debug, Clone, Copy, PartialEq, Default)]
pub struct MotionState {
    /// At least one bottom probe is in contact.
    pub grounded: bool,
    /// Contact flag per bottom probe.
    pub grounded_points: [bool; 3],
    /// Grounded on a walkable slope.
    pub on_slope: bool,
    /// A slope candidate lies below the body (takes effect next step).
    pub above_slope: bool,
    /// Grounded over a surface too steep to walk.
    pub on_non_walkable_slope: bool,
    /// Per bottom probe: the surface below is too steep to walk.
    pub non_walkable_points: [bool; 3],
    /// At least one top probe bumped.
    pub ceiling_bumped: bool,
    /// Bump flag per top probe.
    pub ceiling_points: [bool; 3],
    /// At least one side probe bumped.
    pub wall_bumped: bool,
    /// Bump flag per side probe.
    pub wall_points: [bool; 3],
    /// Direction of the last side probe (`-1`, `0` when not moving, `1`).
    pub wall_direction: f32,
}

impl MotionState {
    /// Whether the body is supported by ground or a slope.
    #[inline]
    pub fn is_supported(&self) -> bool {
        self.grounded || self.on_slope
    }
}

/// Marker component indicating the character is grounded.
///
/// Mutually exclusive with [`Airborne`].
///
/// # Example
///
/// ```rust
/// use bevy::prelude::*;
/// use msg_platformer_controller::prelude::*;
///
/// fn landed(query: Query<Entity, Added<Grounded>>) {
///     for entity in &query {
///         info!("{entity} landed");
///     }
/// }
/// ```
#[derive(Component, Reflect, Debug, Clone, Copy, Default)]
#[reflect(Component)]
pub struct Grounded;

/// Marker component indicating the character is airborne.
#[derive(Component, Reflect, Debug, Clone, Copy, Default)]
#[reflect(Component)]
pub struct Airborne;

/// Marker component indicating the character stands on a walkable slope.
#[derive(Component, Reflect, Debug, Clone, Copy, Default)]
#[reflect(Component)]
pub struct OnSlope;

/// Marker component indicating the character ran into a wall this step.
#[derive(Component, Reflect, Debug, Clone, Copy)]
#[reflect(Component)]
pub struct TouchingWall {
    /// Direction from the character towards the wall.
    pub direction: Vec2,
}

impl Default for TouchingWall {
    fn default() -> Self {
        Self {
            direction: Vec2::X,
        }
    }
}

impl TouchingWall {
    /// Create a wall contact towards `direction`.
    pub fn new(direction: Vec2) -> Self {
        Self { direction }
    }

    /// Check if the wall is on the left side.
    pub fn is_left(&self) -> bool {
        self.direction.x < 0.0
    }

    /// Check if the wall is on the right side.
    pub fn is_right(&self) -> bool {
        self.direction.x > 0.0
    }
}

/// Marker component indicating the character bumped its head this step.
#[derive(Component, Reflect, Debug, Clone, Copy, Default)]
#[reflect(Component)]
pub struct TouchingCeiling;
