//! Rapier2D physics backend implementation.
//!
//! This module provides the physics backend for Bevy Rapier2D.
//! Enable with the `rapier2d` feature.
//!
//! Controllers are moved kinematically: the backend never applies forces.
//! Rapier is only queried for rays, and the body's `Collider` provides the
//! half-extents the probe anchors are derived from.

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use crate::backend::PlatformerBackend;
use crate::collision::{OneWayPlatform, ProbeHit, SurfaceKind};
use crate::config::ControllerConfig;
use crate::controller::{BodyBounds, PlatformerController};
use crate::error::ControllerError;
use crate::intent::PlatformerIntent;
use crate::systems::{advance_controller, fixed_delta};
use crate::PlatformerControllerSet;

/// Rapier2D physics backend for the platformer controller.
///
/// Ray casts go through `RapierContext` and exclude the body's own
/// collider and all sensors. Hits against entities carrying
/// [`OneWayPlatform`] are reported as [`SurfaceKind::OneWayPlatform`].
pub struct Rapier2dBackend;

impl PlatformerBackend for Rapier2dBackend {
    fn plugin() -> impl Plugin {
        Rapier2dBackendPlugin
    }
}

/// Plugin that sets up Rapier2D-specific systems for the platformer controller.
pub struct Rapier2dBackendPlugin;

impl Plugin for Rapier2dBackendPlugin {
    fn build(&self, app: &mut App) {
        // Phase 1: Preparation - derive bounds for new controllers
        app.add_systems(
            FixedUpdate,
            init_body_bounds.in_set(PlatformerControllerSet::Preparation),
        );

        // Phase 2: Movement - probe and move every controller
        app.add_systems(
            FixedUpdate,
            rapier_move_controllers.in_set(PlatformerControllerSet::Movement),
        );
    }
}

/// Get the half-extents of a collider's bounding box.
///
/// Supports cuboids, capsules and balls. Other shapes return `None`.
pub fn collider_half_extents(collider: &Collider) -> Option<Vec2> {
    if let Some(cuboid) = collider.as_cuboid() {
        Some(cuboid.half_extents())
    } else if let Some(capsule) = collider.as_capsule() {
        // Segment endpoints plus the radius on every side
        let segment = capsule.segment();
        let radius = capsule.radius();
        let half_width = (segment.a().x - segment.b().x).abs() / 2.0;
        let half_height = (segment.a().y - segment.b().y).abs() / 2.0;
        Some(Vec2::new(half_width + radius, half_height + radius))
    } else {
        collider.as_ball().map(|ball| Vec2::splat(ball.radius()))
    }
}

/// Derive [`BodyBounds`] from a collider.
pub fn collider_bounds(collider: &Collider) -> Result<BodyBounds, ControllerError> {
    let half_extents = collider_half_extents(collider).ok_or(ControllerError::MissingBounds)?;
    BodyBounds::new(half_extents)
}

/// Insert [`BodyBounds`] on controllers that don't have one yet.
///
/// A controller without a usable collider cannot compute its probe anchors;
/// its [`PlatformerController`] is removed so it never runs.
fn init_body_bounds(
    mut commands: Commands,
    q_controllers: Query<
        (Entity, Option<&Collider>),
        (With<PlatformerController>, Without<BodyBounds>),
    >,
) {
    for (entity, collider) in &q_controllers {
        let bounds = collider
            .ok_or(ControllerError::MissingBounds)
            .and_then(collider_bounds);

        match bounds {
            Ok(bounds) => {
                commands.entity(entity).insert(bounds);
            }
            Err(err) => {
                error!("{entity}: {err}; controller disabled");
                commands.entity(entity).remove::<PlatformerController>();
            }
        }
    }
}

/// Perform a raycast using RapierContext.
fn rapier_raycast(
    context: &RapierContext,
    origin: Vec2,
    direction: Vec2,
    max_distance: f32,
    exclude_entity: Entity,
    collision_groups: Option<CollisionGroups>,
    q_one_way: &Query<(), With<OneWayPlatform>>,
) -> Option<ProbeHit> {
    // Create filter to exclude the casting entity
    let mut filter = QueryFilter::default()
        .exclude_collider(exclude_entity)
        .exclude_sensors();

    // Apply collision groups if provided
    if let Some(groups) = collision_groups {
        filter = filter.groups(groups);
    }

    context
        .cast_ray_and_get_normal(origin, direction, max_distance, true, filter)
        .map(|(hit_entity, hit)| {
            let surface = if q_one_way.contains(hit_entity) {
                SurfaceKind::OneWayPlatform
            } else {
                SurfaceKind::Solid
            };
            ProbeHit::new(hit.time_of_impact, hit.normal, hit.point, surface)
                .with_entity(hit_entity)
        })
}

/// Rapier-specific movement system.
///
/// Builds a ray caster per body that excludes its own collider and
/// inherits its collision groups, then runs one controller step.
fn rapier_move_controllers(
    rapier_context: ReadRapierContext,
    time: Res<Time<Fixed>>,
    q_one_way: Query<(), With<OneWayPlatform>>,
    mut q_controllers: Query<(
        Entity,
        &ControllerConfig,
        &BodyBounds,
        &mut PlatformerController,
        &mut Transform,
        Option<&mut PlatformerIntent>,
        Option<&CollisionGroups>,
    )>,
) {
    let Ok(context) = rapier_context.single() else {
        return;
    };
    let dt = fixed_delta(&time);

    for (entity, config, bounds, mut controller, mut transform, mut intent, collision_groups) in
        &mut q_controllers
    {
        let groups = collision_groups.copied();
        let caster = |origin: Vec2, direction: Vec2, max_distance: f32| {
            rapier_raycast(
                &context,
                origin,
                direction,
                max_distance,
                entity,
                groups,
                &q_one_way,
            )
        };

        advance_controller(
            &mut controller,
            config,
            bounds,
            &mut transform,
            intent.as_deref_mut(),
            dt,
            &caster,
        );
    }
}

/// Bundle for creating a platformer character with Rapier2D physics.
///
/// The body is kinematic and position-based: the controller writes its
/// `Transform` directly and Rapier only keeps the collider in sync for
/// other bodies' queries.
///
/// # Example
///
/// ```ignore
/// use bevy::prelude::*;
/// use bevy_rapier2d::prelude::*;
/// use msg_platformer_controller::prelude::*;
/// use msg_platformer_controller::rapier::Rapier2dPlatformerBundle;
///
/// fn spawn_player(mut commands: Commands) {
///     commands.spawn((
///         Transform::from_xyz(0.0, 4.0, 0.0),
///         PlatformerController::default(),
///         ControllerConfig::player(),
///         PlatformerIntent::default(),
///         Rapier2dPlatformerBundle::default(),
///         // Half-extents (0.5, 1.0)
///         Collider::cuboid(0.5, 1.0),
///     ));
/// }
/// ```
#[derive(Bundle)]
pub struct Rapier2dPlatformerBundle {
    /// The rigid body type. Should be [`RigidBody::KinematicPositionBased`].
    pub rigid_body: RigidBody,
    /// Which axes are locked. Rotation is locked by default.
    pub locked_axes: LockedAxes,
}

impl Default for Rapier2dPlatformerBundle {
    fn default() -> Self {
        Self {
            rigid_body: RigidBody::KinematicPositionBased,
            locked_axes: LockedAxes::ROTATION_LOCKED,
        }
    }
}

impl Rapier2dPlatformerBundle {
    /// Set which axes should be locked for the rigid body.
    pub fn with_locked_axes(mut self, axes: LockedAxes) -> Self {
        self.locked_axes = axes;
        self
    }
}
