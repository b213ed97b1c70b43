//! Physics backend abstraction.
//!
//! The controller never simulates rigid bodies; all it needs from the world
//! is a synchronous "nearest hit along a ray" query. That query is the
//! [`RayCaster`] trait. Engines plug in through [`PlatformerBackend`], whose
//! plugin registers the systems that build a caster from engine state and
//! drive the controllers with it.

use bevy::prelude::*;

use crate::collision::ProbeHit;

/// Read-only raycast query against the surrounding world.
///
/// Implementations must return the *nearest* surface intersected by the ray
/// starting at `origin`, travelling along `direction` (unit length) for at
/// most `max_distance`. `None` means nothing is in range.
///
/// Closures with the matching signature implement this trait, which is how
/// backends usually wrap a borrowed physics context for one body:
///
/// ```rust
/// use bevy::prelude::*;
/// use msg_platformer_controller::prelude::*;
///
/// let floor_y = 0.0;
/// let caster = |origin: Vec2, direction: Vec2, max_distance: f32| {
///     let distance = (origin.y - floor_y) / -direction.y;
///     (direction.y < 0.0 && distance >= 0.0 && distance <= max_distance)
///         .then(|| ProbeHit::solid(distance, Vec2::Y, origin + direction * distance))
/// };
///
/// assert!(caster.cast(Vec2::new(0.0, 1.0), Vec2::NEG_Y, 5.0).is_some());
/// assert!(caster.cast(Vec2::new(0.0, 9.0), Vec2::NEG_Y, 5.0).is_none());
/// ```
pub trait RayCaster {
    /// Cast a ray and return the nearest hit, if any.
    fn cast(&self, origin: Vec2, direction: Vec2, max_distance: f32) -> Option<ProbeHit>;
}

impl<F> RayCaster for F
where
    F: Fn(Vec2, Vec2, f32) -> Option<ProbeHit>,
{
    #[inline]
    fn cast(&self, origin: Vec2, direction: Vec2, max_distance: f32) -> Option<ProbeHit> {
        self(origin, direction, max_distance)
    }
}

/// Trait for physics backend implementations.
///
/// A backend's plugin is responsible for:
/// - deriving [`BodyBounds`](crate::controller::BodyBounds) for controllers
///   that don't have one yet (in [`PlatformerControllerSet::Preparation`]),
///   refusing to start controllers without a bounding volume;
/// - building a [`RayCaster`] per body and calling
///   [`advance_controller`](crate::systems::advance_controller) (in
///   [`PlatformerControllerSet::Movement`]).
///
/// See the `rapier` module's `Rapier2dBackend` for an implementation.
///
/// [`PlatformerControllerSet::Preparation`]: crate::PlatformerControllerSet::Preparation
/// [`PlatformerControllerSet::Movement`]: crate::PlatformerControllerSet::Movement
pub trait PlatformerBackend: 'static + Send + Sync {
    /// Returns the plugin that sets up this backend.
    fn plugin() -> impl Plugin;
}
