//! Probe hit data and surface capabilities.
//!
//! A [`ProbeHit`] is what the raycast port reports for the nearest surface
//! along a ray. Every hit carries a [`SurfaceKind`] so resolvers can ask
//! whether the surface lets bodies pass through from below.

use bevy::prelude::*;

/// What kind of collidable surface a probe hit.
#[derive(Reflect, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SurfaceKind {
    /// Blocks from every side.
    #[default]
    Solid,
    /// Supports bodies resting on top but never blocks upward passage.
    OneWayPlatform,
}

impl SurfaceKind {
    /// Whether a body moving upward passes through this surface.
    #[inline]
    pub fn passes_from_below(self) -> bool {
        matches!(self, SurfaceKind::OneWayPlatform)
    }
}

/// Marker component for one-way platforms.
///
/// Backends report hits against entities carrying this component as
/// [`SurfaceKind::OneWayPlatform`].
#[derive(Component, Reflect, Debug, Clone, Copy, Default)]
#[reflect(Component)]
pub struct OneWayPlatform;

/// Information about the nearest surface hit by a ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProbeHit {
    /// Distance from the ray origin to the hit point.
    pub distance: f32,
    /// Normal of the surface at the hit point.
    pub normal: Vec2,
    /// World position of the hit point.
    pub point: Vec2,
    /// Capability of the surface that was hit.
    pub surface: SurfaceKind,
    /// Entity that was hit, when the backend knows it.
    pub entity: Option<Entity>,
}

impl ProbeHit {
    /// Create a hit against a surface of the given kind.
    pub fn new(distance: f32, normal: Vec2, point: Vec2, surface: SurfaceKind) -> Self {
        Self {
            distance,
            normal,
            point,
            surface,
            entity: None,
        }
    }

    /// Create a hit against a solid surface.
    pub fn solid(distance: f32, normal: Vec2, point: Vec2) -> Self {
        Self::new(distance, normal, point, SurfaceKind::Solid)
    }

    /// Attach the entity that owns the hit collider.
    pub fn with_entity(mut self, entity: Entity) -> Self {
        self.entity = Some(entity);
        self
    }
}
