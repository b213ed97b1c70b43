//! In-memory segment world used by unit tests.

use bevy::prelude::*;

use crate::backend::RayCaster;
use crate::collision::{ProbeHit, SurfaceKind};

#[derive(Debug, Clone, Copy)]
struct Segment {
    a: Vec2,
    b: Vec2,
    surface: SurfaceKind,
}

impl Segment {
    fn intersect(&self, origin: Vec2, direction: Vec2, max_distance: f32) -> Option<ProbeHit> {
        let edge = self.b - self.a;
        let denom = direction.perp_dot(edge);
        if denom.abs() < 1e-9 {
            return None;
        }
        let to_a = self.a - origin;
        let distance = to_a.perp_dot(edge) / denom;
        let along = to_a.perp_dot(direction) / denom;
        if !(0.0..=max_distance).contains(&distance) || !(0.0..=1.0).contains(&along) {
            return None;
        }
        let mut normal = edge.perp().normalize();
        if normal.dot(direction) > 0.0 {
            normal = -normal;
        }
        Some(ProbeHit::new(
            distance,
            normal,
            origin + direction * distance,
            self.surface,
        ))
    }
}

/// A static world made of line segments.
#[derive(Debug, Clone, Default)]
pub struct SegmentWorld {
    segments: Vec<Segment>,
}

impl SegmentWorld {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_segment(mut self, a: Vec2, b: Vec2, surface: SurfaceKind) -> Self {
        self.segments.push(Segment { a, b, surface });
        self
    }

    /// Horizontal solid floor at `y` spanning `[x_min, x_max]`.
    pub fn with_floor(self, y: f32, x_min: f32, x_max: f32) -> Self {
        self.with_segment(Vec2::new(x_min, y), Vec2::new(x_max, y), SurfaceKind::Solid)
    }

    /// Horizontal one-way platform at `y` spanning `[x_min, x_max]`.
    pub fn with_one_way(self, y: f32, x_min: f32, x_max: f32) -> Self {
        self.with_segment(
            Vec2::new(x_min, y),
            Vec2::new(x_max, y),
            SurfaceKind::OneWayPlatform,
        )
    }

    /// Vertical solid wall at `x` spanning `[y_min, y_max]`.
    pub fn with_wall(self, x: f32, y_min: f32, y_max: f32) -> Self {
        self.with_segment(Vec2::new(x, y_min), Vec2::new(x, y_max), SurfaceKind::Solid)
    }
}

impl RayCaster for SegmentWorld {
    fn cast(&self, origin: Vec2, direction: Vec2, max_distance: f32) -> Option<ProbeHit> {
        self.segments
            .iter()
            .filter_map(|segment| segment.intersect(origin, direction, max_distance))
            .min_by(|a, b| a.distance.total_cmp(&b.distance))
    }
}

#[test]
fn segment_world_returns_nearest_hit() {
    let world = SegmentWorld::new()
        .with_floor(0.0, -10.0, 10.0)
        .with_floor(-2.0, -10.0, 10.0);

    let hit = world.cast(Vec2::new(0.0, 1.0), Vec2::NEG_Y, 5.0).unwrap();
    assert_eq!(hit.point, Vec2::new(0.0, 0.0));
    assert_eq!(hit.normal, Vec2::Y);
    assert_eq!(hit.distance, 1.0);
}

#[test]
fn segment_world_normals_face_the_ray() {
    let world = SegmentWorld::new().with_wall(3.0, -1.0, 1.0);

    let hit = world.cast(Vec2::ZERO, Vec2::X, 5.0).unwrap();
    assert_eq!(hit.normal, Vec2::NEG_X);
    assert!(world.cast(Vec2::ZERO, Vec2::X, 2.0).is_none());
}
