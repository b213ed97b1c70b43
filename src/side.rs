//! Horizontal probe: wall bumps along the direction of travel.
//!
//! Walkable inclines met by the side rays never block; the ground resolver
//! lifts the body onto them instead.

use bevy::prelude::*;

use crate::backend::RayCaster;
use crate::config::ControllerConfig;
use crate::probe::{any_set, slot, tightest, ProbeSample, ProbeSamples, SideAnchors};
use crate::slope::classify_side;

/// Outcome of one side check.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SideResolution {
    /// Corrected horizontal movement.
    pub move_x: f32,
    /// Travel direction that was probed, `-1.0` or `1.0`.
    pub direction: f32,
    /// Bump flag per side anchor.
    pub bumped_points: [bool; 3],
    /// At least one side anchor bumped.
    pub bumped: bool,
    /// Raw probe results.
    pub samples: ProbeSamples,
}

/// Probe along the direction of travel and clamp `move_x`.
///
/// `on_non_walkable_slope` comes from this frame's ground check; while it
/// holds, any bump cancels horizontal movement entirely.
pub fn resolve_side(
    caster: &impl RayCaster,
    side: &SideAnchors,
    move_x: f32,
    on_non_walkable_slope: bool,
    config: &ControllerConfig,
) -> SideResolution {
    let direction = side.direction;
    let inset = config.ray_insets.side_x * direction;
    let leading_edge = side.points[slot::CENTER].x + inset;
    let next_side = leading_edge + move_x;

    let mut samples: ProbeSamples = [None; 3];
    let mut limits = [next_side; 3];
    let mut bumped_points = [false; 3];

    for (i, origin) in side.points.iter().enumerate() {
        let Some(hit) = caster.cast(
            *origin,
            Vec2::new(direction, 0.0),
            config.probing_max_distance,
        ) else {
            continue;
        };
        let slope = classify_side(hit.normal, direction, config.max_slope_angle);
        let limit = hit.point.x - config.ground_offset_x * direction;

        limits[i] = limit;
        bumped_points[i] = (next_side - limit) * direction > 0.0 && !slope.is_walkable;
        samples[i] = Some(ProbeSample { hit, slope });
    }

    let bumped = any_set(&bumped_points);
    let move_x = match (bumped, on_non_walkable_slope) {
        (false, _) => move_x,
        (true, true) => 0.0,
        (true, false) => tightest(next_side, &limits, &bumped_points, direction) - leading_edge,
    };

    SideResolution {
        move_x,
        direction,
        bumped_points,
        bumped,
        samples,
    }
}
