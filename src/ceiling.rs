//! Upward probe: ceiling bumps while ascending.

use bevy::prelude::*;

use crate::backend::RayCaster;
use crate::config::ControllerConfig;
use crate::probe::{any_set, lowest, slot, ProbeSample, ProbeSamples};
use crate::slope::classify_ground;

/// Outcome of one ceiling check.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CeilingResolution {
    /// Corrected vertical movement.
    pub move_y: f32,
    /// Bump flag per top anchor.
    pub bumped_points: [bool; 3],
    /// At least one top anchor bumped.
    pub bumped: bool,
    /// Raw probe results.
    pub samples: ProbeSamples,
}

/// Probe upward from the top anchors and clamp `move_y`.
///
/// Only call while ascending. One-way platforms never block.
pub fn resolve_ceiling(
    caster: &impl RayCaster,
    top: &[Vec2; 3],
    move_y: f32,
    config: &ControllerConfig,
) -> CeilingResolution {
    let inset = config.ray_insets.top_y;
    let next_top = top[slot::CENTER].y + move_y + inset;

    let mut samples: ProbeSamples = [None; 3];
    let mut heights = [next_top; 3];
    let mut bumped_points = [false; 3];

    for (i, origin) in top.iter().enumerate() {
        let Some(hit) = caster.cast(*origin, Vec2::Y, config.probing_max_distance) else {
            continue;
        };

        heights[i] = hit.point.y;
        bumped_points[i] = hit.point.y - config.ground_offset_y < next_top
            && !hit.surface.passes_from_below();
        samples[i] = Some(ProbeSample {
            hit,
            slope: classify_ground(-hit.normal, config.max_slope_angle),
        });
    }

    let bumped = any_set(&bumped_points);
    let move_y = if bumped {
        lowest(next_top, &heights, &bumped_points) - top[slot::CENTER].y - inset
    } else {
        move_y
    };

    CeilingResolution {
        move_y,
        bumped_points,
        bumped,
        samples,
    }
}
