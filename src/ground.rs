//! Downward probe: grounded state, slope state and vertical movement.
//!
//! The ground resolver runs first each frame. It may shrink the vertical
//! component of the tentative movement (landing) or extend it upward
//! (snapping onto the highest contact or following a slope).

use bevy::prelude::*;

use crate::backend::RayCaster;
use crate::config::ControllerConfig;
use crate::probe::{any_set, highest, slot, ProbeSample, ProbeSamples};
use crate::slope::classify_ground;

/// Slope state carried from one ground check to the next.
///
/// `above_slope` is computed at the end of a check but only takes effect
/// through `on_slope` on the following one: the vertical clamp of a frame
/// is decided with the previous frame's slope candidate.
#[derive(Reflect, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SlopeMemory {
    /// The body was grounded on a slope at the last check.
    pub on_slope: bool,
    /// The last check found a slope candidate below the body.
    pub above_slope: bool,
}

/// Outcome of one ground check.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroundResolution {
    /// Corrected vertical movement.
    pub move_y: f32,
    /// Grounded flag per bottom anchor.
    pub grounded_points: [bool; 3],
    /// At least one bottom anchor is grounded.
    pub grounded: bool,
    /// Grounded on a slope (uses the previous slope candidate).
    pub on_slope: bool,
    /// Slope candidate for the next check.
    pub above_slope: bool,
    /// Per-anchor "hit surface is inclined".
    pub sloped: [bool; 3],
    /// Per-anchor "hit surface is too steep to walk".
    pub non_walkable: [bool; 3],
    /// Grounded while any anchor is over a non-walkable surface.
    pub on_non_walkable_slope: bool,
    /// World height of the contact the body was snapped to, if grounded.
    pub contact_y: Option<f32>,
    /// Raw probe results.
    pub samples: ProbeSamples,
}

impl GroundResolution {
    /// Slope memory to carry into the next ground check.
    #[inline]
    pub fn memory(&self) -> SlopeMemory {
        SlopeMemory {
            on_slope: self.on_slope,
            above_slope: self.above_slope,
        }
    }
}

/// Decide whether the left/right contacts make the body a slope candidate.
///
/// Both sides sloped counts as a slope. A single sloped side only wins when
/// its contact is not lower than the other side's, so the body never snaps
/// down to a slope sitting below a flat contact.
pub fn slope_candidate(sloped: &[bool; 3], heights: &[f32; 3]) -> bool {
    let (left, right) = (sloped[slot::LEFT], sloped[slot::RIGHT]);
    let (left_y, right_y) = (heights[slot::LEFT], heights[slot::RIGHT]);

    (left && right) || (left && !right && left_y >= right_y) || (right && !left && right_y >= left_y)
}

/// Height to snap the bottom edge to while on a slope.
///
/// The higher of the sloped left/right contacts sitting more than
/// `slope_offset` above the center contact; the center when neither does.
pub fn slope_contact_height(sloped: &[bool; 3], heights: &[f32; 3], slope_offset: f32) -> f32 {
    let center = heights[slot::CENTER];
    let mut raised = [false; 3];
    for i in [slot::LEFT, slot::RIGHT] {
        raised[i] = sloped[i] && heights[i] - center > slope_offset;
    }

    if any_set(&raised) {
        highest(f32::MIN, heights, &raised)
    } else {
        center
    }
}

/// Probe downward from the bottom anchors and correct `move_y`.
pub fn resolve_ground(
    caster: &impl RayCaster,
    bottom: &[Vec2; 3],
    move_y: f32,
    memory: SlopeMemory,
    config: &ControllerConfig,
) -> GroundResolution {
    let inset = config.ray_insets.bottom_y;
    let next_bottom = bottom[slot::CENTER].y + move_y - inset;

    let mut samples: ProbeSamples = [None; 3];
    let mut heights = [next_bottom; 3];
    let mut grounded_points = [false; 3];
    let mut contact_points = [false; 3];
    let mut sloped = [false; 3];
    let mut non_walkable = [false; 3];

    for (i, origin) in bottom.iter().enumerate() {
        let Some(hit) = caster.cast(*origin, Vec2::NEG_Y, config.probing_max_distance) else {
            continue;
        };
        let slope = classify_ground(hit.normal, config.max_slope_angle);

        heights[i] = hit.point.y;
        sloped[i] = slope.is_slope;
        non_walkable[i] = slope.is_slope && !slope.is_walkable;
        contact_points[i] = hit.point.y + config.ground_offset_y > next_bottom;
        grounded_points[i] = contact_points[i] || memory.on_slope;
        samples[i] = Some(ProbeSample { hit, slope });
    }

    let grounded = any_set(&grounded_points);
    let on_slope = grounded && memory.above_slope;
    let above_slope = slope_candidate(&sloped, &heights);

    // Contacts within the ground offset snap the bottom edge onto the
    // highest of them, also when that is slightly below `next_bottom`
    let resolved = if on_slope {
        slope_contact_height(&sloped, &heights, config.ground_slope_offset_y)
    } else if any_set(&contact_points) {
        highest(f32::MIN, &heights, &contact_points)
    } else {
        highest(next_bottom, &heights, &[true; 3])
    };

    GroundResolution {
        move_y: resolved - bottom[slot::CENTER].y + inset,
        grounded_points,
        grounded,
        on_slope,
        above_slope,
        sloped,
        non_walkable,
        on_non_walkable_slope: grounded && any_set(&non_walkable),
        contact_y: grounded.then_some(resolved),
        samples,
    }
}
