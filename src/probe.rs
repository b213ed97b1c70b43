//! Probe anchors and per-axis probe results.
//!
//! Every frame the controller launches three rays per probed edge. The
//! anchors are a pure function of the body's position, its half-extents,
//! the movement direction and the configured insets; nothing here is kept
//! across frames.
//!
//! Per-edge results are fixed arrays of three, indexed by [`slot`], and
//! reduced with the aggregation helpers at the bottom of this module.

use bevy::prelude::*;

use crate::collision::ProbeHit;
use crate::config::RayInsets;
use crate::slope::SlopeClass;

/// Indices into per-edge probe arrays.
pub mod slot {
    /// Left anchor of the bottom/top edge.
    pub const LEFT: usize = 0;
    /// Right anchor of the bottom/top edge.
    pub const RIGHT: usize = 1;
    /// Center anchor of any edge.
    pub const CENTER: usize = 2;
    /// Upper anchor of the leading side edge.
    pub const TOP: usize = 0;
    /// Lower anchor of the leading side edge.
    pub const BOTTOM: usize = 1;
}

/// Anchors along the leading side edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SideAnchors {
    /// Movement direction, `-1.0` or `1.0`.
    pub direction: f32,
    /// Ray origins, indexed by [`slot::TOP`], [`slot::BOTTOM`], [`slot::CENTER`].
    pub points: [Vec2; 3],
}

/// World-space ray origins for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProbeAnchors {
    /// Bottom edge, indexed by [`slot::LEFT`], [`slot::RIGHT`], [`slot::CENTER`].
    pub bottom: [Vec2; 3],
    /// Top edge, indexed like `bottom`.
    pub top: [Vec2; 3],
    /// Leading side edge; `None` when there is no horizontal movement.
    pub side: Option<SideAnchors>,
}

impl ProbeAnchors {
    /// Compute anchors from the body's *current* position.
    ///
    /// Bottom and top anchors sit just outside the left/right edges and at
    /// the center, inset vertically into the body. Side anchors sit just
    /// inside the edge matching the sign of `movement_x`.
    pub fn refresh(
        position: Vec2,
        half_extents: Vec2,
        movement_x: f32,
        insets: &RayInsets,
    ) -> Self {
        let left = position.x - half_extents.x;
        let right = position.x + half_extents.x;

        let bottom_y = position.y - half_extents.y + insets.bottom_y;
        let bottom = [
            Vec2::new(left - insets.bottom_x, bottom_y),
            Vec2::new(right + insets.bottom_x, bottom_y),
            Vec2::new(position.x, bottom_y),
        ];

        let top_y = position.y + half_extents.y - insets.top_y;
        let top = [
            Vec2::new(left - insets.top_x, top_y),
            Vec2::new(right + insets.top_x, top_y),
            Vec2::new(position.x, top_y),
        ];

        let side = (movement_x != 0.0).then(|| {
            let direction = movement_x.signum();
            let x = position.x + (half_extents.x - insets.side_x) * direction;
            SideAnchors {
                direction,
                points: [
                    Vec2::new(x, position.y + half_extents.y - insets.side_y),
                    Vec2::new(x, position.y - half_extents.y + insets.side_y),
                    Vec2::new(x, position.y),
                ],
            }
        });

        Self { bottom, top, side }
    }
}

/// One probe ray's result with its derived slope classification.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProbeSample {
    /// The nearest hit.
    pub hit: ProbeHit,
    /// Slope classification of the hit normal.
    pub slope: SlopeClass,
}

/// Results of the three rays probing one edge. `None` is a miss.
pub type ProbeSamples = [Option<ProbeSample>; 3];

/// Whether any flag is set.
#[inline]
pub fn any_set(flags: &[bool; 3]) -> bool {
    flags.iter().any(|&flag| flag)
}

/// Highest of `floor` and the values whose flag is set.
pub fn highest(floor: f32, values: &[f32; 3], mask: &[bool; 3]) -> f32 {
    values
        .iter()
        .zip(mask)
        .filter(|(_, &set)| set)
        .fold(floor, |acc, (&value, _)| acc.max(value))
}

/// Lowest of `ceiling` and the values whose flag is set.
pub fn lowest(ceiling: f32, values: &[f32; 3], mask: &[bool; 3]) -> f32 {
    values
        .iter()
        .zip(mask)
        .filter(|(_, &set)| set)
        .fold(ceiling, |acc, (&value, _)| acc.min(value))
}

/// Closest of `limit` and the flagged values when travelling along `direction`:
/// the minimum when moving right, the maximum when moving left.
pub fn tightest(limit: f32, values: &[f32; 3], mask: &[bool; 3], direction: f32) -> f32 {
    if direction > 0.0 {
        lowest(limit, values, mask)
    } else {
        highest(limit, values, mask)
    }
}
