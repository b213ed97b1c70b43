//! Controller error types.

use bevy::prelude::*;
use thiserror::Error;

/// Errors raised while setting up a platformer controller.
///
/// Per-frame resolution never fails: a ray that hits nothing is simply
/// "no surface in range" and movement on that axis proceeds unclamped.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ControllerError {
    /// The body has no bounding volume to derive half-extents from.
    #[error("body has no bounding volume to derive probe anchors from")]
    MissingBounds,

    /// The bounding volume yields unusable half-extents.
    #[error("body half-extents must be positive and finite, got {0}")]
    InvalidBounds(Vec2),

    /// A tunable is outside its valid range.
    #[error("invalid controller config: {0}")]
    InvalidConfig(&'static str),
}
