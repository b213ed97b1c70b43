//! Slope classification of hit normals.

use std::f32::consts::{FRAC_PI_2, PI};

use bevy::prelude::*;

/// Angle of a hit surface and how the controller treats it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlopeClass {
    /// Surface angle in radians.
    pub angle: f32,
    /// The surface is inclined (`angle > 0`).
    pub is_slope: bool,
    /// The surface can be walked on (`angle <= max_slope_angle`).
    pub is_walkable: bool,
}

impl SlopeClass {
    fn from_angle(angle: f32, max_slope_angle: f32) -> Self {
        Self {
            angle,
            is_slope: angle > 0.0,
            is_walkable: angle <= max_slope_angle,
        }
    }
}

/// Unsigned angle between two vectors, in `[0, PI]`.
///
/// Exactly zero for parallel vectors, and zero when either is zero-length.
#[inline]
pub fn unsigned_angle(a: Vec2, b: Vec2) -> f32 {
    a.perp_dot(b).abs().atan2(a.dot(b))
}

/// Classify `normal` by its angle from `reference`.
pub fn classify(normal: Vec2, reference: Vec2, max_slope_angle: f32) -> SlopeClass {
    SlopeClass::from_angle(unsigned_angle(reference, normal), max_slope_angle)
}

/// Classify a ground contact: angle between the normal and world up.
pub fn classify_ground(normal: Vec2, max_slope_angle: f32) -> SlopeClass {
    classify(normal, Vec2::Y, max_slope_angle)
}

/// Classify a side contact met while moving along `direction` (`±1`).
///
/// The angle is measured from the travel axis and offset by 90°, so it
/// equals the incline of the surface ahead: a floor-like incline measures
/// its slope angle and a vertical wall measures 90°. Downward-facing
/// surfaces (overhangs leaning over the body) are reflected past 90° so
/// they never read as walkable.
pub fn classify_side(normal: Vec2, direction: f32, max_slope_angle: f32) -> SlopeClass {
    let axis = Vec2::new(direction, 0.0);
    let incline = unsigned_angle(axis, normal) - FRAC_PI_2;
    let angle = if normal.y < 0.0 { PI - incline } else { incline };
    SlopeClass::from_angle(angle, max_slope_angle)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAX: f32 = std::f32::consts::FRAC_PI_3;

    fn incline_normal(degrees: f32, direction: f32) -> Vec2 {
        // Surface rising along `direction`
        let angle = degrees.to_radians();
        Vec2::new(-angle.sin() * direction, angle.cos())
    }

    // ==================== Ground Tests ====================

    #[test]
    fn flat_ground_is_not_a_slope() {
        let class = classify_ground(Vec2::Y, MAX);
        assert_eq!(class.angle, 0.0);
        assert!(!class.is_slope);
        assert!(class.is_walkable);
    }

    #[test]
    fn ground_slope_walkability() {
        let gentle = classify_ground(incline_normal(30.0, 1.0), MAX);
        assert!(gentle.is_slope);
        assert!(gentle.is_walkable);
        assert!((gentle.angle.to_degrees() - 30.0).abs() < 0.01);

        let steep = classify_ground(incline_normal(70.0, -1.0), MAX);
        assert!(steep.is_slope);
        assert!(!steep.is_walkable);
    }

    #[test]
    fn zero_normal_reads_as_flat() {
        let class = classify_ground(Vec2::ZERO, MAX);
        assert_eq!(class.angle, 0.0);
        assert!(!class.is_slope);
    }

    // ==================== Side Tests ====================

    #[test]
    fn vertical_wall_measures_ninety_degrees() {
        let right = classify_side(Vec2::NEG_X, 1.0, MAX);
        assert!((right.angle - FRAC_PI_2).abs() < 1e-6);
        assert!(!right.is_walkable);

        let left = classify_side(Vec2::X, -1.0, MAX);
        assert!((left.angle - FRAC_PI_2).abs() < 1e-6);
        assert!(!left.is_walkable);
    }

    #[test]
    fn side_incline_measures_its_slope() {
        for direction in [1.0, -1.0] {
            let class = classify_side(incline_normal(30.0, direction), direction, MAX);
            assert!((class.angle.to_degrees() - 30.0).abs() < 0.01);
            assert!(class.is_walkable);
        }
    }

    #[test]
    fn overhang_exceeds_ninety_degrees() {
        // Surface facing down-left, met while moving right
        let normal = Vec2::new(-1.0, -1.0).normalize();
        let class = classify_side(normal, 1.0, MAX);
        assert!(class.angle > FRAC_PI_2);
        assert!(!class.is_walkable);
    }

    #[test]
    fn ground_and_side_share_the_same_rule() {
        let normal = incline_normal(45.0, 1.0);
        let ground = classify_ground(normal, MAX);
        let side = classify_side(normal, 1.0, MAX);
        assert!((ground.angle - side.angle).abs() < 1e-5);
        assert_eq!(ground.is_walkable, side.is_walkable);
    }
}
