//! Scalar helpers and the separating-axis primitives.

use super::vec2::Vec2;
use crate::error::PhysicsError;

/// Segments shorter than this (squared) are treated as a single point.
const DEGENERATE_SEGMENT_EPSILON: f64 = 1e-12;

/// 1D interval covered by a shape along an axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub min: f64,
    pub max: f64,
}

/// Result of comparing two projected intervals.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Overlap {
    /// Length of the shared part of both intervals; 0 when they are apart or touching.
    pub overlap: f64,
    /// `1.0` when the first interval's center lies above the second's, `-1.0`
    /// otherwise (ties included), `0.0` when there is no overlap. Moving the
    /// first interval by `sign * overlap` separates the two.
    pub sign: f64,
}

impl Overlap {
    pub const NONE: Overlap = Overlap { overlap: 0.0, sign: 0.0 };

    pub fn is_separated(&self) -> bool {
        self.overlap <= 0.0
    }
}

/// Two-sided clamp. Unlike `f64::clamp` this does not panic when `min > max`;
/// `min` wins in that case.
pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    value.min(max).max(min)
}

/// Linearly remaps `value` from `[in_min, in_max]` onto `[out_min, out_max]`.
/// The result includes the `out_min` offset: `in_min` maps to `out_min`, not to 0.
/// `in_min == in_max` is not guarded and yields a non-finite result.
pub fn map_range(value: f64, in_min: f64, in_max: f64, out_min: f64, out_max: f64) -> f64 {
    out_min + (value - in_min) * (out_max - out_min) / (in_max - in_min)
}

/// Projects `vertices` onto `axis` and returns the covered interval.
pub fn project(vertices: &[Vec2], axis: Vec2) -> Result<Projection, PhysicsError> {
    let (first, rest) = vertices.split_first().ok_or(PhysicsError::EmptyVertexList)?;
    let seed = first.dot(axis);
    let mut projection = Projection { min: seed, max: seed };
    for vertex in rest {
        let p = vertex.dot(axis);
        if p < projection.min {
            projection.min = p;
        } else if p > projection.max {
            projection.max = p;
        }
    }
    Ok(projection)
}

/// Overlap of `[min1, max1]` and `[min2, max2]` along with the direction that
/// pushes the first interval out of the second.
pub fn overlap(min1: f64, max1: f64, min2: f64, max2: f64) -> Overlap {
    let amount = (max1.min(max2) - min1.max(min2)).max(0.0);
    if amount > 0.0 {
        let center1 = (min1 + max1) / 2.0;
        let center2 = (min2 + max2) / 2.0;
        let sign = if center1 > center2 { 1.0 } else { -1.0 };
        return Overlap { overlap: amount, sign };
    }
    Overlap::NONE
}

/// Point on segment `ab` closest to `p`.
/// A zero-length segment returns `a`.
pub fn closest_point_on_segment(p: Vec2, a: Vec2, b: Vec2) -> Vec2 {
    let ab = b - a;
    let length_sq = ab.length_squared();
    if length_sq < DEGENERATE_SEGMENT_EPSILON {
        return a;
    }
    let t = clamp((p - a).dot(ab) / length_sq, 0.0, 1.0);
    a + ab * t
}
