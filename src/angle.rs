//! Angle utilities for line segments.

use crate::types::LineSegment;
use std::f64::consts::FRAC_PI_2;

/// Angle of the line through a segment, `atan(dy / dx)`, in `[-π/2, π/2]`.
///
/// A vertical segment (`dx == 0`) has no finite slope; it maps to `±π/2` by
/// the sign of `dy`, and a zero-length segment maps to `+π/2`. The result is
/// therefore always finite.
#[inline]
pub fn line_angle(dx: i32, dy: i32) -> f64 {
    if dx == 0 {
        if dy < 0 {
            -FRAC_PI_2
        } else {
            FRAC_PI_2
        }
    } else {
        (dy as f64 / dx as f64).atan()
    }
}

/// [`line_angle`] of a segment's endpoint displacement.
#[inline]
pub fn segment_angle(seg: &LineSegment) -> f64 {
    line_angle(seg.x2 - seg.x1, seg.y2 - seg.y1)
}
