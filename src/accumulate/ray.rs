use super::surface::VoteSurface;
use crate::angle::segment_angle;
use crate::types::LineSegment;
use nalgebra::{Point2, Vector2};

/// Extended ray of a segment: its anchor endpoint and unit direction.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Ray {
    pub anchor: Point2<f64>,
    pub dir: Vector2<f64>,
}

impl Ray {
    /// The anchor is the endpoint that comes first in `(x, y)` order, so both
    /// endpoint orders of a segment produce the same ray.
    pub fn from_segment(seg: &LineSegment) -> Self {
        let (ax, ay) = if (seg.x1, seg.y1) <= (seg.x2, seg.y2) {
            (seg.x1, seg.y1)
        } else {
            (seg.x2, seg.y2)
        };
        let theta = segment_angle(seg);
        Self {
            anchor: Point2::new(ax as f64, ay as f64),
            dir: Vector2::new(theta.cos(), theta.sin()),
        }
    }
}

/// Walks `r = 1..=max_steps` unit steps from the anchor along `dir` and
/// stamps a vertical brush of `2 * brush_radius + 1` cells at every rounded
/// position. Stops at the first position whose brush would leave the surface.
///
/// Returns the number of positions stamped.
pub(crate) fn stamp_half_ray(
    surface: &mut VoteSurface,
    anchor: Point2<f64>,
    dir: Vector2<f64>,
    max_steps: usize,
    brush_radius: usize,
) -> usize {
    let w = surface.cols() as i64;
    let h = surface.rows() as i64;
    let brush = brush_radius as i64;
    let mut stamped = 0usize;
    for r in 1..=max_steps {
        let p = anchor + dir * (r as f64);
        let x0 = p.x.round() as i64;
        let y0 = p.y.round() as i64;
        if x0 < 0 || x0 >= w || y0 < brush || y0 >= h - brush {
            break;
        }
        for row in (y0 - brush)..=(y0 + brush) {
            surface.add(row as usize, x0 as usize, 1.0);
        }
        stamped += 1;
    }
    stamped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn horizontal_ray_stamps_until_edge() {
        let mut s = VoteSurface::new(5, 10);
        let ray = Ray::from_segment(&LineSegment::new(2, 2, 6, 2));
        let fwd = stamp_half_ray(&mut s, ray.anchor, ray.dir, 1000, 1);
        let back = stamp_half_ray(&mut s, ray.anchor, -ray.dir, 1000, 1);
        assert_eq!(fwd, 7); // x = 3..=9
        assert_eq!(back, 2); // x = 1, 0
        for x in 0..10 {
            let expected = if x == 2 { 0.0 } else { 1.0 };
            for y in 1..=3 {
                assert_eq!(s.get(y, x), expected);
            }
            assert_eq!(s.get(0, x), 0.0);
            assert_eq!(s.get(4, x), 0.0);
        }
    }

    #[test]
    fn brush_margin_blocks_edge_rows() {
        let mut s = VoteSurface::new(5, 10);
        let ray = Ray::from_segment(&LineSegment::new(0, 0, 9, 0));
        assert_eq!(stamp_half_ray(&mut s, ray.anchor, ray.dir, 1000, 1), 0);
        assert_eq!(stamp_half_ray(&mut s, ray.anchor, -ray.dir, 1000, 1), 0);
        assert_eq!(s.total(), 0.0);
    }

    #[test]
    fn step_bound_limits_walk() {
        let mut s = VoteSurface::new(5, 100);
        let ray = Ray::from_segment(&LineSegment::new(0, 2, 10, 2));
        assert_eq!(stamp_half_ray(&mut s, ray.anchor, ray.dir, 4, 1), 4);
        assert_eq!(s.total(), 12.0);
    }

    #[test]
    fn anchor_is_order_independent() {
        let seg = LineSegment::new(9, 1, 2, 7);
        let a = Ray::from_segment(&seg);
        let b = Ray::from_segment(&seg.reversed());
        assert_eq!(a.anchor, b.anchor);
        assert_eq!(a.dir, b.dir);
        assert_eq!(a.anchor, Point2::new(2.0, 7.0));
    }
}
