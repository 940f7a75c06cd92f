//! Overlay drawing for the demo output.
use crate::types::{LineSegment, VanishingPoint};
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_line_segment_mut};

pub const LINE_COLOR: Rgb<u8> = Rgb([0, 255, 0]);
pub const POINT_COLOR: Rgb<u8> = Rgb([255, 0, 0]);

/// Draw each segment `thickness` pixels wide. Extra strokes are offset along
/// the minor axis of the segment.
pub fn draw_lines(canvas: &mut RgbImage, lines: &[LineSegment], color: Rgb<u8>, thickness: u32) {
    let thickness = thickness.max(1) as i32;
    let first = -(thickness - 1) / 2;
    for seg in lines {
        let (ox, oy) = if seg.span_x() >= seg.span_y() {
            (0.0, 1.0)
        } else {
            (1.0, 0.0)
        };
        for k in first..first + thickness {
            let k = k as f32;
            draw_line_segment_mut(
                canvas,
                (seg.x1 as f32 + k * ox, seg.y1 as f32 + k * oy),
                (seg.x2 as f32 + k * ox, seg.y2 as f32 + k * oy),
                color,
            );
        }
    }
}

/// Filled disc at the vanishing point, clipped to the canvas.
pub fn draw_vanishing_point(
    canvas: &mut RgbImage,
    vp: VanishingPoint,
    radius: u32,
    color: Rgb<u8>,
) {
    draw_filled_circle_mut(canvas, vp.as_xy(), radius as i32, color);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vanishing_point_is_drawn_at_column_row() {
        let mut img = RgbImage::new(40, 30);
        draw_vanishing_point(&mut img, VanishingPoint::new(5, 20), 2, POINT_COLOR);
        assert_eq!(*img.get_pixel(20, 5), POINT_COLOR);
        assert_eq!(*img.get_pixel(22, 5), POINT_COLOR);
        assert_eq!(*img.get_pixel(5, 20), Rgb([0, 0, 0]));
    }

    #[test]
    fn point_near_border_is_clipped() {
        let mut img = RgbImage::new(10, 10);
        draw_vanishing_point(&mut img, VanishingPoint::new(0, 9), 3, POINT_COLOR);
        assert_eq!(*img.get_pixel(9, 0), POINT_COLOR);
    }

    #[test]
    fn thick_horizontal_line_covers_adjacent_rows() {
        let mut img = RgbImage::new(20, 10);
        draw_lines(&mut img, &[LineSegment::new(2, 5, 17, 5)], LINE_COLOR, 2);
        assert_eq!(*img.get_pixel(10, 5), LINE_COLOR);
        assert_eq!(*img.get_pixel(10, 6), LINE_COLOR);
        assert_eq!(*img.get_pixel(10, 3), Rgb([0, 0, 0]));
    }
}
