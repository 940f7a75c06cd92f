use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

/// Straight line segment with integer endpoints in image pixel coordinates.
///
/// Produced by the upstream line detector and never modified afterwards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "[i32; 4]", into = "[i32; 4]")]
pub struct LineSegment {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl LineSegment {
    pub const fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Absolute endpoint difference along x.
    #[inline]
    pub fn span_x(&self) -> i32 {
        (self.x2 - self.x1).abs()
    }

    /// Absolute endpoint difference along y.
    #[inline]
    pub fn span_y(&self) -> i32 {
        (self.y2 - self.y1).abs()
    }

    /// True when both per-axis spans reach `min_span`.
    #[inline]
    pub fn spans_at_least(&self, min_span: i32) -> bool {
        self.span_x() >= min_span && self.span_y() >= min_span
    }

    #[inline]
    pub fn is_vertical(&self) -> bool {
        self.x1 == self.x2
    }

    /// Same segment with the endpoints swapped.
    pub fn reversed(&self) -> Self {
        Self::new(self.x2, self.y2, self.x1, self.y1)
    }

    /// Endpoint-to-endpoint displacement `(x2 - x1, y2 - y1)`.
    pub fn delta(&self) -> Vector2<f64> {
        Vector2::new((self.x2 - self.x1) as f64, (self.y2 - self.y1) as f64)
    }
}

impl From<[i32; 4]> for LineSegment {
    fn from(v: [i32; 4]) -> Self {
        Self::new(v[0], v[1], v[2], v[3])
    }
}

impl From<LineSegment> for [i32; 4] {
    fn from(s: LineSegment) -> Self {
        [s.x1, s.y1, s.x2, s.y2]
    }
}

/// Estimated vanishing point as a cell of the vote surface.
///
/// The surface is indexed `(row = y, col = x)`, so `row`/`col` are swapped
/// with respect to the `(x, y)` convention of drawing APIs. Use [`as_xy`]
/// when handing the point to anything that expects `(x, y)`.
///
/// [`as_xy`]: VanishingPoint::as_xy
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VanishingPoint {
    pub row: usize,
    pub col: usize,
}

impl VanishingPoint {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// `(x, y) = (col, row)` for presentation APIs.
    #[inline]
    pub fn as_xy(&self) -> (i32, i32) {
        (self.col as i32, self.row as i32)
    }
}

/// Raw line candidates of one image together with its dimensions.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageLines {
    pub width: usize,
    pub height: usize,
    /// `None` when the line detector found nothing at all.
    pub lines: Option<Vec<LineSegment>>,
}
