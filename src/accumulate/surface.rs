//! Dense row-major vote surface, one cell per image pixel.
use crate::image::ImageView;
use crate::types::VanishingPoint;

#[derive(Clone, Debug)]
pub struct VoteSurface {
    rows: usize,
    cols: usize,
    data: Vec<f32>,
}

impl VoteSurface {
    /// Zero-initialized surface of `rows × cols` cells.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![0.0; rows * cols],
        }
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f32 {
        self.data[row * self.cols + col]
    }

    #[inline]
    pub fn add(&mut self, row: usize, col: usize, weight: f32) {
        self.data[row * self.cols + col] += weight;
    }

    /// Cells in row-major order.
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    pub fn total(&self) -> f64 {
        self.data.iter().map(|&v| v as f64).sum()
    }

    /// Cell holding the largest vote weight and that weight.
    ///
    /// Ties resolve to the first cell in row-major order. `None` for an empty
    /// surface.
    pub fn argmax(&self) -> Option<(VanishingPoint, f32)> {
        let mut best: Option<(usize, f32)> = None;
        for (idx, &v) in self.data.iter().enumerate() {
            match best {
                Some((_, best_v)) if v <= best_v => {}
                _ => best = Some((idx, v)),
            }
        }
        best.map(|(idx, v)| (VanishingPoint::new(idx / self.cols, idx % self.cols), v))
    }
}

impl ImageView for VoteSurface {
    type Pixel = f32;

    #[inline]
    fn width(&self) -> usize {
        self.cols
    }
    #[inline]
    fn height(&self) -> usize {
        self.rows
    }
    #[inline]
    fn stride(&self) -> usize {
        self.cols
    }
    #[inline]
    fn row(&self, y: usize) -> &[f32] {
        let start = y * self.cols;
        &self.data[start..start + self.cols]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn argmax_prefers_first_cell_in_row_major_order() {
        let mut s = VoteSurface::new(4, 5);
        s.add(3, 0, 2.0);
        s.add(1, 4, 2.0);
        s.add(2, 2, 1.0);
        let (vp, peak) = s.argmax().unwrap();
        assert_eq!(vp, VanishingPoint::new(1, 4));
        assert_eq!(peak, 2.0);
    }

    #[test]
    fn rows_follow_cell_layout() {
        let mut s = VoteSurface::new(2, 3);
        s.add(1, 2, 1.5);
        assert_eq!(s.row(1), &[0.0f32, 0.0, 1.5][..]);
        assert_eq!(s.get(1, 2), 1.5);
        assert_eq!(s.total(), 1.5);
    }

    #[test]
    fn empty_surface_has_no_argmax() {
        assert!(VoteSurface::new(0, 0).argmax().is_none());
    }
}
