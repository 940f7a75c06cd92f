//! Separable Gaussian smoothing ahead of edge detection.
use crate::image::{ImageF32, ImageView, ImageViewMut};

/// Trait implemented by separable 1D filters.
pub trait SeparableFilter {
    /// Return the 1D taps (in left-to-right order). The kernel is assumed to be
    /// symmetric around its centre.
    fn taps(&self) -> &[f32];
}

/// Sampled, normalised Gaussian kernel.
#[derive(Clone, Debug, PartialEq)]
pub struct GaussianFilter {
    taps: Vec<f32>,
}

impl GaussianFilter {
    /// Kernel of `size` taps (rounded up to odd) with standard deviation
    /// `sigma`. A size of 0 or 1, or a non-positive sigma, yields the identity.
    pub fn new(size: usize, sigma: f32) -> Self {
        if size <= 1 || !(sigma > 0.0) {
            return Self { taps: vec![1.0] };
        }
        let size = size | 1;
        let radius = (size / 2) as isize;
        let denom = 2.0 * sigma * sigma;
        let mut taps: Vec<f32> = (-radius..=radius)
            .map(|i| (-((i * i) as f32) / denom).exp())
            .collect();
        let sum: f32 = taps.iter().sum();
        for t in &mut taps {
            *t /= sum;
        }
        Self { taps }
    }
}

impl SeparableFilter for GaussianFilter {
    #[inline]
    fn taps(&self) -> &[f32] {
        &self.taps
    }
}

/// Convolve rows then columns with `filter`, mirroring at the borders
/// without repeating the edge pixel (`dcb|abcd|cba`).
pub fn blur_separable<F: SeparableFilter>(src: &ImageF32, filter: &F) -> ImageF32 {
    let taps = filter.taps();
    if taps.len() <= 1 || src.w == 0 || src.h == 0 {
        return src.clone();
    }
    let radius = (taps.len() / 2) as isize;

    let mut horiz = ImageF32::new(src.w, src.h);
    for y in 0..src.h {
        let row = src.row(y);
        let out = horiz.row_mut(y);
        for (x, dst) in out.iter_mut().enumerate() {
            let mut acc = 0.0f32;
            for (k, &tap) in taps.iter().enumerate() {
                let sx = reflect_101(x as isize + k as isize - radius, src.w);
                acc += tap * row[sx];
            }
            *dst = acc;
        }
    }

    let mut out = ImageF32::new(src.w, src.h);
    for y in 0..src.h {
        let rows: Vec<&[f32]> = (0..taps.len())
            .map(|k| horiz.row(reflect_101(y as isize + k as isize - radius, src.h)))
            .collect();
        let dst = out.row_mut(y);
        for (x, px) in dst.iter_mut().enumerate() {
            let mut acc = 0.0f32;
            for (row, &tap) in rows.iter().zip(taps) {
                acc += tap * row[x];
            }
            *px = acc;
        }
    }
    out
}

#[inline]
fn reflect_101(i: isize, n: usize) -> usize {
    if n == 1 {
        return 0;
    }
    let n = n as isize;
    let period = 2 * n - 2;
    let mut i = i.rem_euclid(period);
    if i >= n {
        i = period - i;
    }
    i as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gaussian_taps_are_normalized_and_symmetric() {
        let g = GaussianFilter::new(3, 1.0);
        let taps = g.taps();
        assert_eq!(taps.len(), 3);
        assert!((taps.iter().sum::<f32>() - 1.0).abs() < 1e-6);
        assert!((taps[0] - taps[2]).abs() < 1e-7);
        assert!((taps[1] - 0.4519).abs() < 1e-3);
    }

    #[test]
    fn reflect_101_mirrors_without_edge_repeat() {
        assert_eq!(reflect_101(-1, 5), 1);
        assert_eq!(reflect_101(-2, 5), 2);
        assert_eq!(reflect_101(5, 5), 3);
        assert_eq!(reflect_101(2, 5), 2);
        assert_eq!(reflect_101(-3, 1), 0);
    }

    #[test]
    fn blur_keeps_constant_images_constant() {
        let mut img = ImageF32::new(6, 4);
        img.data.iter_mut().for_each(|v| *v = 0.5);
        let out = blur_separable(&img, &GaussianFilter::new(3, 1.0));
        assert!(out.data.iter().all(|v| (v - 0.5).abs() < 1e-6));
    }

    #[test]
    fn identity_kernel_is_a_copy() {
        let mut img = ImageF32::new(3, 3);
        img.set(1, 1, 1.0);
        let out = blur_separable(&img, &GaussianFilter::new(1, 1.0));
        assert_eq!(out.data, img.data);
    }
}
