//! Canny-style edge map: Sobel gradients, non-maximum suppression along the
//! quantized gradient direction, and hysteresis thresholding.
//!
//! - Gradients use the 3×3 Sobel pair with border clamping and are expressed
//!   in 8-bit intensity units, so thresholds match the usual `0..255` scale.
//! - Magnitude is the L1 norm `|gx| + |gy|`.
//! - NMS compares each pixel with its two neighbours along one of four
//!   directions (0°, 45°, 90°, 135°); the outermost 1-pixel frame is never an
//!   edge.
//! - Hysteresis keeps pixels above `high` and every pixel above `low` that is
//!   8-connected to one of them.
use crate::image::{ImageF32, ImageView, ImageViewMut};
use serde::Serialize;

type Kernel3 = [[f32; 3]; 3];

const SOBEL_KERNEL_X: Kernel3 = [[-1.0, 0.0, 1.0], [-2.0, 0.0, 2.0], [-1.0, 0.0, 1.0]];
const SOBEL_KERNEL_Y: Kernel3 = [[-1.0, -2.0, -1.0], [0.0, 0.0, 0.0], [1.0, 2.0, 1.0]];

const TAN_22_5_DEG: f32 = 0.41421356237;
const INTENSITY_SCALE: f32 = 255.0;

/// Per-pixel Sobel derivatives and L1 magnitude.
#[derive(Clone, Debug)]
pub struct Gradients {
    pub gx: ImageF32,
    pub gy: ImageF32,
    pub mag: ImageF32,
}

/// Binary edge mask in row-major order.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeMap {
    pub width: usize,
    pub height: usize,
    #[serde(skip)]
    pub data: Vec<bool>,
}

impl EdgeMap {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![false; width * height],
        }
    }

    #[inline]
    pub fn is_edge(&self, x: usize, y: usize) -> bool {
        self.data[y * self.width + x]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize) {
        self.data[y * self.width + x] = true;
    }

    pub fn count(&self) -> usize {
        self.data.iter().filter(|&&e| e).count()
    }

    /// Edge pixel coordinates `(x, y)` in row-major order.
    pub fn points(&self) -> Vec<(usize, usize)> {
        self.data
            .iter()
            .enumerate()
            .filter(|(_, &e)| e)
            .map(|(i, _)| (i % self.width, i / self.width))
            .collect()
    }
}

/// Sobel gradients of a `[0, 1]` image, scaled to 8-bit intensity units.
pub fn sobel_gradients(l: &ImageF32) -> Gradients {
    let w = l.w;
    let h = l.h;
    let mut gx = ImageF32::new(w, h);
    let mut gy = ImageF32::new(w, h);
    let mut mag = ImageF32::new(w, h);

    if w == 0 || h == 0 {
        return Gradients { gx, gy, mag };
    }

    for y in 0..h {
        let y_idx = [y.saturating_sub(1), y, (y + 1).min(h - 1)];
        let rows = [l.row(y_idx[0]), l.row(y_idx[1]), l.row(y_idx[2])];
        let out_gx = gx.row_mut(y);
        let out_gy = gy.row_mut(y);
        let out_mag = mag.row_mut(y);
        for x in 0..w {
            let x_idx = [x.saturating_sub(1), x, (x + 1).min(w - 1)];

            let mut sum_x = 0.0;
            let mut sum_y = 0.0;
            for (ky, yy_row) in rows.iter().enumerate() {
                let kx_row = &SOBEL_KERNEL_X[ky];
                let ky_row = &SOBEL_KERNEL_Y[ky];
                for k in 0..3 {
                    sum_x += yy_row[x_idx[k]] * kx_row[k];
                    sum_y += yy_row[x_idx[k]] * ky_row[k];
                }
            }

            out_gx[x] = sum_x * INTENSITY_SCALE;
            out_gy[x] = sum_y * INTENSITY_SCALE;
            out_mag[x] = (sum_x.abs() + sum_y.abs()) * INTENSITY_SCALE;
        }
    }

    Gradients { gx, gy, mag }
}

/// Thin ridge candidates: pixels whose magnitude exceeds `low` and is a local
/// maximum across the edge. Returns the candidate mask and the strong subset
/// (magnitude above `high`) as seed coordinates.
fn non_maximum_suppression(
    grad: &Gradients,
    low: f32,
    high: f32,
) -> (Vec<bool>, Vec<(usize, usize)>) {
    let w = grad.mag.w;
    let h = grad.mag.h;
    let mut candidates = vec![false; w * h];
    let mut seeds = Vec::new();
    if w < 3 || h < 3 {
        return (candidates, seeds);
    }

    for y in 1..h - 1 {
        let mag_prev = grad.mag.row(y - 1);
        let mag_row = grad.mag.row(y);
        let mag_next = grad.mag.row(y + 1);
        let gx_row = grad.gx.row(y);
        let gy_row = grad.gy.row(y);

        for x in 1..w - 1 {
            let mag = mag_row[x];
            if mag <= low {
                continue;
            }

            let gx = gx_row[x];
            let gy = gy_row[x];
            let abs_gx = gx.abs();
            let abs_gy = gy.abs();
            let same_sign = (gx >= 0.0 && gy >= 0.0) || (gx <= 0.0 && gy <= 0.0);

            let (neighbor1, neighbor2) = if abs_gy <= abs_gx * TAN_22_5_DEG {
                (mag_row[x - 1], mag_row[x + 1])
            } else if abs_gx <= abs_gy * TAN_22_5_DEG {
                (mag_prev[x], mag_next[x])
            } else if same_sign {
                (mag_prev[x - 1], mag_next[x + 1])
            } else {
                (mag_prev[x + 1], mag_next[x - 1])
            };

            // Strict on one side only, so a two-pixel plateau keeps one pixel.
            if mag <= neighbor1 || mag < neighbor2 {
                continue;
            }

            candidates[y * w + x] = true;
            if mag > high {
                seeds.push((x, y));
            }
        }
    }

    (candidates, seeds)
}

/// Canny-style edge mask of a `[0, 1]` image with thresholds in `0..255`
/// intensity units.
pub fn canny_edges(l: &ImageF32, low: f32, high: f32) -> EdgeMap {
    let (low, high) = if low > high { (high, low) } else { (low, high) };
    let grad = sobel_gradients(l);
    let (candidates, mut stack) = non_maximum_suppression(&grad, low, high);

    let w = l.w;
    let h = l.h;
    let mut edges = EdgeMap::new(w, h);
    for &(x, y) in &stack {
        edges.set(x, y);
    }
    while let Some((x, y)) = stack.pop() {
        for ny in y.saturating_sub(1)..=(y + 1).min(h - 1) {
            for nx in x.saturating_sub(1)..=(x + 1).min(w - 1) {
                let idx = ny * w + nx;
                if candidates[idx] && !edges.data[idx] {
                    edges.data[idx] = true;
                    stack.push((nx, ny));
                }
            }
        }
    }
    edges
}
