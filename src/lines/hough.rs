//! Progressive probabilistic Hough transform over a binary edge map.
//!
//! Edge pixels are visited in a random (seeded) order. Each visited pixel
//! votes for every `(θ, ρ)` line through it; as soon as one accumulator bin
//! reaches the vote threshold, the corresponding line is traced through the
//! edge map in both directions from the pixel, tolerating up to `max_gap`
//! missing pixels. The traced pixels are removed from the map (and their votes
//! withdrawn) so they cannot support another segment.
//!
//! Lines are parametrised as `ρ = x cos θ + y sin θ` with `θ ∈ [0, π)`.
use super::edges::EdgeMap;
use crate::types::LineSegment;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

#[derive(Clone, Debug)]
pub struct HoughSettings {
    /// Distance resolution in pixels.
    pub rho: f32,
    /// Angle resolution in radians.
    pub theta: f32,
    pub threshold: u32,
    pub min_line_length: u32,
    pub max_line_gap: u32,
    /// Stop after this many segments.
    pub max_lines: usize,
    pub seed: u64,
}

struct Accumulator {
    num_angle: usize,
    num_rho: usize,
    rho_offset: isize,
    /// `(cos θ / ρ, sin θ / ρ)` per angle bin.
    trig: Vec<(f32, f32)>,
    votes: Vec<u32>,
}

impl Accumulator {
    fn new(width: usize, height: usize, rho: f32, theta: f32) -> Self {
        let num_angle = ((std::f32::consts::PI / theta).round() as usize).max(1);
        let num_rho = ((((width + height) * 2 + 1) as f32 / rho).round() as usize).max(1);
        let trig = (0..num_angle)
            .map(|n| {
                let a = n as f32 * theta;
                (a.cos() / rho, a.sin() / rho)
            })
            .collect();
        Self {
            num_angle,
            num_rho,
            rho_offset: ((num_rho - 1) / 2) as isize,
            trig,
            votes: vec![0; num_angle * num_rho],
        }
    }

    #[inline]
    fn bin(&self, n: usize, x: usize, y: usize) -> usize {
        let (c, s) = self.trig[n];
        let r = (x as f32 * c + y as f32 * s).round() as isize + self.rho_offset;
        n * self.num_rho + r.clamp(0, self.num_rho as isize - 1) as usize
    }

    /// Adds the votes of `(x, y)`; returns the strongest angle bin and count.
    fn vote(&mut self, x: usize, y: usize) -> (usize, u32) {
        let mut best = (0usize, 0u32);
        for n in 0..self.num_angle {
            let b = self.bin(n, x, y);
            self.votes[b] += 1;
            if self.votes[b] > best.1 {
                best = (n, self.votes[b]);
            }
        }
        best
    }

    fn unvote(&mut self, x: usize, y: usize) {
        for n in 0..self.num_angle {
            let b = self.bin(n, x, y);
            self.votes[b] = self.votes[b].saturating_sub(1);
        }
    }
}

/// Pixel walker along a line with a unit step on its dominant axis.
#[derive(Clone, Copy)]
struct Walk {
    major_is_x: bool,
    /// Step along the minor axis per unit major step.
    minor_step: f32,
    major_sign: i64,
}

impl Walk {
    /// Walker along the line whose normal has angle `theta`.
    fn along_normal(cos_t: f32, sin_t: f32) -> Self {
        // Line direction is perpendicular to the normal.
        Self::along_direction(-sin_t, cos_t)
    }

    /// Walker along the direction `(a, b)`; must not be the zero vector.
    fn along_direction(a: f32, b: f32) -> Self {
        if a.abs() > b.abs() {
            Self {
                major_is_x: true,
                minor_step: b / a.abs(),
                major_sign: if a > 0.0 { 1 } else { -1 },
            }
        } else {
            Self {
                major_is_x: false,
                minor_step: a / b.abs(),
                major_sign: if b > 0.0 { 1 } else { -1 },
            }
        }
    }

    /// Pixel reached after `k` steps from `(x0, y0)` in direction `dir` (±1).
    #[inline]
    fn pixel(&self, x0: usize, y0: usize, k: i64, dir: i64) -> (i64, i64) {
        let major = k * dir * self.major_sign;
        let minor = (k * dir) as f32 * self.minor_step;
        if self.major_is_x {
            (x0 as i64 + major, (y0 as f32 + 0.5 + minor).floor() as i64)
        } else {
            ((x0 as f32 + 0.5 + minor).floor() as i64, y0 as i64 + major)
        }
    }

    /// Last mask pixel reached from `(x0, y0)` in each direction before more
    /// than `max_gap` consecutive misses or the image border.
    fn trace(
        &self,
        mask: &[bool],
        w: usize,
        h: usize,
        x0: usize,
        y0: usize,
        max_gap: i64,
    ) -> [(i64, i64); 2] {
        let mut ends = [(x0 as i64, y0 as i64); 2];
        for (end, dir) in ends.iter_mut().zip([1i64, -1]) {
            let mut gap = 0i64;
            for k in 0.. {
                let (px, py) = self.pixel(x0, y0, k, dir);
                if px < 0 || py < 0 || px >= w as i64 || py >= h as i64 {
                    break;
                }
                if mask[py as usize * w + px as usize] {
                    gap = 0;
                    *end = (px, py);
                } else {
                    gap += 1;
                    if gap > max_gap {
                        break;
                    }
                }
            }
        }
        ends
    }
}

fn squared_extent(ends: &[(i64, i64); 2]) -> i64 {
    let (dx, dy) = (ends[1].0 - ends[0].0, ends[1].1 - ends[0].1);
    dx * dx + dy * dy
}

/// Detect line segments in `edges`.
pub fn probabilistic_hough(edges: &EdgeMap, settings: &HoughSettings) -> Vec<LineSegment> {
    let (w, h) = (edges.width, edges.height);
    let mut lines = Vec::new();
    if w == 0 || h == 0 || settings.rho <= 0.0 || settings.theta <= 0.0 {
        return lines;
    }

    let mut mask = edges.data.clone();
    let mut voted = vec![false; w * h];
    let mut acc = Accumulator::new(w, h, settings.rho, settings.theta);
    let threshold = settings.threshold.max(1);
    let max_gap = settings.max_line_gap as i64;
    let min_len = settings.min_line_length as i64;

    let mut order = edges.points();
    order.shuffle(&mut StdRng::seed_from_u64(settings.seed));

    for (x, y) in order {
        if !mask[y * w + x] {
            continue;
        }
        voted[y * w + x] = true;
        let (best_n, best_votes) = acc.vote(x, y);
        if best_votes < threshold {
            continue;
        }

        let (c, s) = acc.trig[best_n];
        let mut walk = Walk::along_normal(c, s);
        let mut ends = walk.trace(&mask, w, h, x, y, max_gap);

        // Neighbouring angle bins often tie; the bin direction can then be off
        // enough to leave the run early. Retrace along the direction of the
        // found ends and keep the longer of both.
        let (dx, dy) = (ends[1].0 - ends[0].0, ends[1].1 - ends[0].1);
        if dx != 0 || dy != 0 {
            let refined = Walk::along_direction(dx as f32, dy as f32);
            let refined_ends = refined.trace(&mask, w, h, x, y, max_gap);
            if squared_extent(&refined_ends) > squared_extent(&ends) {
                walk = refined;
                ends = refined_ends;
            }
        }

        let good_line =
            (ends[1].0 - ends[0].0).abs() >= min_len || (ends[1].1 - ends[0].1).abs() >= min_len;

        // Clear the traced pixels; withdraw their votes if the segment is kept.
        for (end, dir) in ends.iter().zip([1i64, -1]) {
            for k in 0.. {
                let (px, py) = walk.pixel(x, y, k, dir);
                if px < 0 || py < 0 || px >= w as i64 || py >= h as i64 {
                    break;
                }
                let idx = py as usize * w + px as usize;
                if mask[idx] {
                    if good_line && voted[idx] {
                        acc.unvote(px as usize, py as usize);
                        voted[idx] = false;
                    }
                    mask[idx] = false;
                }
                if (px, py) == *end {
                    break;
                }
            }
        }

        if good_line {
            lines.push(LineSegment::new(
                ends[0].0 as i32,
                ends[0].1 as i32,
                ends[1].0 as i32,
                ends[1].1 as i32,
            ));
            if lines.len() >= settings.max_lines {
                break;
            }
        }
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(threshold: u32) -> HoughSettings {
        HoughSettings {
            rho: 1.0,
            theta: std::f32::consts::PI / 180.0,
            threshold,
            min_line_length: 10,
            max_line_gap: 2,
            max_lines: usize::MAX,
            seed: 7,
        }
    }

    #[test]
    fn finds_horizontal_edge_run_for_any_seed() {
        let mut edges = EdgeMap::new(60, 40);
        for x in 5..30 {
            edges.set(x, 20);
        }
        for seed in 0..16 {
            let seeded = HoughSettings {
                seed,
                ..settings(20)
            };
            let lines = probabilistic_hough(&edges, &seeded);
            assert_eq!(lines.len(), 1, "seed {seed}: {lines:?}");
            let seg = lines[0];
            assert_eq!((seg.y1, seg.y2), (20, 20), "seed {seed}");
            assert_eq!(seg.span_x(), 24, "seed {seed}");
        }
    }

    #[test]
    fn finds_whole_diagonal_run_for_any_seed() {
        let mut edges = EdgeMap::new(50, 50);
        for i in 5..20 {
            edges.set(i, i);
        }
        for seed in 0..16 {
            let seeded = HoughSettings {
                seed,
                ..settings(10)
            };
            let lines = probabilistic_hough(&edges, &seeded);
            assert_eq!(lines.len(), 1, "seed {seed}: {lines:?}");
            let seg = lines[0];
            assert_eq!((seg.span_x(), seg.span_y()), (14, 14), "seed {seed}: {seg:?}");
            assert_eq!(seg.x1, seg.y1);
            assert_eq!(seg.x2, seg.y2);
        }
    }

    #[test]
    fn sparse_noise_yields_nothing() {
        let mut edges = EdgeMap::new(40, 40);
        for i in 0..8 {
            edges.set(3 + 4 * i, (7 * i * i) % 40);
        }
        assert!(probabilistic_hough(&edges, &settings(20)).is_empty());
    }

    #[test]
    fn walker_steps_one_pixel_on_major_axis() {
        // Normal at 90° -> horizontal line, major axis x.
        let walk = Walk::along_normal(0.0, 1.0);
        assert!(walk.major_is_x);
        let (x, y) = walk.pixel(10, 5, 3, 1);
        assert_eq!(y, 5);
        assert_eq!((x - 10).abs(), 3);
    }
}
