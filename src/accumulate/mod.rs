//! Vote accumulation over extended line rays.
//!
//! Every accepted segment is extended into its full supporting line: starting
//! at one endpoint, the accumulator walks unit steps in both directions until
//! the walk leaves the image (or a step bound is hit) and stamps a short
//! vertical brush at each rounded position. Segments that point at a common
//! convergence point pile up votes around it even when none of them reaches
//! it, and the highest cell of the surface is reported as the vanishing point.
//!
//! Notes
//! - The brush is `2 * brush_radius + 1` cells tall (3 by default) to absorb
//!   small angular errors. Positions closer than `brush_radius` to the top or
//!   bottom border end the walk.
//! - Vertical segments use the `±π/2` angle from [`crate::angle::line_angle`].
//! - The surface is indexed `(row, col) = (y, x)`; see
//!   [`VanishingPoint::as_xy`](crate::types::VanishingPoint::as_xy).

mod ray;
mod surface;

pub use surface::VoteSurface;

use crate::error::{ConfigError, EstimateError};
use crate::types::{LineSegment, VanishingPoint};
use log::debug;
use ray::{stamp_half_ray, Ray};
use serde::{Deserialize, Serialize};

/// Parameters of the ray walk.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AccumulatorParams {
    /// Maximum number of unit steps walked in each direction.
    pub max_ray_steps: usize,
    /// Half height of the vertical brush.
    pub brush_radius: usize,
}

impl Default for AccumulatorParams {
    fn default() -> Self {
        Self {
            max_ray_steps: 1000,
            brush_radius: 1,
        }
    }
}

impl AccumulatorParams {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_ray_steps == 0 {
            return Err(ConfigError::ZeroRaySteps);
        }
        Ok(())
    }
}

/// Filled surface together with its maximum.
#[derive(Clone, Debug)]
pub struct Accumulation {
    pub point: VanishingPoint,
    pub peak_votes: f32,
    pub surface: VoteSurface,
    /// Segments that took the vertical-angle branch.
    pub vertical_lines: usize,
}

#[derive(Clone, Debug, Default)]
pub struct VoteAccumulator {
    params: AccumulatorParams,
}

impl VoteAccumulator {
    pub fn new(params: AccumulatorParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &AccumulatorParams {
        &self.params
    }

    /// Vanishing point `(row, col)` of the accepted lines on a
    /// `height × width` surface.
    pub fn accumulate(
        &self,
        lines: &[LineSegment],
        height: usize,
        width: usize,
    ) -> Result<VanishingPoint, EstimateError> {
        self.accumulate_detailed(lines, height, width)
            .map(|acc| acc.point)
    }

    /// Like [`accumulate`](Self::accumulate) but keeps the surface and peak.
    pub fn accumulate_detailed(
        &self,
        lines: &[LineSegment],
        height: usize,
        width: usize,
    ) -> Result<Accumulation, EstimateError> {
        let (surface, vertical_lines) = self.fill(lines, height, width)?;
        let (point, peak_votes) = match surface.argmax() {
            Some((point, peak)) if peak > 0.0 => (point, peak),
            _ => return Err(EstimateError::NoVotesCast { width, height }),
        };
        debug!(
            "Accumulate: lines={} vertical={} surface={}x{} peak={:.1} at row={} col={}",
            lines.len(),
            vertical_lines,
            width,
            height,
            peak_votes,
            point.row,
            point.col
        );
        Ok(Accumulation {
            point,
            peak_votes,
            surface,
            vertical_lines,
        })
    }

    /// Vote surface of the accepted lines without locating its maximum.
    pub fn accumulate_surface(
        &self,
        lines: &[LineSegment],
        height: usize,
        width: usize,
    ) -> Result<VoteSurface, EstimateError> {
        self.fill(lines, height, width).map(|(surface, _)| surface)
    }

    fn fill(
        &self,
        lines: &[LineSegment],
        height: usize,
        width: usize,
    ) -> Result<(VoteSurface, usize), EstimateError> {
        if lines.is_empty() {
            return Err(EstimateError::EmptyAcceptedSet);
        }
        if height == 0 || width == 0 {
            return Err(EstimateError::InvalidDimensions { width, height });
        }
        let mut surface = VoteSurface::new(height, width);
        let mut vertical_lines = 0usize;
        for seg in lines {
            if seg.is_vertical() {
                vertical_lines += 1;
            }
            let ray = Ray::from_segment(seg);
            stamp_half_ray(
                &mut surface,
                ray.anchor,
                ray.dir,
                self.params.max_ray_steps,
                self.params.brush_radius,
            );
            stamp_half_ray(
                &mut surface,
                ray.anchor,
                -ray.dir,
                self.params.max_ray_steps,
                self.params.brush_radius,
            );
        }
        Ok((surface, vertical_lines))
    }
}
