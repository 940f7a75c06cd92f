//! Single-image vanishing point estimation.
//!
//! [`VanishingPointEstimator`] chains the two core stages:
//!
//! 1. [`LineSelector`]: keep raw segments whose per-axis spans pass the
//!    adaptive thresholds.
//! 2. [`VoteAccumulator`]: draw the extended rays of the kept segments on a
//!    vote surface and report its maximum.
//!
//! Failures are per image. `NoLinesFound` and an empty accepted set end the
//! estimation before any surface is allocated; `InsufficientLines` does not,
//! the best-effort selection is accumulated as usual.
//!
//! Typical usage:
//! ```
//! use vanishing_point::{LineSegment, VanishingPointEstimator};
//!
//! let lines = vec![
//!     LineSegment::new(10, 30, 20, 35),
//!     LineSegment::new(90, 10, 80, 20),
//!     LineSegment::new(30, 10, 35, 20),
//! ];
//! let estimator = VanishingPointEstimator::default();
//! let estimate = estimator.estimate(Some(&lines), 100, 100).unwrap();
//! let (x, y) = estimate.point.as_xy();
//! assert!((x - 50).abs() <= 2 && (y - 50).abs() <= 2);
//! ```
use crate::accumulate::{AccumulatorParams, VoteAccumulator, VoteSurface};
use crate::diagnostics::{elapsed_ms, SelectionStage, TimingBreakdown};
use crate::error::{ConfigError, EstimateError};
use crate::selection::{LineSelector, SelectionStatus, SelectionThresholds};
use crate::types::{ImageLines, LineSegment, VanishingPoint};
use log::debug;
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Parameters of both core stages.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EstimatorParams {
    pub selection: SelectionThresholds,
    pub accumulator: AccumulatorParams,
}

impl EstimatorParams {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.selection.validate()?;
        self.accumulator.validate()
    }
}

/// Vanishing point of one image with the diagnostics of both stages.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Estimate {
    pub point: VanishingPoint,
    pub peak_votes: f32,
    pub vertical_lines: usize,
    pub selection: SelectionStage,
    pub timings: TimingBreakdown,
}

#[derive(Clone, Debug, Default)]
pub struct VanishingPointEstimator {
    selector: LineSelector,
    accumulator: VoteAccumulator,
}

impl VanishingPointEstimator {
    pub fn new(params: EstimatorParams) -> Self {
        Self {
            selector: LineSelector::new(params.selection),
            accumulator: VoteAccumulator::new(params.accumulator),
        }
    }

    /// Like [`new`](Self::new), rejecting inconsistent parameters.
    pub fn try_new(params: EstimatorParams) -> Result<Self, ConfigError> {
        params.validate()?;
        Ok(Self::new(params))
    }

    pub fn selector(&self) -> &LineSelector {
        &self.selector
    }

    pub fn accumulator(&self) -> &VoteAccumulator {
        &self.accumulator
    }

    /// Estimate the vanishing point of a `width × height` image from its raw
    /// line candidates (`None` when the detector found nothing).
    pub fn estimate(
        &self,
        raw_lines: Option<&[LineSegment]>,
        width: usize,
        height: usize,
    ) -> Result<Estimate, EstimateError> {
        self.estimate_with_surface(raw_lines, width, height)
            .map(|(estimate, _)| estimate)
    }

    /// Like [`estimate`](Self::estimate) but also hands back the vote surface.
    pub fn estimate_with_surface(
        &self,
        raw_lines: Option<&[LineSegment]>,
        width: usize,
        height: usize,
    ) -> Result<(Estimate, VoteSurface), EstimateError> {
        let t0 = Instant::now();
        let raw_count = raw_lines.map_or(0, |l| l.len());

        let select_start = Instant::now();
        let outcome = self.selector.select(raw_lines);
        let select_ms = elapsed_ms(select_start);
        match outcome.status {
            SelectionStatus::NoLinesFound => return Err(EstimateError::NoLinesFound),
            _ if !outcome.is_usable() => {
                debug!(
                    "Estimate: {} raw lines, none accepted after {} passes",
                    raw_count,
                    outcome.passes.len()
                );
                return Err(EstimateError::EmptyAcceptedSet);
            }
            _ => {}
        }

        let accumulate_start = Instant::now();
        let acc = self
            .accumulator
            .accumulate_detailed(&outcome.accepted, height, width)?;
        let accumulate_ms = elapsed_ms(accumulate_start);

        let total_ms = elapsed_ms(t0);
        let mut timings = TimingBreakdown::with_total(total_ms);
        timings.push("select", select_ms);
        timings.push("accumulate", accumulate_ms);
        debug!(
            "Estimate: raw={} accepted={} status={:?} vp=(row={}, col={}) peak={:.1} elapsed_ms={:.3}",
            raw_count,
            outcome.accepted.len(),
            outcome.status,
            acc.point.row,
            acc.point.col,
            acc.peak_votes,
            total_ms
        );

        let estimate = Estimate {
            point: acc.point,
            peak_votes: acc.peak_votes,
            vertical_lines: acc.vertical_lines,
            selection: SelectionStage::from_outcome(outcome, raw_count),
            timings,
        };
        Ok((estimate, acc.surface))
    }

    pub fn estimate_image(&self, image: &ImageLines) -> Result<Estimate, EstimateError> {
        self.estimate(image.lines.as_deref(), image.width, image.height)
    }

    /// Estimate every image independently; results keep the input order.
    #[cfg(not(feature = "parallel"))]
    pub fn estimate_batch(&self, images: &[ImageLines]) -> Vec<Result<Estimate, EstimateError>> {
        images.iter().map(|img| self.estimate_image(img)).collect()
    }

    /// Estimate every image independently; results keep the input order.
    #[cfg(feature = "parallel")]
    pub fn estimate_batch(&self, images: &[ImageLines]) -> Vec<Result<Estimate, EstimateError>> {
        use rayon::prelude::*;

        images
            .par_iter()
            .map(|img| self.estimate_image(img))
            .collect()
    }
}
