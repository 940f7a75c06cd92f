//! Raw line candidates for the estimator.
//!
//! The default source is a classic edge + Hough chain on a grayscale image:
//!
//! 1. [`blur`]: separable Gaussian smoothing (reflect-101 borders).
//! 2. [`edges`]: Sobel gradients, four-direction NMS and hysteresis.
//! 3. [`hough`]: seeded progressive probabilistic Hough transform.
//!
//! Anything else that yields `[x1, y1, x2, y2]` segments can implement
//! [`LineSource`]; [`PrecomputedLines`] replays a fixed list.
pub mod blur;
pub mod edges;
pub mod hough;

pub use blur::{blur_separable, GaussianFilter, SeparableFilter};
pub use edges::{canny_edges, sobel_gradients, EdgeMap, Gradients};
pub use hough::{probabilistic_hough, HoughSettings};

use crate::diagnostics::{elapsed_ms, TimingBreakdown};
use crate::image::ImageF32;
use crate::types::LineSegment;
use log::debug;
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Producer of raw line candidates for one grayscale image.
///
/// `None` means nothing was found; callers treat it like an empty list.
pub trait LineSource {
    fn detect_lines(&self, gray: &ImageF32) -> Option<Vec<LineSegment>>;
}

/// Parameters of [`HoughLineDetector`]. Thresholds are in 8-bit intensity
/// units regardless of the `[0, 1]` working range.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HoughParams {
    pub blur_kernel_size: usize,
    pub blur_sigma: f32,
    pub canny_low: f32,
    pub canny_high: f32,
    /// Distance resolution of the accumulator in pixels.
    pub rho: f32,
    /// Angle resolution of the accumulator in degrees.
    pub theta_deg: f32,
    pub vote_threshold: u32,
    pub min_line_length: u32,
    pub max_line_gap: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_lines: Option<usize>,
    pub seed: u64,
}

impl Default for HoughParams {
    fn default() -> Self {
        Self {
            blur_kernel_size: 3,
            blur_sigma: 1.0,
            canny_low: 20.0,
            canny_high: 50.0,
            rho: 1.0,
            theta_deg: 1.0,
            vote_threshold: 100,
            min_line_length: 0,
            max_line_gap: 0,
            max_lines: None,
            seed: 0,
        }
    }
}

impl HoughParams {
    fn settings(&self) -> HoughSettings {
        HoughSettings {
            rho: self.rho,
            theta: self.theta_deg.to_radians(),
            threshold: self.vote_threshold,
            min_line_length: self.min_line_length,
            max_line_gap: self.max_line_gap,
            max_lines: self.max_lines.unwrap_or(usize::MAX),
            seed: self.seed,
        }
    }
}

/// Lines of one image together with what the detector saw on the way.
#[derive(Clone, Debug)]
pub struct LineDetection {
    pub lines: Vec<LineSegment>,
    pub edges: EdgeMap,
    pub timings: TimingBreakdown,
}

impl LineDetection {
    pub fn edge_count(&self) -> usize {
        self.edges.count()
    }
}

#[derive(Clone, Debug, Default)]
pub struct HoughLineDetector {
    params: HoughParams,
}

impl HoughLineDetector {
    pub fn new(params: HoughParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &HoughParams {
        &self.params
    }

    /// Run the full chain and keep the edge map and stage timings.
    pub fn detect_with_trace(&self, gray: &ImageF32) -> LineDetection {
        let p = &self.params;
        let t0 = Instant::now();

        let blur_start = Instant::now();
        let filter = GaussianFilter::new(p.blur_kernel_size, p.blur_sigma);
        let smoothed = blur_separable(gray, &filter);
        let blur_ms = elapsed_ms(blur_start);

        let edge_start = Instant::now();
        let edges = canny_edges(&smoothed, p.canny_low, p.canny_high);
        let edge_ms = elapsed_ms(edge_start);

        let hough_start = Instant::now();
        let lines = probabilistic_hough(&edges, &p.settings());
        let hough_ms = elapsed_ms(hough_start);

        let total_ms = elapsed_ms(t0);
        debug!(
            "Lines: {}x{} edges={} lines={} blur_ms={:.3} edges_ms={:.3} hough_ms={:.3}",
            gray.w,
            gray.h,
            edges.count(),
            lines.len(),
            blur_ms,
            edge_ms,
            hough_ms
        );

        let mut timings = TimingBreakdown::with_total(total_ms);
        timings.push("blur", blur_ms);
        timings.push("edges", edge_ms);
        timings.push("hough", hough_ms);
        LineDetection {
            lines,
            edges,
            timings,
        }
    }
}

impl LineSource for HoughLineDetector {
    fn detect_lines(&self, gray: &ImageF32) -> Option<Vec<LineSegment>> {
        let lines = self.detect_with_trace(gray).lines;
        (!lines.is_empty()).then_some(lines)
    }
}

/// Fixed line list, e.g. loaded from a JSON file, independent of the pixels.
#[derive(Clone, Debug, Default)]
pub struct PrecomputedLines {
    lines: Option<Vec<LineSegment>>,
}

impl PrecomputedLines {
    pub fn new(lines: Option<Vec<LineSegment>>) -> Self {
        Self { lines }
    }
}

impl LineSource for PrecomputedLines {
    fn detect_lines(&self, _gray: &ImageF32) -> Option<Vec<LineSegment>> {
        self.lines.clone().filter(|l| !l.is_empty())
    }
}
