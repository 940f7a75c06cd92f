#![doc = include_str!("../README.md")]

// Public modules (stable-ish surface)
pub mod accumulate;
pub mod diagnostics;
pub mod error;
pub mod estimator;
pub mod image;
pub mod selection;
pub mod types;

// Tooling and helpers around the core stages.
pub mod angle;
pub mod annotate;
pub mod config;
pub mod lines;

// --- High-level re-exports -------------------------------------------------

// Main entry points: estimator + results.
pub use crate::error::{ConfigError, EstimateError};
pub use crate::estimator::{Estimate, EstimatorParams, VanishingPointEstimator};
pub use crate::types::{ImageLines, LineSegment, VanishingPoint};

// Core stages, usable on their own.
pub use crate::accumulate::{AccumulatorParams, VoteAccumulator, VoteSurface};
pub use crate::selection::{LineSelector, SelectionStatus, SelectionThresholds};

// Default line source.
pub use crate::lines::{HoughLineDetector, HoughParams, LineSource};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```no_run
/// use vanishing_point::prelude::*;
///
/// # fn main() {
/// let (w, h) = (640usize, 480usize);
/// let gray = vec![0u8; w * h];
/// let img = ImageF32::from_u8(&ImageU8 { w, h, stride: w, data: &gray });
///
/// let lines = HoughLineDetector::default().detect_lines(&img);
/// match VanishingPointEstimator::default().estimate(lines.as_deref(), w, h) {
///     Ok(est) => println!("vp={:?} status={:?}", est.point.as_xy(), est.selection.status),
///     Err(err) => println!("no vanishing point: {err}"),
/// }
/// # }
/// ```
pub mod prelude {
    pub use crate::image::{ImageF32, ImageU8};
    pub use crate::lines::{HoughLineDetector, LineSource};
    pub use crate::{LineSegment, VanishingPoint, VanishingPointEstimator};
}
