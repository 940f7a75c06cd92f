//! Error types of the estimation core.
//!
//! All of them are recoverable per image: a batch driver logs or records the
//! error and moves on to the next image.
use thiserror::Error;

/// Reasons why no vanishing point could be reported for an image.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EstimateError {
    /// The line detector produced no candidate segments.
    #[error("no line segments were found in the image")]
    NoLinesFound,
    /// Threshold relaxation ended without accepting a single segment.
    #[error("no line segment passed the span filter")]
    EmptyAcceptedSet,
    #[error("invalid vote surface dimensions {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },
    /// Every ray left the image before casting a vote.
    #[error("no votes were cast on the {width}x{height} surface")]
    NoVotesCast { width: usize, height: usize },
}

/// Invalid selection or accumulation parameters.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{name} start value {start} is below its floor {floor}")]
    StartBelowFloor {
        name: &'static str,
        start: usize,
        floor: usize,
    },
    #[error("{name} floor must be at least 1")]
    ZeroFloor { name: &'static str },
    #[error("max_ray_steps must be positive")]
    ZeroRaySteps,
}
