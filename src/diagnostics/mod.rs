//! Diagnostics data model returned by the estimator and written by the tools.
//!
//! Every structure serializes to camelCase JSON so reports can be inspected
//! or plotted without touching the crate.

pub mod selection;
pub mod timing;

pub use selection::SelectionStage;
pub use timing::{elapsed_ms, StageTiming, TimingBreakdown};
