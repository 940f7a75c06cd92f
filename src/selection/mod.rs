//! Adaptive line selection.
//!
//! Raw detector output is noisy: many segments are a few pixels long or almost
//! axis-aligned, which makes their direction unreliable. The selector keeps a
//! segment only when both of its per-axis spans reach `min_span`, and aims for
//! `required_line_count` such segments.
//!
//! When too few segments qualify, the thresholds are relaxed one step at a
//! time: first the required count drops towards its floor, then the span drops
//! by one and the count starts over. Long, clearly oriented segments are thus
//! preferred, and short ones are only admitted when the image has few long
//! lines. Each step is a [`ThresholdState`] transition, see
//! [`ThresholdState::relax`].

mod selector;
mod thresholds;

pub use selector::{select_lines, LineSelector, SelectionOutcome, SelectionPass, SelectionStatus};
pub use thresholds::{SelectionThresholds, ThresholdState};
