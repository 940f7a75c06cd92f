use crate::selection::{SelectionOutcome, SelectionStatus, ThresholdState};
use crate::types::LineSegment;
use serde::Serialize;

/// Outcome of the adaptive line selection for one image.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionStage {
    pub status: SelectionStatus,
    pub raw_lines: usize,
    pub final_thresholds: ThresholdState,
    /// Number of scans over the raw lines, relaxations included.
    pub passes: usize,
    pub accepted: Vec<LineSegment>,
}

impl SelectionStage {
    pub fn from_outcome(outcome: SelectionOutcome, raw_lines: usize) -> Self {
        Self {
            status: outcome.status,
            raw_lines,
            final_thresholds: outcome.final_state,
            passes: outcome.passes.len(),
            accepted: outcome.accepted,
        }
    }

    pub fn accepted_count(&self) -> usize {
        self.accepted.len()
    }
}
