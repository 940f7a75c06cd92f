use super::thresholds::{SelectionThresholds, ThresholdState};
use crate::types::LineSegment;
use log::debug;
use serde::Serialize;

/// How the selection ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SelectionStatus {
    /// The required line count was met at some relaxation level.
    Ok,
    /// No raw candidates were supplied.
    NoLinesFound,
    /// Both thresholds reached their floors short of the target; the accepted
    /// set is a best effort and may even be empty.
    InsufficientLines,
}

/// One scan over the raw candidates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionPass {
    pub required_line_count: usize,
    pub min_span: usize,
    /// Size of the accepted set after the pass.
    pub accepted_total: usize,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionOutcome {
    pub accepted: Vec<LineSegment>,
    pub status: SelectionStatus,
    pub final_state: ThresholdState,
    pub passes: Vec<SelectionPass>,
}

impl SelectionOutcome {
    /// Whether the accepted set can feed the vote accumulator.
    pub fn is_usable(&self) -> bool {
        !self.accepted.is_empty()
    }
}

/// Adaptive span filter over raw line candidates.
#[derive(Clone, Debug, Default)]
pub struct LineSelector {
    thresholds: SelectionThresholds,
}

impl LineSelector {
    pub fn new(thresholds: SelectionThresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> &SelectionThresholds {
        &self.thresholds
    }

    /// Select lines whose per-axis spans reach the current `min_span`, relaxing
    /// the thresholds until `required_line_count` lines are accepted or both
    /// thresholds sit on their floors.
    ///
    /// Every pass rescans the full raw list so that lines skipped under a
    /// stricter span can still be picked up. Accepted lines are carried over
    /// between passes and never added twice.
    pub fn select(&self, raw_lines: Option<&[LineSegment]>) -> SelectionOutcome {
        let mut state = self.thresholds.initial_state();
        let raw = match raw_lines {
            Some(lines) if !lines.is_empty() => lines,
            _ => {
                debug!("Selection: no raw line candidates");
                return SelectionOutcome {
                    accepted: Vec::new(),
                    status: SelectionStatus::NoLinesFound,
                    final_state: state,
                    passes: Vec::new(),
                };
            }
        };

        let mut taken = vec![false; raw.len()];
        let mut accepted = Vec::with_capacity(state.required_line_count.min(raw.len()));
        let mut passes = Vec::new();
        let status = loop {
            scan_pass(raw, state, &mut taken, &mut accepted);
            passes.push(SelectionPass {
                required_line_count: state.required_line_count,
                min_span: state.min_span,
                accepted_total: accepted.len(),
            });
            if accepted.len() >= state.required_line_count {
                break SelectionStatus::Ok;
            }
            match state.relax(&self.thresholds) {
                Some(next) => {
                    if next.min_span != state.min_span {
                        debug!(
                            "Selection: {} of {} lines at min_span={}, lowering span to {}",
                            accepted.len(),
                            state.required_line_count,
                            state.min_span,
                            next.min_span
                        );
                    }
                    state = next;
                }
                None => break SelectionStatus::InsufficientLines,
            }
        };

        debug!(
            "Selection: raw={} accepted={} status={:?} required={} min_span={} passes={}",
            raw.len(),
            accepted.len(),
            status,
            state.required_line_count,
            state.min_span,
            passes.len()
        );
        SelectionOutcome {
            accepted,
            status,
            final_state: state,
            passes,
        }
    }
}

/// Convenience wrapper around [`LineSelector::select`].
pub fn select_lines(
    raw_lines: Option<&[LineSegment]>,
    thresholds: &SelectionThresholds,
) -> SelectionOutcome {
    LineSelector::new(thresholds.clone()).select(raw_lines)
}

fn scan_pass(
    raw: &[LineSegment],
    state: ThresholdState,
    taken: &mut [bool],
    accepted: &mut Vec<LineSegment>,
) {
    let min_span = state.min_span as i32;
    for (line, used) in raw.iter().zip(taken.iter_mut()) {
        if accepted.len() >= state.required_line_count {
            break;
        }
        if *used || !line.spans_at_least(min_span) {
            continue;
        }
        *used = true;
        accepted.push(*line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diagonal(offset: i32, span: i32) -> LineSegment {
        LineSegment::new(offset, 0, offset + span, span)
    }

    fn check_relaxation_trace(passes: &[SelectionPass], t: &SelectionThresholds) {
        for pair in passes.windows(2) {
            let (prev, next) = (pair[0], pair[1]);
            assert!(next.min_span <= prev.min_span);
            if next.min_span < prev.min_span {
                assert_eq!(prev.required_line_count, t.required_line_count_floor);
                let restart = t.required_line_count_start.max(t.required_line_count_floor);
                assert_eq!(next.required_line_count, restart);
            }
            assert!(next.accepted_total >= prev.accepted_total);
        }
        for p in passes {
            assert!(p.required_line_count >= t.required_line_count_floor);
            assert!(p.min_span >= t.min_span_floor);
        }
    }

    #[test]
    fn absent_or_empty_input_reports_no_lines() {
        let selector = LineSelector::default();
        let none = selector.select(None);
        assert_eq!(none.status, SelectionStatus::NoLinesFound);
        assert!(none.accepted.is_empty());
        assert!(none.passes.is_empty());

        let empty = selector.select(Some(&[]));
        assert_eq!(empty.status, SelectionStatus::NoLinesFound);
        assert!(!empty.is_usable());
    }

    #[test]
    fn long_line_accepted_without_relaxation_when_target_is_low() {
        let t = SelectionThresholds {
            required_line_count_start: 1,
            required_line_count_floor: 1,
            ..Default::default()
        };
        let lines = [LineSegment::new(0, 0, 10, 10)];
        let out = select_lines(Some(&lines), &t);
        assert_eq!(out.status, SelectionStatus::Ok);
        assert_eq!(out.accepted, lines.to_vec());
        assert_eq!(out.passes.len(), 1);
    }

    #[test]
    fn stops_early_at_required_count() {
        let lines: Vec<_> = (0..40).map(|i| diagonal(i * 3, 10)).collect();
        let out = LineSelector::default().select(Some(&lines));
        assert_eq!(out.status, SelectionStatus::Ok);
        assert_eq!(out.accepted.len(), 30);
        assert_eq!(out.accepted[..], lines[..30]);
        assert_eq!(out.passes.len(), 1);
        assert_eq!(out.final_state.required_line_count, 30);
    }

    #[test]
    fn lowers_count_until_found_lines_suffice() {
        let lines: Vec<_> = (0..12).map(|i| diagonal(i, 10)).collect();
        let out = LineSelector::default().select(Some(&lines));
        assert_eq!(out.status, SelectionStatus::Ok);
        assert_eq!(out.accepted.len(), 12);
        assert_eq!(
            out.final_state,
            ThresholdState {
                required_line_count: 12,
                min_span: 7
            }
        );
        // 30, 29, ..., 12
        assert_eq!(out.passes.len(), 19);
    }

    #[test]
    fn short_lines_only_qualify_after_span_relaxation() {
        let t = SelectionThresholds::default();
        let lines = [diagonal(0, 3), diagonal(5, 3), diagonal(10, 3)];
        let out = select_lines(Some(&lines), &t);

        assert_eq!(out.status, SelectionStatus::InsufficientLines);
        assert_eq!(out.accepted, lines.to_vec());
        assert_eq!(
            out.final_state,
            ThresholdState {
                required_line_count: 5,
                min_span: 2
            }
        );
        let first_hit = out
            .passes
            .iter()
            .find(|p| p.accepted_total > 0)
            .expect("lines accepted at some level");
        assert_eq!(first_hit.min_span, 3);
        assert_eq!(first_hit.required_line_count, 30);
        assert_eq!(first_hit.accepted_total, 3);
        assert_eq!(out.passes.len(), 26 * 6);
        check_relaxation_trace(&out.passes, &t);
    }

    #[test]
    fn relaxed_passes_add_earlier_skipped_lines_once() {
        let t = SelectionThresholds::default();
        let lines = [
            diagonal(0, 4),
            diagonal(1, 20),
            diagonal(2, 4),
            diagonal(3, 20),
            diagonal(4, 20),
            diagonal(5, 4),
            diagonal(6, 20),
        ];
        let out = select_lines(Some(&lines), &t);
        assert_eq!(out.status, SelectionStatus::Ok);
        assert_eq!(
            out.final_state,
            ThresholdState {
                required_line_count: 7,
                min_span: 4
            }
        );
        let expected = vec![
            lines[1], lines[3], lines[4], lines[6], lines[0], lines[2], lines[5],
        ];
        assert_eq!(out.accepted, expected);
        for line in &out.accepted[..4] {
            assert!(line.spans_at_least(7));
        }
        for line in &out.accepted {
            assert!(line.spans_at_least(out.final_state.min_span as i32));
        }
        check_relaxation_trace(&out.passes, &t);
    }

    #[test]
    fn degenerate_lines_never_accepted() {
        let lines = [
            LineSegment::new(0, 0, 100, 1),
            LineSegment::new(5, 5, 5, 80),
            LineSegment::new(3, 3, 3, 3),
        ];
        let out = LineSelector::default().select(Some(&lines));
        assert_eq!(out.status, SelectionStatus::InsufficientLines);
        assert!(out.accepted.is_empty());
        assert!(!out.is_usable());
    }

    #[test]
    fn starts_below_floor_never_drop_requirements_under_the_floor() {
        let t = SelectionThresholds {
            required_line_count_start: 3,
            required_line_count_floor: 5,
            min_span_start: 4,
            min_span_floor: 2,
        };
        let lines = [diagonal(0, 1), diagonal(5, 1), diagonal(10, 1)];
        let out = select_lines(Some(&lines), &t);
        assert_eq!(out.status, SelectionStatus::InsufficientLines);
        assert!(out.accepted.is_empty());
        assert_eq!(
            out.final_state,
            ThresholdState {
                required_line_count: 5,
                min_span: 2
            }
        );
        // (5, 4), (5, 3), (5, 2)
        assert_eq!(out.passes.len(), 3);
        check_relaxation_trace(&out.passes, &t);
    }
}
