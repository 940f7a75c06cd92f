use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Starting values and floors of the two adaptive selection thresholds.
///
/// - `required_line_count_*`: how many accepted lines the selector aims for.
/// - `min_span_*`: minimum `|x2 - x1|` and `|y2 - y1|` of an accepted line.
///
/// Both thresholds only ever move from their start value towards their floor.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SelectionThresholds {
    pub required_line_count_start: usize,
    pub required_line_count_floor: usize,
    pub min_span_start: usize,
    pub min_span_floor: usize,
}

impl Default for SelectionThresholds {
    fn default() -> Self {
        Self {
            required_line_count_start: 30,
            required_line_count_floor: 5,
            min_span_start: 7,
            min_span_floor: 2,
        }
    }
}

impl SelectionThresholds {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.required_line_count_floor == 0 {
            return Err(ConfigError::ZeroFloor {
                name: "required_line_count",
            });
        }
        if self.min_span_floor == 0 {
            return Err(ConfigError::ZeroFloor { name: "min_span" });
        }
        if self.required_line_count_start < self.required_line_count_floor {
            return Err(ConfigError::StartBelowFloor {
                name: "required_line_count",
                start: self.required_line_count_start,
                floor: self.required_line_count_floor,
            });
        }
        if self.min_span_start < self.min_span_floor {
            return Err(ConfigError::StartBelowFloor {
                name: "min_span",
                start: self.min_span_start,
                floor: self.min_span_floor,
            });
        }
        Ok(())
    }

    /// State of the first, strictest selection pass.
    pub fn initial_state(&self) -> ThresholdState {
        ThresholdState {
            required_line_count: self.count_start(),
            min_span: self.min_span_start.max(self.min_span_floor),
        }
    }

    /// Start value of the required count, never below its floor even when
    /// the thresholds were not validated.
    fn count_start(&self) -> usize {
        self.required_line_count_start.max(self.required_line_count_floor)
    }
}

/// Thresholds in effect during one selection pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThresholdState {
    pub required_line_count: usize,
    pub min_span: usize,
}

impl ThresholdState {
    /// Next, looser state, or `None` once both thresholds sit on their floors.
    ///
    /// The line count is lowered first. Only when it has reached its floor is
    /// the span lowered by one, and the count starts over from its start value,
    /// lifted to the floor when it was configured below it.
    pub fn relax(&self, thresholds: &SelectionThresholds) -> Option<ThresholdState> {
        if self.required_line_count > thresholds.required_line_count_floor {
            return Some(ThresholdState {
                required_line_count: self.required_line_count - 1,
                min_span: self.min_span,
            });
        }
        if self.min_span > thresholds.min_span_floor {
            return Some(ThresholdState {
                required_line_count: thresholds.count_start(),
                min_span: self.min_span - 1,
            });
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_thresholds_are_valid() {
        let t = SelectionThresholds::default();
        assert!(t.validate().is_ok());
        assert_eq!(
            t.initial_state(),
            ThresholdState {
                required_line_count: 30,
                min_span: 7
            }
        );
    }

    #[test]
    fn validation_rejects_start_below_floor() {
        let t = SelectionThresholds {
            min_span_start: 1,
            ..Default::default()
        };
        assert_eq!(
            t.validate(),
            Err(ConfigError::StartBelowFloor {
                name: "min_span",
                start: 1,
                floor: 2
            })
        );
        let t = SelectionThresholds {
            required_line_count_floor: 0,
            ..Default::default()
        };
        assert!(matches!(t.validate(), Err(ConfigError::ZeroFloor { .. })));
    }

    #[test]
    fn relaxation_lowers_count_before_span() {
        let t = SelectionThresholds::default();
        let mut state = t.initial_state();
        for expected in (5..30).rev() {
            state = state.relax(&t).expect("count above floor");
            assert_eq!(state.required_line_count, expected);
            assert_eq!(state.min_span, 7);
        }
        state = state.relax(&t).expect("span above floor");
        assert_eq!(
            state,
            ThresholdState {
                required_line_count: 30,
                min_span: 6
            }
        );
    }

    #[test]
    fn relaxation_terminates_at_both_floors() {
        let t = SelectionThresholds::default();
        let mut state = t.initial_state();
        let mut steps = 0usize;
        let mut last_span = state.min_span;
        while let Some(next) = state.relax(&t) {
            assert!(next.required_line_count >= t.required_line_count_floor);
            assert!(next.min_span >= t.min_span_floor);
            assert!(next.min_span <= last_span);
            if next.min_span < last_span {
                assert_eq!(state.required_line_count, t.required_line_count_floor);
            }
            last_span = next.min_span;
            state = next;
            steps += 1;
        }
        // 26 count levels for each of the 6 span levels, minus the start state.
        assert_eq!(steps, 26 * 6 - 1);
        assert_eq!(
            state,
            ThresholdState {
                required_line_count: 5,
                min_span: 2
            }
        );
    }

    #[test]
    fn unvalidated_starts_below_floor_are_lifted_to_the_floor() {
        let t = SelectionThresholds {
            required_line_count_start: 3,
            required_line_count_floor: 5,
            min_span_start: 1,
            min_span_floor: 2,
        };
        let mut state = t.initial_state();
        assert_eq!(
            state,
            ThresholdState {
                required_line_count: 5,
                min_span: 2
            }
        );
        assert_eq!(state.relax(&t), None);

        let t = SelectionThresholds {
            required_line_count_start: 3,
            ..Default::default()
        };
        state = t.initial_state();
        while let Some(next) = state.relax(&t) {
            assert!(next.required_line_count >= 5, "{next:?}");
            state = next;
        }
        assert_eq!(state.min_span, 2);
    }
}
