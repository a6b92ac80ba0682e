//! Error taxonomy for the placement core.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleError {
    /// Malformed time string or non-positive duration. Rejected before the
    /// search ever sees the task.
    #[error("invalid task: {reason}")]
    InvalidTask { reason: String },

    #[error("duplicate task id: {0}")]
    DuplicateTaskId(String),

    /// At least one task had no free slot in any of the 7 day offsets.
    #[error("no more time slots available this week ({} task(s) unplaced)", unplaced.len())]
    CapacityExhausted { unplaced: Vec<String> },

    /// The frontier emptied without reaching a goal.
    #[error("could not schedule tasks")]
    NoSolution,

    #[error("search stopped after {expansions} expansions without a result")]
    SearchLimit { expansions: usize },
}

impl ScheduleError {
    pub fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidTask {
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ScheduleError>;
