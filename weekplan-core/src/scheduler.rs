//! Scheduler entry point: validate the task list, run the greedy search,
//! and report what happened as an explicit outcome.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{Result, ScheduleError};
use crate::placement::PlacementState;
use crate::problem::PlacementProblem;
use crate::search::{Found, SearchLimits, greedy};
use crate::task::TaskRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// Every task placed.
    Scheduled,
    /// Search completed, but at least one task had no free day.
    CapacityExhausted,
    /// The search found no arrangement at all.
    NoSolution,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleReport {
    pub outcome: Outcome,
    /// Complete schedule for `Scheduled`, the partial one otherwise.
    pub state: PlacementState,
    /// Ids of tasks missing from `state`, in task-list order.
    pub unplaced: Vec<String>,
    pub expansions: usize,
}

impl ScheduleReport {
    pub fn is_full(&self) -> bool {
        self.outcome == Outcome::Scheduled
    }

    /// Collapse to a plain result: only a full schedule is `Ok`.
    pub fn into_result(self) -> Result<PlacementState> {
        match self.outcome {
            Outcome::Scheduled => Ok(self.state),
            Outcome::CapacityExhausted => Err(ScheduleError::CapacityExhausted {
                unplaced: self.unplaced,
            }),
            Outcome::NoSolution => Err(ScheduleError::NoSolution),
        }
    }
}

/// Boundary check run before any search: ids must be unique.
pub fn validate_tasks(tasks: &[TaskRecord]) -> Result<()> {
    let mut seen = HashSet::new();
    for t in tasks {
        if !seen.insert(t.id()) {
            return Err(ScheduleError::DuplicateTaskId(t.id().to_string()));
        }
    }
    Ok(())
}

/// Place `tasks` on the week.
pub fn schedule(tasks: &[TaskRecord], limits: &SearchLimits) -> Result<ScheduleReport> {
    validate_tasks(tasks)?;

    let problem = PlacementProblem::new(tasks);
    let report = greedy(&problem, limits);

    let (outcome, state) = match report.found {
        Found::Goal(state) => (Outcome::Scheduled, state),
        Found::Settled(state) => (Outcome::CapacityExhausted, state),
        Found::Exhausted => (Outcome::NoSolution, PlacementState::empty()),
        Found::LimitReached => {
            return Err(ScheduleError::SearchLimit {
                expansions: report.expansions,
            });
        }
    };

    let unplaced: Vec<String> = tasks
        .iter()
        .filter(|t| !state.contains(t.id()))
        .map(|t| t.id().to_string())
        .collect();

    for task in &report.abandoned {
        if unplaced.iter().any(|id| id == task.id()) {
            warn!(task_id = task.id(), name = task.name(), "no free day for task");
        } else {
            debug!(task_id = task.id(), "task stalled on one branch but was placed on another");
        }
    }

    info!(
        ?outcome,
        placed = state.len(),
        unplaced = unplaced.len(),
        expansions = report.expansions,
        "schedule finished"
    );

    Ok(ScheduleReport {
        outcome,
        state,
        unplaced,
        expansions: report.expansions,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time;

    fn task(id: &str, start: &str, hours: i64) -> TaskRecord {
        TaskRecord::parse(id, id, start, hours).unwrap()
    }

    #[test]
    fn empty_task_list_is_trivially_scheduled() {
        let r = schedule(&[], &SearchLimits::default()).unwrap();
        assert_eq!(r.outcome, Outcome::Scheduled);
        assert!(r.state.is_empty());
        assert_eq!(r.expansions, 0);
    }

    #[test]
    fn duplicate_ids_are_rejected_before_search() {
        let tasks = vec![task("a", "09:00", 1), task("a", "10:00", 1)];
        assert_eq!(
            schedule(&tasks, &SearchLimits::default()),
            Err(ScheduleError::DuplicateTaskId("a".into()))
        );
    }

    #[test]
    fn single_oversized_task_is_capacity_exhausted() {
        let tasks = vec![task("big", "00:00", 25)];
        let r = schedule(&tasks, &SearchLimits::default()).unwrap();
        assert_eq!(r.outcome, Outcome::CapacityExhausted);
        assert!(r.state.is_empty());
        assert_eq!(r.unplaced, vec!["big".to_string()]);
        assert_eq!(
            r.into_result(),
            Err(ScheduleError::CapacityExhausted {
                unplaced: vec!["big".into()]
            })
        );
    }

    #[test]
    fn remaining_tasks_are_still_placed_after_exhaustion() {
        let tasks = vec![task("big", "00:00", 30), task("a", "09:00", 1)];
        let r = schedule(&tasks, &SearchLimits::default()).unwrap();
        assert_eq!(r.outcome, Outcome::CapacityExhausted);
        assert_eq!(r.unplaced, vec!["big".to_string()]);
        let a = r.state.get("a").unwrap();
        assert_eq!(time::day_index(a.start), 0);
    }

    #[test]
    fn limit_is_reported_as_error() {
        let tasks = vec![task("a", "09:00", 1), task("b", "09:00", 1)];
        let limits = SearchLimits {
            max_expansions: 1,
            time_budget: None,
        };
        assert_eq!(
            schedule(&tasks, &limits),
            Err(ScheduleError::SearchLimit { expansions: 1 })
        );
    }

    #[test]
    fn full_schedule_into_result_is_ok() {
        let tasks = vec![task("a", "09:00", 3)];
        let state = schedule(&tasks, &SearchLimits::default())
            .unwrap()
            .into_result()
            .unwrap();
        assert_eq!(state.len(), 1);
    }
}
