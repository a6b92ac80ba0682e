//! Placement problem: which tasks are left, where the next one goes, when
//! the week is done, and how promising a partial week looks.
//!
//! Placement only ever shifts a task by whole days. The time of day is the
//! task's preferred start and is never changed, so a task that collides on
//! all seven days is unplaceable no matter how long the search runs.

use chrono::{Duration, NaiveDateTime, NaiveTime};

use crate::placement::{Placement, PlacementState};
use crate::search::{SearchProblem, Transition};
use crate::task::TaskRecord;
use crate::time::{self, DAYS_PER_WEEK, HOURS_PER_DAY};

/// Notional cost of one unplaced task, in seconds.
pub const UNPLACED_TASK_COST_SECS: f64 = 3600.0;

#[derive(Debug, Clone, Copy)]
pub struct PlacementProblem<'a> {
    tasks: &'a [TaskRecord],
}

impl<'a> PlacementProblem<'a> {
    pub fn new(tasks: &'a [TaskRecord]) -> Self {
        Self { tasks }
    }

    /// Tasks not yet placed in `state`, in task-list order.
    pub fn legal_moves(&self, state: &PlacementState) -> Vec<&'a TaskRecord> {
        self.tasks
            .iter()
            .filter(|t| !state.contains(t.id()))
            .collect()
    }

    /// Place `task` at the first free day offset, or stall.
    pub fn apply(&self, state: &PlacementState, task: &TaskRecord) -> Transition<PlacementState> {
        match find_slot(state.placements(), task) {
            Some(start) => Transition::Advanced(state.with(Placement::new(
                task.id(),
                start,
                task.duration_hours(),
            ))),
            None => Transition::Stalled,
        }
    }

    pub fn is_goal(&self, state: &PlacementState) -> bool {
        self.tasks.iter().all(|t| state.contains(t.id()))
    }

    pub fn heuristic(&self, state: &PlacementState) -> f64 {
        slack_heuristic(state, self.tasks.len())
    }
}

impl<'a> SearchProblem for PlacementProblem<'a> {
    type State = PlacementState;
    type Action = &'a TaskRecord;
    type Key = Vec<Placement>;

    fn initial_state(&self) -> PlacementState {
        PlacementState::empty()
    }

    fn actions(&self, state: &PlacementState) -> Vec<&'a TaskRecord> {
        self.legal_moves(state)
    }

    fn result(&self, state: &PlacementState, action: &&'a TaskRecord) -> Transition<PlacementState> {
        self.apply(state, action)
    }

    fn is_goal(&self, state: &PlacementState) -> bool {
        PlacementProblem::is_goal(self, state)
    }

    fn heuristic(&self, state: &PlacementState) -> f64 {
        PlacementProblem::heuristic(self, state)
    }

    fn key(&self, state: &PlacementState) -> Vec<Placement> {
        state.key()
    }
}

/// The 7 day-shifted copies of a start time, Monday first.
pub fn candidate_window(start: NaiveTime) -> impl Iterator<Item = NaiveDateTime> {
    (0..DAYS_PER_WEEK).map(move |day| time::at(day, start))
}

/// Whether the task is no longer than one day. A longer task would collide
/// with its own copy one day later, so it never has a place in a repeating
/// week. Crossing midnight is fine: `22:00` for 3h runs into the next day.
pub fn fits_in_day(task: &TaskRecord) -> bool {
    i64::from(task.duration_hours()) <= HOURS_PER_DAY
}

/// First start in the candidate window that overlaps nothing in
/// `placements`. `None` when every offset collides or the task is longer
/// than a day.
pub fn find_slot(placements: &[Placement], task: &TaskRecord) -> Option<NaiveDateTime> {
    if !fits_in_day(task) {
        return None;
    }
    let duration = Duration::hours(i64::from(task.duration_hours()));
    candidate_window(task.preferred_start()).find(|&start| {
        let end = start + duration;
        !placements.iter().any(|p| p.overlaps(start, end))
    })
}

/// Remaining slack in the week plus a notional hour per unplaced task.
///
/// An empty state scores the task count. Slack is not clamped: a state that
/// already runs past 23:59 on day 6 scores negative slack.
pub fn slack_heuristic(state: &PlacementState, total_tasks: usize) -> f64 {
    let Some(latest_end) = state.latest_end() else {
        return total_tasks as f64;
    };
    let slack = (time::week_end() - latest_end).num_seconds() as f64;
    let remaining = total_tasks.saturating_sub(state.len());
    slack + remaining as f64 * UNPLACED_TASK_COST_SECS
}
