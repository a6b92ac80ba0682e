//! weekplan-core: place recurring weekly tasks on a 7 × 24 hour week.
//!
//! Each task has a preferred start time of day and a duration in whole
//! hours. A task is tried at its preferred time on Monday, then on each
//! following day until it fits without overlapping anything already
//! placed. A greedy best-first search picks the placement order.
//!
//! No I/O happens here: persistence, rendering and configuration live in
//! `weekplan-cli`.

pub mod error;
pub mod placement;
pub mod problem;
pub mod scheduler;
pub mod search;
pub mod task;
pub mod time;

pub use error::ScheduleError;
pub use placement::{Placement, PlacementState};
pub use problem::{PlacementProblem, candidate_window, find_slot, fits_in_day, slack_heuristic};
pub use scheduler::{Outcome, ScheduleReport, schedule, validate_tasks};
pub use search::{Found, SearchLimits, SearchProblem, SearchReport, Transition, greedy};
pub use task::TaskRecord;
