//! Greedy best-first search.
//!
//! The frontier is ordered by heuristic value only (lowest first); path
//! depth is never part of the key, so this is not A*. Ties are broken by
//! insertion order, which keeps the whole search deterministic.
//!
//! An action whose transition stalls (the problem could not apply it) is
//! abandoned for the rest of the search. A state whose remaining actions
//! have all been abandoned is "settled": the best the search can do.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashSet};
use std::hash::Hash;
use std::time::{Duration, Instant};

use tracing::{debug, trace};

/// Result of applying one action to a state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition<S> {
    /// The action made progress; here is the successor.
    Advanced(S),
    /// The action cannot be applied from this state; the state is unchanged.
    Stalled,
}

/// A search problem the greedy driver can explore.
pub trait SearchProblem {
    type State: Clone;
    type Action: Clone + Eq + Hash;
    /// Duplicate-detection key: states with equal keys are expanded once.
    type Key: Eq + Hash;

    fn initial_state(&self) -> Self::State;
    fn actions(&self, state: &Self::State) -> Vec<Self::Action>;
    fn result(&self, state: &Self::State, action: &Self::Action) -> Transition<Self::State>;
    fn is_goal(&self, state: &Self::State) -> bool;
    fn heuristic(&self, state: &Self::State) -> f64;
    fn key(&self, state: &Self::State) -> Self::Key;
}

/// Hard ceilings on one search run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchLimits {
    pub max_expansions: usize,
    pub time_budget: Option<Duration>,
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self {
            max_expansions: 200_000,
            time_budget: None,
        }
    }
}

/// How a search run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Found<S> {
    /// A goal state.
    Goal(S),
    /// No goal, but every action left from this state was abandoned.
    Settled(S),
    /// The frontier emptied.
    Exhausted,
    /// An expansion or time ceiling was hit.
    LimitReached,
}

#[derive(Debug, Clone)]
pub struct SearchReport<S, A> {
    pub found: Found<S>,
    /// Actions that stalled, in the order they were first abandoned.
    pub abandoned: Vec<A>,
    pub expansions: usize,
    pub generated: usize,
}

struct FrontierEntry<S> {
    h: f64,
    seq: u64,
    state: S,
}

impl<S> PartialEq for FrontierEntry<S> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}
impl<S> Eq for FrontierEntry<S> {}

impl<S> PartialOrd for FrontierEntry<S> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<S> Ord for FrontierEntry<S> {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap is a max-heap: invert so the lowest h (then oldest seq)
        // pops first.
        other
            .h
            .total_cmp(&self.h)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Run greedy best-first search on `problem`.
pub fn greedy<P: SearchProblem>(
    problem: &P,
    limits: &SearchLimits,
) -> SearchReport<P::State, P::Action> {
    let started = Instant::now();

    let mut frontier: BinaryHeap<FrontierEntry<P::State>> = BinaryHeap::new();
    let mut seen: HashSet<P::Key> = HashSet::new();
    let mut abandoned: Vec<P::Action> = Vec::new();
    let mut abandoned_set: HashSet<P::Action> = HashSet::new();
    let mut seq: u64 = 0;
    let mut expansions = 0usize;
    let mut generated = 1usize;

    let initial = problem.initial_state();
    seen.insert(problem.key(&initial));
    frontier.push(FrontierEntry {
        h: problem.heuristic(&initial),
        seq,
        state: initial,
    });

    let report = |found, abandoned, expansions, generated| SearchReport {
        found,
        abandoned,
        expansions,
        generated,
    };

    while let Some(FrontierEntry { h, state, .. }) = frontier.pop() {
        if problem.is_goal(&state) {
            debug!(expansions, generated, "goal reached");
            return report(Found::Goal(state), abandoned, expansions, generated);
        }

        if expansions >= limits.max_expansions
            || limits.time_budget.is_some_and(|b| started.elapsed() >= b)
        {
            debug!(expansions, generated, "search limit reached");
            return report(Found::LimitReached, abandoned, expansions, generated);
        }
        expansions += 1;
        trace!(h, frontier = frontier.len(), "expanding");

        let mut live_actions = 0usize;
        for action in problem.actions(&state) {
            if abandoned_set.contains(&action) {
                continue;
            }
            match problem.result(&state, &action) {
                Transition::Advanced(next) => {
                    live_actions += 1;
                    if !seen.insert(problem.key(&next)) {
                        continue;
                    }
                    seq += 1;
                    generated += 1;
                    frontier.push(FrontierEntry {
                        h: problem.heuristic(&next),
                        seq,
                        state: next,
                    });
                }
                Transition::Stalled => {
                    abandoned_set.insert(action.clone());
                    abandoned.push(action);
                }
            }
        }

        if live_actions == 0 {
            debug!(expansions, abandoned = abandoned.len(), "settled without goal");
            return report(Found::Settled(state), abandoned, expansions, generated);
        }
    }

    debug!(expansions, generated, "frontier exhausted");
    report(Found::Exhausted, abandoned, expansions, generated)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Walk a number line from 0 towards `target` by +1 or +2, with the
    /// heuristic being the distance left. `blocked` actions always stall.
    struct Line {
        target: i32,
        blocked: Vec<i32>,
    }

    impl SearchProblem for Line {
        type State = i32;
        type Action = i32;
        type Key = i32;

        fn initial_state(&self) -> i32 {
            0
        }
        fn actions(&self, state: &i32) -> Vec<i32> {
            if *state >= self.target { vec![] } else { vec![1, 2] }
        }
        fn result(&self, state: &i32, action: &i32) -> Transition<i32> {
            if self.blocked.contains(action) {
                Transition::Stalled
            } else {
                Transition::Advanced(state + action)
            }
        }
        fn is_goal(&self, state: &i32) -> bool {
            *state == self.target
        }
        fn heuristic(&self, state: &i32) -> f64 {
            f64::from((self.target - state).abs())
        }
        fn key(&self, state: &i32) -> i32 {
            *state
        }
    }

    #[test]
    fn reaches_goal_greedily() {
        let p = Line { target: 6, blocked: vec![] };
        let r = greedy(&p, &SearchLimits::default());
        assert_eq!(r.found, Found::Goal(6));
        assert!(r.abandoned.is_empty());
        // +2 is always preferred: 0 -> 2 -> 4 -> 6
        assert_eq!(r.expansions, 3);
    }

    #[test]
    fn stalled_action_is_abandoned_once() {
        let p = Line { target: 3, blocked: vec![2] };
        let r = greedy(&p, &SearchLimits::default());
        assert_eq!(r.found, Found::Goal(3));
        assert_eq!(r.abandoned, vec![2]);
    }

    #[test]
    fn all_actions_stalled_settles() {
        let p = Line { target: 3, blocked: vec![1, 2] };
        let r = greedy(&p, &SearchLimits::default());
        assert_eq!(r.found, Found::Settled(0));
        assert_eq!(r.abandoned, vec![1, 2]);
    }

    /// Steps around a 3-cycle forever; the goal is never on it.
    struct Cycle;

    impl SearchProblem for Cycle {
        type State = i32;
        type Action = i32;
        type Key = i32;

        fn initial_state(&self) -> i32 {
            0
        }
        fn actions(&self, _state: &i32) -> Vec<i32> {
            vec![1]
        }
        fn result(&self, state: &i32, action: &i32) -> Transition<i32> {
            Transition::Advanced((state + action) % 3)
        }
        fn is_goal(&self, state: &i32) -> bool {
            *state == 7
        }
        fn heuristic(&self, _state: &i32) -> f64 {
            1.0
        }
        fn key(&self, state: &i32) -> i32 {
            *state
        }
    }

    #[test]
    fn revisited_states_exhaust_the_frontier() {
        let r = greedy(&Cycle, &SearchLimits::default());
        assert_eq!(r.found, Found::Exhausted);
        assert_eq!(r.expansions, 3);
        assert_eq!(r.generated, 3);
    }

    #[test]
    fn expansion_ceiling_stops_search() {
        let p = Line { target: 1_000, blocked: vec![] };
        let limits = SearchLimits {
            max_expansions: 5,
            time_budget: None,
        };
        let r = greedy(&p, &limits);
        assert_eq!(r.found, Found::LimitReached);
        assert_eq!(r.expansions, 5);
    }

    #[test]
    fn frontier_orders_by_heuristic_then_fifo() {
        let mut heap = BinaryHeap::new();
        heap.push(FrontierEntry { h: 5.0, seq: 0, state: "a" });
        heap.push(FrontierEntry { h: 1.0, seq: 1, state: "b" });
        heap.push(FrontierEntry { h: 1.0, seq: 2, state: "c" });
        heap.push(FrontierEntry { h: -3.0, seq: 3, state: "d" });

        let order: Vec<_> = std::iter::from_fn(|| heap.pop().map(|e| e.state)).collect();
        assert_eq!(order, vec!["d", "b", "c", "a"]);
    }
}
