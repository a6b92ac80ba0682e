//! Placement state: the tasks placed so far, each at a concrete weekly start.

use std::sync::Arc;

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::time;

/// One placed task: `[start, start + duration_hours)` on the weekly timeline.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Placement {
    pub task_id: String,
    pub start: NaiveDateTime,
    pub duration_hours: u32,
}

impl Placement {
    pub fn new(task_id: impl Into<String>, start: NaiveDateTime, duration_hours: u32) -> Self {
        Self {
            task_id: task_id.into(),
            start,
            duration_hours,
        }
    }

    pub fn end(&self) -> NaiveDateTime {
        self.start + Duration::hours(i64::from(self.duration_hours))
    }

    /// Half-open interval overlap against `[start, end)`.
    pub fn overlaps(&self, start: NaiveDateTime, end: NaiveDateTime) -> bool {
        !(start >= self.end() || end <= self.start)
    }

    pub fn day(&self) -> i64 {
        time::day_index(self.start)
    }
}

/// Immutable, append-only sequence of placements in placement order.
///
/// Cloning is cheap (shared buffer). `with` copies into a fresh buffer, so
/// sibling states in a search frontier never alias each other's storage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlacementState {
    placements: Arc<[Placement]>,
}

impl PlacementState {
    pub fn empty() -> Self {
        Self::default()
    }

    /// New state with `placement` appended.
    pub fn with(&self, placement: Placement) -> Self {
        let mut next = Vec::with_capacity(self.placements.len() + 1);
        next.extend(self.placements.iter().cloned());
        next.push(placement);
        Self {
            placements: next.into(),
        }
    }

    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    pub fn len(&self) -> usize {
        self.placements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    pub fn contains(&self, task_id: &str) -> bool {
        self.placements.iter().any(|p| p.task_id == task_id)
    }

    pub fn get(&self, task_id: &str) -> Option<&Placement> {
        self.placements.iter().find(|p| p.task_id == task_id)
    }

    /// Latest end time across all placements.
    pub fn latest_end(&self) -> Option<NaiveDateTime> {
        self.placements.iter().map(Placement::end).max()
    }

    /// Order-independent form: two states with the same multiset of
    /// placements share a key.
    pub fn key(&self) -> Vec<Placement> {
        let mut k = self.placements.to_vec();
        k.sort();
        k
    }
}

impl From<Vec<Placement>> for PlacementState {
    fn from(placements: Vec<Placement>) -> Self {
        Self {
            placements: placements.into(),
        }
    }
}

impl Serialize for PlacementState {
    fn serialize<S: serde::Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        self.placements().serialize(s)
    }
}

impl<'de> Deserialize<'de> for PlacementState {
    fn deserialize<D: serde::Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        Vec::<Placement>::deserialize(d).map(Self::from)
    }
}
