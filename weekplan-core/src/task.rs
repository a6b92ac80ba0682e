//! Task record: one recurring weekly piece of work.
//!
//! Records are validated at construction (and on deserialization), so the
//! search never sees a malformed task.

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::error::{Result, ScheduleError};
use crate::time;

/// Immutable description of a task to be placed on the week.
///
/// Persisted as `{"id", "name", "start_time": "HH:MM", "duration"}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawTaskRecord")]
pub struct TaskRecord {
    id: String,
    name: String,

    #[serde(rename = "start_time", with = "time::hhmm")]
    preferred_start: NaiveTime,

    /// Whole hours, always >= 1.
    #[serde(rename = "duration")]
    duration_hours: u32,
}

impl TaskRecord {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        preferred_start: NaiveTime,
        duration_hours: u32,
    ) -> Result<Self> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(ScheduleError::invalid("task id must not be empty"));
        }
        if duration_hours < 1 {
            return Err(ScheduleError::invalid(format!(
                "task {id}: duration must be at least 1 hour"
            )));
        }
        Ok(Self {
            id,
            name: name.into(),
            preferred_start,
            duration_hours,
        })
    }

    /// Build a record from user input: an "HH:MM" string and a signed
    /// duration, as typed into a form or read from a file.
    pub fn parse(
        id: impl Into<String>,
        name: impl Into<String>,
        start_time: &str,
        duration_hours: i64,
    ) -> Result<Self> {
        let start = time::parse_time(start_time)?;
        let hours = u32::try_from(duration_hours)
            .map_err(|_| ScheduleError::invalid(format!("invalid duration: {duration_hours}")))?;
        Self::new(id, name, start, hours)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn preferred_start(&self) -> NaiveTime {
        self.preferred_start
    }

    pub fn duration_hours(&self) -> u32 {
        self.duration_hours
    }

    /// Hour-of-day the task would start at (seconds are ignored).
    pub fn start_hour(&self) -> u32 {
        self.preferred_start.hour()
    }
}

#[derive(Deserialize)]
struct RawTaskRecord {
    id: String,
    name: String,
    start_time: String,
    duration: i64,
}

impl TryFrom<RawTaskRecord> for TaskRecord {
    type Error = ScheduleError;

    fn try_from(raw: RawTaskRecord) -> Result<Self> {
        Self::parse(raw.id, raw.name, &raw.start_time, raw.duration)
    }
}
