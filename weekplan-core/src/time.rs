//! Weekly timeline: a fixed reference week with no calendar meaning.
//!
//! Day 0 is Monday 1900-01-01. Every timestamp the core produces lives in
//! `[week_epoch(), week_epoch() + 7 days]`, so day and hour can be read back
//! by subtracting the epoch.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike};

use crate::error::{Result, ScheduleError};

pub const DAYS_PER_WEEK: i64 = 7;
pub const HOURS_PER_DAY: i64 = 24;

pub const DAY_NAMES: [&str; DAYS_PER_WEEK as usize] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// Monday 00:00 of the reference week.
pub fn week_epoch() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(1900, 1, 1)
        .unwrap_or_default()
        .and_time(NaiveTime::MIN)
}

/// Midnight at the start of day `day` (0 = Monday).
pub fn day_start(day: i64) -> NaiveDateTime {
    week_epoch() + Duration::days(day)
}

/// `time` on day `day` of the reference week.
pub fn at(day: i64, time: NaiveTime) -> NaiveDateTime {
    day_start(day) + (time - NaiveTime::MIN)
}

/// 23:59 on day 6, the last representable slot of the week.
pub fn week_end() -> NaiveDateTime {
    day_start(DAYS_PER_WEEK - 1) + Duration::hours(23) + Duration::minutes(59)
}

/// Day offset (0..=6) of a timestamp on the reference week.
pub fn day_index(ts: NaiveDateTime) -> i64 {
    (ts - week_epoch()).num_days()
}

pub fn hour_of(ts: NaiveDateTime) -> u32 {
    ts.hour()
}

/// Parse a time of day like "09:00" or "9:30".
pub fn parse_time(s: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(s.trim(), "%H:%M")
        .map_err(|e| ScheduleError::invalid(format!("invalid time '{s}' (expected HH:MM): {e}")))
}

pub fn format_time(t: NaiveTime) -> String {
    t.format("%H:%M").to_string()
}

/// Human label for a weekly timestamp, e.g. "Tuesday 09:00".
pub fn format_slot(ts: NaiveDateTime) -> String {
    let name = usize::try_from(day_index(ts))
        .ok()
        .and_then(|d| DAY_NAMES.get(d))
        .copied()
        .unwrap_or("?");
    format!("{} {}", name, ts.format("%H:%M"))
}

/// serde adapter storing a `NaiveTime` as "HH:MM".
pub mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(t: &NaiveTime, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&super::format_time(*t))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(d)?;
        super::parse_time(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Weekday};

    #[test]
    fn epoch_is_a_monday() {
        assert_eq!(week_epoch().weekday(), Weekday::Mon);
        assert_eq!(day_index(week_epoch()), 0);
    }

    #[test]
    fn week_end_is_sunday_2359() {
        let end = week_end();
        assert_eq!(day_index(end), 6);
        assert_eq!(end.format("%H:%M").to_string(), "23:59");
        assert_eq!(end.weekday(), Weekday::Sun);
    }

    #[test]
    fn parse_accepts_short_hours_and_rejects_garbage() {
        assert_eq!(parse_time("9:30").unwrap(), NaiveTime::from_hms_opt(9, 30, 0).unwrap());
        assert_eq!(parse_time(" 23:00 ").unwrap(), NaiveTime::from_hms_opt(23, 0, 0).unwrap());
        assert!(matches!(parse_time("25:00"), Err(ScheduleError::InvalidTask { .. })));
        assert!(parse_time("nine").is_err());
        assert!(parse_time("").is_err());
    }

    #[test]
    fn at_and_format_slot() {
        let t = NaiveTime::from_hms_opt(9, 0, 0).unwrap();
        let ts = at(1, t);
        assert_eq!(day_index(ts), 1);
        assert_eq!(hour_of(ts), 9);
        assert_eq!(format_slot(ts), "Tuesday 09:00");
    }
}
