//! Day-of-week attendance statistics.
//!
//! Pure transformations from a flat sequence of attendance records to
//! per-weekday tallies and a chart-ready series. Records are never dropped:
//! a record whose date cannot be parsed lands in the [`DayBucket::Unknown`]
//! bucket, and a record with no attached roster simply leaves the expected
//! headcount unknown.

use std::collections::HashMap;

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Weekday};
use serde::{Deserialize, Serialize};

use crate::types::{Attendance, AttendanceStatus};

/// Weekday bucket for attendance tallies, plus an explicit bucket for
/// records whose date could not be parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DayBucket {
    Sun,
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
    Unknown,
}

impl DayBucket {
    /// The seven weekdays in fixed chart order.
    pub const WEEK: [DayBucket; 7] = [
        DayBucket::Sun,
        DayBucket::Mon,
        DayBucket::Tue,
        DayBucket::Wed,
        DayBucket::Thu,
        DayBucket::Fri,
        DayBucket::Sat,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DayBucket::Sun => "Sun",
            DayBucket::Mon => "Mon",
            DayBucket::Tue => "Tue",
            DayBucket::Wed => "Wed",
            DayBucket::Thu => "Thu",
            DayBucket::Fri => "Fri",
            DayBucket::Sat => "Sat",
            DayBucket::Unknown => "Unknown",
        }
    }

    fn from_weekday(weekday: Weekday) -> Self {
        match weekday {
            Weekday::Sun => DayBucket::Sun,
            Weekday::Mon => DayBucket::Mon,
            Weekday::Tue => DayBucket::Tue,
            Weekday::Wed => DayBucket::Wed,
            Weekday::Thu => DayBucket::Thu,
            Weekday::Fri => DayBucket::Fri,
            Weekday::Sat => DayBucket::Sat,
        }
    }
}

impl std::fmt::Display for DayBucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Parse a date-like string into a calendar date.
///
/// Accepts plain dates (`2025-11-16`), RFC 3339 timestamps, and bare
/// datetime strings without an offset.
fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
        return Some(dt.date());
    }
    None
}

/// Resolve a date-like string to its weekday bucket.
///
/// Returns `None` when the input cannot be parsed as a date; this is the
/// explicit failure signal, no error is raised.
pub fn day_of_week(raw: &str) -> Option<DayBucket> {
    parse_date(raw).map(|date| DayBucket::from_weekday(date.weekday()))
}

/// Per-day attendance tally.
///
/// `expected` is the headcount seeded from the first record of the day that
/// reached the bucket; `None` means no record carried a roster, and the
/// count is genuinely unknown rather than some placeholder.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayTally {
    pub present: u32,
    pub absent: u32,
    pub late: u32,
    pub expected: Option<u32>,
}

/// Bucket attendance records by weekday.
///
/// Every record counts toward exactly one bucket; unparseable dates go to
/// [`DayBucket::Unknown`]. The expected headcount is seeded when a day's
/// bucket is first created, from that record's attached roster length.
pub fn group_by_day(records: &[Attendance]) -> HashMap<DayBucket, DayTally> {
    let mut buckets: HashMap<DayBucket, DayTally> = HashMap::new();

    for record in records {
        let day = day_of_week(&record.date).unwrap_or(DayBucket::Unknown);
        let tally = buckets.entry(day).or_insert_with(|| DayTally {
            expected: record.members.as_ref().map(|m| m.len() as u32),
            ..DayTally::default()
        });
        match record.status {
            AttendanceStatus::Present => tally.present += 1,
            AttendanceStatus::Absent => tally.absent += 1,
            AttendanceStatus::Late => tally.late += 1,
        }
    }

    buckets
}

/// One entry of the seven-day chart series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayPoint {
    pub day: DayBucket,
    pub present: u32,
    pub absent: u32,
    pub late: u32,
    pub expected: Option<u32>,
}

/// Flatten day buckets into a chart series.
///
/// Always emits exactly seven entries in Sun..Sat order, substituting zero
/// counts for days absent from the input, so chart consumers get a total
/// order regardless of how sparse the input was. The Unknown bucket never
/// appears in the series; it is only reachable through the mapping.
pub fn to_chart_series(buckets: &HashMap<DayBucket, DayTally>) -> Vec<DayPoint> {
    DayBucket::WEEK
        .iter()
        .map(|day| {
            let tally = buckets.get(day).cloned().unwrap_or_default();
            DayPoint {
                day: *day,
                present: tally.present,
                absent: tally.absent,
                late: tally.late,
                expected: tally.expected,
            }
        })
        .collect()
}
