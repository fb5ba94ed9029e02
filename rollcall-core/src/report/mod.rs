//! Reporting engine for rollcall
//!
//! Pure, side-effect-free transformations from raw attendance records to
//! summary shapes:
//! - per-weekday tallies and the fixed seven-day chart series ([`weekly`])
//! - earliest-arrival rankings ([`arrivals`])
//! - aggregate totals with the busiest weekday ([`summarize`])
//!
//! Given identical input, output is identical; the engine holds no state
//! and reads nothing but its arguments. All functions are total over
//! incomplete data: stale references, missing rosters, and unparseable
//! dates degrade to explicit unknowns instead of failures.

pub mod arrivals;
pub mod weekly;

pub use arrivals::{earliest_arrivals, DEFAULT_EARLY_LIMIT};
pub use weekly::{day_of_week, group_by_day, to_chart_series, DayBucket, DayPoint, DayTally};

use serde::{Deserialize, Serialize};

use crate::types::{Attendance, AttendanceStatus};

/// Aggregate totals across a set of attendance records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceSummary {
    /// Total number of records
    pub total: u32,
    /// Records with status Present
    pub present: u32,
    /// Records with status Absent
    pub absent: u32,
    /// Records with status Late
    pub late: u32,
    /// Weekday with the most records; None when no record parsed to a
    /// weekday. Ties resolve to the earliest day in Sun..Sat order.
    pub busiest_day: Option<DayBucket>,
}

/// Compute aggregate totals and the busiest weekday.
pub fn summarize(records: &[Attendance]) -> AttendanceSummary {
    let mut summary = AttendanceSummary {
        total: records.len() as u32,
        ..AttendanceSummary::default()
    };

    for record in records {
        match record.status {
            AttendanceStatus::Present => summary.present += 1,
            AttendanceStatus::Absent => summary.absent += 1,
            AttendanceStatus::Late => summary.late += 1,
        }
    }

    let buckets = group_by_day(records);
    let mut busiest: Option<(DayBucket, u32)> = None;
    for day in DayBucket::WEEK {
        let Some(tally) = buckets.get(&day) else {
            continue;
        };
        let count = tally.present + tally.absent + tally.late;
        if count > 0 && busiest.map_or(true, |(_, best)| count > best) {
            busiest = Some((day, count));
        }
    }
    summary.busiest_day = busiest.map(|(day, _)| day);

    summary
}
