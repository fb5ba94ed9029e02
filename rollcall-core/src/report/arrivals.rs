//! Earliest-arrival ranking.

use crate::types::{Attendance, AttendanceStatus};

/// How many records the earliest-arrivals view returns unless configured
/// otherwise.
pub const DEFAULT_EARLY_LIMIT: usize = 3;

/// The records that arrived earliest before their session's declared start.
///
/// A record qualifies only when all of these hold:
/// - status is Present
/// - the attached roster exists and is non-empty
/// - the embedded session snapshot exists and the arrival precedes its
///   declared start time
///
/// The roster and snapshot preconditions are data-completeness gates: a
/// record captured without them is excluded even if its timing would
/// otherwise qualify. Results are sorted ascending by arrival time and
/// truncated to `limit`.
pub fn earliest_arrivals(records: &[Attendance], limit: usize) -> Vec<Attendance> {
    let mut early: Vec<&Attendance> = records
        .iter()
        .filter(|r| r.status == AttendanceStatus::Present)
        .filter(|r| r.members.as_ref().is_some_and(|m| !m.is_empty()))
        .filter(|r| {
            r.session
                .as_ref()
                .is_some_and(|s| r.arrived_at < s.starts_at)
        })
        .collect();

    early.sort_by_key(|r| r.arrived_at);
    early.into_iter().take(limit).cloned().collect()
}
