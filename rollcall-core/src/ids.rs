//! Process-unique identifier generation.
//!
//! Every entity the store creates gets an id from [`new_id`]. Ids combine a
//! millisecond timestamp with a random suffix, so they stay collision-free
//! across a process lifetime without any external coordination. Ids are
//! opaque to callers and are never reused, even after the entity they named
//! has been removed.

use chrono::Utc;
use uuid::Uuid;

/// Random hex characters appended after the time component.
const SUFFIX_LEN: usize = 12;

/// Generate a fresh entity id.
///
/// The result is a lowercase-hex millisecond timestamp, a dash, and a
/// random suffix drawn from a v4 UUID. Nothing parses ids back apart from
/// equality checks.
pub fn new_id() -> String {
    let millis = Utc::now().timestamp_millis();
    let uuid = Uuid::new_v4().simple().to_string();
    format!("{:x}-{}", millis, &uuid[..SUFFIX_LEN])
}
