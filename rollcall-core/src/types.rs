//! Core domain types for rollcall
//!
//! These types form the canonical data model shared by the entity store,
//! the reporting engine, and any rendering collaborator.
//!
//! ## Terminology
//!
//! | Term | Definition |
//! |------|------------|
//! | **Student / Lecturer / SystemAdmin** | The three account roles; stored in separate collections |
//! | **Member** | An attendance-subdomain participant wrapping a user reference plus guardian fields |
//! | **Course** | A taught unit owned by a lecturer, with an enrolled-student roster |
//! | **Session** | A scheduled or active check-in/check-out event that attendance records belong to |
//! | **Attendance** | One member's presence record for one session |
//! | **Enrollment** | The bidirectional Student↔Course relation, kept symmetric by the store |
//!
//! ### Snapshots vs references
//!
//! Sessions and members embed [`UserSnapshot`] values, and attendance
//! records embed a [`SessionSnapshot`]: these are copies captured when the
//! record was created, not live references. The attendance sequences on
//! [`Member`] and [`Session`] are capture-time copies too; the flat
//! collection owned by the store is the authoritative one.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================
// Roles and users
// ============================================

/// Account role tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Student,
    Lecturer,
    SystemAdmin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::Lecturer => "lecturer",
            Role::SystemAdmin => "system_admin",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "student" => Ok(Role::Student),
            "lecturer" => Ok(Role::Lecturer),
            "system_admin" => Ok(Role::SystemAdmin),
            _ => Err(format!("unknown role: {}", s)),
        }
    }
}

/// A student account.
///
/// `enrolled_courses` lists course ids and is kept symmetric with
/// [`Course::enrolled_students`] by the store's enroll/unenroll operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    /// Unique identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Contact email (not validated at this layer)
    pub email: String,
    /// Optional profile picture URL or path
    pub profile_picture: Option<String>,
    /// Course ids this student is enrolled in (duplicate-free)
    #[serde(default)]
    pub enrolled_courses: Vec<String>,
    /// When this account was created
    pub created_at: DateTime<Utc>,
}

/// A lecturer account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lecturer {
    /// Unique identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Contact email
    pub email: String,
    /// Optional profile picture URL or path
    pub profile_picture: Option<String>,
    /// Department the lecturer teaches in
    pub department: String,
    /// When this account was created
    pub created_at: DateTime<Utc>,
}

/// A system administrator account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemAdmin {
    /// Unique identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Contact email
    pub email: String,
    /// Optional profile picture URL or path
    pub profile_picture: Option<String>,
    /// When this account was created
    pub created_at: DateTime<Utc>,
}

/// Any user, with its role tag preserved.
///
/// This is the return shape of `Store::all_users`: the three role
/// collections concatenated without losing which collection each entry
/// came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "snake_case")]
pub enum AnyUser {
    Student(Student),
    Lecturer(Lecturer),
    SystemAdmin(SystemAdmin),
}

impl AnyUser {
    /// Id of the wrapped account.
    pub fn id(&self) -> &str {
        match self {
            AnyUser::Student(s) => &s.id,
            AnyUser::Lecturer(l) => &l.id,
            AnyUser::SystemAdmin(a) => &a.id,
        }
    }

    /// Role tag of the wrapped account.
    pub fn role(&self) -> Role {
        match self {
            AnyUser::Student(_) => Role::Student,
            AnyUser::Lecturer(_) => Role::Lecturer,
            AnyUser::SystemAdmin(_) => Role::SystemAdmin,
        }
    }
}

/// A point-in-time copy of a user, embedded where entities need to remember
/// who created or backs them without holding a live reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserSnapshot {
    /// Id of the user this snapshot was taken from
    pub id: String,
    /// Name at capture time
    pub name: String,
    /// Email at capture time
    pub email: String,
    /// Role at capture time
    pub role: Role,
}

// ============================================
// Members
// ============================================

/// Guardian contact details for a minor member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Guardian {
    pub name: String,
    pub email: String,
    pub phone: String,
}

/// An attendance-subdomain participant.
///
/// Members wrap a user snapshot plus the fields only the attendance domain
/// cares about (department, minority flag, guardian contact, attendance
/// history).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    /// Unique identifier
    pub id: String,
    /// Department this member belongs to
    pub department: String,
    /// The user this member represents (capture-time copy)
    pub user: UserSnapshot,
    /// Whether the member is a minor
    pub minor: bool,
    /// Guardian contact; only meaningful when `minor` is set
    pub guardian: Option<Guardian>,
    /// Attendance records captured for this member, in capture order
    #[serde(default)]
    pub attendance: Vec<Attendance>,
}

impl Member {
    /// Whether the guardian fields respect the minority flag.
    ///
    /// Guardian contact may only be present on minors. The store does not
    /// enforce this at creation; editing collaborators are expected to
    /// check before committing a change.
    pub fn guardian_consistent(&self) -> bool {
        self.minor || self.guardian.is_none()
    }
}

// ============================================
// Courses
// ============================================

/// A taught unit owned by a lecturer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    /// Unique identifier
    pub id: String,
    /// Short course code (e.g., "CS101")
    pub code: String,
    /// Full course name
    pub name: String,
    /// Owning department
    pub department: String,
    /// Id of the owning lecturer
    pub lecturer_id: String,
    /// Denormalized lecturer name, captured when the course was created
    pub lecturer_name: String,
    /// Student ids enrolled in this course (duplicate-free)
    #[serde(default)]
    pub enrolled_students: Vec<String>,
    /// Total number of sessions planned for this course
    pub total_sessions: u32,
    /// When this course was created
    pub created_at: DateTime<Utc>,
}

// ============================================
// Sessions
// ============================================

/// Whether a session records arrivals or departures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionKind {
    CheckIn,
    CheckOut,
}

impl SessionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionKind::CheckIn => "check_in",
            SessionKind::CheckOut => "check_out",
        }
    }
}

impl std::str::FromStr for SessionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "check_in" => Ok(SessionKind::CheckIn),
            "check_out" => Ok(SessionKind::CheckOut),
            _ => Err(format!("unknown session kind: {}", s)),
        }
    }
}

/// Lifecycle state of a session.
///
/// Transitions are explicit and checked against [`SessionStatus::can_transition`]:
///
/// ```text
/// Scheduled ──► Active ──► Completed
///     │            │           │
///     └────────────┴───────────┴──► Closed (terminal)
/// ```
///
/// Nothing is ever inferred from the clock; only explicit store calls move
/// a session between states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    /// Planned but not yet running
    Scheduled,
    /// Currently accepting attendance
    Active,
    /// Ran to its scheduled end
    Completed,
    /// Terminal state; set only by an explicit close
    Closed,
}

impl SessionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionStatus::Scheduled => "scheduled",
            SessionStatus::Active => "active",
            SessionStatus::Completed => "completed",
            SessionStatus::Closed => "closed",
        }
    }

    /// Whether moving from `self` to `next` is a legal transition.
    pub fn can_transition(self, next: SessionStatus) -> bool {
        use SessionStatus::*;
        matches!(
            (self, next),
            (Scheduled, Active)
                | (Scheduled, Closed)
                | (Active, Completed)
                | (Active, Closed)
                | (Completed, Closed)
        )
    }

    /// Terminal states admit no further transitions.
    pub fn is_terminal(self) -> bool {
        self == SessionStatus::Closed
    }
}

impl std::str::FromStr for SessionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "scheduled" => Ok(SessionStatus::Scheduled),
            "active" => Ok(SessionStatus::Active),
            "completed" => Ok(SessionStatus::Completed),
            "closed" => Ok(SessionStatus::Closed),
            _ => Err(format!("unknown session status: {}", s)),
        }
    }
}

/// A check-in/check-out event that attendance records belong to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Unique identifier
    pub id: String,
    /// Whether this session records arrivals or departures
    pub kind: SessionKind,
    /// Display name (e.g., "Monday Lecture")
    pub name: String,
    /// Owning department
    pub department: String,
    /// Where the session takes place
    pub location: String,
    /// Declared start time
    pub starts_at: DateTime<Utc>,
    /// Declared end time
    pub ends_at: DateTime<Utc>,
    /// How many attendees were expected
    pub expected_attendees: u32,
    /// How many attendees actually showed up (maintained by the store)
    pub actual_attendees: u32,
    /// Lifecycle state
    pub status: SessionStatus,
    /// Who created the session (capture-time copy)
    pub created_by: UserSnapshot,
    /// Attendance records captured for this session, in capture order
    #[serde(default)]
    pub attendance: Vec<Attendance>,
    /// When this session was created
    pub created_at: DateTime<Utc>,
}

/// The slice of a session an attendance record carries with it, so the
/// reporting engine can gate early arrivals without a store lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    /// Id of the session this snapshot was taken from
    pub id: String,
    /// Session name at capture time
    pub name: String,
    /// Declared start time at capture time
    pub starts_at: DateTime<Utc>,
}

// ============================================
// Attendance
// ============================================

/// Presence status of one attendance record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceStatus {
    Present,
    Absent,
    Late,
}

impl AttendanceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AttendanceStatus::Present => "present",
            AttendanceStatus::Absent => "absent",
            AttendanceStatus::Late => "late",
        }
    }
}

impl std::str::FromStr for AttendanceStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "present" => Ok(AttendanceStatus::Present),
            "absent" => Ok(AttendanceStatus::Absent),
            "late" => Ok(AttendanceStatus::Late),
            _ => Err(format!("unknown attendance status: {}", s)),
        }
    }
}

/// One member's presence record for one session.
///
/// `date` is kept as the raw string the capture device supplied; the
/// reporting engine parses it lazily and routes unparseable values into an
/// explicit Unknown bucket instead of dropping the record. `session` and
/// `members` may be missing on partial captures; consumers treat their
/// absence as unknown rather than failing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attendance {
    /// Unique identifier
    pub id: String,
    /// Id of the member this record belongs to
    pub member_id: String,
    /// Id of the session this record belongs to
    pub session_id: String,
    /// Capture-time copy of the owning session, if the capture was complete
    pub session: Option<SessionSnapshot>,
    /// Member ids of the roster attached at capture time, if any
    pub members: Option<Vec<String>>,
    /// Calendar date of the record as supplied (may not parse)
    pub date: String,
    /// When the member arrived
    pub arrived_at: DateTime<Utc>,
    /// When the member left, if recorded
    pub departed_at: Option<DateTime<Utc>>,
    /// Presence status
    pub status: AttendanceStatus,
}
