//! Entity store
//!
//! [`Store`] owns the authoritative in-memory collections for every entity
//! type and is the only component allowed to mutate them. Readers get
//! slices; writers go through the operations below, which keep the
//! cross-entity invariants intact:
//!
//! - enrollment stays symmetric between students and courses
//! - attendance records only reference members and sessions that exist at
//!   creation time
//! - removing a student or course strips its id from the other side's
//!   membership lists
//! - session status only moves along the declared transition table
//!
//! Update and remove are tolerant: an unknown id is a logged no-op, never
//! an error. Callers that need existence confirmation look the entity up
//! first. Enroll/unenroll are the exception; they validate both ids before
//! touching either collection, so a half-applied enrollment cannot occur.
//!
//! The store does not persist anything. [`Store::from_json_str`] and
//! [`Store::to_json_string`] exist so boundary collaborators can hand a
//! whole snapshot across a process edge, with each collection serialized
//! as an independent table of records.

mod queries;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::ids;
use crate::types::{
    AnyUser, Attendance, AttendanceStatus, Course, Guardian, Lecturer, Member, Session,
    SessionKind, SessionSnapshot, SessionStatus, Student, SystemAdmin, UserSnapshot,
};

// ============================================
// Drafts (create payloads)
// ============================================

/// Draft payload for a new student: the entity minus generated fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewStudent {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub profile_picture: Option<String>,
}

/// Draft payload for a new lecturer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewLecturer {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub profile_picture: Option<String>,
    pub department: String,
}

/// Draft payload for a new system administrator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewAdmin {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub profile_picture: Option<String>,
}

/// Draft payload for a new member.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewMember {
    pub department: String,
    pub user: UserSnapshot,
    #[serde(default)]
    pub minor: bool,
    #[serde(default)]
    pub guardian: Option<Guardian>,
}

/// Draft payload for a new course.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewCourse {
    pub code: String,
    pub name: String,
    pub department: String,
    pub lecturer_id: String,
    pub lecturer_name: String,
    pub total_sessions: u32,
}

/// Draft payload for a new session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewSession {
    pub kind: SessionKind,
    pub name: String,
    pub department: String,
    pub location: String,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub expected_attendees: u32,
    pub status: SessionStatus,
    pub created_by: UserSnapshot,
}

/// Draft payload for a new attendance record.
///
/// The session snapshot is not part of the draft; the store captures it
/// from the referenced session when the record is created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewAttendance {
    pub member_id: String,
    pub session_id: String,
    #[serde(default)]
    pub members: Option<Vec<String>>,
    pub date: String,
    pub arrived_at: DateTime<Utc>,
    #[serde(default)]
    pub departed_at: Option<DateTime<Utc>>,
    pub status: AttendanceStatus,
}

// ============================================
// Patches (partial updates)
// ============================================

/// Partial update for a student. Only supplied fields change.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StudentPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub profile_picture: Option<String>,
}

/// Partial update for a lecturer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LecturerPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub profile_picture: Option<String>,
    pub department: Option<String>,
}

/// Partial update for a system administrator.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AdminPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub profile_picture: Option<String>,
}

/// Partial update for a member.
///
/// `guardian` is doubly optional: outer `None` leaves the field untouched,
/// `Some(None)` clears it (the editing collaborator does this when a
/// member stops being a minor).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemberPatch {
    pub department: Option<String>,
    pub minor: Option<bool>,
    pub guardian: Option<Option<Guardian>>,
}

/// Partial update for a course.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CoursePatch {
    pub code: Option<String>,
    pub name: Option<String>,
    pub department: Option<String>,
    pub lecturer_id: Option<String>,
    pub lecturer_name: Option<String>,
    pub total_sessions: Option<u32>,
}

/// Partial update for a session.
///
/// Status is deliberately absent: lifecycle changes go through
/// [`Store::transition_session`] or [`Store::close_session`] so the
/// transition table cannot be bypassed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionPatch {
    pub kind: Option<SessionKind>,
    pub name: Option<String>,
    pub department: Option<String>,
    pub location: Option<String>,
    pub starts_at: Option<DateTime<Utc>>,
    pub ends_at: Option<DateTime<Utc>>,
    pub expected_attendees: Option<u32>,
}

/// Partial update for an attendance record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AttendancePatch {
    pub date: Option<String>,
    pub arrived_at: Option<DateTime<Utc>>,
    pub departed_at: Option<DateTime<Utc>>,
    pub status: Option<AttendanceStatus>,
    pub members: Option<Vec<String>>,
}

// ============================================
// Store
// ============================================

/// The single authoritative in-memory snapshot of all entities.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Store {
    students: Vec<Student>,
    lecturers: Vec<Lecturer>,
    admins: Vec<SystemAdmin>,
    members: Vec<Member>,
    courses: Vec<Course>,
    sessions: Vec<Session>,
    attendance: Vec<Attendance>,
}

impl Store {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    // --- read access -------------------------------------------------

    pub fn students(&self) -> &[Student] {
        &self.students
    }

    pub fn lecturers(&self) -> &[Lecturer] {
        &self.lecturers
    }

    pub fn admins(&self) -> &[SystemAdmin] {
        &self.admins
    }

    pub fn members(&self) -> &[Member] {
        &self.members
    }

    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    pub fn sessions(&self) -> &[Session] {
        &self.sessions
    }

    pub fn attendance(&self) -> &[Attendance] {
        &self.attendance
    }

    /// All user accounts with their role tags preserved: students, then
    /// lecturers, then admins, each in store order. Ids are disjoint across
    /// the three collections by construction, so no deduplication happens.
    pub fn all_users(&self) -> Vec<AnyUser> {
        self.students
            .iter()
            .cloned()
            .map(AnyUser::Student)
            .chain(self.lecturers.iter().cloned().map(AnyUser::Lecturer))
            .chain(self.admins.iter().cloned().map(AnyUser::SystemAdmin))
            .collect()
    }

    // --- create ------------------------------------------------------

    pub fn add_student(&mut self, draft: NewStudent) -> Student {
        let student = Student {
            id: ids::new_id(),
            name: draft.name,
            email: draft.email,
            profile_picture: draft.profile_picture,
            enrolled_courses: Vec::new(),
            created_at: Utc::now(),
        };
        self.students.push(student.clone());
        student
    }

    pub fn add_lecturer(&mut self, draft: NewLecturer) -> Lecturer {
        let lecturer = Lecturer {
            id: ids::new_id(),
            name: draft.name,
            email: draft.email,
            profile_picture: draft.profile_picture,
            department: draft.department,
            created_at: Utc::now(),
        };
        self.lecturers.push(lecturer.clone());
        lecturer
    }

    pub fn add_admin(&mut self, draft: NewAdmin) -> SystemAdmin {
        let admin = SystemAdmin {
            id: ids::new_id(),
            name: draft.name,
            email: draft.email,
            profile_picture: draft.profile_picture,
            created_at: Utc::now(),
        };
        self.admins.push(admin.clone());
        admin
    }

    pub fn add_member(&mut self, draft: NewMember) -> Member {
        let member = Member {
            id: ids::new_id(),
            department: draft.department,
            user: draft.user,
            minor: draft.minor,
            guardian: draft.guardian,
            attendance: Vec::new(),
        };
        self.members.push(member.clone());
        member
    }

    pub fn add_course(&mut self, draft: NewCourse) -> Course {
        let course = Course {
            id: ids::new_id(),
            code: draft.code,
            name: draft.name,
            department: draft.department,
            lecturer_id: draft.lecturer_id,
            lecturer_name: draft.lecturer_name,
            enrolled_students: Vec::new(),
            total_sessions: draft.total_sessions,
            created_at: Utc::now(),
        };
        self.courses.push(course.clone());
        course
    }

    pub fn add_session(&mut self, draft: NewSession) -> Session {
        let session = Session {
            id: ids::new_id(),
            kind: draft.kind,
            name: draft.name,
            department: draft.department,
            location: draft.location,
            starts_at: draft.starts_at,
            ends_at: draft.ends_at,
            expected_attendees: draft.expected_attendees,
            actual_attendees: 0,
            status: draft.status,
            created_by: draft.created_by,
            attendance: Vec::new(),
            created_at: Utc::now(),
        };
        self.sessions.push(session.clone());
        session
    }

    /// Create an attendance record.
    ///
    /// Both references must resolve; otherwise nothing is stored and the
    /// missing side is reported. The stored record carries a snapshot of
    /// the owning session and is mirrored into the member's and session's
    /// capture-order sequences.
    pub fn add_attendance(&mut self, draft: NewAttendance) -> Result<Attendance> {
        if !self.members.iter().any(|m| m.id == draft.member_id) {
            return Err(Error::MemberNotFound(draft.member_id));
        }
        let Some(session) = self.sessions.iter().find(|s| s.id == draft.session_id) else {
            return Err(Error::SessionNotFound(draft.session_id));
        };

        let record = Attendance {
            id: ids::new_id(),
            member_id: draft.member_id,
            session_id: draft.session_id,
            session: Some(SessionSnapshot {
                id: session.id.clone(),
                name: session.name.clone(),
                starts_at: session.starts_at,
            }),
            members: draft.members,
            date: draft.date,
            arrived_at: draft.arrived_at,
            departed_at: draft.departed_at,
            status: draft.status,
        };
        self.attendance.push(record.clone());

        if let Some(member) = self.members.iter_mut().find(|m| m.id == record.member_id) {
            member.attendance.push(record.clone());
        }
        if let Some(session) = self.sessions.iter_mut().find(|s| s.id == record.session_id) {
            session.attendance.push(record.clone());
            session.actual_attendees = session
                .attendance
                .iter()
                .filter(|a| a.status != AttendanceStatus::Absent)
                .count() as u32;
        }

        Ok(record)
    }

    // --- update ------------------------------------------------------

    pub fn update_student(&mut self, id: &str, patch: StudentPatch) {
        let Some(student) = self.students.iter_mut().find(|s| s.id == id) else {
            tracing::debug!(id, "update_student: no matching student");
            return;
        };
        if let Some(name) = patch.name {
            student.name = name;
        }
        if let Some(email) = patch.email {
            student.email = email;
        }
        if let Some(picture) = patch.profile_picture {
            student.profile_picture = Some(picture);
        }
    }

    pub fn update_lecturer(&mut self, id: &str, patch: LecturerPatch) {
        let Some(lecturer) = self.lecturers.iter_mut().find(|l| l.id == id) else {
            tracing::debug!(id, "update_lecturer: no matching lecturer");
            return;
        };
        if let Some(name) = patch.name {
            lecturer.name = name;
        }
        if let Some(email) = patch.email {
            lecturer.email = email;
        }
        if let Some(picture) = patch.profile_picture {
            lecturer.profile_picture = Some(picture);
        }
        if let Some(department) = patch.department {
            lecturer.department = department;
        }
    }

    pub fn update_admin(&mut self, id: &str, patch: AdminPatch) {
        let Some(admin) = self.admins.iter_mut().find(|a| a.id == id) else {
            tracing::debug!(id, "update_admin: no matching admin");
            return;
        };
        if let Some(name) = patch.name {
            admin.name = name;
        }
        if let Some(email) = patch.email {
            admin.email = email;
        }
        if let Some(picture) = patch.profile_picture {
            admin.profile_picture = Some(picture);
        }
    }

    pub fn update_member(&mut self, id: &str, patch: MemberPatch) {
        let Some(member) = self.members.iter_mut().find(|m| m.id == id) else {
            tracing::debug!(id, "update_member: no matching member");
            return;
        };
        if let Some(department) = patch.department {
            member.department = department;
        }
        if let Some(minor) = patch.minor {
            member.minor = minor;
        }
        if let Some(guardian) = patch.guardian {
            member.guardian = guardian;
        }
    }

    pub fn update_course(&mut self, id: &str, patch: CoursePatch) {
        let Some(course) = self.courses.iter_mut().find(|c| c.id == id) else {
            tracing::debug!(id, "update_course: no matching course");
            return;
        };
        if let Some(code) = patch.code {
            course.code = code;
        }
        if let Some(name) = patch.name {
            course.name = name;
        }
        if let Some(department) = patch.department {
            course.department = department;
        }
        if let Some(lecturer_id) = patch.lecturer_id {
            course.lecturer_id = lecturer_id;
        }
        if let Some(lecturer_name) = patch.lecturer_name {
            course.lecturer_name = lecturer_name;
        }
        if let Some(total) = patch.total_sessions {
            course.total_sessions = total;
        }
    }

    pub fn update_session(&mut self, id: &str, patch: SessionPatch) {
        let Some(session) = self.sessions.iter_mut().find(|s| s.id == id) else {
            tracing::debug!(id, "update_session: no matching session");
            return;
        };
        if let Some(kind) = patch.kind {
            session.kind = kind;
        }
        if let Some(name) = patch.name {
            session.name = name;
        }
        if let Some(department) = patch.department {
            session.department = department;
        }
        if let Some(location) = patch.location {
            session.location = location;
        }
        if let Some(starts_at) = patch.starts_at {
            session.starts_at = starts_at;
        }
        if let Some(ends_at) = patch.ends_at {
            session.ends_at = ends_at;
        }
        if let Some(expected) = patch.expected_attendees {
            session.expected_attendees = expected;
        }
    }

    pub fn update_attendance(&mut self, id: &str, patch: AttendancePatch) {
        let Some(record) = self.attendance.iter_mut().find(|a| a.id == id) else {
            tracing::debug!(id, "update_attendance: no matching record");
            return;
        };
        if let Some(date) = patch.date {
            record.date = date;
        }
        if let Some(arrived_at) = patch.arrived_at {
            record.arrived_at = arrived_at;
        }
        if let Some(departed_at) = patch.departed_at {
            record.departed_at = Some(departed_at);
        }
        if let Some(status) = patch.status {
            record.status = status;
        }
        if let Some(members) = patch.members {
            record.members = Some(members);
        }
    }

    // --- session lifecycle -------------------------------------------

    /// Move a session to `next` if the transition table allows it.
    ///
    /// Illegal transitions and unknown ids are logged no-ops.
    pub fn transition_session(&mut self, id: &str, next: SessionStatus) {
        let Some(session) = self.sessions.iter_mut().find(|s| s.id == id) else {
            tracing::debug!(id, "transition_session: no matching session");
            return;
        };
        if !session.status.can_transition(next) {
            tracing::debug!(
                id,
                from = session.status.as_str(),
                to = next.as_str(),
                "transition_session: rejected transition"
            );
            return;
        }
        session.status = next;
    }

    /// Close a session. Legal from every non-terminal state; closing an
    /// already-closed session is a no-op.
    pub fn close_session(&mut self, id: &str) {
        self.transition_session(id, SessionStatus::Closed);
    }

    // --- remove ------------------------------------------------------

    /// Remove a student and strip its id from every course roster.
    /// Idempotent; dependent attendance records are left alone.
    pub fn remove_student(&mut self, id: &str) {
        let before = self.students.len();
        self.students.retain(|s| s.id != id);
        if self.students.len() == before {
            tracing::debug!(id, "remove_student: no matching student");
        }
        for course in &mut self.courses {
            course.enrolled_students.retain(|s| s != id);
        }
    }

    pub fn remove_lecturer(&mut self, id: &str) {
        let before = self.lecturers.len();
        self.lecturers.retain(|l| l.id != id);
        if self.lecturers.len() == before {
            tracing::debug!(id, "remove_lecturer: no matching lecturer");
        }
    }

    pub fn remove_admin(&mut self, id: &str) {
        let before = self.admins.len();
        self.admins.retain(|a| a.id != id);
        if self.admins.len() == before {
            tracing::debug!(id, "remove_admin: no matching admin");
        }
    }

    pub fn remove_member(&mut self, id: &str) {
        let before = self.members.len();
        self.members.retain(|m| m.id != id);
        if self.members.len() == before {
            tracing::debug!(id, "remove_member: no matching member");
        }
    }

    /// Remove a course and strip its id from every student's enrollment
    /// list. Idempotent.
    pub fn remove_course(&mut self, id: &str) {
        let before = self.courses.len();
        self.courses.retain(|c| c.id != id);
        if self.courses.len() == before {
            tracing::debug!(id, "remove_course: no matching course");
        }
        for student in &mut self.students {
            student.enrolled_courses.retain(|c| c != id);
        }
    }

    /// Remove a session. Dependent attendance records stay in the flat
    /// collection; cleaning those up is a caller decision.
    pub fn remove_session(&mut self, id: &str) {
        let before = self.sessions.len();
        self.sessions.retain(|s| s.id != id);
        if self.sessions.len() == before {
            tracing::debug!(id, "remove_session: no matching session");
        }
    }

    pub fn remove_attendance(&mut self, id: &str) {
        let before = self.attendance.len();
        self.attendance.retain(|a| a.id != id);
        if self.attendance.len() == before {
            tracing::debug!(id, "remove_attendance: no matching record");
        }
    }

    // --- enrollment --------------------------------------------------

    /// Enroll a student in a course, updating both sides of the relation.
    ///
    /// Both ids are validated before either collection is touched, so the
    /// relation cannot end up half-applied. Each side is guarded by a
    /// duplicate check, which makes repeated enrollment a no-op.
    pub fn enroll_student(&mut self, student_id: &str, course_id: &str) -> Result<()> {
        let student_idx = self
            .students
            .iter()
            .position(|s| s.id == student_id)
            .ok_or_else(|| Error::StudentNotFound(student_id.to_string()))?;
        let course_idx = self
            .courses
            .iter()
            .position(|c| c.id == course_id)
            .ok_or_else(|| Error::CourseNotFound(course_id.to_string()))?;

        let student = &mut self.students[student_idx];
        if !student.enrolled_courses.iter().any(|c| c == course_id) {
            student.enrolled_courses.push(course_id.to_string());
        }
        let course = &mut self.courses[course_idx];
        if !course.enrolled_students.iter().any(|s| s == student_id) {
            course.enrolled_students.push(student_id.to_string());
        }
        Ok(())
    }

    /// Withdraw a student from a course, updating both sides of the
    /// relation. Absent entries are no-ops per side.
    pub fn unenroll_student(&mut self, student_id: &str, course_id: &str) -> Result<()> {
        let student_idx = self
            .students
            .iter()
            .position(|s| s.id == student_id)
            .ok_or_else(|| Error::StudentNotFound(student_id.to_string()))?;
        let course_idx = self
            .courses
            .iter()
            .position(|c| c.id == course_id)
            .ok_or_else(|| Error::CourseNotFound(course_id.to_string()))?;

        self.students[student_idx]
            .enrolled_courses
            .retain(|c| c != course_id);
        self.courses[course_idx]
            .enrolled_students
            .retain(|s| s != student_id);
        Ok(())
    }

    // --- snapshot exchange -------------------------------------------

    /// Deserialize a whole-store snapshot from JSON. Absent collections
    /// default to empty, so partial snapshots load cleanly.
    pub fn from_json_str(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Serialize the whole store as pretty-printed JSON, one table per
    /// collection.
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
