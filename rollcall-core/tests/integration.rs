//! Integration tests for the rollcall store and reporting pipeline
//!
//! These drive the public API end to end: seed a store, mutate it through
//! the operations a UI collaborator would call, and read derived views
//! back through the facade and the reporting engine.

use chrono::{Duration, TimeZone, Utc};
use rollcall_core::report;
use rollcall_core::store::{
    NewAttendance, NewCourse, NewLecturer, NewMember, NewSession, NewStudent, Store,
};
use rollcall_core::types::{
    AttendanceStatus, Role, SessionKind, SessionStatus, UserSnapshot,
};

fn creator() -> UserSnapshot {
    UserSnapshot {
        id: "creator-1".to_string(),
        name: "Dana Admin".to_string(),
        email: "dana@example.edu".to_string(),
        role: Role::SystemAdmin,
    }
}

#[test]
fn test_enroll_query_unenroll_scenario() {
    let mut store = Store::new();

    let lecturer = store.add_lecturer(NewLecturer {
        name: "Grace".to_string(),
        email: "grace@example.edu".to_string(),
        profile_picture: None,
        department: "Science".to_string(),
    });
    let student = store.add_student(NewStudent {
        name: "Ada".to_string(),
        email: "ada@example.edu".to_string(),
        profile_picture: None,
    });
    let course = store.add_course(NewCourse {
        code: "CS101".to_string(),
        name: "Intro to Computing".to_string(),
        department: "Science".to_string(),
        lecturer_id: lecturer.id.clone(),
        lecturer_name: lecturer.name.clone(),
        total_sessions: 12,
    });

    // Before enrollment, both derived views are empty of this pairing.
    assert!(store.courses_by_student(&student.id).is_empty());

    store.enroll_student(&student.id, &course.id).unwrap();

    let by_student = store.courses_by_student(&student.id);
    assert_eq!(by_student.len(), 1);
    assert_eq!(by_student[0].id, course.id);

    let by_lecturer = store.courses_by_lecturer(&lecturer.id);
    assert!(by_lecturer.iter().any(|c| c.id == course.id));

    store.unenroll_student(&student.id, &course.id).unwrap();

    assert!(store.courses_by_student(&student.id).is_empty());
    assert!(store
        .courses_by_lecturer(&lecturer.id)
        .iter()
        .all(|c| c.enrolled_students.is_empty()));
    assert_eq!(store.course_by_id(&course.id).map(|c| &c.id), Some(&course.id));
}

#[test]
fn test_capture_to_chart_pipeline() {
    let mut store = Store::new();

    let member = store.add_member(NewMember {
        department: "Science".to_string(),
        user: creator(),
        minor: false,
        guardian: None,
    });
    // 2025-11-16 is a Sunday.
    let starts_at = Utc.with_ymd_and_hms(2025, 11, 16, 9, 0, 0).unwrap();
    let session = store.add_session(NewSession {
        kind: SessionKind::CheckIn,
        name: "Morning Lecture".to_string(),
        department: "Science".to_string(),
        location: "Hall B".to_string(),
        starts_at,
        ends_at: starts_at + Duration::hours(2),
        expected_attendees: 30,
        status: SessionStatus::Active,
        created_by: creator(),
    });

    let roster = Some(vec![member.id.clone()]);
    store
        .add_attendance(NewAttendance {
            member_id: member.id.clone(),
            session_id: session.id.clone(),
            members: roster.clone(),
            date: "2025-11-16".to_string(),
            arrived_at: starts_at - Duration::minutes(10),
            departed_at: None,
            status: AttendanceStatus::Present,
        })
        .unwrap();
    store
        .add_attendance(NewAttendance {
            member_id: member.id.clone(),
            session_id: session.id.clone(),
            members: roster.clone(),
            date: "2025-11-16".to_string(),
            arrived_at: starts_at + Duration::minutes(12),
            departed_at: None,
            status: AttendanceStatus::Late,
        })
        .unwrap();
    store
        .add_attendance(NewAttendance {
            member_id: member.id.clone(),
            session_id: session.id.clone(),
            members: None,
            date: "sometime".to_string(),
            arrived_at: starts_at,
            departed_at: None,
            status: AttendanceStatus::Absent,
        })
        .unwrap();

    let buckets = report::group_by_day(store.attendance());
    assert_eq!(buckets[&report::DayBucket::Sun].present, 1);
    assert_eq!(buckets[&report::DayBucket::Sun].late, 1);
    assert_eq!(buckets[&report::DayBucket::Sun].expected, Some(1));
    assert_eq!(buckets[&report::DayBucket::Unknown].absent, 1);

    let series = report::to_chart_series(&buckets);
    assert_eq!(series.len(), 7);
    assert_eq!(series[0].day, report::DayBucket::Sun);
    assert_eq!(series[0].present, 1);

    let early = report::earliest_arrivals(store.attendance(), report::DEFAULT_EARLY_LIMIT);
    assert_eq!(early.len(), 1);
    assert_eq!(early[0].session_id, session.id);
    assert!(early[0].arrived_at < starts_at);

    let summary = report::summarize(store.attendance());
    assert_eq!(summary.total, 3);
    assert_eq!(summary.busiest_day, Some(report::DayBucket::Sun));
}

#[test]
fn test_snapshot_survives_process_edge() {
    let mut store = Store::new();
    let student = store.add_student(NewStudent {
        name: "Ada".to_string(),
        email: "ada@example.edu".to_string(),
        profile_picture: Some("ada.png".to_string()),
    });
    let course = store.add_course(NewCourse {
        code: "CS101".to_string(),
        name: "Intro to Computing".to_string(),
        department: "Science".to_string(),
        lecturer_id: "lec-1".to_string(),
        lecturer_name: "Grace".to_string(),
        total_sessions: 12,
    });
    store.enroll_student(&student.id, &course.id).unwrap();

    // Hand the snapshot across a file boundary and back.
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("snapshot.json");
    std::fs::write(&path, store.to_json_string().unwrap()).unwrap();

    let raw = std::fs::read_to_string(&path).unwrap();
    let restored = Store::from_json_str(&raw).unwrap();

    assert_eq!(restored.students(), store.students());
    assert_eq!(restored.courses(), store.courses());
    let courses = restored.courses_by_student(&student.id);
    assert_eq!(courses.len(), 1);
    assert_eq!(courses[0].id, course.id);
}
