//! Read-only derived lookups over the store snapshot.
//!
//! Every call recomputes against current state; nothing is cached. None of
//! these mutate, and none of them fail: an absent course is an explicit
//! `None`, never a panic.

use super::Store;
use crate::types::Course;

impl Store {
    /// Courses owned by the given lecturer.
    pub fn courses_by_lecturer(&self, lecturer_id: &str) -> Vec<&Course> {
        self.courses()
            .iter()
            .filter(|c| c.lecturer_id == lecturer_id)
            .collect()
    }

    /// Courses the given student is enrolled in.
    pub fn courses_by_student(&self, student_id: &str) -> Vec<&Course> {
        self.courses()
            .iter()
            .filter(|c| c.enrolled_students.iter().any(|s| s == student_id))
            .collect()
    }

    /// The course with the given id, if it exists.
    pub fn course_by_id(&self, course_id: &str) -> Option<&Course> {
        self.courses().iter().find(|c| c.id == course_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{NewCourse, NewStudent};

    fn course_draft(code: &str, lecturer_id: &str) -> NewCourse {
        NewCourse {
            code: code.to_string(),
            name: format!("{} lecture", code),
            department: "Science".to_string(),
            lecturer_id: lecturer_id.to_string(),
            lecturer_name: "Grace".to_string(),
            total_sessions: 10,
        }
    }

    #[test]
    fn test_courses_by_lecturer_filters_exactly() {
        let mut store = Store::new();
        let owned = store.add_course(course_draft("CS101", "lec-1"));
        store.add_course(course_draft("CS102", "lec-2"));

        let courses = store.courses_by_lecturer("lec-1");
        assert_eq!(courses.len(), 1);
        assert_eq!(courses[0].id, owned.id);
        assert!(store.courses_by_lecturer("lec-3").is_empty());
    }

    #[test]
    fn test_courses_by_student_follows_enrollment() {
        let mut store = Store::new();
        let student = store.add_student(NewStudent {
            name: "Ada".to_string(),
            email: "ada@example.edu".to_string(),
            profile_picture: None,
        });
        let course = store.add_course(course_draft("CS101", "lec-1"));
        store.add_course(course_draft("CS102", "lec-1"));

        assert!(store.courses_by_student(&student.id).is_empty());

        store.enroll_student(&student.id, &course.id).unwrap();
        let courses = store.courses_by_student(&student.id);
        assert_eq!(courses.len(), 1);
        assert_eq!(courses[0].id, course.id);
    }

    #[test]
    fn test_course_by_id_is_total() {
        let mut store = Store::new();
        let course = store.add_course(course_draft("CS101", "lec-1"));

        assert_eq!(store.course_by_id(&course.id).map(|c| &c.id), Some(&course.id));
        assert!(store.course_by_id("missing").is_none());
    }
}
