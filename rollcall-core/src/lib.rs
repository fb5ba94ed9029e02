//! # rollcall-core
//!
//! Core library for rollcall - an attendance tracking and reporting system.
//!
//! This library provides:
//! - Domain types for users, members, courses, sessions, and attendance
//! - An in-memory entity store that owns the authoritative snapshot and
//!   preserves cross-entity invariants (symmetric enrollment, validated
//!   attendance references, an explicit session lifecycle)
//! - A pure reporting engine (weekday tallies, chart series, earliest
//!   arrivals)
//! - Configuration management
//! - Logging infrastructure
//!
//! ## Architecture
//!
//! The store is the sole mutator: collaborators submit drafts and patches,
//! read slices back, and derive views on demand. Reporting never caches;
//! every view is recomputed from the current snapshot. The model is
//! single-threaded and synchronous; wrap the store in a mutex if multiple
//! writers ever appear, since enrollment touches two collections per call.
//!
//! ## Example
//!
//! ```rust
//! use rollcall_core::store::{NewCourse, NewStudent, Store};
//!
//! let mut store = Store::new();
//! let student = store.add_student(NewStudent {
//!     name: "Ada".to_string(),
//!     email: "ada@example.edu".to_string(),
//!     profile_picture: None,
//! });
//! let course = store.add_course(NewCourse {
//!     code: "CS101".to_string(),
//!     name: "Intro to Computing".to_string(),
//!     department: "Science".to_string(),
//!     lecturer_id: "lec-1".to_string(),
//!     lecturer_name: "Grace".to_string(),
//!     total_sessions: 12,
//! });
//!
//! store.enroll_student(&student.id, &course.id).expect("both ids exist");
//! assert_eq!(store.courses_by_student(&student.id).len(), 1);
//! ```

// Re-export commonly used items at the crate root
pub use config::Config;
pub use error::{Error, Result};
pub use store::Store;
pub use types::*;

// Public modules
pub mod config;
pub mod error;
pub mod ids;
pub mod logging;
pub mod report;
pub mod store;
pub mod types;
