//! Error types for rollcall-core

use thiserror::Error;

/// Main error type for the rollcall-core library
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error (snapshot import/export)
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Student not found
    #[error("student not found: {0}")]
    StudentNotFound(String),

    /// Course not found
    #[error("course not found: {0}")]
    CourseNotFound(String),

    /// Member not found
    #[error("member not found: {0}")]
    MemberNotFound(String),

    /// Session not found
    #[error("session not found: {0}")]
    SessionNotFound(String),
}

/// Result type alias for rollcall-core
pub type Result<T> = std::result::Result<T, Error>;
