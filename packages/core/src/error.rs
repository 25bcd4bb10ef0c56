//! Error types for the CourseTree core
//!
//! The outline engine itself is infallible: flattening, ordering and navigation
//! degrade gracefully on malformed trees instead of failing. Errors only arise
//! at the edges of the crate, where course trees are fetched and decoded and
//! where viewer configuration is loaded.

use thiserror::Error;

/// Errors that can occur while loading course snapshots or configuration
#[derive(Error, Debug)]
pub enum CourseError {
    /// The content source has no course with this id
    #[error("Course '{course_id}' does not exist")]
    CourseNotFound { course_id: String },

    /// The content source failed to deliver the course tree
    ///
    /// Wraps transport-level failures reported by a [`crate::CourseSource`]
    /// implementation (network errors, non-success HTTP status, ...).
    #[error("Failed to fetch course '{course_id}': {reason}")]
    FetchFailed { course_id: String, reason: String },

    /// The course payload could not be decoded into the content tree
    #[error("Invalid course payload: {0}")]
    InvalidPayload(#[from] serde_json::Error),

    /// Viewer configuration is invalid
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// IO error while reading a configuration or course file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CourseError {
    /// Create a CourseNotFound error
    pub fn course_not_found(course_id: impl Into<String>) -> Self {
        Self::CourseNotFound {
            course_id: course_id.into(),
        }
    }

    /// Create a FetchFailed error
    pub fn fetch_failed(course_id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::FetchFailed {
            course_id: course_id.into(),
            reason: reason.into(),
        }
    }

    /// Create an InvalidConfig error
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig(message.into())
    }
}

pub type Result<T> = std::result::Result<T, CourseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_course_not_found_error() {
        let err = CourseError::course_not_found("course-1");
        assert!(matches!(err, CourseError::CourseNotFound { .. }));
        assert_eq!(format!("{}", err), "Course 'course-1' does not exist");
    }

    #[test]
    fn test_fetch_failed_error() {
        let err = CourseError::fetch_failed("course-1", "connection refused");
        assert!(matches!(err, CourseError::FetchFailed { .. }));
        assert_eq!(
            format!("{}", err),
            "Failed to fetch course 'course-1': connection refused"
        );
    }

    #[test]
    fn test_invalid_payload_from_serde() {
        let serde_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: CourseError = serde_err.into();
        assert!(matches!(err, CourseError::InvalidPayload(_)));
        assert!(format!("{}", err).starts_with("Invalid course payload:"));
    }

    #[test]
    fn test_invalid_config_error() {
        let err = CourseError::invalid_config("narrow_viewport_width must be greater than 0");
        assert_eq!(
            format!("{}", err),
            "Invalid configuration: narrow_viewport_width must be greater than 0"
        );
    }
}
