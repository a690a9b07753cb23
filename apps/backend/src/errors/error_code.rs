//! Error codes for the backend API.
//!
//! This module defines all error codes used throughout the application.
//! Add new codes here; never pass ad-hoc strings as error codes.
//!
//! All error codes are SCREAMING_SNAKE_CASE and map 1:1 to the strings
//! that appear in HTTP responses.

use core::fmt;

/// Centralized error codes for the backend API.
///
/// Each variant maps to a canonical SCREAMING_SNAKE_CASE string that appears
/// in HTTP responses. Keeping the set closed lets the compiler catch
/// unhandled codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Authentication & Authorization
    /// Authentication required
    Unauthorized,
    /// Access denied
    Forbidden,
    /// User lacks the role required for this operation
    InsufficientRole,

    // Request Validation
    /// General validation error
    ValidationError,
    /// General bad request error
    BadRequest,

    // Resource Not Found
    /// Course not found
    CourseNotFound,
    /// Assignment not found
    AssignmentNotFound,
    /// Submission not found
    SubmissionNotFound,
    /// Enrollment not found
    EnrollmentNotFound,
    /// Profile not found
    ProfileNotFound,
    /// General not found error
    NotFound,

    // Business Logic Conflicts
    /// Learner is already enrolled in the course
    AlreadyEnrolled,
    /// Learner has already submitted for the assignment
    AlreadySubmitted,
    /// Generic conflict (fallback for unmatched conflicts)
    Conflict,

    // System Errors
    /// Upstream database request could not be sent or completed
    FetchError,
    /// Upstream database answered with an unexpected status
    DbError,
    /// Configuration error
    ConfigError,
    /// Internal server error
    Internal,
}

impl ErrorCode {
    /// Returns the canonical SCREAMING_SNAKE_CASE string for this error code.
    ///
    /// This is the exact string that appears in HTTP responses.
    pub const fn as_str(&self) -> &'static str {
        match self {
            // Authentication & Authorization
            Self::Unauthorized => "UNAUTHORIZED",
            Self::Forbidden => "FORBIDDEN",
            Self::InsufficientRole => "INSUFFICIENT_ROLE",

            // Request Validation
            Self::ValidationError => "VALIDATION_ERROR",
            Self::BadRequest => "BAD_REQUEST",

            // Resource Not Found
            Self::CourseNotFound => "COURSE_NOT_FOUND",
            Self::AssignmentNotFound => "ASSIGNMENT_NOT_FOUND",
            Self::SubmissionNotFound => "SUBMISSION_NOT_FOUND",
            Self::EnrollmentNotFound => "ENROLLMENT_NOT_FOUND",
            Self::ProfileNotFound => "PROFILE_NOT_FOUND",
            Self::NotFound => "NOT_FOUND",

            // Business Logic Conflicts
            Self::AlreadyEnrolled => "ALREADY_ENROLLED",
            Self::AlreadySubmitted => "ALREADY_SUBMITTED",
            Self::Conflict => "CONFLICT",

            // System Errors
            Self::FetchError => "FETCH_ERROR",
            Self::DbError => "DB_ERROR",
            Self::ConfigError => "CONFIG_ERROR",
            Self::Internal => "INTERNAL",
        }
    }

    /// All codes in the registry, for registry-wide tests.
    pub const ALL: &'static [ErrorCode] = &[
        Self::Unauthorized,
        Self::Forbidden,
        Self::InsufficientRole,
        Self::ValidationError,
        Self::BadRequest,
        Self::CourseNotFound,
        Self::AssignmentNotFound,
        Self::SubmissionNotFound,
        Self::EnrollmentNotFound,
        Self::ProfileNotFound,
        Self::NotFound,
        Self::AlreadyEnrolled,
        Self::AlreadySubmitted,
        Self::Conflict,
        Self::FetchError,
        Self::DbError,
        Self::ConfigError,
        Self::Internal,
    ];
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_strings() {
        assert_eq!(ErrorCode::Unauthorized.as_str(), "UNAUTHORIZED");
        assert_eq!(ErrorCode::Forbidden.as_str(), "FORBIDDEN");
        assert_eq!(ErrorCode::InsufficientRole.as_str(), "INSUFFICIENT_ROLE");
        assert_eq!(ErrorCode::ValidationError.as_str(), "VALIDATION_ERROR");
        assert_eq!(ErrorCode::BadRequest.as_str(), "BAD_REQUEST");
        assert_eq!(ErrorCode::CourseNotFound.as_str(), "COURSE_NOT_FOUND");
        assert_eq!(
            ErrorCode::AssignmentNotFound.as_str(),
            "ASSIGNMENT_NOT_FOUND"
        );
        assert_eq!(
            ErrorCode::SubmissionNotFound.as_str(),
            "SUBMISSION_NOT_FOUND"
        );
        assert_eq!(
            ErrorCode::EnrollmentNotFound.as_str(),
            "ENROLLMENT_NOT_FOUND"
        );
        assert_eq!(ErrorCode::ProfileNotFound.as_str(), "PROFILE_NOT_FOUND");
        assert_eq!(ErrorCode::NotFound.as_str(), "NOT_FOUND");
        assert_eq!(ErrorCode::AlreadyEnrolled.as_str(), "ALREADY_ENROLLED");
        assert_eq!(ErrorCode::AlreadySubmitted.as_str(), "ALREADY_SUBMITTED");
        assert_eq!(ErrorCode::Conflict.as_str(), "CONFLICT");
        assert_eq!(ErrorCode::FetchError.as_str(), "FETCH_ERROR");
        assert_eq!(ErrorCode::DbError.as_str(), "DB_ERROR");
        assert_eq!(ErrorCode::ConfigError.as_str(), "CONFIG_ERROR");
        assert_eq!(ErrorCode::Internal.as_str(), "INTERNAL");
    }

    #[test]
    fn test_display_matches_as_str() {
        for code in ErrorCode::ALL {
            assert_eq!(code.to_string(), code.as_str());
        }
    }
}
