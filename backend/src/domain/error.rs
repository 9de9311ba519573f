//! Domain-level error types.
//!
//! These errors are transport agnostic. The CLI renders them as messages;
//! any other adapter can map [`ErrorCode`] onto its own envelope.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::course::CourseId;
use super::course_validation::CourseValidationError;
use super::publication::PublicationStatus;
use super::user::{Role, UserId};

/// Stable machine-readable error code describing the failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// A course draft broke one or more rules.
    ValidationFailed,
    /// The actor does not own the course it tried to change.
    NotOwner,
    /// The course cannot accept enrolments in its current state.
    EnrollmentRejected,
    /// The requested resource does not exist or is hidden from the actor.
    NotFound,
    /// The actor's role does not permit the action.
    Forbidden,
    /// Sign-in failed.
    Unauthorized,
}

/// Marketplace operations gated by role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarketplaceAction {
    Enroll,
    CreateCourse,
    ViewEnrolledCourses,
    ViewTeacherConsole,
}

impl MarketplaceAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Enroll => "enrol in a course",
            Self::CreateCourse => "create a course",
            Self::ViewEnrolledCourses => "view enrolled courses",
            Self::ViewTeacherConsole => "open the teacher console",
        }
    }
}

impl fmt::Display for MarketplaceAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure raised by a marketplace operation.
///
/// # Examples
/// ```
/// use learnify_backend::domain::{CourseId, ErrorCode, MarketplaceError};
///
/// let err = MarketplaceError::CourseNotFound { course_id: CourseId::new(9) };
/// assert_eq!(err.code(), ErrorCode::NotFound);
/// assert_eq!(err.to_string(), "course 9 not found");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MarketplaceError {
    #[error("course draft is invalid: {}", join_errors(.errors))]
    ValidationFailed { errors: Vec<CourseValidationError> },
    #[error("user {actor} does not own course {course_id}")]
    NotOwner { course_id: CourseId, actor: UserId },
    #[error("course {course_id} is {status} and cannot accept enrolments")]
    EnrollmentRejected {
        course_id: CourseId,
        status: PublicationStatus,
    },
    #[error("course {course_id} not found")]
    CourseNotFound { course_id: CourseId },
    #[error("user {actor} is a {actual} and only a {required} may {action}")]
    RoleNotPermitted {
        action: MarketplaceAction,
        actor: UserId,
        required: Role,
        actual: Role,
    },
    #[error("no {role} account matches {email}")]
    UnknownCredentials { email: String, role: Role },
}

fn join_errors(errors: &[CourseValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl MarketplaceError {
    /// Stable machine-readable error code.
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            Self::NotOwner { .. } => ErrorCode::NotOwner,
            Self::EnrollmentRejected { .. } => ErrorCode::EnrollmentRejected,
            Self::CourseNotFound { .. } => ErrorCode::NotFound,
            Self::RoleNotPermitted { .. } => ErrorCode::Forbidden,
            Self::UnknownCredentials { .. } => ErrorCode::Unauthorized,
        }
    }

    /// Validation failures carried by this error, if any.
    pub fn validation_errors(&self) -> &[CourseValidationError] {
        match self {
            Self::ValidationFailed { errors } => errors,
            _ => &[],
        }
    }
}
