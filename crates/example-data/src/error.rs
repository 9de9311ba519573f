//! Error types for the example-data crate.
//!
//! Registry failures are reported through a single semantic enum so callers
//! can distinguish unreadable files, malformed JSON and datasets whose
//! records do not reference each other consistently.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur when parsing or querying a seed registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// The registry file could not be read.
    #[error("failed to read registry file at '{path}': {message}")]
    IoError {
        /// Path to the registry file.
        path: PathBuf,
        /// Description of the I/O error.
        message: String,
    },

    /// The registry JSON is malformed or missing required fields.
    #[error("invalid registry JSON: {message}")]
    ParseError {
        /// Description of the parse error.
        message: String,
    },

    /// The registry version is not supported.
    #[error("unsupported registry version: expected {expected}, found {actual}")]
    UnsupportedVersion {
        /// Expected version number.
        expected: u32,
        /// Actual version found in the registry.
        actual: u32,
    },

    /// The registry contains no seed definitions.
    #[error("registry contains no seed definitions")]
    EmptySeeds,

    /// Two seed definitions share a name.
    #[error("seed name '{name}' is defined more than once")]
    DuplicateSeedName {
        /// The repeated seed name.
        name: String,
    },

    /// The requested seed name was not found in the registry.
    #[error("seed '{name}' not found in registry")]
    SeedNotFound {
        /// The seed name that was not found.
        name: String,
    },

    /// Two users within a seed share an identifier.
    #[error("seed '{seed}' defines user {id} more than once")]
    DuplicateUserId {
        /// Seed containing the duplicate.
        seed: String,
        /// The repeated user identifier.
        id: u64,
    },

    /// Two courses within a seed share an identifier.
    #[error("seed '{seed}' defines course {id} more than once")]
    DuplicateCourseId {
        /// Seed containing the duplicate.
        seed: String,
        /// The repeated course identifier.
        id: u64,
    },

    /// A user email does not look like an address.
    #[error("seed '{seed}' user {user_id} has an invalid email: {value}")]
    InvalidEmail {
        /// Seed containing the user.
        seed: String,
        /// Identifier of the offending user.
        user_id: u64,
        /// The rejected email value.
        value: String,
    },

    /// A course references a teacher that the seed does not define.
    #[error("seed '{seed}' course {course_id} references unknown teacher {teacher_id}")]
    UnknownTeacher {
        /// Seed containing the course.
        seed: String,
        /// Identifier of the offending course.
        course_id: u64,
        /// The unresolved teacher identifier.
        teacher_id: u64,
    },

    /// An enrolment references a student that the seed does not define.
    #[error("seed '{seed}' enrolment references unknown student {student_id}")]
    UnknownStudent {
        /// Seed containing the enrolment.
        seed: String,
        /// The unresolved student identifier.
        student_id: u64,
    },

    /// An enrolment references a course that the seed does not define.
    #[error("seed '{seed}' enrolment for student {student_id} references unknown course {course_id}")]
    UnknownCourse {
        /// Seed containing the enrolment.
        seed: String,
        /// Student whose enrolment is broken.
        student_id: u64,
        /// The unresolved course identifier.
        course_id: u64,
    },
}
