//! Startup loading of the mock marketplace dataset.
//!
//! The seed registry is parsed by the `example-data` crate, which checks
//! referential integrity only. Every record then passes through the domain
//! constructors here, so a seed that breaks a course or user rule fails
//! startup instead of producing an inconsistent marketplace.

use std::path::{Path, PathBuf};

use cap_std::{ambient_authority, fs::Dir};
use example_data::{
    CourseSeed, CourseStatusSeed, CourseTypeSeed, RegistryError, RoleSeed, SeedDefinition,
    SeedRegistry,
};
use thiserror::Error;
use tracing::info;

use crate::domain::{
    Course, CourseDraft, CourseId, CourseType, EnrollmentLedger, MarketplaceError,
    MarketplaceState, Role, User, UserId, UserValidationError,
};
use crate::example_data::config::ExampleDataSettings;

/// Errors returned while loading the startup dataset.
#[derive(Debug, Error)]
pub enum StartupSeedingError {
    /// Registry file could not be read.
    #[error("failed to read registry at {path}: {source}")]
    RegistryRead {
        /// Path to the registry file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// Registry parsing or seed lookup failed.
    #[error("registry error: {0}")]
    Registry(#[from] RegistryError),
    /// Seed name must not be empty.
    #[error("seed name must not be empty")]
    EmptySeedName,
    /// A seeded user breaks a user rule.
    #[error("seed user {user_id} is invalid: {source}")]
    InvalidUser {
        user_id: u64,
        #[source]
        source: UserValidationError,
    },
    /// A seeded course breaks a course rule.
    #[error("seed course {course_id} is invalid: {source}")]
    InvalidCourse {
        course_id: u64,
        #[source]
        source: MarketplaceError,
    },
    /// A seeded course names an author without the teacher role.
    #[error("seed course {course_id} is authored by user {teacher_id}, who is not a teacher")]
    AuthorNotTeacher { course_id: u64, teacher_id: u64 },
    /// A seeded enrolment names a user without the student role.
    #[error("seed user {student_id} is enrolled in courses but is not a student")]
    EnrolleeNotStudent { student_id: u64 },
    /// A seeded enrolment targets a course that cannot accept it.
    #[error("seed enrolment of user {student_id} in course {course_id} is invalid: {source}")]
    InvalidEnrollment {
        student_id: u64,
        course_id: u64,
        #[source]
        source: MarketplaceError,
    },
}

/// Build the initial marketplace state.
///
/// Returns an empty marketplace when seeding is disabled.
///
/// # Examples
///
/// ```rust,no_run
/// use learnify_backend::example_data::{ExampleDataSettings, load_marketplace_on_startup};
///
/// # fn run() -> Result<(), Box<dyn std::error::Error>> {
/// let settings = ExampleDataSettings {
///     enabled: true,
///     seed_name: Some("learnify-demo".to_owned()),
///     registry_path: None,
/// };
/// let state = load_marketplace_on_startup(&settings)?;
/// assert_eq!(state.published_count(), 3);
/// # Ok(())
/// # }
/// ```
pub fn load_marketplace_on_startup(
    settings: &ExampleDataSettings,
) -> Result<MarketplaceState, StartupSeedingError> {
    if !settings.is_enabled() {
        info!(reason = "disabled", "example data seeding skipped");
        return Ok(MarketplaceState::default());
    }

    let seed_name = settings.seed_name().trim();
    if seed_name.is_empty() {
        return Err(StartupSeedingError::EmptySeedName);
    }

    let registry = load_registry(&settings.registry_path())?;
    let seed = registry.find_seed(seed_name)?;
    let state = marketplace_from_seed(seed)?;

    info!(
        seed_key = seed_name,
        user_count = state.users().len(),
        course_count = state.courses().len(),
        student_count = state.ledger().student_count(),
        "example data loaded"
    );
    Ok(state)
}

/// Convert a parsed seed into marketplace state, enforcing domain rules.
pub fn marketplace_from_seed(
    seed: &SeedDefinition,
) -> Result<MarketplaceState, StartupSeedingError> {
    let users = seed
        .users()
        .iter()
        .map(|user| {
            User::try_from_parts(
                user.id,
                role_from_seed(user.role),
                user.name.as_str(),
                user.surname.clone(),
                user.email.as_str(),
            )
            .map_err(|source| StartupSeedingError::InvalidUser {
                user_id: user.id,
                source,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let courses = seed
        .courses()
        .iter()
        .map(|course| course_from_seed(course, &users))
        .collect::<Result<Vec<_>, _>>()?;

    let mut ledger = EnrollmentLedger::new();
    for enrollment in seed.enrollments() {
        let is_student = users
            .iter()
            .any(|user| user.id().get() == enrollment.student_id && user.is_student());
        if !is_student {
            return Err(StartupSeedingError::EnrolleeNotStudent {
                student_id: enrollment.student_id,
            });
        }
        for &course_id in &enrollment.course_ids {
            let status = courses
                .iter()
                .find(|course| course.id().get() == course_id)
                .map(Course::status)
                .ok_or_else(|| StartupSeedingError::InvalidEnrollment {
                    student_id: enrollment.student_id,
                    course_id,
                    source: MarketplaceError::CourseNotFound {
                        course_id: CourseId::new(course_id),
                    },
                })?;
            ledger = ledger
                .enroll(
                    UserId::new(enrollment.student_id),
                    CourseId::new(course_id),
                    status,
                )
                .map_err(|source| StartupSeedingError::InvalidEnrollment {
                    student_id: enrollment.student_id,
                    course_id,
                    source,
                })?;
        }
    }

    Ok(MarketplaceState::new(users, courses, ledger))
}

fn role_from_seed(role: RoleSeed) -> Role {
    match role {
        RoleSeed::Student => Role::Student,
        RoleSeed::Teacher => Role::Teacher,
        RoleSeed::Admin => Role::Admin,
    }
}

fn course_from_seed(seed: &CourseSeed, users: &[User]) -> Result<Course, StartupSeedingError> {
    let is_teacher = users
        .iter()
        .any(|user| user.id().get() == seed.teacher_id && user.is_teacher());
    if !is_teacher {
        return Err(StartupSeedingError::AuthorNotTeacher {
            course_id: seed.id,
            teacher_id: seed.teacher_id,
        });
    }

    let draft = CourseDraft {
        teacher_id: None,
        title: seed.title.clone(),
        description: seed.description.clone(),
        base_price_cents: seed.base_price_cents,
        course_type: match seed.course_type {
            CourseTypeSeed::Live => CourseType::Live,
            CourseTypeSeed::Recorded => CourseType::Recorded,
        },
        schedule_utc: seed.schedule_utc,
        max_capacity: seed.max_capacity,
        meeting_link: seed.meeting_link.clone(),
        image_url: seed.image_url.clone(),
        publish_immediately: matches!(seed.status, CourseStatusSeed::Published),
    };
    Course::from_draft(CourseId::new(seed.id), UserId::new(seed.teacher_id), &draft).map_err(
        |source| StartupSeedingError::InvalidCourse {
            course_id: seed.id,
            source,
        },
    )
}

fn load_registry(path: &Path) -> Result<SeedRegistry, StartupSeedingError> {
    let parent = path.parent().unwrap_or_else(|| Path::new("."));
    let parent = if parent.as_os_str().is_empty() {
        Path::new(".")
    } else {
        parent
    };
    let read_error = |source: std::io::Error| StartupSeedingError::RegistryRead {
        path: path.to_path_buf(),
        source,
    };
    let file_name = path.file_name().ok_or_else(|| {
        read_error(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "registry path must be a file",
        ))
    })?;
    let dir = Dir::open_ambient_dir(parent, ambient_authority()).map_err(read_error)?;
    let contents = dir
        .read_to_string(Path::new(file_name))
        .map_err(read_error)?;
    Ok(SeedRegistry::from_json(&contents)?)
}

#[cfg(test)]
#[path = "startup_tests.rs"]
mod tests;
