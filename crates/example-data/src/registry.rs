//! Seed registry types and JSON parsing.
//!
//! This module defines the seed registry structure that holds named mock
//! marketplace datasets. The registry is loaded from JSON, checked for
//! referential integrity, and provides seed lookups by name.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::RegistryError;
use crate::seed::{CourseSeed, EnrollmentSeed, UserSeed};
use crate::validation::is_valid_email;

/// Current supported registry version.
const SUPPORTED_VERSION: u32 = 1;

/// A seed registry containing named marketplace datasets.
///
/// # Example
///
/// ```
/// use example_data::SeedRegistry;
///
/// let json = r#"{
///     "version": 1,
///     "seeds": [{
///         "name": "tiny",
///         "users": [
///             {"id": 1, "name": "Esma", "email": "esma@example.com", "role": "teacher"}
///         ],
///         "courses": [
///             {"id": 1, "teacherId": 1, "title": "Intro", "basePriceCents": 0, "type": "recorded"}
///         ]
///     }]
/// }"#;
///
/// let registry = SeedRegistry::from_json(json).expect("valid registry");
/// assert_eq!(registry.seeds().len(), 1);
/// assert_eq!(registry.find_seed("tiny").expect("seed exists").courses().len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedRegistry {
    version: u32,
    seeds: Vec<SeedDefinition>,
}

impl SeedRegistry {
    /// Parses a seed registry from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] if:
    /// - The JSON is malformed or required fields are missing
    /// - The version is unsupported
    /// - The seeds array is empty or repeats a name
    /// - A seed repeats a user or course id, carries an invalid email, or
    ///   references a user or course it does not define
    pub fn from_json(json: &str) -> Result<Self, RegistryError> {
        let raw: RawSeedRegistry =
            serde_json::from_str(json).map_err(|e| RegistryError::ParseError {
                message: e.to_string(),
            })?;

        Self::from_raw(raw)
    }

    /// Loads a seed registry from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, RegistryError> {
        let contents = fs::read_to_string(path).map_err(|e| RegistryError::IoError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        Self::from_json(&contents)
    }

    fn from_raw(raw: RawSeedRegistry) -> Result<Self, RegistryError> {
        if raw.version != SUPPORTED_VERSION {
            return Err(RegistryError::UnsupportedVersion {
                expected: SUPPORTED_VERSION,
                actual: raw.version,
            });
        }

        if raw.seeds.is_empty() {
            return Err(RegistryError::EmptySeeds);
        }

        let mut names = HashSet::new();
        let mut seeds = Vec::with_capacity(raw.seeds.len());
        for raw_seed in raw.seeds {
            if !names.insert(raw_seed.name.clone()) {
                return Err(RegistryError::DuplicateSeedName {
                    name: raw_seed.name,
                });
            }
            seeds.push(SeedDefinition::from_raw(raw_seed)?);
        }

        Ok(Self {
            version: raw.version,
            seeds,
        })
    }

    /// Returns the registry version.
    #[must_use]
    pub const fn version(&self) -> u32 {
        self.version
    }

    /// Returns all seed definitions.
    #[must_use]
    pub fn seeds(&self) -> &[SeedDefinition] {
        &self.seeds
    }

    /// Finds a seed definition by name.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::SeedNotFound`] if no seed with the given name
    /// exists.
    pub fn find_seed(&self, name: &str) -> Result<&SeedDefinition, RegistryError> {
        self.seeds
            .iter()
            .find(|s| s.name == name)
            .ok_or_else(|| RegistryError::SeedNotFound {
                name: name.to_owned(),
            })
    }
}

/// A named mock dataset: users, courses and the enrolment relation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedDefinition {
    name: String,
    users: Vec<UserSeed>,
    courses: Vec<CourseSeed>,
    enrollments: Vec<EnrollmentSeed>,
}

impl SeedDefinition {
    fn from_raw(raw: RawSeedDefinition) -> Result<Self, RegistryError> {
        let RawSeedDefinition {
            name,
            users,
            courses,
            enrollments,
        } = raw;

        let mut user_ids = HashSet::new();
        for user in &users {
            if !user_ids.insert(user.id) {
                return Err(RegistryError::DuplicateUserId {
                    seed: name,
                    id: user.id,
                });
            }
            if !is_valid_email(&user.email) {
                return Err(RegistryError::InvalidEmail {
                    seed: name,
                    user_id: user.id,
                    value: user.email.clone(),
                });
            }
        }

        let mut course_ids = HashSet::new();
        for course in &courses {
            if !course_ids.insert(course.id) {
                return Err(RegistryError::DuplicateCourseId {
                    seed: name,
                    id: course.id,
                });
            }
            if !user_ids.contains(&course.teacher_id) {
                return Err(RegistryError::UnknownTeacher {
                    seed: name,
                    course_id: course.id,
                    teacher_id: course.teacher_id,
                });
            }
        }

        for enrollment in &enrollments {
            if !user_ids.contains(&enrollment.student_id) {
                return Err(RegistryError::UnknownStudent {
                    seed: name,
                    student_id: enrollment.student_id,
                });
            }
            if let Some(course_id) = enrollment
                .course_ids
                .iter()
                .find(|id| !course_ids.contains(id))
            {
                return Err(RegistryError::UnknownCourse {
                    seed: name,
                    student_id: enrollment.student_id,
                    course_id: *course_id,
                });
            }
        }

        Ok(Self {
            name,
            users,
            courses,
            enrollments,
        })
    }

    /// Returns the seed name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the seeded user accounts.
    #[must_use]
    pub fn users(&self) -> &[UserSeed] {
        &self.users
    }

    /// Returns the seeded courses in registry order.
    #[must_use]
    pub fn courses(&self) -> &[CourseSeed] {
        &self.courses
    }

    /// Returns the seeded enrolments.
    #[must_use]
    pub fn enrollments(&self) -> &[EnrollmentSeed] {
        &self.enrollments
    }
}

/// Raw JSON representation for deserialization.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSeedRegistry {
    version: u32,
    seeds: Vec<RawSeedDefinition>,
}

/// Raw JSON representation of a seed definition.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSeedDefinition {
    name: String,
    #[serde(default)]
    users: Vec<UserSeed>,
    #[serde(default)]
    courses: Vec<CourseSeed>,
    #[serde(default)]
    enrollments: Vec<EnrollmentSeed>,
}
