//! Mock marketplace dataset for demonstration purposes.
//!
//! This crate loads named datasets of users, courses and enrolments from a
//! JSON seed registry. It is designed to be independent of backend domain
//! types to avoid circular dependencies; the backend turns seed records into
//! validated domain values.
//!
//! # Overview
//!
//! The crate supports:
//!
//! - Loading seed registries from JSON strings or files
//! - Looking up datasets by seed name
//! - Referential integrity checks (teachers, students and courses referenced
//!   by a seed must be defined by it)
//! - Email validation matching backend constraints
//!
//! # Example
//!
//! ```
//! use example_data::{RoleSeed, SeedRegistry};
//!
//! let json = r#"{
//!     "version": 1,
//!     "seeds": [{
//!         "name": "test-seed",
//!         "users": [
//!             {"id": 1, "name": "Esma", "email": "esma@example.com", "role": "teacher"},
//!             {"id": 2, "name": "Qais", "email": "qais@example.com", "role": "student"}
//!         ],
//!         "courses": [
//!             {"id": 1, "teacherId": 1, "title": "SQL", "basePriceCents": 2900, "type": "recorded"}
//!         ],
//!         "enrollments": [{"studentId": 2, "courseIds": [1]}]
//!     }]
//! }"#;
//!
//! let registry = SeedRegistry::from_json(json).expect("valid registry");
//! let seed = registry.find_seed("test-seed").expect("seed exists");
//!
//! assert_eq!(seed.users().len(), 2);
//! assert_eq!(seed.users()[0].role, RoleSeed::Teacher);
//! ```

mod error;
mod registry;
mod seed;
mod validation;

pub use error::RegistryError;
pub use registry::{SeedDefinition, SeedRegistry};
pub use seed::{CourseSeed, CourseStatusSeed, CourseTypeSeed, EnrollmentSeed, RoleSeed, UserSeed};
pub use validation::is_valid_email;
