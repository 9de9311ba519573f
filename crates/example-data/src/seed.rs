//! Seed record types.
//!
//! These types describe the mock marketplace as it is stored in the registry.
//! They are independent of backend domain types to avoid circular
//! dependencies; the backend converts them into validated domain values at
//! startup.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Account role of a seeded user.
///
/// Mirrors the backend's `Role` enum without creating a dependency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoleSeed {
    /// Browses and enrols in courses.
    Student,
    /// Authors and publishes courses.
    Teacher,
    /// Administrative account.
    Admin,
}

/// Delivery type of a seeded course.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CourseTypeSeed {
    /// Scheduled live session.
    Live,
    /// On-demand recording.
    Recorded,
}

/// Publication status of a seeded course.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CourseStatusSeed {
    /// Visible only to its teacher.
    Draft,
    /// Listed in the catalogue.
    #[default]
    Published,
}

/// A seeded user account.
///
/// # Example
///
/// ```
/// use example_data::{RoleSeed, UserSeed};
///
/// let user: UserSeed = serde_json::from_str(
///     r#"{"id": 2, "name": "Qais", "email": "qais@example.com", "role": "student"}"#,
/// )
/// .expect("valid user seed");
///
/// assert_eq!(user.role, RoleSeed::Student);
/// assert!(user.surname.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSeed {
    /// Unique numeric identifier.
    pub id: u64,
    /// Given name shown in the UI.
    pub name: String,
    /// Optional family name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub surname: Option<String>,
    /// Sign-in email address.
    pub email: String,
    /// Account role.
    pub role: RoleSeed,
}

/// A seeded course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseSeed {
    /// Unique numeric identifier.
    pub id: u64,
    /// Identifier of the authoring teacher.
    pub teacher_id: u64,
    /// Course title.
    pub title: String,
    /// Optional long-form description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Price in minor currency units (cents).
    pub base_price_cents: i64,
    /// Delivery type.
    #[serde(rename = "type")]
    pub course_type: CourseTypeSeed,
    /// Scheduled start for live courses.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schedule_utc: Option<DateTime<Utc>>,
    /// Optional seat limit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_capacity: Option<i64>,
    /// Meeting URL for live courses.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meeting_link: Option<String>,
    /// Cover image URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Publication status; defaults to published.
    #[serde(default)]
    pub status: CourseStatusSeed,
}

/// The courses a seeded student is enrolled in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrollmentSeed {
    /// Identifier of the enrolled student.
    pub student_id: u64,
    /// Identifiers of the courses the student is enrolled in.
    pub course_ids: Vec<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_seed_serializes_lowercase() {
        let teacher = serde_json::to_string(&RoleSeed::Teacher).expect("serialize");
        assert_eq!(teacher, "\"teacher\"");
    }

    #[test]
    fn course_status_defaults_to_published() {
        assert_eq!(CourseStatusSeed::default(), CourseStatusSeed::Published);
    }

    #[test]
    fn course_seed_reads_type_field_and_optional_defaults() {
        let course: CourseSeed = serde_json::from_str(
            r#"{
                "id": 2,
                "teacherId": 3,
                "title": "SQL Schema Design Essentials",
                "basePriceCents": 2900,
                "type": "recorded"
            }"#,
        )
        .expect("valid course seed");

        assert_eq!(course.course_type, CourseTypeSeed::Recorded);
        assert_eq!(course.status, CourseStatusSeed::Published);
        assert!(course.schedule_utc.is_none());
        assert!(course.max_capacity.is_none());
    }

    #[test]
    fn course_seed_parses_rfc3339_schedule() {
        let course: CourseSeed = serde_json::from_str(
            r#"{
                "id": 1,
                "teacherId": 1,
                "title": "Live",
                "basePriceCents": 0,
                "type": "live",
                "scheduleUtc": "2026-11-01T17:00:00Z"
            }"#,
        )
        .expect("valid course seed");

        let schedule = course.schedule_utc.expect("schedule present");
        assert_eq!(schedule.to_rfc3339(), "2026-11-01T17:00:00+00:00");
    }
}
