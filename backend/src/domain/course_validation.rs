//! Course draft validation.
//!
//! A draft is what a teacher submits from the authoring form: a flat record
//! whose fields may contradict each other. [`validate_draft`] reports every
//! violated rule, in rule order, without short-circuiting, so the caller can
//! show all problems at once.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::user::UserId;

/// Delivery type selected on the authoring form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CourseType {
    Live,
    #[default]
    Recorded,
}

/// Field-level problems found in a [`CourseDraft`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Error)]
#[serde(rename_all = "snake_case")]
pub enum CourseValidationError {
    #[error("title is required")]
    TitleRequired,
    #[error("base price must be at least 0")]
    PriceNegative,
    #[error("live course requires a schedule")]
    LiveRequiresSchedule,
    #[error("recorded course must not have a schedule")]
    RecordedForbidsSchedule,
    #[error("max capacity must be greater than 0")]
    CapacityMustBePositive,
}

fn default_publish_immediately() -> bool {
    true
}

/// Unvalidated course submission.
///
/// `teacher_id` is accepted for wire compatibility with the authoring form
/// but never trusted: course creation takes the author from the acting user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseDraft {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub teacher_id: Option<UserId>,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Price in cents; negative values fail validation.
    pub base_price_cents: i64,
    #[serde(rename = "type")]
    pub course_type: CourseType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schedule_utc: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_capacity: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meeting_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default = "default_publish_immediately")]
    pub publish_immediately: bool,
}

impl Default for CourseDraft {
    /// The blank authoring form: a free, recorded, immediately published course.
    fn default() -> Self {
        Self {
            teacher_id: None,
            title: String::new(),
            description: None,
            base_price_cents: 0,
            course_type: CourseType::Recorded,
            schedule_utc: None,
            max_capacity: None,
            meeting_link: None,
            image_url: None,
            publish_immediately: true,
        }
    }
}

/// Check a draft against every course rule.
///
/// Returns the violated rules in a fixed order; an empty vector means the
/// draft is valid. Neither `teacher_id` nor the free-text link fields are
/// inspected.
///
/// # Examples
///
/// ```
/// use learnify_backend::domain::{CourseDraft, CourseType, CourseValidationError, validate_draft};
///
/// let draft = CourseDraft {
///     title: String::new(),
///     base_price_cents: -5,
///     course_type: CourseType::Live,
///     max_capacity: Some(0),
///     ..CourseDraft::default()
/// };
///
/// assert_eq!(
///     validate_draft(&draft),
///     vec![
///         CourseValidationError::TitleRequired,
///         CourseValidationError::PriceNegative,
///         CourseValidationError::LiveRequiresSchedule,
///         CourseValidationError::CapacityMustBePositive,
///     ]
/// );
/// ```
pub fn validate_draft(draft: &CourseDraft) -> Vec<CourseValidationError> {
    let mut errors = Vec::new();

    if draft.title.trim().is_empty() {
        errors.push(CourseValidationError::TitleRequired);
    }
    if draft.base_price_cents < 0 {
        errors.push(CourseValidationError::PriceNegative);
    }
    match (draft.course_type, draft.schedule_utc) {
        (CourseType::Live, None) => errors.push(CourseValidationError::LiveRequiresSchedule),
        (CourseType::Recorded, Some(_)) => {
            errors.push(CourseValidationError::RecordedForbidsSchedule);
        }
        _ => {}
    }
    if draft.max_capacity.is_some_and(|seats| seats <= 0) {
        errors.push(CourseValidationError::CapacityMustBePositive);
    }
    errors
}

#[cfg(test)]
#[path = "course_validation_tests.rs"]
mod tests;
