//! Publication state machine for courses.
//!
//! Two states, no terminal state. Only the owning teacher may move a course
//! between them; any other actor gets [`MarketplaceError::NotOwner`] and the
//! course is left as it was.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::course::Course;
use super::error::MarketplaceError;
use super::user::UserId;

/// Whether a course is listed in the catalogue.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PublicationStatus {
    Draft,
    #[default]
    Published,
}

impl PublicationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Published => "published",
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Draft => "Draft",
            Self::Published => "Published",
        }
    }

    pub fn is_published(&self) -> bool {
        matches!(self, Self::Published)
    }

    /// The opposite state.
    pub fn toggled(self) -> Self {
        match self {
            Self::Draft => Self::Published,
            Self::Published => Self::Draft,
        }
    }
}

impl fmt::Display for PublicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn ensure_owner(course: &Course, actor: UserId) -> Result<(), MarketplaceError> {
    if course.is_owned_by(actor) {
        Ok(())
    } else {
        Err(MarketplaceError::NotOwner {
            course_id: course.id(),
            actor,
        })
    }
}

/// Flip a course between draft and published.
///
/// # Examples
/// ```
/// use learnify_backend::domain::{
///     Course, CourseId, CourseTitle, Delivery, PublicationStatus, Price, UserId, toggle_publish,
/// };
///
/// let owner = UserId::new(1);
/// let course = Course::new(
///     CourseId::new(1),
///     owner,
///     CourseTitle::new("Rust 101").unwrap(),
///     Price::FREE,
///     Delivery::Recorded,
/// );
///
/// let hidden = toggle_publish(&course, owner).unwrap();
/// assert_eq!(hidden.status(), PublicationStatus::Draft);
/// assert!(toggle_publish(&course, UserId::new(3)).is_err());
/// ```
pub fn toggle_publish(course: &Course, actor: UserId) -> Result<Course, MarketplaceError> {
    ensure_owner(course, actor)?;
    Ok(course.clone().with_status(course.status().toggled()))
}

/// Move a course to `target`. Idempotent when it is already there.
pub fn set_publication(
    course: &Course,
    actor: UserId,
    target: PublicationStatus,
) -> Result<Course, MarketplaceError> {
    ensure_owner(course, actor)?;
    Ok(course.clone().with_status(target))
}
