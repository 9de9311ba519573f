//! Turning a validated draft into a course.

use super::course::{Capacity, Course, CourseId, CourseTitle, Delivery, Price, link_text};
use super::course_validation::{CourseDraft, CourseType, CourseValidationError, validate_draft};
use super::error::MarketplaceError;
use super::publication::PublicationStatus;
use super::user::UserId;

/// Identifier for the next course: one past the largest existing id, or 1
/// for an empty catalogue.
pub fn next_course_id(existing: &[Course]) -> CourseId {
    existing
        .iter()
        .map(Course::id)
        .max()
        .unwrap_or(CourseId::new(0))
        .next()
}

impl Course {
    /// Build a course with a known id from an authoring draft.
    ///
    /// The draft is validated first; any violation yields
    /// [`MarketplaceError::ValidationFailed`] carrying every problem found.
    /// The draft's own `teacher_id` is ignored in favour of `teacher_id`.
    pub fn from_draft(
        id: CourseId,
        teacher_id: UserId,
        draft: &CourseDraft,
    ) -> Result<Self, MarketplaceError> {
        let errors = validate_draft(draft);
        if !errors.is_empty() {
            return Err(MarketplaceError::ValidationFailed { errors });
        }
        assemble(id, teacher_id, draft)
            .map_err(|error| MarketplaceError::ValidationFailed { errors: vec![error] })
    }
}

fn assemble(
    id: CourseId,
    teacher_id: UserId,
    draft: &CourseDraft,
) -> Result<Course, CourseValidationError> {
    let title = CourseTitle::new(&draft.title)?;
    let base_price = Price::try_from_cents(draft.base_price_cents)?;
    let delivery = match (draft.course_type, draft.schedule_utc) {
        (CourseType::Live, Some(schedule_utc)) => Delivery::Live {
            schedule_utc,
            meeting_link: link_text(draft.meeting_link.as_deref()),
        },
        (CourseType::Live, None) => return Err(CourseValidationError::LiveRequiresSchedule),
        (CourseType::Recorded, Some(_)) => {
            return Err(CourseValidationError::RecordedForbidsSchedule);
        }
        // Recorded courses have nowhere to keep a meeting link.
        (CourseType::Recorded, None) => Delivery::Recorded,
    };
    let status = if draft.publish_immediately {
        PublicationStatus::Published
    } else {
        PublicationStatus::Draft
    };

    let mut course = Course::new(id, teacher_id, title, base_price, delivery).with_status(status);
    if let Some(description) = &draft.description {
        course = course.with_description(description.clone());
    }
    if let Some(seats) = draft.max_capacity {
        course = course.with_capacity(Capacity::try_new(seats)?);
    }
    if let Some(image_url) = &draft.image_url {
        course = course.with_image_url(image_url);
    }
    Ok(course)
}

/// Create a course authored by `teacher_id`, assigning the next free id.
///
/// # Examples
/// ```
/// use learnify_backend::domain::{CourseDraft, CourseId, UserId, create_course};
///
/// let draft = CourseDraft {
///     title: "Rust 101".to_owned(),
///     ..CourseDraft::default()
/// };
/// let course = create_course(&draft, UserId::new(1), &[]).unwrap();
/// assert_eq!(course.id(), CourseId::new(1));
/// assert_eq!(course.teacher_id(), UserId::new(1));
/// ```
pub fn create_course(
    draft: &CourseDraft,
    teacher_id: UserId,
    existing: &[Course],
) -> Result<Course, MarketplaceError> {
    Course::from_draft(next_course_id(existing), teacher_id, draft)
}
