//! Read-side queries over the course list.
//!
//! The public catalogue only ever lists published courses. Drafts surface
//! in exactly two places: the owning teacher's console and a direct lookup
//! by that same teacher.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::course::{Course, CourseId};
use super::enrollment::EnrollmentLedger;
use super::error::MarketplaceError;
use super::user::UserId;

/// Delivery kinds a catalogue search can be narrowed to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryFilter {
    #[default]
    All,
    Live,
    Recorded,
}

impl DeliveryFilter {
    pub fn accepts(self, course: &Course) -> bool {
        match self {
            Self::All => true,
            Self::Live => course.delivery().is_live(),
            Self::Recorded => !course.delivery().is_live(),
        }
    }
}

/// Error returned when parsing an unknown delivery filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseDeliveryFilterError {
    pub input: String,
}

impl fmt::Display for ParseDeliveryFilterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown delivery filter: {} (expected all, live or recorded)",
            self.input
        )
    }
}

impl std::error::Error for ParseDeliveryFilterError {}

impl FromStr for DeliveryFilter {
    type Err = ParseDeliveryFilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "live" => Ok(Self::Live),
            "recorded" => Ok(Self::Recorded),
            _ => Err(ParseDeliveryFilterError {
                input: s.to_owned(),
            }),
        }
    }
}

/// Free-text and delivery filter applied to the public catalogue.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogueQuery {
    text: String,
    delivery: DeliveryFilter,
}

impl CatalogueQuery {
    pub fn new(text: impl Into<String>, delivery: DeliveryFilter) -> Self {
        Self {
            text: text.into(),
            delivery,
        }
    }

    pub fn text(&self) -> &str {
        self.text.as_str()
    }

    pub fn delivery(&self) -> DeliveryFilter {
        self.delivery
    }

    /// Whether `course` is published and satisfies both filters.
    ///
    /// Text matches case-insensitively against the title followed by the
    /// description; an empty query matches everything.
    pub fn matches(&self, course: &Course) -> bool {
        if !course.is_published() || !self.delivery.accepts(course) {
            return false;
        }
        let needle = self.text.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        let haystack = format!(
            "{} {}",
            course.title(),
            course.description().unwrap_or_default()
        )
        .to_lowercase();
        haystack.contains(&needle)
    }
}

/// Published courses matching `query`, in course-list order.
pub fn search<'a>(courses: &'a [Course], query: &CatalogueQuery) -> Vec<&'a Course> {
    courses.iter().filter(|course| query.matches(course)).collect()
}

pub fn published_count(courses: &[Course]) -> usize {
    courses.iter().filter(|course| course.is_published()).count()
}

/// Every course `teacher_id` owns, drafts included.
pub fn teacher_courses(courses: &[Course], teacher_id: UserId) -> Vec<&Course> {
    courses
        .iter()
        .filter(|course| course.is_owned_by(teacher_id))
        .collect()
}

/// The student's enrolled courses, in course-list order.
pub fn enrolled_courses<'a>(
    courses: &'a [Course],
    ledger: &EnrollmentLedger,
    student: UserId,
) -> Vec<&'a Course> {
    courses
        .iter()
        .filter(|course| ledger.is_enrolled(student, course.id()))
        .collect()
}

/// Drafts are visible only to their owner; published courses to anyone.
pub fn is_visible_to(course: &Course, viewer: Option<UserId>) -> bool {
    course.is_published() || viewer.is_some_and(|id| course.is_owned_by(id))
}

/// Look up a course the viewer is allowed to see.
///
/// Hidden drafts are reported as [`MarketplaceError::CourseNotFound`] so
/// their existence does not leak.
pub fn visible_course(
    courses: &[Course],
    course_id: CourseId,
    viewer: Option<UserId>,
) -> Result<&Course, MarketplaceError> {
    courses
        .iter()
        .find(|course| course.id() == course_id && is_visible_to(course, viewer))
        .ok_or(MarketplaceError::CourseNotFound { course_id })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CourseTitle, Delivery, Price, PublicationStatus};
    use chrono::{TimeZone, Utc};
    use rstest::{fixture, rstest};

    fn course(id: u64, teacher: u64, title: &str, live: bool) -> Course {
        let delivery = if live {
            Delivery::live(
                Utc.with_ymd_and_hms(2026, 11, 1, 17, 0, 0)
                    .single()
                    .expect("valid timestamp"),
            )
        } else {
            Delivery::Recorded
        };
        Course::new(
            CourseId::new(id),
            UserId::new(teacher),
            CourseTitle::new(title).expect("valid title"),
            Price::FREE,
            delivery,
        )
    }

    #[fixture]
    fn courses() -> Vec<Course> {
        vec![
            course(1, 1, "ASP.NET Core for Beginners", true)
                .with_description("Build web APIs with C#."),
            course(2, 3, "SQL Schema Design Essentials", false),
            course(3, 1, "Live: System Design for Juniors", true),
            course(4, 1, "Unreleased Rust Workshop", false).with_status(PublicationStatus::Draft),
        ]
    }

    fn ids(found: &[&Course]) -> Vec<u64> {
        found.iter().map(|course| course.id().get()).collect()
    }

    #[rstest]
    #[case("", DeliveryFilter::All, vec![1, 2, 3])]
    #[case("sql", DeliveryFilter::All, vec![2])]
    #[case("WEB APIS", DeliveryFilter::All, vec![1])]
    #[case("", DeliveryFilter::Live, vec![1, 3])]
    #[case("", DeliveryFilter::Recorded, vec![2])]
    #[case("design", DeliveryFilter::Live, vec![3])]
    #[case("rust", DeliveryFilter::All, vec![])]
    fn search_lists_matching_published_courses(
        courses: Vec<Course>,
        #[case] text: &str,
        #[case] delivery: DeliveryFilter,
        #[case] expected: Vec<u64>,
    ) {
        let query = CatalogueQuery::new(text, delivery);
        assert_eq!(ids(&search(&courses, &query)), expected);
    }

    #[rstest]
    fn counts_published_courses(courses: Vec<Course>) {
        assert_eq!(published_count(&courses), 3);
    }

    #[rstest]
    fn teacher_courses_include_drafts(courses: Vec<Course>) {
        assert_eq!(ids(&teacher_courses(&courses, UserId::new(1))), vec![1, 3, 4]);
        assert!(teacher_courses(&courses, UserId::new(2)).is_empty());
    }

    #[rstest]
    fn enrolled_courses_follow_course_order(courses: Vec<Course>) {
        let student = UserId::new(2);
        let ledger = EnrollmentLedger::new()
            .enroll(student, CourseId::new(3), PublicationStatus::Published)
            .and_then(|ledger| {
                ledger.enroll(student, CourseId::new(1), PublicationStatus::Published)
            })
            .expect("published courses accept enrolment");
        assert_eq!(ids(&enrolled_courses(&courses, &ledger, student)), vec![1, 3]);
    }

    #[rstest]
    #[case(None, false)]
    #[case(Some(UserId::new(2)), false)]
    #[case(Some(UserId::new(3)), false)]
    #[case(Some(UserId::new(1)), true)]
    fn drafts_are_visible_only_to_their_owner(
        courses: Vec<Course>,
        #[case] viewer: Option<UserId>,
        #[case] visible: bool,
    ) {
        let result = visible_course(&courses, CourseId::new(4), viewer);
        assert_eq!(result.is_ok(), visible);
    }

    #[rstest]
    fn missing_course_is_not_found(courses: Vec<Course>) {
        assert_eq!(
            visible_course(&courses, CourseId::new(42), None),
            Err(MarketplaceError::CourseNotFound {
                course_id: CourseId::new(42)
            })
        );
    }

    #[rstest]
    #[case("all", DeliveryFilter::All)]
    #[case("Live", DeliveryFilter::Live)]
    #[case(" recorded ", DeliveryFilter::Recorded)]
    fn parses_delivery_filters(#[case] input: &str, #[case] expected: DeliveryFilter) {
        assert_eq!(input.parse::<DeliveryFilter>(), Ok(expected));
    }

    #[rstest]
    fn rejects_unknown_delivery_filter() {
        assert!("hybrid".parse::<DeliveryFilter>().is_err());
    }
}
