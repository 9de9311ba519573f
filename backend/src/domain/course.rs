//! Course aggregate and its value objects.
//!
//! A course's delivery is a tagged union: live courses always carry a
//! schedule and recorded courses never do, so the "schedule present iff live"
//! rule holds by construction rather than by validation. Deserialised courses
//! pass through the same check before a [`Delivery`] is built.

use std::fmt;
use std::num::NonZeroU64;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::course_validation::{CourseType, CourseValidationError};
use super::publication::PublicationStatus;
use super::user::UserId;

/// Stable numeric course identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CourseId(u64);

impl CourseId {
    /// Wrap a raw identifier.
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Access the raw identifier.
    pub const fn get(self) -> u64 {
        self.0
    }

    /// The identifier following this one.
    pub const fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl From<u64> for CourseId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl fmt::Display for CourseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Course title, non-empty once trimmed. Stored trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CourseTitle(String);

impl CourseTitle {
    pub fn new(title: impl AsRef<str>) -> Result<Self, CourseValidationError> {
        let trimmed = title.as_ref().trim();
        if trimmed.is_empty() {
            return Err(CourseValidationError::TitleRequired);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for CourseTitle {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for CourseTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<CourseTitle> for String {
    fn from(value: CourseTitle) -> Self {
        value.0
    }
}

impl TryFrom<String> for CourseTitle {
    type Error = CourseValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Non-negative price in minor currency units (US cents).
///
/// # Examples
///
/// ```
/// # use learnify_backend::domain::Price;
/// assert_eq!(Price::from_cents(4999).to_string(), "$49.99");
/// assert_eq!(Price::from_cents(123456).to_string(), "$1,234.56");
/// assert_eq!(Price::FREE.to_string(), "$0.00");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(u64);

impl Price {
    pub const FREE: Self = Self(0);

    pub const fn from_cents(cents: u64) -> Self {
        Self(cents)
    }

    /// Convert a signed amount, rejecting negative prices.
    pub fn try_from_cents(cents: i64) -> Result<Self, CourseValidationError> {
        u64::try_from(cents)
            .map(Self)
            .map_err(|_| CourseValidationError::PriceNegative)
    }

    pub const fn cents(self) -> u64 {
        self.0
    }

    pub const fn is_free(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dollars = (self.0 / 100).to_string();
        let cents = self.0 % 100;
        let mut grouped = String::with_capacity(dollars.len() + dollars.len() / 3);
        for (index, digit) in dollars.chars().enumerate() {
            if index > 0 && (dollars.len() - index) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(digit);
        }
        write!(f, "${grouped}.{cents:02}")
    }
}

/// Seat limit for a course. Descriptive only; enrolment does not enforce it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Capacity(NonZeroU64);

impl Capacity {
    /// Convert a signed seat count, rejecting zero and negative values.
    pub fn try_new(seats: i64) -> Result<Self, CourseValidationError> {
        u64::try_from(seats)
            .ok()
            .and_then(NonZeroU64::new)
            .map(Self)
            .ok_or(CourseValidationError::CapacityMustBePositive)
    }

    pub const fn seats(self) -> u64 {
        self.0.get()
    }
}

impl fmt::Display for Capacity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} seats", self.0)
    }
}

/// Trimmed link text, or `None` when blank.
///
/// Links are kept as the author typed them; relative paths are allowed.
pub(crate) fn link_text(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_owned)
}

/// How a course is delivered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Delivery {
    /// Scheduled session, optionally with a meeting link.
    #[serde(rename_all = "camelCase")]
    Live {
        schedule_utc: DateTime<Utc>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        meeting_link: Option<String>,
    },
    /// On-demand recording; never scheduled.
    Recorded,
}

impl Delivery {
    pub fn live(schedule_utc: DateTime<Utc>) -> Self {
        Self::Live {
            schedule_utc,
            meeting_link: None,
        }
    }

    pub fn is_live(&self) -> bool {
        matches!(self, Self::Live { .. })
    }

    pub fn schedule_utc(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Live { schedule_utc, .. } => Some(*schedule_utc),
            Self::Recorded => None,
        }
    }

    pub fn meeting_link(&self) -> Option<&str> {
        match self {
            Self::Live { meeting_link, .. } => meeting_link.as_deref(),
            Self::Recorded => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Live { .. } => "Live",
            Self::Recorded => "Recorded",
        }
    }
}

/// A course offered on the marketplace.
///
/// ## Invariants
/// - `title` is non-empty once trimmed.
/// - `base_price` is non-negative (unsigned minor units).
/// - live courses carry a schedule; recorded courses cannot.
/// - `max_capacity`, when present, is at least one seat.
///
/// Only the owning teacher may change [`Course::status`]; see
/// [`crate::domain::toggle_publish`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawCourse")]
pub struct Course {
    id: CourseId,
    teacher_id: UserId,
    title: CourseTitle,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    base_price: Price,
    #[serde(flatten)]
    delivery: Delivery,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    max_capacity: Option<Capacity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    image_url: Option<String>,
    status: PublicationStatus,
}

/// Wire shape of a [`Course`] before the delivery rules are applied.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawCourse {
    id: CourseId,
    teacher_id: UserId,
    title: CourseTitle,
    #[serde(default)]
    description: Option<String>,
    base_price: Price,
    #[serde(rename = "type")]
    course_type: CourseType,
    #[serde(default)]
    schedule_utc: Option<DateTime<Utc>>,
    #[serde(default)]
    meeting_link: Option<String>,
    #[serde(default)]
    max_capacity: Option<Capacity>,
    #[serde(default)]
    image_url: Option<String>,
    status: PublicationStatus,
}

impl TryFrom<RawCourse> for Course {
    type Error = CourseValidationError;

    fn try_from(raw: RawCourse) -> Result<Self, Self::Error> {
        let delivery = match (raw.course_type, raw.schedule_utc) {
            (CourseType::Live, Some(schedule_utc)) => Delivery::Live {
                schedule_utc,
                meeting_link: link_text(raw.meeting_link.as_deref()),
            },
            (CourseType::Live, None) => return Err(CourseValidationError::LiveRequiresSchedule),
            (CourseType::Recorded, Some(_)) => {
                return Err(CourseValidationError::RecordedForbidsSchedule);
            }
            (CourseType::Recorded, None) => Delivery::Recorded,
        };
        let mut course = Self::new(raw.id, raw.teacher_id, raw.title, raw.base_price, delivery)
            .with_status(raw.status);
        if let Some(description) = raw.description {
            course = course.with_description(description);
        }
        if let Some(capacity) = raw.max_capacity {
            course = course.with_capacity(capacity);
        }
        if let Some(image_url) = raw.image_url {
            course = course.with_image_url(image_url);
        }
        Ok(course)
    }
}

impl Course {
    /// Build a published course from validated components.
    pub fn new(
        id: CourseId,
        teacher_id: UserId,
        title: CourseTitle,
        base_price: Price,
        delivery: Delivery,
    ) -> Self {
        Self {
            id,
            teacher_id,
            title,
            description: None,
            base_price,
            delivery,
            max_capacity: None,
            image_url: None,
            status: PublicationStatus::Published,
        }
    }

    /// Attach a description; blank text clears it.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        let description = description.into();
        self.description = if description.trim().is_empty() {
            None
        } else {
            Some(description)
        };
        self
    }

    pub fn with_capacity(mut self, capacity: Capacity) -> Self {
        self.max_capacity = Some(capacity);
        self
    }

    /// Attach a cover image link; blank text clears it.
    pub fn with_image_url(mut self, image_url: impl AsRef<str>) -> Self {
        self.image_url = link_text(Some(image_url.as_ref()));
        self
    }

    pub fn with_status(mut self, status: PublicationStatus) -> Self {
        self.status = status;
        self
    }

    pub fn id(&self) -> CourseId {
        self.id
    }

    /// Identifier of the owning teacher.
    pub fn teacher_id(&self) -> UserId {
        self.teacher_id
    }

    pub fn title(&self) -> &CourseTitle {
        &self.title
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn base_price(&self) -> Price {
        self.base_price
    }

    pub fn delivery(&self) -> &Delivery {
        &self.delivery
    }

    pub fn max_capacity(&self) -> Option<Capacity> {
        self.max_capacity
    }

    pub fn image_url(&self) -> Option<&str> {
        self.image_url.as_deref()
    }

    pub fn status(&self) -> PublicationStatus {
        self.status
    }

    pub fn is_published(&self) -> bool {
        self.status.is_published()
    }

    /// Whether `user_id` owns this course.
    pub fn is_owned_by(&self, user_id: UserId) -> bool {
        self.teacher_id == user_id
    }
}

#[cfg(test)]
mod tests;
