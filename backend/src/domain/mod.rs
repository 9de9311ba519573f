//! Domain primitives, rules and the marketplace state.
//!
//! Purpose: model users, courses and enrolments with strongly typed values,
//! and express every marketplace rule as a pure function over explicit
//! state. Nothing here performs I/O; the binary and the example-data loader
//! sit on top.
//!
//! Public surface:
//! - `User`, `Role`, `UserId`: provisioned accounts.
//! - `Course`, `Delivery`, `Price`, `Capacity`: the course aggregate.
//! - `CourseDraft`, `validate_draft`: authoring-form validation.
//! - `create_course`, `toggle_publish`, `EnrollmentLedger`: state transitions.
//! - `MarketplaceState`: actor-aware commands and queries.
//! - `MarketplaceError`, `ErrorCode`: failure taxonomy.

pub mod catalogue;
pub mod course;
pub mod course_creation;
pub mod course_validation;
pub mod enrollment;
pub mod error;
pub mod marketplace;
pub mod publication;
pub mod user;

pub use self::catalogue::{
    CatalogueQuery, DeliveryFilter, ParseDeliveryFilterError, enrolled_courses, is_visible_to,
    published_count, search, teacher_courses, visible_course,
};
pub use self::course::{Capacity, Course, CourseId, CourseTitle, Delivery, Price};
pub use self::course_creation::{create_course, next_course_id};
pub use self::course_validation::{CourseDraft, CourseType, CourseValidationError, validate_draft};
pub use self::enrollment::EnrollmentLedger;
pub use self::error::{ErrorCode, MarketplaceAction, MarketplaceError};
pub use self::marketplace::MarketplaceState;
pub use self::publication::{PublicationStatus, set_publication, toggle_publish};
pub use self::user::{
    DISPLAY_NAME_MAX, DisplayName, Email, ParseRoleError, Role, User, UserId, UserValidationError,
};

/// Result alias for marketplace operations.
pub type MarketplaceResult<T> = Result<T, MarketplaceError>;
