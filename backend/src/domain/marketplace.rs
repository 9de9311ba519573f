//! Marketplace state and the actor-aware operations over it.
//!
//! [`MarketplaceState`] bundles the user list, the course list and the
//! enrolment ledger. Each command takes the acting user, applies role and
//! ownership gates, and returns a fresh state; the receiver is never
//! modified. Queries borrow from the state.
//!
//! Courses are kept newest first, matching the order the catalogue shows
//! them in.

use tracing::{debug, info, warn};

use super::catalogue::{self, CatalogueQuery};
use super::course::{Course, CourseId};
use super::course_creation;
use super::course_validation::CourseDraft;
use super::enrollment::EnrollmentLedger;
use super::error::{MarketplaceAction, MarketplaceError};
use super::publication::{self, PublicationStatus};
use super::user::{Role, User, UserId};

/// In-memory marketplace snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarketplaceState {
    users: Vec<User>,
    courses: Vec<Course>,
    ledger: EnrollmentLedger,
}

fn require_role(
    actor: &User,
    required: Role,
    action: MarketplaceAction,
) -> Result<(), MarketplaceError> {
    if actor.role() == required {
        return Ok(());
    }
    warn!(
        actor = %actor.id(),
        role = %actor.role(),
        action = %action,
        "role not permitted"
    );
    Err(MarketplaceError::RoleNotPermitted {
        action,
        actor: actor.id(),
        required,
        actual: actor.role(),
    })
}

impl MarketplaceState {
    pub fn new(users: Vec<User>, courses: Vec<Course>, ledger: EnrollmentLedger) -> Self {
        Self {
            users,
            courses,
            ledger,
        }
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    pub fn ledger(&self) -> &EnrollmentLedger {
        &self.ledger
    }

    pub fn user(&self, id: UserId) -> Option<&User> {
        self.users.iter().find(|user| user.id() == id)
    }

    fn course(&self, course_id: CourseId) -> Result<&Course, MarketplaceError> {
        self.courses
            .iter()
            .find(|course| course.id() == course_id)
            .ok_or(MarketplaceError::CourseNotFound { course_id })
    }

    /// Find the user with this email and role. No password is checked.
    pub fn sign_in(&self, email: &str, role: Role) -> Result<&User, MarketplaceError> {
        let found = self
            .users
            .iter()
            .find(|user| user.role() == role && user.email().matches(email));
        match found {
            Some(user) => {
                info!(actor = %user.id(), role = %role, "signed in");
                Ok(user)
            }
            None => {
                warn!(role = %role, "sign-in failed");
                Err(MarketplaceError::UnknownCredentials {
                    email: email.trim().to_owned(),
                    role,
                })
            }
        }
    }

    /// Published courses matching `query`.
    pub fn catalogue(&self, query: &CatalogueQuery) -> Vec<&Course> {
        catalogue::search(&self.courses, query)
    }

    pub fn published_count(&self) -> usize {
        catalogue::published_count(&self.courses)
    }

    /// A single course as `viewer` may see it; hidden drafts are not found.
    pub fn visible_course(
        &self,
        course_id: CourseId,
        viewer: Option<&User>,
    ) -> Result<&Course, MarketplaceError> {
        catalogue::visible_course(&self.courses, course_id, viewer.map(User::id))
    }

    /// The teacher who owns `course`, if still provisioned.
    pub fn teacher_of(&self, course: &Course) -> Option<&User> {
        self.user(course.teacher_id())
    }

    pub fn is_enrolled(&self, actor: &User, course_id: CourseId) -> bool {
        self.ledger.is_enrolled(actor.id(), course_id)
    }

    /// Number of students enrolled in `course_id`.
    pub fn enrollment_count(&self, course_id: CourseId) -> usize {
        self.ledger.enrollment_count(course_id)
    }

    /// Author a course as `actor`. Teachers only.
    ///
    /// Returns the new state and the id assigned to the course.
    pub fn create_course(
        &self,
        actor: &User,
        draft: &CourseDraft,
    ) -> Result<(Self, CourseId), MarketplaceError> {
        require_role(actor, Role::Teacher, MarketplaceAction::CreateCourse)?;
        let course = course_creation::create_course(draft, actor.id(), &self.courses)
            .inspect_err(|err| {
                warn!(actor = %actor.id(), error = %err, "course draft rejected");
            })?;
        let course_id = course.id();
        info!(
            actor = %actor.id(),
            course_id = %course_id,
            status = %course.status(),
            "course created"
        );

        let mut next = self.clone();
        next.courses.insert(0, course);
        Ok((next, course_id))
    }

    fn replace_course(&self, course: Course) -> Self {
        let mut next = self.clone();
        if let Some(slot) = next.courses.iter_mut().find(|c| c.id() == course.id()) {
            *slot = course;
        }
        next
    }

    /// Flip the publication status of a course `actor` owns.
    pub fn toggle_publish(
        &self,
        actor: &User,
        course_id: CourseId,
    ) -> Result<Self, MarketplaceError> {
        let course = publication::toggle_publish(self.course(course_id)?, actor.id())
            .inspect_err(|err| {
                warn!(actor = %actor.id(), course_id = %course_id, error = %err, "publication change rejected");
            })?;
        info!(
            actor = %actor.id(),
            course_id = %course_id,
            status = %course.status(),
            "publication toggled"
        );
        Ok(self.replace_course(course))
    }

    /// Publish or unpublish a course `actor` owns.
    pub fn set_publication(
        &self,
        actor: &User,
        course_id: CourseId,
        target: PublicationStatus,
    ) -> Result<Self, MarketplaceError> {
        let course = publication::set_publication(self.course(course_id)?, actor.id(), target)?;
        info!(
            actor = %actor.id(),
            course_id = %course_id,
            status = %target,
            "publication set"
        );
        Ok(self.replace_course(course))
    }

    /// Enrol `actor` in a published course. Students only.
    pub fn enroll(&self, actor: &User, course_id: CourseId) -> Result<Self, MarketplaceError> {
        require_role(actor, Role::Student, MarketplaceAction::Enroll)?;
        let course = self.course(course_id)?;
        let ledger = self
            .ledger
            .enroll(actor.id(), course_id, course.status())
            .inspect_err(|err| {
                warn!(actor = %actor.id(), course_id = %course_id, error = %err, "enrolment rejected");
            })?;
        info!(actor = %actor.id(), course_id = %course_id, "enrolled");
        Ok(Self {
            ledger,
            ..self.clone()
        })
    }

    /// Drop `actor`'s enrolment in `course_id`, if any.
    pub fn unenroll(&self, actor: &User, course_id: CourseId) -> Self {
        if self.ledger.is_enrolled(actor.id(), course_id) {
            info!(actor = %actor.id(), course_id = %course_id, "unenrolled");
        } else {
            debug!(actor = %actor.id(), course_id = %course_id, "nothing to unenrol");
        }
        Self {
            ledger: self.ledger.unenroll(actor.id(), course_id),
            ..self.clone()
        }
    }

    /// Courses `actor` is enrolled in. Students only.
    pub fn enrolled_courses(&self, actor: &User) -> Result<Vec<&Course>, MarketplaceError> {
        require_role(actor, Role::Student, MarketplaceAction::ViewEnrolledCourses)?;
        Ok(catalogue::enrolled_courses(
            &self.courses,
            &self.ledger,
            actor.id(),
        ))
    }

    /// Every course `actor` owns, drafts included. Teachers only.
    pub fn teacher_console(&self, actor: &User) -> Result<Vec<&Course>, MarketplaceError> {
        require_role(actor, Role::Teacher, MarketplaceAction::ViewTeacherConsole)?;
        Ok(catalogue::teacher_courses(&self.courses, actor.id()))
    }
}

#[cfg(test)]
#[path = "marketplace_tests.rs"]
mod tests;
