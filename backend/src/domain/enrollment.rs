//! Enrolment ledger: the many-to-many relation between students and courses.
//!
//! The ledger is a value. Every update returns a new ledger and leaves the
//! receiver untouched, so callers can keep or discard the previous state.
//!
//! ## Invariants
//! - No student maps to an empty set; `unenroll` drops the key once the last
//!   course is removed.
//! - Lookups treat an absent student and an empty set identically.

use std::collections::{BTreeMap, BTreeSet};

use super::course::CourseId;
use super::error::MarketplaceError;
use super::publication::PublicationStatus;
use super::user::UserId;

/// Student to enrolled-course mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnrollmentLedger {
    entries: BTreeMap<UserId, BTreeSet<CourseId>>,
}

impl EnrollmentLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enrol `student` in `course`.
    ///
    /// Fails with [`MarketplaceError::EnrollmentRejected`] unless the course
    /// is published. Enrolling twice is a no-op.
    ///
    /// # Examples
    /// ```
    /// use learnify_backend::domain::{CourseId, EnrollmentLedger, PublicationStatus, UserId};
    ///
    /// let ledger = EnrollmentLedger::new();
    /// let rejected = ledger.enroll(UserId::new(2), CourseId::new(1), PublicationStatus::Draft);
    /// assert!(rejected.is_err());
    ///
    /// let ledger = ledger
    ///     .enroll(UserId::new(2), CourseId::new(1), PublicationStatus::Published)
    ///     .unwrap();
    /// assert!(ledger.is_enrolled(UserId::new(2), CourseId::new(1)));
    /// ```
    pub fn enroll(
        &self,
        student: UserId,
        course: CourseId,
        status: PublicationStatus,
    ) -> Result<Self, MarketplaceError> {
        if !status.is_published() {
            return Err(MarketplaceError::EnrollmentRejected {
                course_id: course,
                status,
            });
        }
        let mut next = self.clone();
        next.entries.entry(student).or_default().insert(course);
        Ok(next)
    }

    /// Remove `student` from `course`. Absent pairs are ignored.
    pub fn unenroll(&self, student: UserId, course: CourseId) -> Self {
        let mut next = self.clone();
        if let Some(courses) = next.entries.get_mut(&student) {
            courses.remove(&course);
            if courses.is_empty() {
                next.entries.remove(&student);
            }
        }
        next
    }

    pub fn is_enrolled(&self, student: UserId, course: CourseId) -> bool {
        self.entries
            .get(&student)
            .is_some_and(|courses| courses.contains(&course))
    }

    /// The student's enrolled course ids in ascending order.
    pub fn courses_for(&self, student: UserId) -> Vec<CourseId> {
        self.entries
            .get(&student)
            .map(|courses| courses.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Number of students enrolled in `course`. Descriptive only.
    pub fn enrollment_count(&self, course: CourseId) -> usize {
        self.entries
            .values()
            .filter(|courses| courses.contains(&course))
            .count()
    }

    /// Number of students with at least one enrolment.
    pub fn student_count(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    const STUDENT: UserId = UserId::new(2);
    const COURSE: CourseId = CourseId::new(1);

    #[fixture]
    fn ledger() -> EnrollmentLedger {
        EnrollmentLedger::new()
            .enroll(STUDENT, COURSE, PublicationStatus::Published)
            .expect("published course accepts enrolment")
    }

    #[rstest]
    fn enroll_then_unenroll_clears_membership(ledger: EnrollmentLedger) {
        assert!(ledger.is_enrolled(STUDENT, COURSE));
        let ledger = ledger.unenroll(STUDENT, COURSE);
        assert!(!ledger.is_enrolled(STUDENT, COURSE));
    }

    #[rstest]
    fn unenroll_drops_empty_students(ledger: EnrollmentLedger) {
        let ledger = ledger.unenroll(STUDENT, COURSE);
        assert!(ledger.is_empty());
        assert_eq!(ledger, EnrollmentLedger::new());
    }

    #[rstest]
    fn enroll_is_idempotent(ledger: EnrollmentLedger) {
        let again = ledger
            .enroll(STUDENT, COURSE, PublicationStatus::Published)
            .expect("published course accepts enrolment");
        assert_eq!(again, ledger);
        assert_eq!(again.enrollment_count(COURSE), 1);
    }

    #[rstest]
    fn unenroll_absent_pair_is_a_no_op(ledger: EnrollmentLedger) {
        assert_eq!(ledger.unenroll(STUDENT, CourseId::new(9)), ledger);
        assert_eq!(ledger.unenroll(UserId::new(7), COURSE), ledger);
    }

    #[rstest]
    fn draft_courses_reject_enrolment() {
        let empty = EnrollmentLedger::new();
        let err = empty
            .enroll(STUDENT, COURSE, PublicationStatus::Draft)
            .expect_err("draft course rejects enrolment");
        assert_eq!(
            err,
            MarketplaceError::EnrollmentRejected {
                course_id: COURSE,
                status: PublicationStatus::Draft,
            }
        );
        assert!(empty.is_empty());
    }

    #[rstest]
    fn enrolment_leaves_the_previous_ledger_untouched() {
        let empty = EnrollmentLedger::new();
        let next = empty
            .enroll(STUDENT, COURSE, PublicationStatus::Published)
            .expect("published course accepts enrolment");
        assert!(empty.is_empty());
        assert_eq!(next.student_count(), 1);
    }

    #[rstest]
    fn absent_student_has_no_courses() {
        let ledger = EnrollmentLedger::new();
        assert!(!ledger.is_enrolled(STUDENT, COURSE));
        assert!(ledger.courses_for(STUDENT).is_empty());
    }

    #[rstest]
    fn courses_are_listed_in_ascending_order(ledger: EnrollmentLedger) {
        let ledger = [CourseId::new(3), CourseId::new(2)]
            .into_iter()
            .try_fold(ledger, |acc, course| {
                acc.enroll(STUDENT, course, PublicationStatus::Published)
            })
            .expect("published courses accept enrolment");
        assert_eq!(
            ledger.courses_for(STUDENT),
            vec![CourseId::new(1), CourseId::new(2), CourseId::new(3)]
        );
    }

    #[rstest]
    fn enrollment_count_spans_students(ledger: EnrollmentLedger) {
        let ledger = ledger
            .enroll(UserId::new(5), COURSE, PublicationStatus::Published)
            .expect("published course accepts enrolment");
        assert_eq!(ledger.enrollment_count(COURSE), 2);
        assert_eq!(ledger.enrollment_count(CourseId::new(3)), 0);
    }
}
