//! Tests for the course aggregate and its value objects.

use super::*;
use chrono::TimeZone;
use rstest::{fixture, rstest};
use serde_json::json;

#[fixture]
fn schedule() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 11, 1, 17, 0, 0)
        .single()
        .expect("valid timestamp")
}

#[fixture]
fn live_course(schedule: DateTime<Utc>) -> Course {
    Course::new(
        CourseId::new(1),
        UserId::new(1),
        CourseTitle::new("ASP.NET Core for Beginners").expect("valid title"),
        Price::from_cents(4999),
        Delivery::live(schedule),
    )
    .with_capacity(Capacity::try_new(50).expect("valid capacity"))
}

#[rstest]
#[case(0, "$0.00")]
#[case(5, "$0.05")]
#[case(2900, "$29.00")]
#[case(4999, "$49.99")]
#[case(100_000, "$1,000.00")]
#[case(123_456_789, "$1,234,567.89")]
fn price_formats_as_us_dollars(#[case] cents: u64, #[case] expected: &str) {
    assert_eq!(Price::from_cents(cents).to_string(), expected);
}

#[rstest]
fn negative_prices_are_rejected() {
    assert_eq!(
        Price::try_from_cents(-5),
        Err(CourseValidationError::PriceNegative)
    );
    assert_eq!(Price::try_from_cents(0), Ok(Price::FREE));
}

#[rstest]
#[case(0)]
#[case(-1)]
fn non_positive_capacity_is_rejected(#[case] seats: i64) {
    assert_eq!(
        Capacity::try_new(seats),
        Err(CourseValidationError::CapacityMustBePositive)
    );
}

#[rstest]
fn capacity_displays_seat_count() {
    let capacity = Capacity::try_new(200).expect("valid capacity");
    assert_eq!(capacity.seats(), 200);
    assert_eq!(capacity.to_string(), "200 seats");
}

#[rstest]
#[case("")]
#[case("   ")]
fn blank_titles_are_rejected(#[case] title: &str) {
    assert_eq!(
        CourseTitle::new(title),
        Err(CourseValidationError::TitleRequired)
    );
}

#[rstest]
fn titles_are_stored_trimmed() {
    let title = CourseTitle::new("  SQL Essentials ").expect("valid title");
    assert_eq!(title.as_ref(), "SQL Essentials");
}

#[rstest]
fn recorded_delivery_has_no_schedule() {
    let delivery = Delivery::Recorded;
    assert!(!delivery.is_live());
    assert!(delivery.schedule_utc().is_none());
    assert!(delivery.meeting_link().is_none());
    assert_eq!(delivery.label(), "Recorded");
}

#[rstest]
fn live_delivery_exposes_schedule(schedule: DateTime<Utc>) {
    let delivery = Delivery::live(schedule);
    assert!(delivery.is_live());
    assert_eq!(delivery.schedule_utc(), Some(schedule));
    assert_eq!(delivery.label(), "Live");
}

#[rstest]
fn new_courses_start_published(live_course: Course) {
    assert!(live_course.is_published());
    assert!(live_course.is_owned_by(UserId::new(1)));
    assert!(!live_course.is_owned_by(UserId::new(3)));
}

#[rstest]
fn blank_description_is_dropped(live_course: Course) {
    let course = live_course.with_description("   ");
    assert!(course.description().is_none());
}

#[rstest]
fn course_id_next_is_monotonic() {
    assert_eq!(CourseId::new(5).next(), CourseId::new(6));
    assert_eq!(CourseId::new(u64::MAX).next(), CourseId::new(u64::MAX));
}

#[rstest]
fn serializes_delivery_inline(live_course: Course) {
    let value = serde_json::to_value(&live_course).expect("serialize course");
    assert_eq!(
        value,
        json!({
            "id": 1,
            "teacherId": 1,
            "title": "ASP.NET Core for Beginners",
            "basePrice": 4999,
            "type": "live",
            "scheduleUtc": "2026-11-01T17:00:00Z",
            "maxCapacity": 50,
            "status": "published",
        })
    );
}

#[rstest]
fn deserializes_recorded_course() {
    let payload = json!({
        "id": 2,
        "teacherId": 3,
        "title": "SQL Schema Design Essentials",
        "basePrice": 2900,
        "type": "recorded",
        "status": "draft",
    });
    let course: Course = serde_json::from_value(payload).expect("valid course");
    assert_eq!(course.delivery(), &Delivery::Recorded);
    assert!(!course.is_published());
}

#[rstest]
#[case(
    json!({"type": "recorded", "scheduleUtc": "2026-11-01T17:00:00Z"}),
    CourseValidationError::RecordedForbidsSchedule
)]
#[case(json!({"type": "live"}), CourseValidationError::LiveRequiresSchedule)]
fn deserialising_rejects_mismatched_schedules(
    #[case] delivery: serde_json::Value,
    #[case] expected: CourseValidationError,
) {
    let mut payload = json!({
        "id": 4,
        "teacherId": 1,
        "title": "Evening SQL Clinic",
        "basePrice": 1500,
        "status": "published",
    });
    if let (Some(fields), Some(extra)) = (payload.as_object_mut(), delivery.as_object()) {
        fields.extend(extra.clone());
    }
    let err = serde_json::from_value::<Course>(payload).expect_err("mismatched schedule");
    assert!(err.to_string().contains(&expected.to_string()), "{err}");
}

#[rstest]
fn deserialised_live_course_keeps_relative_meeting_link(schedule: DateTime<Utc>) {
    let payload = json!({
        "id": 1,
        "teacherId": 1,
        "title": "ASP.NET Core for Beginners",
        "basePrice": 4999,
        "type": "live",
        "scheduleUtc": "2026-11-01T17:00:00Z",
        "meetingLink": "teams/aspnet",
        "imageUrl": "images/aspnet.png",
        "status": "published",
    });
    let course: Course = serde_json::from_value(payload).expect("valid course");
    assert_eq!(course.delivery().schedule_utc(), Some(schedule));
    assert_eq!(course.delivery().meeting_link(), Some("teams/aspnet"));
    assert_eq!(course.image_url(), Some("images/aspnet.png"));
}

#[rstest]
fn serialised_courses_read_back_unchanged(live_course: Course) {
    let course = live_course
        .with_description("Build web APIs with C#.")
        .with_status(PublicationStatus::Draft);
    let value = serde_json::to_value(&course).expect("serialize course");
    let back: Course = serde_json::from_value(value).expect("deserialize course");
    assert_eq!(back, course);
}
