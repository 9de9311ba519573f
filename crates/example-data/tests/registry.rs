//! Integration tests for the seed registry.
//!
//! These tests cover file I/O and the bundled demo registry shipped with the
//! backend.

#![expect(
    clippy::expect_used,
    reason = "test code uses expect for clear failure messages"
)]

use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use example_data::{CourseStatusSeed, CourseTypeSeed, RegistryError, RoleSeed, SeedRegistry};

const VALID_JSON: &str = r#"{
    "version": 1,
    "seeds": [{
        "name": "tiny",
        "users": [
            {"id": 1, "name": "Esma", "email": "esma@example.com", "role": "teacher"}
        ],
        "courses": [
            {"id": 1, "teacherId": 1, "title": "Intro", "basePriceCents": 0, "type": "recorded"}
        ]
    }]
}"#;

fn bundled_registry_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("backend")
        .join("fixtures")
        .join("example-data")
        .join("seeds.json")
}

#[test]
fn loads_registry_from_file() {
    let path = unique_temp_path("seeds.json");
    fs::write(&path, VALID_JSON).expect("write registry file");

    let registry = SeedRegistry::from_file(&path).expect("load registry");
    assert_eq!(registry.seeds().len(), 1);
    assert!(registry.find_seed("tiny").is_ok());

    if let Some(parent) = path.parent() {
        #[expect(
            clippy::let_underscore_must_use,
            reason = "explicitly ignore cleanup failures in test teardown"
        )]
        let _ = fs::remove_dir_all(parent);
    }
}

#[test]
fn missing_file_reports_io_error() {
    let path = unique_temp_path("absent.json");

    let result = SeedRegistry::from_file(&path);

    match result {
        Err(RegistryError::IoError { path: reported, .. }) => assert_eq!(reported, path),
        other => panic!("Expected IoError, got: {other:?}"),
    }
}

#[test]
fn bundled_demo_seed_mirrors_the_mock_marketplace() {
    let registry = SeedRegistry::from_file(&bundled_registry_path()).expect("bundled registry");
    let seed = registry.find_seed("learnify-demo").expect("demo seed");

    let teachers = seed
        .users()
        .iter()
        .filter(|user| user.role == RoleSeed::Teacher)
        .count();
    let students = seed
        .users()
        .iter()
        .filter(|user| user.role == RoleSeed::Student)
        .count();
    assert_eq!(teachers, 2);
    assert_eq!(students, 1);

    assert_eq!(seed.courses().len(), 3);
    assert!(
        seed.courses()
            .iter()
            .all(|course| course.status == CourseStatusSeed::Published)
    );
    assert!(seed.courses().iter().all(|course| {
        (course.course_type == CourseTypeSeed::Live) == course.schedule_utc.is_some()
    }));

    let enrollment = seed.enrollments().first().expect("one enrolment");
    assert_eq!(enrollment.student_id, 2);
    assert_eq!(enrollment.course_ids, vec![1]);
}

fn unique_temp_path(file_name: &str) -> PathBuf {
    static TEMP_COUNTER: AtomicUsize = AtomicUsize::new(0);
    let counter = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos())
        .unwrap_or(0);
    let dir = std::env::temp_dir()
        .join("example-data-tests")
        .join(format!("seed-registry-{suffix}-{counter}"));
    fs::create_dir_all(&dir).expect("create temp dir");
    dir.join(file_name)
}
