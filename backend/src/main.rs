//! `learnify` command-line front end for the in-memory course marketplace.
//!
//! Each invocation loads the configured seed, signs in the optional actor,
//! runs one command against the marketplace and prints the resulting view to
//! stdout. Diagnostics go to stderr through `tracing`.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::ffi::OsString;
use std::io::{self, Write};
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};
use color_eyre::eyre::{Context, Result, eyre};
use learnify_backend::domain::{
    CatalogueQuery, Course, CourseDraft, CourseId, CourseType, DeliveryFilter, MarketplaceState,
    Role, User,
};
use learnify_backend::example_data::{ExampleDataSettings, load_marketplace_on_startup};
use ortho_config::OrthoConfig;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

/// `learnify` command arguments.
#[derive(Debug, Parser)]
#[command(
    name = "learnify",
    about = "Browse, enrol in and author courses on the Learnify demo marketplace",
    version
)]
struct Cli {
    /// Human-readable log output instead of JSON.
    #[arg(long, global = true)]
    pretty: bool,
    #[command(flatten)]
    session: SessionArgs,
    #[command(flatten)]
    dataset: DatasetArgs,
    #[command(subcommand)]
    command: Command,
}

/// Who is acting. No password: the demo trusts email and role.
#[derive(Debug, Args)]
struct SessionArgs {
    /// Email of the account to act as.
    #[arg(long = "as", value_name = "email", global = true, requires = "role")]
    email: Option<String>,
    /// Role of the account to act as (student, teacher or admin).
    #[arg(long, value_name = "role", global = true, requires = "email")]
    role: Option<Role>,
}

/// Dataset selection. Overrides `EXAMPLE_DATA_*` and config files.
#[derive(Debug, Args)]
struct DatasetArgs {
    /// Seed to load from the registry.
    #[arg(long = "seed", value_name = "name", global = true)]
    seed_name: Option<String>,
    /// Seed registry file.
    #[arg(long = "registry", value_name = "path", global = true)]
    registry_path: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List published courses.
    Catalogue {
        /// Case-insensitive text matched against title and description.
        #[arg(long, default_value = "")]
        query: String,
        /// Restrict to one delivery kind (all, live or recorded).
        #[arg(long, default_value = "all")]
        delivery: DeliveryFilter,
    },
    /// Show one course.
    Course { id: u64 },
    /// List the signed-in student's enrolments.
    MyCourses,
    /// List every course the signed-in teacher owns.
    Console,
    /// Enrol the signed-in student in a course.
    Enroll { id: u64 },
    /// Drop the signed-in user's enrolment in a course.
    Unenroll { id: u64 },
    /// Publish or unpublish a course the signed-in teacher owns.
    TogglePublish { id: u64 },
    /// Author a new course as the signed-in teacher.
    CreateCourse(CreateCourseArgs),
}

#[derive(Debug, Args)]
struct CreateCourseArgs {
    #[arg(long)]
    title: String,
    #[arg(long)]
    description: Option<String>,
    /// Price in cents.
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    price_cents: i64,
    /// Deliver as a scheduled live session instead of a recording.
    #[arg(long)]
    live: bool,
    /// RFC 3339 start time for live courses.
    #[arg(long, value_name = "timestamp")]
    schedule: Option<DateTime<Utc>>,
    #[arg(long, allow_negative_numbers = true)]
    capacity: Option<i64>,
    #[arg(long, value_name = "url")]
    meeting_link: Option<String>,
    #[arg(long, value_name = "url")]
    image_url: Option<String>,
    /// Keep the course out of the catalogue until published.
    #[arg(long)]
    draft: bool,
}

impl From<CreateCourseArgs> for CourseDraft {
    fn from(args: CreateCourseArgs) -> Self {
        Self {
            teacher_id: None,
            title: args.title,
            description: args.description,
            base_price_cents: args.price_cents,
            course_type: if args.live {
                CourseType::Live
            } else {
                CourseType::Recorded
            },
            schedule_utc: args.schedule,
            max_capacity: args.capacity,
            meeting_link: args.meeting_link,
            image_url: args.image_url,
            publish_immediately: !args.draft,
        }
    }
}

fn init_tracing(pretty: bool) {
    let builder = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr);
    let result = if pretty {
        builder.compact().try_init()
    } else {
        builder.json().try_init()
    };
    if let Err(e) = result {
        warn!(error = %e, "tracing init failed");
    }
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    init_tracing(cli.pretty);

    // Flags are parsed by clap above; ortho_config only reads files and env.
    let settings = ExampleDataSettings::load_from_iter([OsString::from("learnify")])
        .map_err(|err| eyre!("failed to load example data settings: {err}"))?
        .with_overrides(cli.dataset.seed_name, cli.dataset.registry_path);
    let state = load_marketplace_on_startup(&settings).wrap_err("failed to load marketplace")?;

    let actor = match (&cli.session.email, cli.session.role) {
        (Some(email), Some(role)) => Some(state.sign_in(email, role)?),
        _ => None,
    };

    let mut out = io::stdout().lock();
    run(cli.command, &state, actor, &mut out)
}

fn require_actor<'a>(actor: Option<&'a User>, purpose: &str) -> Result<&'a User> {
    actor.ok_or_else(|| eyre!("sign in with --as <email> --role <role> to {purpose}"))
}

fn run(
    command: Command,
    state: &MarketplaceState,
    actor: Option<&User>,
    out: &mut impl Write,
) -> Result<()> {
    match command {
        Command::Catalogue { query, delivery } => {
            let courses = state.catalogue(&CatalogueQuery::new(query, delivery));
            writeln!(
                out,
                "{} of {} published courses",
                courses.len(),
                state.published_count()
            )?;
            for course in courses {
                write_course_line(out, state, course)?;
            }
        }
        Command::Course { id } => {
            let course = state.visible_course(CourseId::new(id), actor)?;
            write_course_detail(out, state, course, actor)?;
        }
        Command::MyCourses => {
            let actor = require_actor(actor, "list your courses")?;
            let courses = state.enrolled_courses(actor)?;
            if courses.is_empty() {
                writeln!(out, "{} has no enrolments", actor.full_name())?;
            }
            for course in courses {
                write_course_line(out, state, course)?;
            }
        }
        Command::Console => {
            let actor = require_actor(actor, "open the teacher console")?;
            for course in state.teacher_console(actor)? {
                write_course_line(out, state, course)?;
                writeln!(out, "    {} enrolled", state.enrollment_count(course.id()))?;
            }
        }
        Command::Enroll { id } => {
            let actor = require_actor(actor, "enrol")?;
            let next = state.enroll(actor, CourseId::new(id))?;
            writeln!(out, "Enrolled in course {id}")?;
            for course in next.enrolled_courses(actor)? {
                write_course_line(out, &next, course)?;
            }
        }
        Command::Unenroll { id } => {
            let actor = require_actor(actor, "unenrol")?;
            let next = state.unenroll(actor, CourseId::new(id));
            writeln!(
                out,
                "Not enrolled in course {id} ({} enrolments remain)",
                next.ledger().courses_for(actor.id()).len()
            )?;
        }
        Command::TogglePublish { id } => {
            let actor = require_actor(actor, "change a course's publication")?;
            let next = state.toggle_publish(actor, CourseId::new(id))?;
            let course = next.visible_course(CourseId::new(id), Some(actor))?;
            writeln!(out, "Course {id} is now {}", course.status())?;
        }
        Command::CreateCourse(args) => {
            let actor = require_actor(actor, "create a course")?;
            let (next, course_id) = state.create_course(actor, &CourseDraft::from(args))?;
            let course = next.visible_course(course_id, Some(actor))?;
            writeln!(out, "Created course {course_id}")?;
            write_course_detail(out, &next, course, Some(actor))?;
        }
    }
    Ok(())
}

fn write_course_line(
    out: &mut impl Write,
    state: &MarketplaceState,
    course: &Course,
) -> Result<()> {
    let teacher = state
        .teacher_of(course)
        .map_or_else(|| "unknown teacher".to_owned(), User::full_name);
    let schedule = course
        .delivery()
        .schedule_utc()
        .map(|at| format!("  {}", at.format("%Y-%m-%d %H:%M UTC")))
        .unwrap_or_default();
    writeln!(
        out,
        "#{:<3} {}  [{}]  {}{}  by {}  ({})",
        course.id(),
        course.title(),
        course.delivery().label(),
        course.base_price(),
        schedule,
        teacher,
        course.status()
    )?;
    Ok(())
}

fn write_course_detail(
    out: &mut impl Write,
    state: &MarketplaceState,
    course: &Course,
    viewer: Option<&User>,
) -> Result<()> {
    write_course_line(out, state, course)?;
    if let Some(description) = course.description() {
        writeln!(out, "    {description}")?;
    }
    if let Some(capacity) = course.max_capacity() {
        writeln!(out, "    Capacity: {capacity}")?;
    }
    if let Some(image_url) = course.image_url() {
        writeln!(out, "    Image: {image_url}")?;
    }
    // Meeting links are for participants only.
    let participant = viewer.is_some_and(|user| {
        course.is_owned_by(user.id()) || state.is_enrolled(user, course.id())
    });
    if let Some(link) = course.delivery().meeting_link().filter(|_| participant) {
        writeln!(out, "    Join: {link}")?;
    }
    Ok(())
}
