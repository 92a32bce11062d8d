use chrono::{Duration, NaiveDate, NaiveTime, Utc};
use sqlx::types::BigDecimal;
use sqlx::PgConnection;

use crate::conf::settings;
use crate::pkg::internal::adaptors::applications::spec::ApplicationStatus;
use crate::pkg::internal::adaptors::users::mutators::{NewUser, UserMutator};
use crate::pkg::internal::adaptors::users::spec::Role;
use crate::pkg::internal::adaptors::workhours::spec::{compute_hours, WorkHoursStatus};
use crate::pkg::internal::auth::hash_password;
use crate::pkg::server::state::{db_pool, GetTxn};
use crate::prelude::{Error, Result};

/// Loads a demonstration data set: one admin, a handful of students, open
/// postings and a realistic spread of applications, logged hours and
/// feedback. Does nothing when users already exist.
pub async fn apply() -> Result<()> {
    let pool = db_pool()?;
    let mut tx = pool.begin_txn().await?;

    let existing = sqlx::query_scalar::<_, i64>("SELECT count(*) FROM users")
        .fetch_one(&mut *tx)
        .await?;
    if existing > 0 {
        tracing::info!("users already present, skipping seed");
        return Ok(());
    }
    tracing::info!("seeding demo data for {}", &settings.service_name);

    let admin = user(&mut tx, "admin", "admin123", "admin@workstudy.edu",
        "System Administrator", Role::Admin, "Administration", "9876543210").await?;
    let student1 = user(&mut tx, "student", "student123", "student@workstudy.edu",
        "Test Student", Role::Student, "Computer Science", "9876543211").await?;
    let student2 = user(&mut tx, "rahul", "rahul1234", "rahul@workstudy.edu",
        "Rahul Sharma", Role::Student, "Electronics Engineering", "9876543212").await?;
    let student3 = user(&mut tx, "priya", "priya1234", "priya@workstudy.edu",
        "Priya Patel", Role::Student, "Mathematics", "9876543213").await?;

    let today = Utc::now().date_naive();
    let job1 = job(&mut tx, admin, "Library Assistant",
        "Assist librarians with book shelving, cataloging, and helping students find resources. Must be organized and detail-oriented.",
        "Central Library", "Main Library Building", "12.50", 15, 3, today + Duration::days(30)).await?;
    let job2 = job(&mut tx, admin, "Computer Lab Tutor",
        "Help students with programming assignments in Java, Python, and C++. Conduct walk-in tutoring sessions during lab hours.",
        "Computer Science", "CS Building Room 204", "15.00", 20, 2, today + Duration::days(25)).await?;
    let job3 = job(&mut tx, admin, "Research Assistant",
        "Assist faculty with ongoing physics experiments. Data collection, lab equipment maintenance, and preliminary analysis.",
        "Physics", "Physics Lab 101", "16.00", 10, 1, today + Duration::days(15)).await?;
    let job4 = job(&mut tx, admin, "Campus Tour Guide",
        "Lead prospective students and families on campus tours. Must have excellent communication skills and campus knowledge.",
        "Admissions", "Admissions Office", "13.00", 10, 5, today + Duration::days(35)).await?;

    application(&mut tx, student1, job1,
        "I love reading and organizing. I have worked in my school library for 2 years.",
        ApplicationStatus::Approved, Some(admin), Some("Great candidate, approved.")).await?;
    application(&mut tx, student1, job2,
        "I am proficient in Java and Python and enjoy teaching others.",
        ApplicationStatus::Pending, None, None).await?;
    application(&mut tx, student2, job2,
        "Experienced in Java, Python, and C. I tutored peers during my first year.",
        ApplicationStatus::Approved, Some(admin), Some("Strong technical skills.")).await?;
    application(&mut tx, student3, job3,
        "I'm a math major with a keen interest in physics research.",
        ApplicationStatus::Approved, Some(admin), Some("Good fit for the role.")).await?;
    application(&mut tx, student3, job4,
        "I know the campus well and enjoy interacting with new people!",
        ApplicationStatus::Rejected, Some(admin), Some("Position filled.")).await?;

    hours(&mut tx, student1, job1, today - Duration::days(7), (9, 0), (12, 0),
        "Shelved returned books and organized periodical section.",
        WorkHoursStatus::Approved, Some(admin), Some("Good work.")).await?;
    hours(&mut tx, student1, job1, today - Duration::days(5), (13, 0), (16, 30),
        "Updated catalog entries and helped students with research queries.",
        WorkHoursStatus::Approved, Some(admin), Some("Excellent service.")).await?;
    hours(&mut tx, student1, job1, today - Duration::days(2), (10, 0), (14, 0),
        "Managed front desk and processed new book arrivals.",
        WorkHoursStatus::Pending, None, None).await?;
    hours(&mut tx, student2, job2, today - Duration::days(6), (14, 0), (17, 0),
        "Tutored 5 students on Java data structures.",
        WorkHoursStatus::Approved, Some(admin), Some("Students gave positive feedback.")).await?;
    hours(&mut tx, student2, job2, today - Duration::days(1), (15, 0), (18, 0),
        "Conducted walk-in tutoring session on C++ pointers.",
        WorkHoursStatus::Pending, None, None).await?;
    hours(&mut tx, student3, job3, today - Duration::days(4), (9, 0), (12, 0),
        "Collected data from pendulum experiment.",
        WorkHoursStatus::Approved, Some(admin), Some("Accurate data collection.")).await?;

    feedback(&mut tx, student1, job1, admin, 5,
        "Outstanding dedication and reliability. Always punctual and takes initiative.",
        "Organization, Customer Service, Reliability").await?;
    feedback(&mut tx, student2, job2, admin, 4,
        "Strong technical knowledge. Students benefit a lot from tutoring sessions.",
        "Technical Skills, Communication, Patience").await?;
    feedback(&mut tx, student3, job3, admin, 4,
        "Meticulous and careful with equipment. Good at following research protocols.",
        "Attention to Detail, Lab Safety, Data Analysis").await?;

    tx.commit().await?;
    println!("Demo data seeded successfully");
    Ok(())
}

async fn user(
    conn: &mut PgConnection,
    username: &str,
    password: &str,
    email: &str,
    full_name: &str,
    role: Role,
    department: &str,
    phone: &str,
) -> Result<i64> {
    let password_hash = hash_password(password)?;
    let entry = UserMutator::new(conn)
        .create(NewUser {
            username,
            password_hash: &password_hash,
            email,
            full_name,
            role,
            phone: Some(phone),
            department: Some(department),
        })
        .await?;
    Ok(entry.id)
}

#[allow(clippy::too_many_arguments)]
async fn job(
    conn: &mut PgConnection,
    posted_by: i64,
    title: &str,
    description: &str,
    department: &str,
    location: &str,
    rate: &str,
    max_hours: i32,
    positions: i32,
    deadline: NaiveDate,
) -> Result<i64> {
    let rate: BigDecimal = rate
        .parse()
        .map_err(|_| Error::Internal(format!("bad seed rate {rate}")))?;
    let id = sqlx::query_scalar::<_, i64>(
        r#"
        INSERT INTO job_postings
            (title, description, department, location, hourly_rate, max_hours_per_week,
             total_positions, application_deadline, posted_by)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        RETURNING id
        "#,
    )
    .bind(title)
    .bind(description)
    .bind(department)
    .bind(location)
    .bind(rate)
    .bind(max_hours)
    .bind(positions)
    .bind(deadline)
    .bind(posted_by)
    .fetch_one(conn)
    .await?;
    Ok(id)
}

async fn application(
    conn: &mut PgConnection,
    student_id: i64,
    job_id: i64,
    cover_letter: &str,
    status: ApplicationStatus,
    reviewed_by: Option<i64>,
    admin_notes: Option<&str>,
) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO applications (student_id, job_id, cover_letter, status, admin_notes,
                                  reviewed_by, reviewed_at)
        VALUES ($1, $2, $3, $4, $5, $6, CASE WHEN $6 IS NULL THEN NULL ELSE now() END)
        "#,
    )
    .bind(student_id)
    .bind(job_id)
    .bind(cover_letter)
    .bind(status)
    .bind(admin_notes)
    .bind(reviewed_by)
    .execute(conn)
    .await?;
    Ok(())
}

#[allow(clippy::too_many_arguments)]
async fn hours(
    conn: &mut PgConnection,
    student_id: i64,
    job_id: i64,
    work_date: NaiveDate,
    start: (u32, u32),
    end: (u32, u32),
    description: &str,
    status: WorkHoursStatus,
    approved_by: Option<i64>,
    supervisor_notes: Option<&str>,
) -> Result<()> {
    let start = NaiveTime::from_hms_opt(start.0, start.1, 0)
        .ok_or_else(|| Error::Internal("bad seed start time".into()))?;
    let end = NaiveTime::from_hms_opt(end.0, end.1, 0)
        .ok_or_else(|| Error::Internal("bad seed end time".into()))?;
    let worked = compute_hours(start, end)?;
    sqlx::query(
        r#"
        INSERT INTO work_hours (student_id, job_id, work_date, start_time, end_time, hours_worked,
                                description, status, supervisor_notes, approved_by, approved_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10,
                CASE WHEN $10 IS NULL THEN NULL ELSE now() END)
        "#,
    )
    .bind(student_id)
    .bind(job_id)
    .bind(work_date)
    .bind(start)
    .bind(end)
    .bind(worked)
    .bind(description)
    .bind(status)
    .bind(supervisor_notes)
    .bind(approved_by)
    .execute(conn)
    .await?;
    Ok(())
}

async fn feedback(
    conn: &mut PgConnection,
    student_id: i64,
    job_id: i64,
    given_by: i64,
    rating: i32,
    comments: &str,
    performance_areas: &str,
) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO feedback (student_id, job_id, given_by, rating, comments, performance_areas)
        VALUES ($1, $2, $3, $4, $5, $6)
        "#,
    )
    .bind(student_id)
    .bind(job_id)
    .bind(given_by)
    .bind(rating)
    .bind(comments)
    .bind(performance_areas)
    .execute(conn)
    .await?;
    Ok(())
}
