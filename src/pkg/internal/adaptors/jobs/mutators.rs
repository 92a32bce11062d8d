use sqlx::PgConnection;

use crate::pkg::internal::adaptors::jobs::spec::{JobEntry, JobStatus};
use crate::pkg::server::handlers::jobs::JobPostingInput;
use crate::prelude::Result;

pub struct JobMutator<'a> {
    conn: &'a mut PgConnection,
}

impl<'a> JobMutator<'a> {
    pub fn new(conn: &'a mut PgConnection) -> Self {
        JobMutator { conn }
    }

    pub async fn create(&mut self, job: &JobPostingInput, posted_by: i64) -> Result<JobEntry> {
        let row = sqlx::query_as::<_, JobEntry>(
            r#"
            INSERT INTO job_postings
                (title, description, department, location, hourly_rate, max_hours_per_week,
                 total_positions, application_deadline, posted_by)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING id, title, description, department, location, hourly_rate,
                      max_hours_per_week, total_positions, filled_positions,
                      application_deadline, status, posted_by, created_at, updated_at
            "#,
        )
        .bind(&job.title)
        .bind(&job.description)
        .bind(&job.department)
        .bind(&job.location)
        .bind(&job.hourly_rate)
        .bind(job.max_hours_per_week)
        .bind(job.total_positions)
        .bind(job.application_deadline)
        .bind(posted_by)
        .fetch_one(&mut *self.conn)
        .await?;
        Ok(row)
    }

    /// Full replace of the posting fields; the filled counter and status are
    /// managed by the approval path and are left untouched here.
    pub async fn update(&mut self, id: i64, job: &JobPostingInput) -> Result<Option<JobEntry>> {
        let row = sqlx::query_as::<_, JobEntry>(
            r#"
            UPDATE job_postings
            SET title = $2, description = $3, department = $4, location = $5,
                hourly_rate = $6, max_hours_per_week = $7, total_positions = $8,
                application_deadline = $9, updated_at = CURRENT_TIMESTAMP
            WHERE id = $1
            RETURNING id, title, description, department, location, hourly_rate,
                      max_hours_per_week, total_positions, filled_positions,
                      application_deadline, status, posted_by, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(&job.title)
        .bind(&job.description)
        .bind(&job.department)
        .bind(&job.location)
        .bind(&job.hourly_rate)
        .bind(job.max_hours_per_week)
        .bind(job.total_positions)
        .bind(job.application_deadline)
        .fetch_optional(&mut *self.conn)
        .await?;
        Ok(row)
    }

    pub async fn set_status(&mut self, id: i64, status: JobStatus) -> Result<Option<JobEntry>> {
        let row = sqlx::query_as::<_, JobEntry>(
            r#"
            UPDATE job_postings
            SET status = $2, updated_at = CURRENT_TIMESTAMP
            WHERE id = $1
            RETURNING id, title, description, department, location, hourly_rate,
                      max_hours_per_week, total_positions, filled_positions,
                      application_deadline, status, posted_by, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(status)
        .fetch_optional(&mut *self.conn)
        .await?;
        Ok(row)
    }

    /// Bumps the filled counter after an approval; flips the posting to
    /// filled once every position is taken.
    pub async fn increment_filled(&mut self, id: i64) -> Result<Option<JobEntry>> {
        let row = sqlx::query_as::<_, JobEntry>(
            r#"
            UPDATE job_postings
            SET filled_positions = filled_positions + 1,
                status = CASE
                    WHEN filled_positions + 1 >= total_positions THEN 'filled'::job_status
                    ELSE status
                END,
                updated_at = CURRENT_TIMESTAMP
            WHERE id = $1
            RETURNING id, title, description, department, location, hourly_rate,
                      max_hours_per_week, total_positions, filled_positions,
                      application_deadline, status, posted_by, created_at, updated_at
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *self.conn)
        .await?;
        Ok(row)
    }

    pub async fn delete(&mut self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM job_postings WHERE id = $1")
            .bind(id)
            .execute(&mut *self.conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
