use sqlx::PgConnection;

use crate::pkg::internal::adaptors::jobs::spec::{JobEntry, JobStatus};
use crate::prelude::Result;

pub struct JobSelector<'a> {
    conn: &'a mut PgConnection,
}

impl<'a> JobSelector<'a> {
    pub fn new(conn: &'a mut PgConnection) -> Self {
        JobSelector { conn }
    }

    pub async fn get_by_id(&mut self, id: i64) -> Result<Option<JobEntry>> {
        let row = sqlx::query_as::<_, JobEntry>(
            "SELECT id, title, description, department, location, hourly_rate, max_hours_per_week,
                    total_positions, filled_positions, application_deadline, status, posted_by,
                    created_at, updated_at
             FROM job_postings WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&mut *self.conn)
        .await?;
        Ok(row)
    }

    pub async fn get_all(&mut self) -> Result<Vec<JobEntry>> {
        let rows = sqlx::query_as::<_, JobEntry>(
            "SELECT id, title, description, department, location, hourly_rate, max_hours_per_week,
                    total_positions, filled_positions, application_deadline, status, posted_by,
                    created_at, updated_at
             FROM job_postings ORDER BY created_at DESC",
        )
        .fetch_all(&mut *self.conn)
        .await?;
        Ok(rows)
    }

    pub async fn get_by_status(&mut self, status: JobStatus) -> Result<Vec<JobEntry>> {
        let rows = sqlx::query_as::<_, JobEntry>(
            "SELECT id, title, description, department, location, hourly_rate, max_hours_per_week,
                    total_positions, filled_positions, application_deadline, status, posted_by,
                    created_at, updated_at
             FROM job_postings WHERE status = $1 ORDER BY created_at DESC",
        )
        .bind(status)
        .fetch_all(&mut *self.conn)
        .await?;
        Ok(rows)
    }

    pub async fn get_by_department(&mut self, department: &str) -> Result<Vec<JobEntry>> {
        let rows = sqlx::query_as::<_, JobEntry>(
            "SELECT id, title, description, department, location, hourly_rate, max_hours_per_week,
                    total_positions, filled_positions, application_deadline, status, posted_by,
                    created_at, updated_at
             FROM job_postings WHERE department = $1 ORDER BY created_at DESC",
        )
        .bind(department)
        .fetch_all(&mut *self.conn)
        .await?;
        Ok(rows)
    }
}
