use sqlx::PgConnection;

use crate::pkg::internal::adaptors::applications::spec::{ApplicationEntry, ApplicationStatus};
use crate::prelude::{Error, Result};

pub struct ApplicationMutator<'a> {
    conn: &'a mut PgConnection,
}

impl<'a> ApplicationMutator<'a> {
    pub fn new(conn: &'a mut PgConnection) -> Self {
        ApplicationMutator { conn }
    }

    pub async fn create(
        &mut self,
        student_id: i64,
        job_id: i64,
        cover_letter: &str,
        resume_url: Option<&str>,
    ) -> Result<ApplicationEntry> {
        let row = sqlx::query_as::<_, ApplicationEntry>(
            r#"
            INSERT INTO applications (student_id, job_id, cover_letter, resume_url)
            VALUES ($1, $2, $3, $4)
            RETURNING id, student_id, job_id, cover_letter, resume_url, status,
                      admin_notes, applied_at, reviewed_at, reviewed_by
            "#,
        )
        .bind(student_id)
        .bind(job_id)
        .bind(cover_letter)
        .bind(resume_url)
        .fetch_one(&mut *self.conn)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                Error::Conflict("you have already applied for this position".into())
            }
            _ => Error::from(e),
        })?;
        Ok(row)
    }

    pub async fn review(
        &mut self,
        id: i64,
        status: ApplicationStatus,
        admin_notes: Option<&str>,
        reviewed_by: i64,
    ) -> Result<Option<ApplicationEntry>> {
        let row = sqlx::query_as::<_, ApplicationEntry>(
            r#"
            UPDATE applications
            SET status = $2, admin_notes = $3, reviewed_by = $4, reviewed_at = CURRENT_TIMESTAMP
            WHERE id = $1
            RETURNING id, student_id, job_id, cover_letter, resume_url, status,
                      admin_notes, applied_at, reviewed_at, reviewed_by
            "#,
        )
        .bind(id)
        .bind(status)
        .bind(admin_notes)
        .bind(reviewed_by)
        .fetch_optional(&mut *self.conn)
        .await?;
        Ok(row)
    }

    pub async fn withdraw(&mut self, id: i64) -> Result<Option<ApplicationEntry>> {
        let row = sqlx::query_as::<_, ApplicationEntry>(
            r#"
            UPDATE applications
            SET status = 'withdrawn'
            WHERE id = $1
            RETURNING id, student_id, job_id, cover_letter, resume_url, status,
                      admin_notes, applied_at, reviewed_at, reviewed_by
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *self.conn)
        .await?;
        Ok(row)
    }
}
