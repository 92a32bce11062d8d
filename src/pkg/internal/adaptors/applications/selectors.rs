use sqlx::PgConnection;

use crate::pkg::internal::adaptors::applications::spec::{ApplicationDetails, ApplicationStatus};
use crate::prelude::Result;

const DETAILS: &str = r#"
    SELECT a.id, a.student_id, s.full_name AS student_name, s.email AS student_email,
           a.job_id, j.title AS job_title, j.department AS job_department,
           a.cover_letter, a.resume_url, a.status, a.admin_notes,
           a.applied_at, a.reviewed_at, a.reviewed_by
    FROM applications a
    JOIN users s ON s.id = a.student_id
    JOIN job_postings j ON j.id = a.job_id
"#;

pub struct ApplicationSelector<'a> {
    conn: &'a mut PgConnection,
}

impl<'a> ApplicationSelector<'a> {
    pub fn new(conn: &'a mut PgConnection) -> Self {
        ApplicationSelector { conn }
    }

    pub async fn get_by_id(&mut self, id: i64) -> Result<Option<ApplicationDetails>> {
        let sql = format!("{DETAILS} WHERE a.id = $1");
        let row = sqlx::query_as::<_, ApplicationDetails>(&sql)
            .bind(id)
            .fetch_optional(&mut *self.conn)
            .await?;
        Ok(row)
    }

    pub async fn get_all(&mut self) -> Result<Vec<ApplicationDetails>> {
        let sql = format!("{DETAILS} ORDER BY a.applied_at DESC");
        let rows = sqlx::query_as::<_, ApplicationDetails>(&sql)
            .fetch_all(&mut *self.conn)
            .await?;
        Ok(rows)
    }

    pub async fn get_by_student(&mut self, student_id: i64) -> Result<Vec<ApplicationDetails>> {
        let sql = format!("{DETAILS} WHERE a.student_id = $1 ORDER BY a.applied_at DESC");
        let rows = sqlx::query_as::<_, ApplicationDetails>(&sql)
            .bind(student_id)
            .fetch_all(&mut *self.conn)
            .await?;
        Ok(rows)
    }

    pub async fn get_by_job(&mut self, job_id: i64) -> Result<Vec<ApplicationDetails>> {
        let sql = format!("{DETAILS} WHERE a.job_id = $1 ORDER BY a.applied_at DESC");
        let rows = sqlx::query_as::<_, ApplicationDetails>(&sql)
            .bind(job_id)
            .fetch_all(&mut *self.conn)
            .await?;
        Ok(rows)
    }

    pub async fn get_by_status(
        &mut self,
        status: ApplicationStatus,
    ) -> Result<Vec<ApplicationDetails>> {
        let sql = format!("{DETAILS} WHERE a.status = $1 ORDER BY a.applied_at DESC");
        let rows = sqlx::query_as::<_, ApplicationDetails>(&sql)
            .bind(status)
            .fetch_all(&mut *self.conn)
            .await?;
        Ok(rows)
    }

    pub async fn exists_for(&mut self, student_id: i64, job_id: i64) -> Result<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM applications WHERE student_id = $1 AND job_id = $2)",
        )
        .bind(student_id)
        .bind(job_id)
        .fetch_one(&mut *self.conn)
        .await?;
        Ok(exists)
    }
}
