use sqlx::PgConnection;

use crate::pkg::internal::adaptors::feedback::spec::FeedbackDetails;
use crate::prelude::Result;

const DETAILS: &str = r#"
    SELECT f.id, f.student_id, s.full_name AS student_name,
           f.job_id, j.title AS job_title,
           f.given_by, g.full_name AS given_by_name,
           f.rating, f.comments, f.performance_areas, f.created_at
    FROM feedback f
    JOIN users s ON s.id = f.student_id
    JOIN job_postings j ON j.id = f.job_id
    JOIN users g ON g.id = f.given_by
"#;

pub struct FeedbackSelector<'a> {
    conn: &'a mut PgConnection,
}

impl<'a> FeedbackSelector<'a> {
    pub fn new(conn: &'a mut PgConnection) -> Self {
        FeedbackSelector { conn }
    }

    pub async fn get_by_id(&mut self, id: i64) -> Result<Option<FeedbackDetails>> {
        let sql = format!("{DETAILS} WHERE f.id = $1");
        let row = sqlx::query_as::<_, FeedbackDetails>(&sql)
            .bind(id)
            .fetch_optional(&mut *self.conn)
            .await?;
        Ok(row)
    }

    pub async fn get_all(&mut self) -> Result<Vec<FeedbackDetails>> {
        let sql = format!("{DETAILS} ORDER BY f.created_at DESC");
        let rows = sqlx::query_as::<_, FeedbackDetails>(&sql)
            .fetch_all(&mut *self.conn)
            .await?;
        Ok(rows)
    }

    pub async fn get_by_student(&mut self, student_id: i64) -> Result<Vec<FeedbackDetails>> {
        let sql = format!("{DETAILS} WHERE f.student_id = $1 ORDER BY f.created_at DESC");
        let rows = sqlx::query_as::<_, FeedbackDetails>(&sql)
            .bind(student_id)
            .fetch_all(&mut *self.conn)
            .await?;
        Ok(rows)
    }

    pub async fn get_by_job(&mut self, job_id: i64) -> Result<Vec<FeedbackDetails>> {
        let sql = format!("{DETAILS} WHERE f.job_id = $1 ORDER BY f.created_at DESC");
        let rows = sqlx::query_as::<_, FeedbackDetails>(&sql)
            .bind(job_id)
            .fetch_all(&mut *self.conn)
            .await?;
        Ok(rows)
    }
}
