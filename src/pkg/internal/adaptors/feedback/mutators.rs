use sqlx::PgConnection;

use crate::pkg::internal::adaptors::feedback::spec::FeedbackEntry;
use crate::prelude::Result;

pub struct FeedbackMutator<'a> {
    conn: &'a mut PgConnection,
}

impl<'a> FeedbackMutator<'a> {
    pub fn new(conn: &'a mut PgConnection) -> Self {
        FeedbackMutator { conn }
    }

    pub async fn create(
        &mut self,
        student_id: i64,
        job_id: i64,
        given_by: i64,
        rating: i32,
        comments: &str,
        performance_areas: Option<&str>,
    ) -> Result<FeedbackEntry> {
        let row = sqlx::query_as::<_, FeedbackEntry>(
            r#"
            INSERT INTO feedback (student_id, job_id, given_by, rating, comments, performance_areas)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, student_id, job_id, given_by, rating, comments, performance_areas, created_at
            "#,
        )
        .bind(student_id)
        .bind(job_id)
        .bind(given_by)
        .bind(rating)
        .bind(comments)
        .bind(performance_areas)
        .fetch_one(&mut *self.conn)
        .await?;
        Ok(row)
    }

    pub async fn delete(&mut self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM feedback WHERE id = $1")
            .bind(id)
            .execute(&mut *self.conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
