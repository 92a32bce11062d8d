use sqlx::PgConnection;

use crate::pkg::internal::adaptors::dashboard::spec::{AdminDashboard, StudentDashboard};
use crate::prelude::Result;

pub struct DashboardSelector<'a> {
    conn: &'a mut PgConnection,
}

impl<'a> DashboardSelector<'a> {
    pub fn new(conn: &'a mut PgConnection) -> Self {
        DashboardSelector { conn }
    }

    pub async fn admin(&mut self) -> Result<AdminDashboard> {
        let row = sqlx::query_as::<_, AdminDashboard>(
            r#"
            SELECT
                (SELECT count(*) FROM users WHERE role = 'student') AS total_students,
                (SELECT count(*) FROM job_postings) AS total_jobs,
                (SELECT count(*) FROM job_postings WHERE status = 'active') AS active_jobs,
                (SELECT count(*) FROM applications) AS total_applications,
                (SELECT count(*) FROM applications WHERE status = 'pending') AS pending_applications,
                (SELECT coalesce(sum(hours_worked), 0) FROM work_hours WHERE status = 'approved')
                    AS total_work_hours
            "#,
        )
        .fetch_one(&mut *self.conn)
        .await?;
        Ok(row)
    }

    pub async fn student(&mut self, student_id: i64) -> Result<StudentDashboard> {
        let row = sqlx::query_as::<_, StudentDashboard>(
            r#"
            SELECT
                (SELECT count(*) FROM applications WHERE student_id = $1) AS my_applications,
                (SELECT coalesce(sum(hours_worked), 0) FROM work_hours
                    WHERE student_id = $1 AND status = 'approved') AS my_work_hours,
                (SELECT count(*) FROM feedback WHERE student_id = $1) AS my_feedback,
                (SELECT count(*) FROM job_postings WHERE status = 'active') AS available_jobs
            "#,
        )
        .bind(student_id)
        .fetch_one(&mut *self.conn)
        .await?;
        Ok(row)
    }
}
