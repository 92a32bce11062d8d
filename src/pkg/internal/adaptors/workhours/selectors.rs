use chrono::NaiveDate;
use sqlx::types::BigDecimal;
use sqlx::PgConnection;

use crate::pkg::internal::adaptors::workhours::spec::WorkHoursDetails;
use crate::prelude::Result;

const DETAILS: &str = r#"
    SELECT w.id, w.student_id, s.full_name AS student_name,
           w.job_id, j.title AS job_title,
           w.work_date, w.start_time, w.end_time, w.hours_worked, w.description,
           w.status, w.supervisor_notes, w.approved_by, w.approved_at, w.created_at
    FROM work_hours w
    JOIN users s ON s.id = w.student_id
    JOIN job_postings j ON j.id = w.job_id
"#;

pub struct WorkHoursSelector<'a> {
    conn: &'a mut PgConnection,
}

impl<'a> WorkHoursSelector<'a> {
    pub fn new(conn: &'a mut PgConnection) -> Self {
        WorkHoursSelector { conn }
    }

    pub async fn get_by_id(&mut self, id: i64) -> Result<Option<WorkHoursDetails>> {
        let sql = format!("{DETAILS} WHERE w.id = $1");
        let row = sqlx::query_as::<_, WorkHoursDetails>(&sql)
            .bind(id)
            .fetch_optional(&mut *self.conn)
            .await?;
        Ok(row)
    }

    pub async fn get_all(&mut self) -> Result<Vec<WorkHoursDetails>> {
        let sql = format!("{DETAILS} ORDER BY w.work_date DESC, w.start_time DESC");
        let rows = sqlx::query_as::<_, WorkHoursDetails>(&sql)
            .fetch_all(&mut *self.conn)
            .await?;
        Ok(rows)
    }

    pub async fn get_by_student(&mut self, student_id: i64) -> Result<Vec<WorkHoursDetails>> {
        let sql = format!("{DETAILS} WHERE w.student_id = $1 ORDER BY w.work_date DESC, w.start_time DESC");
        let rows = sqlx::query_as::<_, WorkHoursDetails>(&sql)
            .bind(student_id)
            .fetch_all(&mut *self.conn)
            .await?;
        Ok(rows)
    }

    pub async fn get_by_job(&mut self, job_id: i64) -> Result<Vec<WorkHoursDetails>> {
        let sql = format!("{DETAILS} WHERE w.job_id = $1 ORDER BY w.work_date DESC, w.start_time DESC");
        let rows = sqlx::query_as::<_, WorkHoursDetails>(&sql)
            .bind(job_id)
            .fetch_all(&mut *self.conn)
            .await?;
        Ok(rows)
    }

    pub async fn get_by_date_range(
        &mut self,
        student_id: i64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<WorkHoursDetails>> {
        let sql = format!(
            "{DETAILS} WHERE w.student_id = $1 AND w.work_date BETWEEN $2 AND $3
             ORDER BY w.work_date DESC, w.start_time DESC"
        );
        let rows = sqlx::query_as::<_, WorkHoursDetails>(&sql)
            .bind(student_id)
            .bind(start)
            .bind(end)
            .fetch_all(&mut *self.conn)
            .await?;
        Ok(rows)
    }

    /// Only approved entries count towards a student's total.
    pub async fn total_for_student(&mut self, student_id: i64) -> Result<BigDecimal> {
        let total = sqlx::query_scalar::<_, Option<BigDecimal>>(
            "SELECT SUM(hours_worked) FROM work_hours
             WHERE student_id = $1 AND status = 'approved'",
        )
        .bind(student_id)
        .fetch_one(&mut *self.conn)
        .await?;
        Ok(total.unwrap_or_else(|| BigDecimal::from(0)))
    }
}
