use chrono::{NaiveDate, NaiveTime};
use sqlx::types::BigDecimal;
use sqlx::PgConnection;

use crate::pkg::internal::adaptors::workhours::spec::{WorkHoursEntry, WorkHoursStatus};
use crate::prelude::Result;

pub struct LogEntryData<'a> {
    pub student_id: i64,
    pub job_id: i64,
    pub work_date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub hours_worked: BigDecimal,
    pub description: Option<&'a str>,
}

pub struct WorkHoursMutator<'a> {
    conn: &'a mut PgConnection,
}

impl<'a> WorkHoursMutator<'a> {
    pub fn new(conn: &'a mut PgConnection) -> Self {
        WorkHoursMutator { conn }
    }

    pub async fn log(&mut self, entry: LogEntryData<'_>) -> Result<WorkHoursEntry> {
        let row = sqlx::query_as::<_, WorkHoursEntry>(
            r#"
            INSERT INTO work_hours
                (student_id, job_id, work_date, start_time, end_time, hours_worked, description)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, student_id, job_id, work_date, start_time, end_time, hours_worked,
                      description, status, supervisor_notes, approved_by, approved_at, created_at
            "#,
        )
        .bind(entry.student_id)
        .bind(entry.job_id)
        .bind(entry.work_date)
        .bind(entry.start_time)
        .bind(entry.end_time)
        .bind(&entry.hours_worked)
        .bind(entry.description)
        .fetch_one(&mut *self.conn)
        .await?;
        Ok(row)
    }

    pub async fn update(&mut self, id: i64, entry: LogEntryData<'_>) -> Result<Option<WorkHoursEntry>> {
        let row = sqlx::query_as::<_, WorkHoursEntry>(
            r#"
            UPDATE work_hours
            SET work_date = $2, start_time = $3, end_time = $4, hours_worked = $5, description = $6
            WHERE id = $1
            RETURNING id, student_id, job_id, work_date, start_time, end_time, hours_worked,
                      description, status, supervisor_notes, approved_by, approved_at, created_at
            "#,
        )
        .bind(id)
        .bind(entry.work_date)
        .bind(entry.start_time)
        .bind(entry.end_time)
        .bind(&entry.hours_worked)
        .bind(entry.description)
        .fetch_optional(&mut *self.conn)
        .await?;
        Ok(row)
    }

    pub async fn set_status(
        &mut self,
        id: i64,
        status: WorkHoursStatus,
        supervisor_notes: Option<&str>,
        approved_by: i64,
    ) -> Result<Option<WorkHoursEntry>> {
        let row = sqlx::query_as::<_, WorkHoursEntry>(
            r#"
            UPDATE work_hours
            SET status = $2, supervisor_notes = $3, approved_by = $4, approved_at = CURRENT_TIMESTAMP
            WHERE id = $1
            RETURNING id, student_id, job_id, work_date, start_time, end_time, hours_worked,
                      description, status, supervisor_notes, approved_by, approved_at, created_at
            "#,
        )
        .bind(id)
        .bind(status)
        .bind(supervisor_notes)
        .bind(approved_by)
        .fetch_optional(&mut *self.conn)
        .await?;
        Ok(row)
    }

    pub async fn delete(&mut self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM work_hours WHERE id = $1")
            .bind(id)
            .execute(&mut *self.conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
