use serde::{Deserialize, Serialize};
use sqlx::types::BigDecimal;
use sqlx::FromRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "job_status", rename_all = "lowercase")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobStatus {
    Active,
    Closed,
    Filled,
}

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct JobEntry {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub department: String,
    pub location: String,
    pub hourly_rate: BigDecimal,
    pub max_hours_per_week: i32,
    pub total_positions: i32,
    pub filled_positions: i32,
    pub application_deadline: chrono::NaiveDate,
    pub status: JobStatus,
    pub posted_by: i64,
    pub created_at: chrono::NaiveDateTime,
    pub updated_at: chrono::NaiveDateTime,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_status_wire_format() {
        assert_eq!(serde_json::to_string(&JobStatus::Active).unwrap(), r#""ACTIVE""#);
        assert_eq!(serde_json::to_string(&JobStatus::Filled).unwrap(), r#""FILLED""#);
        assert_eq!(
            serde_json::from_str::<JobStatus>(r#""CLOSED""#).unwrap(),
            JobStatus::Closed
        );
    }
}
