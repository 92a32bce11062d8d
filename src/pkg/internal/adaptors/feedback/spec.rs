use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackEntry {
    pub id: i64,
    pub student_id: i64,
    pub job_id: i64,
    pub given_by: i64,
    pub rating: i32,
    pub comments: String,
    pub performance_areas: Option<String>,
    pub created_at: chrono::NaiveDateTime,
}

/// Listing row joined with the student, posting and reviewer names.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackDetails {
    pub id: i64,
    pub student_id: i64,
    pub student_name: String,
    pub job_id: i64,
    pub job_title: String,
    pub given_by: i64,
    pub given_by_name: String,
    pub rating: i32,
    pub comments: String,
    pub performance_areas: Option<String>,
    pub created_at: chrono::NaiveDateTime,
}
