use serde::Serialize;
use sqlx::types::BigDecimal;
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct AdminDashboard {
    pub total_students: i64,
    pub total_jobs: i64,
    pub active_jobs: i64,
    pub total_applications: i64,
    pub pending_applications: i64,
    pub total_work_hours: BigDecimal,
}

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct StudentDashboard {
    pub my_applications: i64,
    pub my_work_hours: BigDecimal,
    pub my_feedback: i64,
    pub available_jobs: i64,
}
