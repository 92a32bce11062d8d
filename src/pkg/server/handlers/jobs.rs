use std::sync::Arc;

use axum::extract::{Path, State};
use axum::{Extension, Json};
use serde::Deserialize;
use sqlx::types::BigDecimal;
use validator::Validate;

use crate::pkg::internal::adaptors::jobs::mutators::JobMutator;
use crate::pkg::internal::adaptors::jobs::selectors::JobSelector;
use crate::pkg::internal::adaptors::jobs::spec::{JobEntry, JobStatus};
use crate::pkg::internal::adaptors::users::spec::UserEntry;
use crate::pkg::server::state::{AppState, GetTxn};
use crate::prelude::{Error, Result};

#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct JobPostingInput {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(min = 1, max = 2000))]
    pub description: String,
    #[validate(length(min = 1, max = 100))]
    pub department: String,
    #[validate(length(min = 1, max = 200))]
    pub location: String,
    pub hourly_rate: BigDecimal,
    #[validate(range(min = 1, max = 40))]
    pub max_hours_per_week: i32,
    #[validate(range(min = 1))]
    pub total_positions: i32,
    pub application_deadline: chrono::NaiveDate,
}

impl JobPostingInput {
    fn check(&self) -> Result<()> {
        self.validate()?;
        if self.hourly_rate < BigDecimal::from(0) {
            return Err(Error::Validation("hourly rate cannot be negative".into()));
        }
        Ok(())
    }
}

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<JobEntry>>> {
    let mut conn = state.db_pool.acquire().await?;
    let jobs = JobSelector::new(&mut conn).get_all().await?;
    Ok(Json(jobs))
}

pub async fn active(State(state): State<AppState>) -> Result<Json<Vec<JobEntry>>> {
    let mut conn = state.db_pool.acquire().await?;
    let jobs = JobSelector::new(&mut conn)
        .get_by_status(JobStatus::Active)
        .await?;
    Ok(Json(jobs))
}

pub async fn get(State(state): State<AppState>, Path(id): Path<i64>) -> Result<Json<JobEntry>> {
    let mut conn = state.db_pool.acquire().await?;
    let job = JobSelector::new(&mut conn)
        .get_by_id(id)
        .await?
        .ok_or_else(|| Error::NotFound(format!("job posting {id}")))?;
    Ok(Json(job))
}

pub async fn by_department(
    State(state): State<AppState>,
    Path(department): Path<String>,
) -> Result<Json<Vec<JobEntry>>> {
    let mut conn = state.db_pool.acquire().await?;
    let jobs = JobSelector::new(&mut conn)
        .get_by_department(&department)
        .await?;
    Ok(Json(jobs))
}

pub async fn create(
    State(state): State<AppState>,
    Extension(user): Extension<Arc<UserEntry>>,
    Json(input): Json<JobPostingInput>,
) -> Result<Json<JobEntry>> {
    user.require_admin()?;
    input.check()?;
    let mut tx = state.db_pool.begin_txn().await?;
    let job = JobMutator::new(&mut tx).create(&input, user.id).await?;
    tx.commit().await?;
    tracing::info!("admin {} posted job {} ({})", &user.username, job.id, &job.title);
    Ok(Json(job))
}

pub async fn update(
    State(state): State<AppState>,
    Extension(user): Extension<Arc<UserEntry>>,
    Path(id): Path<i64>,
    Json(input): Json<JobPostingInput>,
) -> Result<Json<JobEntry>> {
    user.require_admin()?;
    input.check()?;
    let mut tx = state.db_pool.begin_txn().await?;
    let job = JobMutator::new(&mut tx)
        .update(id, &input)
        .await?
        .ok_or_else(|| Error::NotFound(format!("job posting {id}")))?;
    tx.commit().await?;
    Ok(Json(job))
}

pub async fn close(
    State(state): State<AppState>,
    Extension(user): Extension<Arc<UserEntry>>,
    Path(id): Path<i64>,
) -> Result<Json<JobEntry>> {
    user.require_admin()?;
    let mut tx = state.db_pool.begin_txn().await?;
    let job = JobMutator::new(&mut tx)
        .set_status(id, JobStatus::Closed)
        .await?
        .ok_or_else(|| Error::NotFound(format!("job posting {id}")))?;
    tx.commit().await?;
    tracing::info!("job {} closed by {}", id, &user.username);
    Ok(Json(job))
}

pub async fn delete(
    State(state): State<AppState>,
    Extension(user): Extension<Arc<UserEntry>>,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>> {
    user.require_admin()?;
    let mut tx = state.db_pool.begin_txn().await?;
    let deleted = JobMutator::new(&mut tx).delete(id).await?;
    tx.commit().await?;
    if !deleted {
        return Err(Error::NotFound(format!("job posting {id}")));
    }
    Ok(Json(serde_json::json!({ "deleted": id })))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> JobPostingInput {
        JobPostingInput {
            title: "Library Assistant".into(),
            description: "Shelving and cataloging.".into(),
            department: "Central Library".into(),
            location: "Main Library Building".into(),
            hourly_rate: "12.50".parse().unwrap(),
            max_hours_per_week: 15,
            total_positions: 3,
            application_deadline: chrono::NaiveDate::from_ymd_opt(2026, 9, 30).unwrap(),
        }
    }

    #[test]
    fn test_valid_posting_passes() {
        assert!(input().check().is_ok());
    }

    #[test]
    fn test_hours_capped_at_forty_per_week() {
        let mut posting = input();
        posting.max_hours_per_week = 50;
        assert!(posting.check().is_err());
    }

    #[test]
    fn test_negative_rate_rejected() {
        let mut posting = input();
        posting.hourly_rate = "-1.00".parse().unwrap();
        assert!(posting.check().is_err());
    }

    #[test]
    fn test_zero_positions_rejected() {
        let mut posting = input();
        posting.total_positions = 0;
        assert!(posting.check().is_err());
    }
}
