use std::sync::Arc;

use axum::extract::{Path, State};
use axum::{Extension, Json};
use serde::Deserialize;
use validator::Validate;

use crate::pkg::internal::adaptors::feedback::mutators::FeedbackMutator;
use crate::pkg::internal::adaptors::feedback::selectors::FeedbackSelector;
use crate::pkg::internal::adaptors::feedback::spec::{FeedbackDetails, FeedbackEntry};
use crate::pkg::internal::adaptors::jobs::selectors::JobSelector;
use crate::pkg::internal::adaptors::users::selectors::UserSelector;
use crate::pkg::internal::adaptors::users::spec::{Role, UserEntry};
use crate::pkg::server::state::{AppState, GetTxn};
use crate::prelude::{Error, Result};

#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackInput {
    pub student_id: i64,
    pub job_id: i64,
    #[validate(range(min = 1, max = 5))]
    pub rating: i32,
    #[validate(length(min = 1, max = 2000))]
    pub comments: String,
    #[validate(length(max = 500))]
    pub performance_areas: Option<String>,
}

pub async fn list(
    State(state): State<AppState>,
    Extension(user): Extension<Arc<UserEntry>>,
) -> Result<Json<Vec<FeedbackDetails>>> {
    user.require_admin()?;
    let mut conn = state.db_pool.acquire().await?;
    let entries = FeedbackSelector::new(&mut conn).get_all().await?;
    Ok(Json(entries))
}

pub async fn mine(
    State(state): State<AppState>,
    Extension(user): Extension<Arc<UserEntry>>,
) -> Result<Json<Vec<FeedbackDetails>>> {
    user.require_student()?;
    let mut conn = state.db_pool.acquire().await?;
    let entries = FeedbackSelector::new(&mut conn)
        .get_by_student(user.id)
        .await?;
    Ok(Json(entries))
}

pub async fn by_student(
    State(state): State<AppState>,
    Extension(user): Extension<Arc<UserEntry>>,
    Path(student_id): Path<i64>,
) -> Result<Json<Vec<FeedbackDetails>>> {
    user.require_admin()?;
    let mut conn = state.db_pool.acquire().await?;
    let entries = FeedbackSelector::new(&mut conn)
        .get_by_student(student_id)
        .await?;
    Ok(Json(entries))
}

pub async fn by_job(
    State(state): State<AppState>,
    Extension(user): Extension<Arc<UserEntry>>,
    Path(job_id): Path<i64>,
) -> Result<Json<Vec<FeedbackDetails>>> {
    user.require_admin()?;
    let mut conn = state.db_pool.acquire().await?;
    let entries = FeedbackSelector::new(&mut conn).get_by_job(job_id).await?;
    Ok(Json(entries))
}

pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<FeedbackDetails>> {
    let mut conn = state.db_pool.acquire().await?;
    let entry = FeedbackSelector::new(&mut conn)
        .get_by_id(id)
        .await?
        .ok_or_else(|| Error::NotFound(format!("feedback {id}")))?;
    Ok(Json(entry))
}

pub async fn create(
    State(state): State<AppState>,
    Extension(user): Extension<Arc<UserEntry>>,
    Json(input): Json<FeedbackInput>,
) -> Result<Json<FeedbackEntry>> {
    user.require_admin()?;
    input.validate()?;
    let mut tx = state.db_pool.begin_txn().await?;

    let student = UserSelector::new(&mut tx)
        .get_by_id(input.student_id)
        .await?
        .ok_or_else(|| Error::NotFound(format!("student {}", input.student_id)))?;
    if student.role != Role::Student {
        return Err(Error::Validation(
            "feedback can only be given to students".into(),
        ));
    }
    let job = JobSelector::new(&mut tx)
        .get_by_id(input.job_id)
        .await?
        .ok_or_else(|| Error::NotFound(format!("job posting {}", input.job_id)))?;

    let entry = FeedbackMutator::new(&mut tx)
        .create(
            student.id,
            job.id,
            user.id,
            input.rating,
            &input.comments,
            input.performance_areas.as_deref(),
        )
        .await?;
    tx.commit().await?;
    tracing::info!(
        "feedback for student {} on job {} recorded by {}",
        student.id,
        job.id,
        &user.username
    );
    Ok(Json(entry))
}

pub async fn delete(
    State(state): State<AppState>,
    Extension(user): Extension<Arc<UserEntry>>,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>> {
    user.require_admin()?;
    let mut tx = state.db_pool.begin_txn().await?;
    let deleted = FeedbackMutator::new(&mut tx).delete(id).await?;
    tx.commit().await?;
    if !deleted {
        return Err(Error::NotFound(format!("feedback {id}")));
    }
    Ok(Json(serde_json::json!({ "deleted": id })))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(rating: i32) -> FeedbackInput {
        FeedbackInput {
            student_id: 1,
            job_id: 1,
            rating,
            comments: "Reliable and punctual.".into(),
            performance_areas: Some("Organization".into()),
        }
    }

    #[test]
    fn test_rating_must_be_one_through_five() {
        assert!(input(1).validate().is_ok());
        assert!(input(5).validate().is_ok());
        assert!(input(0).validate().is_err());
        assert!(input(6).validate().is_err());
    }
}
