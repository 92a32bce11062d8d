use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::{Extension, Json};
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use sqlx::types::BigDecimal;
use validator::Validate;

use crate::pkg::internal::adaptors::jobs::selectors::JobSelector;
use crate::pkg::internal::adaptors::users::spec::UserEntry;
use crate::pkg::internal::adaptors::workhours::mutators::{LogEntryData, WorkHoursMutator};
use crate::pkg::internal::adaptors::workhours::selectors::WorkHoursSelector;
use crate::pkg::internal::adaptors::workhours::spec::{
    compute_hours, WorkHoursDetails, WorkHoursEntry, WorkHoursStatus,
};
use crate::pkg::server::state::{AppState, GetTxn};
use crate::prelude::{Error, Result};

#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct WorkHoursInput {
    pub job_id: i64,
    pub work_date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    #[validate(length(max = 1000))]
    pub description: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusInput {
    pub status: String,
    pub supervisor_notes: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRangeParams {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TotalHours {
    pub total_hours: BigDecimal,
}

pub async fn list(
    State(state): State<AppState>,
    Extension(user): Extension<Arc<UserEntry>>,
) -> Result<Json<Vec<WorkHoursDetails>>> {
    user.require_admin()?;
    let mut conn = state.db_pool.acquire().await?;
    let entries = WorkHoursSelector::new(&mut conn).get_all().await?;
    Ok(Json(entries))
}

pub async fn mine(
    State(state): State<AppState>,
    Extension(user): Extension<Arc<UserEntry>>,
) -> Result<Json<Vec<WorkHoursDetails>>> {
    let mut conn = state.db_pool.acquire().await?;
    let entries = WorkHoursSelector::new(&mut conn)
        .get_by_student(user.id)
        .await?;
    Ok(Json(entries))
}

pub async fn by_student(
    State(state): State<AppState>,
    Extension(user): Extension<Arc<UserEntry>>,
    Path(student_id): Path<i64>,
) -> Result<Json<Vec<WorkHoursDetails>>> {
    user.require_admin()?;
    let mut conn = state.db_pool.acquire().await?;
    let entries = WorkHoursSelector::new(&mut conn)
        .get_by_student(student_id)
        .await?;
    Ok(Json(entries))
}

pub async fn by_job(
    State(state): State<AppState>,
    Extension(user): Extension<Arc<UserEntry>>,
    Path(job_id): Path<i64>,
) -> Result<Json<Vec<WorkHoursDetails>>> {
    user.require_admin()?;
    let mut conn = state.db_pool.acquire().await?;
    let entries = WorkHoursSelector::new(&mut conn).get_by_job(job_id).await?;
    Ok(Json(entries))
}

pub async fn my_total(
    State(state): State<AppState>,
    Extension(user): Extension<Arc<UserEntry>>,
) -> Result<Json<TotalHours>> {
    let mut conn = state.db_pool.acquire().await?;
    let total = WorkHoursSelector::new(&mut conn)
        .total_for_student(user.id)
        .await?;
    Ok(Json(TotalHours { total_hours: total }))
}

pub async fn student_total(
    State(state): State<AppState>,
    Extension(user): Extension<Arc<UserEntry>>,
    Path(student_id): Path<i64>,
) -> Result<Json<TotalHours>> {
    user.require_admin()?;
    let mut conn = state.db_pool.acquire().await?;
    let total = WorkHoursSelector::new(&mut conn)
        .total_for_student(student_id)
        .await?;
    Ok(Json(TotalHours { total_hours: total }))
}

pub async fn my_range(
    State(state): State<AppState>,
    Extension(user): Extension<Arc<UserEntry>>,
    Query(range): Query<DateRangeParams>,
) -> Result<Json<Vec<WorkHoursDetails>>> {
    if range.end_date < range.start_date {
        return Err(Error::Validation(
            "end date must not precede start date".into(),
        ));
    }
    let mut conn = state.db_pool.acquire().await?;
    let entries = WorkHoursSelector::new(&mut conn)
        .get_by_date_range(user.id, range.start_date, range.end_date)
        .await?;
    Ok(Json(entries))
}

pub async fn log(
    State(state): State<AppState>,
    Extension(user): Extension<Arc<UserEntry>>,
    Json(input): Json<WorkHoursInput>,
) -> Result<Json<WorkHoursEntry>> {
    user.require_student()?;
    input.validate()?;
    let hours = compute_hours(input.start_time, input.end_time)?;
    let mut tx = state.db_pool.begin_txn().await?;

    let job = JobSelector::new(&mut tx)
        .get_by_id(input.job_id)
        .await?
        .ok_or_else(|| Error::NotFound(format!("job posting {}", input.job_id)))?;

    let entry = WorkHoursMutator::new(&mut tx)
        .log(LogEntryData {
            student_id: user.id,
            job_id: job.id,
            work_date: input.work_date,
            start_time: input.start_time,
            end_time: input.end_time,
            hours_worked: hours,
            description: input.description.as_deref(),
        })
        .await?;
    tx.commit().await?;
    Ok(Json(entry))
}

pub async fn update(
    State(state): State<AppState>,
    Extension(user): Extension<Arc<UserEntry>>,
    Path(id): Path<i64>,
    Json(input): Json<WorkHoursInput>,
) -> Result<Json<WorkHoursEntry>> {
    user.require_student()?;
    input.validate()?;
    let hours = compute_hours(input.start_time, input.end_time)?;
    let mut tx = state.db_pool.begin_txn().await?;

    let existing = WorkHoursSelector::new(&mut tx)
        .get_by_id(id)
        .await?
        .ok_or_else(|| Error::NotFound(format!("work hours entry {id}")))?;
    if existing.student_id != user.id {
        return Err(Error::Forbidden(
            "you can only edit your own work hours".into(),
        ));
    }

    let entry = WorkHoursMutator::new(&mut tx)
        .update(
            id,
            LogEntryData {
                student_id: user.id,
                job_id: existing.job_id,
                work_date: input.work_date,
                start_time: input.start_time,
                end_time: input.end_time,
                hours_worked: hours,
                description: input.description.as_deref(),
            },
        )
        .await?
        .ok_or_else(|| Error::NotFound(format!("work hours entry {id}")))?;
    tx.commit().await?;
    Ok(Json(entry))
}

pub async fn set_status(
    State(state): State<AppState>,
    Extension(user): Extension<Arc<UserEntry>>,
    Path(id): Path<i64>,
    Json(input): Json<StatusInput>,
) -> Result<Json<WorkHoursEntry>> {
    user.require_admin()?;
    let status: WorkHoursStatus = input.status.parse()?;
    let mut tx = state.db_pool.begin_txn().await?;
    let entry = WorkHoursMutator::new(&mut tx)
        .set_status(id, status, input.supervisor_notes.as_deref(), user.id)
        .await?
        .ok_or_else(|| Error::NotFound(format!("work hours entry {id}")))?;
    tx.commit().await?;
    tracing::info!("work hours entry {} reviewed by {}", id, &user.username);
    Ok(Json(entry))
}

pub async fn delete(
    State(state): State<AppState>,
    Extension(user): Extension<Arc<UserEntry>>,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>> {
    user.require_student()?;
    let mut tx = state.db_pool.begin_txn().await?;

    let existing = WorkHoursSelector::new(&mut tx)
        .get_by_id(id)
        .await?
        .ok_or_else(|| Error::NotFound(format!("work hours entry {id}")))?;
    if existing.student_id != user.id {
        return Err(Error::Forbidden(
            "you can only delete your own work hours".into(),
        ));
    }

    WorkHoursMutator::new(&mut tx).delete(id).await?;
    tx.commit().await?;
    Ok(Json(serde_json::json!({ "deleted": id })))
}
