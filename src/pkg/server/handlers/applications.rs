use std::sync::Arc;

use axum::extract::{Path, State};
use axum::{Extension, Json};
use serde::Deserialize;
use validator::Validate;

use crate::pkg::internal::adaptors::applications::mutators::ApplicationMutator;
use crate::pkg::internal::adaptors::applications::selectors::ApplicationSelector;
use crate::pkg::internal::adaptors::applications::spec::{
    ApplicationDetails, ApplicationEntry, ApplicationStatus,
};
use crate::pkg::internal::adaptors::jobs::mutators::JobMutator;
use crate::pkg::internal::adaptors::jobs::selectors::JobSelector;
use crate::pkg::internal::adaptors::jobs::spec::JobStatus;
use crate::pkg::internal::adaptors::users::spec::UserEntry;
use crate::pkg::internal::email::decision::ApplicationDecisionTemplate;
use crate::pkg::internal::email::SendEmail;
use crate::pkg::server::state::{AppState, GetTxn};
use crate::prelude::{Error, Result};

#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationInput {
    pub job_id: i64,
    #[validate(length(min = 1, max = 2000))]
    pub cover_letter: String,
    pub resume_url: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusInput {
    pub status: String,
    pub admin_notes: Option<String>,
}

pub async fn list(
    State(state): State<AppState>,
    Extension(user): Extension<Arc<UserEntry>>,
) -> Result<Json<Vec<ApplicationDetails>>> {
    user.require_admin()?;
    let mut conn = state.db_pool.acquire().await?;
    let apps = ApplicationSelector::new(&mut conn).get_all().await?;
    Ok(Json(apps))
}

pub async fn mine(
    State(state): State<AppState>,
    Extension(user): Extension<Arc<UserEntry>>,
) -> Result<Json<Vec<ApplicationDetails>>> {
    user.require_student()?;
    let mut conn = state.db_pool.acquire().await?;
    let apps = ApplicationSelector::new(&mut conn)
        .get_by_student(user.id)
        .await?;
    Ok(Json(apps))
}

pub async fn by_job(
    State(state): State<AppState>,
    Extension(user): Extension<Arc<UserEntry>>,
    Path(job_id): Path<i64>,
) -> Result<Json<Vec<ApplicationDetails>>> {
    user.require_admin()?;
    let mut conn = state.db_pool.acquire().await?;
    let apps = ApplicationSelector::new(&mut conn).get_by_job(job_id).await?;
    Ok(Json(apps))
}

pub async fn by_status(
    State(state): State<AppState>,
    Extension(user): Extension<Arc<UserEntry>>,
    Path(status): Path<String>,
) -> Result<Json<Vec<ApplicationDetails>>> {
    user.require_admin()?;
    let status: ApplicationStatus = status.parse()?;
    let mut conn = state.db_pool.acquire().await?;
    let apps = ApplicationSelector::new(&mut conn).get_by_status(status).await?;
    Ok(Json(apps))
}

pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ApplicationDetails>> {
    let mut conn = state.db_pool.acquire().await?;
    let app = ApplicationSelector::new(&mut conn)
        .get_by_id(id)
        .await?
        .ok_or_else(|| Error::NotFound(format!("application {id}")))?;
    Ok(Json(app))
}

pub async fn submit(
    State(state): State<AppState>,
    Extension(user): Extension<Arc<UserEntry>>,
    Json(input): Json<ApplicationInput>,
) -> Result<Json<ApplicationEntry>> {
    user.require_student()?;
    input.validate()?;
    let mut tx = state.db_pool.begin_txn().await?;

    let job = JobSelector::new(&mut tx)
        .get_by_id(input.job_id)
        .await?
        .ok_or_else(|| Error::NotFound(format!("job posting {}", input.job_id)))?;
    if job.status != JobStatus::Active {
        return Err(Error::Validation(
            "this job is no longer accepting applications".into(),
        ));
    }
    if ApplicationSelector::new(&mut tx)
        .exists_for(user.id, job.id)
        .await?
    {
        return Err(Error::Conflict(
            "you have already applied for this position".into(),
        ));
    }

    let application = ApplicationMutator::new(&mut tx)
        .create(
            user.id,
            job.id,
            &input.cover_letter,
            input.resume_url.as_deref(),
        )
        .await?;
    tx.commit().await?;
    tracing::info!(
        "student {} applied to job {} ({})",
        &user.username,
        job.id,
        &job.title
    );
    Ok(Json(application))
}

pub async fn review(
    State(state): State<AppState>,
    Extension(user): Extension<Arc<UserEntry>>,
    Path(id): Path<i64>,
    Json(input): Json<StatusInput>,
) -> Result<Json<ApplicationEntry>> {
    user.require_admin()?;
    let status: ApplicationStatus = input.status.parse()?;
    let mut tx = state.db_pool.begin_txn().await?;

    let existing = ApplicationSelector::new(&mut tx)
        .get_by_id(id)
        .await?
        .ok_or_else(|| Error::NotFound(format!("application {id}")))?;

    let application = ApplicationMutator::new(&mut tx)
        .review(id, status, input.admin_notes.as_deref(), user.id)
        .await?
        .ok_or_else(|| Error::NotFound(format!("application {id}")))?;

    // The filled counter only moves on a transition into approved, so
    // re-reviewing an approved application cannot drift it past capacity.
    if status == ApplicationStatus::Approved && existing.status != ApplicationStatus::Approved {
        JobMutator::new(&mut tx)
            .increment_filled(existing.job_id)
            .await?;
    }
    tx.commit().await?;

    match status {
        ApplicationStatus::Approved | ApplicationStatus::Rejected => {
            ApplicationDecisionTemplate {
                name: &existing.student_name,
                job_title: &existing.job_title,
                approved: status == ApplicationStatus::Approved,
                notes: input.admin_notes.as_deref(),
            }
            .send(&existing.student_email)?;
        }
        _ => {}
    }
    tracing::info!("application {} reviewed by {}", id, &user.username);
    Ok(Json(application))
}

pub async fn withdraw(
    State(state): State<AppState>,
    Extension(user): Extension<Arc<UserEntry>>,
    Path(id): Path<i64>,
) -> Result<Json<ApplicationEntry>> {
    user.require_student()?;
    let mut tx = state.db_pool.begin_txn().await?;

    let existing = ApplicationSelector::new(&mut tx)
        .get_by_id(id)
        .await?
        .ok_or_else(|| Error::NotFound(format!("application {id}")))?;
    if existing.student_id != user.id {
        return Err(Error::Forbidden(
            "you can only withdraw your own applications".into(),
        ));
    }

    let application = ApplicationMutator::new(&mut tx)
        .withdraw(id)
        .await?
        .ok_or_else(|| Error::NotFound(format!("application {id}")))?;
    tx.commit().await?;
    Ok(Json(application))
}
