use std::sync::Arc;

use axum::extract::State;
use axum::{Extension, Json};

use crate::pkg::internal::adaptors::dashboard::selectors::DashboardSelector;
use crate::pkg::internal::adaptors::dashboard::spec::{AdminDashboard, StudentDashboard};
use crate::pkg::internal::adaptors::users::spec::UserEntry;
use crate::pkg::server::state::AppState;
use crate::prelude::Result;

pub async fn admin(
    State(state): State<AppState>,
    Extension(user): Extension<Arc<UserEntry>>,
) -> Result<Json<AdminDashboard>> {
    user.require_admin()?;
    let mut conn = state.db_pool.acquire().await?;
    let dashboard = DashboardSelector::new(&mut conn).admin().await?;
    Ok(Json(dashboard))
}

pub async fn student(
    State(state): State<AppState>,
    Extension(user): Extension<Arc<UserEntry>>,
) -> Result<Json<StudentDashboard>> {
    user.require_student()?;
    let mut conn = state.db_pool.acquire().await?;
    let dashboard = DashboardSelector::new(&mut conn).student(user.id).await?;
    Ok(Json(dashboard))
}
