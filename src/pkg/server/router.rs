use axum::middleware::from_fn_with_state;
use axum::routing::{get, patch, post, put};
use axum::Router;

use super::handlers;
use super::handlers::auth::{login, logout, me, register_admin, register_student};
use super::handlers::probes::{healthz, livez};
use super::middlewares::authn;
use super::state::AppState;
use crate::prelude::Result;

pub async fn build_routes() -> Result<Router> {
    let state = AppState::new().await?;
    let app = Router::new()
        // authenticated surface
        .route("/auth/me", get(me))
        .route("/auth/logout", post(logout))
        .route("/jobs", get(handlers::jobs::list).post(handlers::jobs::create))
        .route("/jobs/active", get(handlers::jobs::active))
        .route("/jobs/department/:department", get(handlers::jobs::by_department))
        .route(
            "/jobs/:id",
            get(handlers::jobs::get)
                .put(handlers::jobs::update)
                .delete(handlers::jobs::delete),
        )
        .route("/jobs/:id/close", patch(handlers::jobs::close))
        .route(
            "/applications",
            get(handlers::applications::list).post(handlers::applications::submit),
        )
        .route("/applications/my", get(handlers::applications::mine))
        .route("/applications/job/:job_id", get(handlers::applications::by_job))
        .route("/applications/status/:status", get(handlers::applications::by_status))
        .route("/applications/:id", get(handlers::applications::get))
        .route("/applications/:id/status", patch(handlers::applications::review))
        .route("/applications/:id/withdraw", patch(handlers::applications::withdraw))
        .route(
            "/workhours",
            get(handlers::workhours::list).post(handlers::workhours::log),
        )
        .route("/workhours/my", get(handlers::workhours::mine))
        .route("/workhours/my/total", get(handlers::workhours::my_total))
        .route("/workhours/my/range", get(handlers::workhours::my_range))
        .route("/workhours/student/:student_id", get(handlers::workhours::by_student))
        .route(
            "/workhours/student/:student_id/total",
            get(handlers::workhours::student_total),
        )
        .route("/workhours/job/:job_id", get(handlers::workhours::by_job))
        .route(
            "/workhours/:id",
            put(handlers::workhours::update).delete(handlers::workhours::delete),
        )
        .route("/workhours/:id/status", patch(handlers::workhours::set_status))
        .route(
            "/feedback",
            get(handlers::feedback::list).post(handlers::feedback::create),
        )
        .route("/feedback/my", get(handlers::feedback::mine))
        .route("/feedback/student/:student_id", get(handlers::feedback::by_student))
        .route("/feedback/job/:job_id", get(handlers::feedback::by_job))
        .route(
            "/feedback/:id",
            get(handlers::feedback::get).delete(handlers::feedback::delete),
        )
        .route("/dashboard/admin", get(handlers::dashboard::admin))
        .route("/dashboard/student", get(handlers::dashboard::student))
        .layer(from_fn_with_state(state.clone(), authn::authenticate))
        // open surface
        .route("/auth/login", post(login))
        .route("/auth/register/student", post(register_student))
        .route("/auth/register/admin", post(register_admin))
        .route("/", get(handlers::ui::home))
        .route(
            "/login",
            get(handlers::ui::login_page).post(handlers::ui::login_submit),
        )
        .route("/logout", post(handlers::ui::logout))
        .route("/healthz", get(healthz))
        .route("/livez", get(livez))
        .with_state(state);

    Ok(app)
}
