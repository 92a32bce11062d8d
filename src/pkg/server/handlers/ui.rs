use askama::Template;
use axum::extract::State;
use axum::http::{header::SET_COOKIE, HeaderMap, HeaderValue};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Form;
use serde::Deserialize;

use crate::pkg::internal::adaptors::applications::selectors::ApplicationSelector;
use crate::pkg::internal::adaptors::applications::spec::ApplicationStatus;
use crate::pkg::internal::adaptors::dashboard::selectors::DashboardSelector;
use crate::pkg::internal::adaptors::jobs::selectors::JobSelector;
use crate::pkg::internal::adaptors::jobs::spec::JobStatus;
use crate::pkg::internal::adaptors::users::spec::Role;
use crate::pkg::internal::auth::{self, Session};
use crate::pkg::server::middlewares::authn::{self, SESSION_COOKIE};
use crate::pkg::server::state::{AppState, GetTxn};
use crate::pkg::server::uispec::{AdminHome, Login, StudentHome};
use crate::prelude::{Error, Result};

#[derive(Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// Role-gated landing page; anonymous visitors get bounced to the login
/// form instead of a bare 401.
pub async fn home(State(state): State<AppState>, headers: HeaderMap) -> Result<Response> {
    let Some(user) = authn::resolve_user(&state, &headers).await? else {
        return Ok(Redirect::to("/login").into_response());
    };
    let mut conn = state.db_pool.acquire().await?;
    match user.role {
        Role::Admin => {
            let metrics = DashboardSelector::new(&mut conn).admin().await?;
            let pending = ApplicationSelector::new(&mut conn)
                .get_by_status(ApplicationStatus::Pending)
                .await?;
            let template = AdminHome {
                user: &user,
                metrics,
                pending,
            };
            Ok(Html(template.render()?).into_response())
        }
        Role::Student => {
            let metrics = DashboardSelector::new(&mut conn).student(user.id).await?;
            let jobs = JobSelector::new(&mut conn)
                .get_by_status(JobStatus::Active)
                .await?;
            let template = StudentHome {
                user: &user,
                metrics,
                jobs,
            };
            Ok(Html(template.render()?).into_response())
        }
    }
}

pub async fn login_page() -> Result<Html<String>> {
    Ok(Html(Login { error: None }.render()?))
}

pub async fn login_submit(
    State(state): State<AppState>,
    Form(input): Form<LoginForm>,
) -> Result<Response> {
    let mut tx = state.db_pool.begin_txn().await?;
    match auth::login(&mut tx, &input.username, &input.password).await {
        Ok((session, _)) => {
            tx.commit().await?;
            let mut headers = HeaderMap::new();
            headers.insert(
                SET_COOKIE,
                HeaderValue::from_str(&format!(
                    "{}={}; Path=/; HttpOnly; SameSite=Lax",
                    SESSION_COOKIE, session.token
                ))?,
            );
            Ok((headers, Redirect::to("/")).into_response())
        }
        Err(Error::Unauthorized(_)) => {
            let template = Login {
                error: Some("Invalid username or password"),
            };
            Ok(Html(template.render()?).into_response())
        }
        Err(e) => Err(e),
    }
}

pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> Result<Response> {
    if let Some(user) = authn::resolve_user(&state, &headers).await? {
        let mut tx = state.db_pool.begin_txn().await?;
        Session::revoke_all(&mut tx, user.id).await?;
        tx.commit().await?;
        tracing::info!("user {} logged out of the portal", &user.username);
    }
    let mut response_headers = HeaderMap::new();
    response_headers.insert(
        SET_COOKIE,
        HeaderValue::from_str(&format!("{}=; Path=/; Max-Age=0", SESSION_COOKIE))?,
    );
    Ok((response_headers, Redirect::to("/login")).into_response())
}
