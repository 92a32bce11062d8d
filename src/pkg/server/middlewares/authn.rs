use std::sync::Arc;

use axum::http::header::AUTHORIZATION;
use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use axum_extra::extract::CookieJar;

use crate::pkg::internal::adaptors::users::spec::UserEntry;
use crate::pkg::internal::auth::Session;
use crate::pkg::server::state::AppState;
use crate::prelude::{Error, Result};

pub const SESSION_COOKIE: &str = "_Host_workstudy_session";

/// Resolves the caller from a bearer header or the browser session cookie.
/// Token problems come back as `None`; infrastructure failures propagate.
pub async fn resolve_user(state: &AppState, headers: &HeaderMap) -> Result<Option<UserEntry>> {
    let mut conn = state.db_pool.acquire().await?;

    if let Some(value) = headers.get(AUTHORIZATION) {
        if let Some(token) = value.to_str().ok().and_then(|v| v.strip_prefix("Bearer ")) {
            return match Session::check_token_validity(&mut conn, token.trim()).await {
                Ok(user) => Ok(Some(user)),
                Err(Error::Unauthorized(_)) => Ok(None),
                Err(e) => Err(e),
            };
        }
    }

    let jar = CookieJar::from_headers(headers);
    if let Some(cookie) = jar.get(SESSION_COOKIE).filter(|c| !c.value().is_empty()) {
        return match Session::check_token_validity(&mut conn, cookie.value()).await {
            Ok(user) => Ok(Some(user)),
            Err(Error::Unauthorized(_)) => Ok(None),
            Err(e) => Err(e),
        };
    }

    Ok(None)
}

pub async fn authenticate(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response> {
    match resolve_user(&state, &headers).await? {
        Some(user) => {
            request.extensions_mut().insert(Arc::new(user));
            Ok(next.run(request).await)
        }
        None => {
            tracing::warn!("token missing or invalid, authentication denied");
            Err(Error::Unauthorized("authentication required".into()))
        }
    }
}
