use std::sync::Arc;

use axum::{extract::State, Extension, Json};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use validator::Validate;

use crate::pkg::internal::auth;
use crate::pkg::internal::adaptors::users::spec::{Role, UserEntry};
use crate::pkg::server::state::{AppState, GetTxn};
use crate::prelude::Result;

#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LoginInput {
    #[validate(length(min = 1))]
    pub username: String,
    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterInput {
    #[validate(length(min = 3, max = 50))]
    pub username: String,
    #[validate(length(min = 8, max = 128))]
    pub password: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1, max = 200))]
    pub full_name: String,
    pub phone: Option<String>,
    pub department: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub user: UserEntry,
}

pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginInput>,
) -> Result<Json<LoginResponse>> {
    input.validate()?;
    let mut tx = state.db_pool.begin_txn().await?;
    let (session, user) = auth::login(&mut tx, &input.username, &input.password).await?;
    tx.commit().await?;
    Ok(Json(LoginResponse {
        token: session.token.to_string(),
        user,
    }))
}

async fn register(state: AppState, input: RegisterInput, role: Role) -> Result<Json<LoginResponse>> {
    input.validate()?;
    let mut tx = state.db_pool.begin_txn().await?;
    let (session, user) = auth::register(
        &mut tx,
        auth::Registration {
            username: &input.username,
            password: &input.password,
            email: &input.email,
            full_name: &input.full_name,
            phone: input.phone.as_deref(),
            department: input.department.as_deref(),
        },
        role,
    )
    .await?;
    tx.commit().await?;
    Ok(Json(LoginResponse {
        token: session.token.to_string(),
        user,
    }))
}

pub async fn register_student(
    State(state): State<AppState>,
    Json(input): Json<RegisterInput>,
) -> Result<Json<LoginResponse>> {
    register(state, input, Role::Student).await
}

pub async fn register_admin(
    State(state): State<AppState>,
    Json(input): Json<RegisterInput>,
) -> Result<Json<LoginResponse>> {
    register(state, input, Role::Admin).await
}

pub async fn me(Extension(user): Extension<Arc<UserEntry>>) -> Result<Json<UserEntry>> {
    Ok(Json(user.as_ref().clone()))
}

pub async fn logout(
    State(state): State<AppState>,
    Extension(user): Extension<Arc<UserEntry>>,
) -> Result<Json<Value>> {
    let mut tx = state.db_pool.begin_txn().await?;
    let revoked = auth::Session::revoke_all(&mut tx, user.id).await?;
    tx.commit().await?;
    tracing::info!("user {} logged out, {} sessions revoked", &user.username, revoked);
    Ok(Json(json!({ "message": "logged out" })))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> RegisterInput {
        RegisterInput {
            username: "priya".into(),
            password: "priya1234".into(),
            email: "priya@workstudy.edu".into(),
            full_name: "Priya Patel".into(),
            phone: None,
            department: Some("Mathematics".into()),
        }
    }

    #[test]
    fn test_valid_registration_passes() {
        assert!(input().validate().is_ok());
    }

    #[test]
    fn test_short_password_rejected() {
        let mut reg = input();
        reg.password = "abc".into();
        assert!(reg.validate().is_err());
    }

    #[test]
    fn test_malformed_email_rejected() {
        let mut reg = input();
        reg.email = "not-an-email".into();
        assert!(reg.validate().is_err());
    }
}
