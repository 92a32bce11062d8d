use chrono::{DateTime, Utc};
use sqlx::prelude::{FromRow, Type};
use sqlx::PgConnection;
use uuid::Uuid;

use crate::conf::settings;
use crate::pkg::internal::adaptors::users::mutators::{NewUser, UserMutator};
use crate::pkg::internal::adaptors::users::selectors::UserSelector;
use crate::pkg::internal::adaptors::users::spec::{Role, UserEntry};
use crate::prelude::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Type)]
#[sqlx(type_name = "session_status", rename_all = "lowercase")]
pub enum SessionStatus {
    Active,
    Revoked,
}

/// Opaque bearer token backed by a row in `sessions`. Logging out revokes
/// every active session the user holds.
#[derive(Debug, FromRow)]
pub struct Session {
    pub token: Uuid,
    pub user_id: i64,
    pub expiry: DateTime<Utc>,
    pub status: SessionStatus,
}

impl Session {
    pub async fn issue(conn: &mut PgConnection, user_id: i64) -> Result<Session> {
        let session = sqlx::query_as::<_, Session>(
            r#"
            INSERT INTO sessions (token, user_id, expiry)
            VALUES ($1, $2, now() + make_interval(hours => $3))
            RETURNING token, user_id, expiry, status
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(settings.session_ttl_hours as i32)
        .fetch_one(&mut *conn)
        .await?;
        Ok(session)
    }

    /// Resolves a presented token to its user. Expired or revoked sessions
    /// and deactivated accounts are all rejected the same way.
    pub async fn check_token_validity(conn: &mut PgConnection, token: &str) -> Result<UserEntry> {
        let token = token
            .parse::<Uuid>()
            .map_err(|_| Error::Unauthorized("malformed session token".into()))?;

        let user = sqlx::query_as::<_, UserEntry>(
            r#"
            SELECT u.id, u.username, u.email, u.full_name, u.role, u.phone, u.department,
                   u.active, u.created_at
            FROM sessions t
            JOIN users u ON u.id = t.user_id
            WHERE t.token = $1 AND t.status = 'active' AND t.expiry > now() AND u.active
            "#,
        )
        .bind(token)
        .fetch_optional(&mut *conn)
        .await?;

        user.ok_or_else(|| Error::Unauthorized("invalid or expired session".into()))
    }

    pub async fn revoke_all(conn: &mut PgConnection, user_id: i64) -> Result<u64> {
        let result = sqlx::query(
            "UPDATE sessions SET status = 'revoked' WHERE user_id = $1 AND status = 'active'",
        )
        .bind(user_id)
        .execute(&mut *conn)
        .await?;
        Ok(result.rows_affected())
    }
}

pub fn hash_password(password: &str) -> Result<String> {
    Ok(bcrypt::hash(password, bcrypt::DEFAULT_COST)?)
}

pub fn verify_password(password: &str, hash: &str) -> Result<bool> {
    Ok(bcrypt::verify(password, hash)?)
}

/// Checks the username/password pair and opens a fresh session.
pub async fn login(
    conn: &mut PgConnection,
    username: &str,
    password: &str,
) -> Result<(Session, UserEntry)> {
    let denied = || Error::Unauthorized("invalid username or password".into());

    let creds = UserSelector::new(&mut *conn)
        .credentials_by_username(username)
        .await?
        .ok_or_else(denied)?;
    if !creds.active || !verify_password(password, &creds.password_hash)? {
        tracing::warn!("failed login attempt for {}", username);
        return Err(denied());
    }

    let user = UserSelector::new(&mut *conn)
        .get_by_id(creds.id)
        .await?
        .ok_or_else(denied)?;
    let session = Session::issue(conn, user.id).await?;
    tracing::info!("user {} logged in", &user.username);
    Ok((session, user))
}

pub struct Registration<'a> {
    pub username: &'a str,
    pub password: &'a str,
    pub email: &'a str,
    pub full_name: &'a str,
    pub phone: Option<&'a str>,
    pub department: Option<&'a str>,
}

/// Creates an account with the given role and opens its first session.
pub async fn register(
    conn: &mut PgConnection,
    input: Registration<'_>,
    role: Role,
) -> Result<(Session, UserEntry)> {
    let taken = UserSelector::new(&mut *conn)
        .username_or_email_taken(input.username, input.email)
        .await?;
    if taken {
        return Err(Error::Conflict("username or email already exists".into()));
    }

    let password_hash = hash_password(input.password)?;
    let user = UserMutator::new(&mut *conn)
        .create(NewUser {
            username: input.username,
            password_hash: &password_hash,
            email: input.email,
            full_name: input.full_name,
            role,
            phone: input.phone,
            department: input.department,
        })
        .await?;
    let session = Session::issue(conn, user.id).await?;
    tracing::info!("registered {} user {}", match role {
        Role::Admin => "admin",
        Role::Student => "student",
    }, &user.username);
    Ok((session, user))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_roundtrip() {
        let hash = bcrypt::hash("s3cret", 4).unwrap();
        assert!(verify_password("s3cret", &hash).unwrap());
        assert!(!verify_password("guess", &hash).unwrap());
    }

    #[test]
    fn test_hashes_are_salted() {
        let a = bcrypt::hash("same", 4).unwrap();
        let b = bcrypt::hash("same", 4).unwrap();
        assert_ne!(a, b);
    }
}
