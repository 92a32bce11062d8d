use sqlx::PgConnection;

use crate::pkg::internal::adaptors::users::spec::{Credentials, UserEntry};
use crate::prelude::Result;

pub struct UserSelector<'a> {
    conn: &'a mut PgConnection,
}

impl<'a> UserSelector<'a> {
    pub fn new(conn: &'a mut PgConnection) -> Self {
        UserSelector { conn }
    }

    pub async fn get_by_id(&mut self, id: i64) -> Result<Option<UserEntry>> {
        let row = sqlx::query_as::<_, UserEntry>(
            "SELECT id, username, email, full_name, role, phone, department, active, created_at
             FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&mut *self.conn)
        .await?;
        Ok(row)
    }

    pub async fn get_by_username(&mut self, username: &str) -> Result<Option<UserEntry>> {
        let row = sqlx::query_as::<_, UserEntry>(
            "SELECT id, username, email, full_name, role, phone, department, active, created_at
             FROM users WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&mut *self.conn)
        .await?;
        Ok(row)
    }

    pub async fn credentials_by_username(&mut self, username: &str) -> Result<Option<Credentials>> {
        let row = sqlx::query_as::<_, Credentials>(
            "SELECT id, password_hash, active FROM users WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&mut *self.conn)
        .await?;
        Ok(row)
    }

    pub async fn username_or_email_taken(&mut self, username: &str, email: &str) -> Result<bool> {
        let taken = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM users WHERE username = $1 OR email = $2)",
        )
        .bind(username)
        .bind(email)
        .fetch_one(&mut *self.conn)
        .await?;
        Ok(taken)
    }
}
