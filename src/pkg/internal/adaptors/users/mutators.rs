use sqlx::PgConnection;

use crate::pkg::internal::adaptors::users::spec::{Role, UserEntry};
use crate::prelude::Result;

pub struct NewUser<'a> {
    pub username: &'a str,
    pub password_hash: &'a str,
    pub email: &'a str,
    pub full_name: &'a str,
    pub role: Role,
    pub phone: Option<&'a str>,
    pub department: Option<&'a str>,
}

pub struct UserMutator<'a> {
    conn: &'a mut PgConnection,
}

impl<'a> UserMutator<'a> {
    pub fn new(conn: &'a mut PgConnection) -> Self {
        UserMutator { conn }
    }

    pub async fn create(&mut self, user: NewUser<'_>) -> Result<UserEntry> {
        let row = sqlx::query_as::<_, UserEntry>(
            r#"
            INSERT INTO users (username, password_hash, email, full_name, role, phone, department)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, username, email, full_name, role, phone, department, active, created_at
            "#,
        )
        .bind(user.username)
        .bind(user.password_hash)
        .bind(user.email)
        .bind(user.full_name)
        .bind(user.role)
        .bind(user.phone)
        .bind(user.department)
        .fetch_one(&mut *self.conn)
        .await?;
        Ok(row)
    }

    pub async fn deactivate(&mut self, id: i64) -> Result<bool> {
        let result = sqlx::query("UPDATE users SET active = false WHERE id = $1")
            .bind(id)
            .execute(&mut *self.conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
