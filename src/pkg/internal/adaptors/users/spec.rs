use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::prelude::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Admin,
    Student,
}

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct UserEntry {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub role: Role,
    pub phone: Option<String>,
    pub department: Option<String>,
    pub active: bool,
    pub created_at: chrono::NaiveDateTime,
}

impl UserEntry {
    pub fn require_admin(&self) -> Result<()> {
        match self.role {
            Role::Admin => Ok(()),
            _ => Err(Error::Forbidden("administrator role required".into())),
        }
    }

    pub fn require_student(&self) -> Result<()> {
        match self.role {
            Role::Student => Ok(()),
            _ => Err(Error::Forbidden("student role required".into())),
        }
    }
}

/// Login-time row; holds the bcrypt hash and is never serialized.
#[derive(Debug, FromRow)]
pub struct Credentials {
    pub id: i64,
    pub password_hash: String,
    pub active: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_wire_format_is_screaming_case() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), r#""ADMIN""#);
        assert_eq!(
            serde_json::from_str::<Role>(r#""STUDENT""#).unwrap(),
            Role::Student
        );
    }

    #[test]
    fn test_user_serializes_with_camel_case_keys() {
        let user = UserEntry {
            id: 7,
            username: "rahul".into(),
            email: "rahul@workstudy.edu".into(),
            full_name: "Rahul Sharma".into(),
            role: Role::Student,
            phone: Some("9876543212".into()),
            department: Some("Electronics Engineering".into()),
            active: true,
            created_at: chrono::NaiveDateTime::default(),
        };
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["fullName"], "Rahul Sharma");
        assert_eq!(json["role"], "STUDENT");
        assert!(json.get("password_hash").is_none());
        assert!(json.get("passwordHash").is_none());
    }

    #[test]
    fn test_role_guards() {
        let user = UserEntry {
            id: 1,
            username: "priya".into(),
            email: "priya@workstudy.edu".into(),
            full_name: "Priya Patel".into(),
            role: Role::Student,
            phone: None,
            department: Some("Mathematics".into()),
            active: true,
            created_at: chrono::NaiveDateTime::default(),
        };
        assert!(user.require_student().is_ok());
        assert!(user.require_admin().is_err());
    }
}
