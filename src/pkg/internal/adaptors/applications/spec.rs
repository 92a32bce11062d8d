use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::prelude::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "application_status", rename_all = "lowercase")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApplicationStatus {
    Pending,
    Approved,
    Rejected,
    Withdrawn,
}

impl FromStr for ApplicationStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "PENDING" => Ok(ApplicationStatus::Pending),
            "APPROVED" => Ok(ApplicationStatus::Approved),
            "REJECTED" => Ok(ApplicationStatus::Rejected),
            "WITHDRAWN" => Ok(ApplicationStatus::Withdrawn),
            other => Err(Error::Validation(format!(
                "unknown application status: {other}"
            ))),
        }
    }
}

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationEntry {
    pub id: i64,
    pub student_id: i64,
    pub job_id: i64,
    pub cover_letter: String,
    pub resume_url: Option<String>,
    pub status: ApplicationStatus,
    pub admin_notes: Option<String>,
    pub applied_at: chrono::NaiveDateTime,
    pub reviewed_at: Option<chrono::NaiveDateTime>,
    pub reviewed_by: Option<i64>,
}

/// Listing row joined with the student and posting it refers to.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationDetails {
    pub id: i64,
    pub student_id: i64,
    pub student_name: String,
    pub student_email: String,
    pub job_id: i64,
    pub job_title: String,
    pub job_department: String,
    pub cover_letter: String,
    pub resume_url: Option<String>,
    pub status: ApplicationStatus,
    pub admin_notes: Option<String>,
    pub applied_at: chrono::NaiveDateTime,
    pub reviewed_at: Option<chrono::NaiveDateTime>,
    pub reviewed_by: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parses_from_path_segment() {
        assert_eq!(
            "PENDING".parse::<ApplicationStatus>().unwrap(),
            ApplicationStatus::Pending
        );
        assert_eq!(
            "withdrawn".parse::<ApplicationStatus>().unwrap(),
            ApplicationStatus::Withdrawn
        );
        assert!("OPEN".parse::<ApplicationStatus>().is_err());
    }

    #[test]
    fn test_status_wire_format() {
        assert_eq!(
            serde_json::to_string(&ApplicationStatus::Approved).unwrap(),
            r#""APPROVED""#
        );
    }
}
