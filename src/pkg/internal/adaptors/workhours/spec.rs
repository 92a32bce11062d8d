use std::str::FromStr;

use bigdecimal::RoundingMode;
use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use sqlx::types::BigDecimal;
use sqlx::FromRow;

use crate::prelude::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "work_hours_status", rename_all = "lowercase")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WorkHoursStatus {
    Pending,
    Approved,
    Rejected,
}

impl FromStr for WorkHoursStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_uppercase().as_str() {
            "PENDING" => Ok(WorkHoursStatus::Pending),
            "APPROVED" => Ok(WorkHoursStatus::Approved),
            "REJECTED" => Ok(WorkHoursStatus::Rejected),
            other => Err(Error::Validation(format!(
                "unknown work hours status: {other}"
            ))),
        }
    }
}

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct WorkHoursEntry {
    pub id: i64,
    pub student_id: i64,
    pub job_id: i64,
    pub work_date: chrono::NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub hours_worked: BigDecimal,
    pub description: Option<String>,
    pub status: WorkHoursStatus,
    pub supervisor_notes: Option<String>,
    pub approved_by: Option<i64>,
    pub approved_at: Option<chrono::NaiveDateTime>,
    pub created_at: chrono::NaiveDateTime,
}

/// Listing row joined with the student and posting it refers to.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct WorkHoursDetails {
    pub id: i64,
    pub student_id: i64,
    pub student_name: String,
    pub job_id: i64,
    pub job_title: String,
    pub work_date: chrono::NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub hours_worked: BigDecimal,
    pub description: Option<String>,
    pub status: WorkHoursStatus,
    pub supervisor_notes: Option<String>,
    pub approved_by: Option<i64>,
    pub approved_at: Option<chrono::NaiveDateTime>,
    pub created_at: chrono::NaiveDateTime,
}

/// Worked hours are derived from the logged interval, never taken from the
/// client: minutes / 60, two decimal places, half-up.
pub fn compute_hours(start: NaiveTime, end: NaiveTime) -> Result<BigDecimal> {
    let minutes = (end - start).num_minutes();
    if minutes <= 0 {
        return Err(Error::Validation(
            "end time must be after start time".into(),
        ));
    }
    let hours = BigDecimal::from(minutes) / BigDecimal::from(60);
    Ok(hours.with_scale_round(2, RoundingMode::HalfUp))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_whole_and_half_hours() {
        assert_eq!(
            compute_hours(t(9, 0), t(12, 0)).unwrap(),
            "3.00".parse::<BigDecimal>().unwrap()
        );
        assert_eq!(
            compute_hours(t(13, 0), t(16, 30)).unwrap(),
            "3.50".parse::<BigDecimal>().unwrap()
        );
    }

    #[test]
    fn test_rounding_is_half_up() {
        // 50 minutes = 0.8333.. -> 0.83
        assert_eq!(
            compute_hours(t(10, 0), t(10, 50)).unwrap(),
            "0.83".parse::<BigDecimal>().unwrap()
        );
        // 1 minute = 0.0166.. -> 0.02
        assert_eq!(
            compute_hours(t(10, 0), t(10, 1)).unwrap(),
            "0.02".parse::<BigDecimal>().unwrap()
        );
    }

    #[test]
    fn test_inverted_interval_is_rejected() {
        assert!(compute_hours(t(16, 0), t(9, 0)).is_err());
        assert!(compute_hours(t(9, 0), t(9, 0)).is_err());
    }

    #[test]
    fn test_status_parses_from_path_segment() {
        assert_eq!(
            "APPROVED".parse::<WorkHoursStatus>().unwrap(),
            WorkHoursStatus::Approved
        );
        assert!("DONE".parse::<WorkHoursStatus>().is_err());
    }
}
