use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Scheduled appointment linking a patient and a doctor.
///
/// Bills may optionally reference one of these; receipt generation reads the
/// date and time back for the printed document.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Appointment {
    #[sqlx(rename = "appointment_id")]
    pub id: i64,
    pub patient_id: i64,
    pub doctor_id: i64,
    #[sqlx(rename = "appointment_date")]
    pub date: NaiveDate,
    #[sqlx(rename = "appointment_time")]
    pub time: NaiveTime,
}
