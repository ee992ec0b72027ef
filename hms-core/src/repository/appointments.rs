//! Appointment lookups used by billing and receipt generation.

use sqlx::SqlitePool;

use crate::error::{HmsError, HmsResult};
use crate::models::Appointment;

pub async fn get(pool: &SqlitePool, appointment_id: i64) -> HmsResult<Appointment> {
    sqlx::query_as::<_, Appointment>("SELECT * FROM appointments WHERE appointment_id = ?")
        .bind(appointment_id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| HmsError::NotFound(format!("appointment {appointment_id}")))
}

/// Appointments for a patient/doctor pair, newest first.
///
/// The billing screen offers these when linking a bill to an appointment.
pub async fn list_for(pool: &SqlitePool, patient_id: i64, doctor_id: i64) -> HmsResult<Vec<Appointment>> {
    let appointments = sqlx::query_as::<_, Appointment>(
        "SELECT * FROM appointments
         WHERE patient_id = ? AND doctor_id = ?
         ORDER BY appointment_date DESC, appointment_time DESC",
    )
    .bind(patient_id)
    .bind(doctor_id)
    .fetch_all(pool)
    .await?;

    Ok(appointments)
}
