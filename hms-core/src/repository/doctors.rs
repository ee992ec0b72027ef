//! Doctor CRUD and fee lookup.

use rust_decimal::Decimal;
use sqlx::SqlitePool;
use tracing::info;

use crate::error::{HmsError, HmsResult};
use crate::models::Doctor;
use crate::validation;

fn validate(doctor: &Doctor) -> HmsResult<()> {
    validation::validate_name(&doctor.name).map_err(HmsError::Validation)?;

    if doctor.specialization.trim().len() < 3 {
        return Err(HmsError::Validation(
            "Please enter a valid specialization (minimum 3 characters).".into(),
        ));
    }

    validation::validate_phone(&doctor.phone).map_err(HmsError::Validation)?;

    if doctor.fee <= Decimal::ZERO {
        return Err(HmsError::Validation("Please enter a valid fee (positive number).".into()));
    }

    Ok(())
}

/// Insert (id 0) or update a doctor; the assigned id becomes authoritative.
pub async fn save(pool: &SqlitePool, doctor: &mut Doctor) -> HmsResult<i64> {
    validate(doctor)?;

    if doctor.id == 0 {
        let result = sqlx::query(
            "INSERT INTO doctors (name, specialization, phone, fee) VALUES (?, ?, ?, ?)",
        )
        .bind(&doctor.name)
        .bind(&doctor.specialization)
        .bind(&doctor.phone)
        .bind(doctor.fee.to_string())
        .execute(pool)
        .await?;

        doctor.id = result.last_insert_rowid();
    } else {
        let result = sqlx::query(
            "UPDATE doctors SET name = ?, specialization = ?, phone = ?, fee = ? WHERE doctor_id = ?",
        )
        .bind(&doctor.name)
        .bind(&doctor.specialization)
        .bind(&doctor.phone)
        .bind(doctor.fee.to_string())
        .bind(doctor.id)
        .execute(pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(HmsError::NotFound(format!("doctor {}", doctor.id)));
        }
    }

    info!(doctor_id = doctor.id, "doctor saved");
    Ok(doctor.id)
}

/// Delete a doctor, refusing while appointments or bills still reference them.
///
/// The reference checks and the delete run in one transaction, so a bill
/// saved between check and delete cannot orphan its doctor.
pub async fn delete(pool: &SqlitePool, doctor_id: i64) -> HmsResult<()> {
    let mut tx = pool.begin().await?;

    let appointments: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM appointments WHERE doctor_id = ?")
            .bind(doctor_id)
            .fetch_one(&mut *tx)
            .await?;

    if appointments > 0 {
        return Err(HmsError::Conflict(format!(
            "Cannot delete doctor: {appointments} appointment(s) reference this doctor."
        )));
    }

    let bills: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM bills WHERE doctor_id = ?")
        .bind(doctor_id)
        .fetch_one(&mut *tx)
        .await?;

    if bills > 0 {
        return Err(HmsError::Conflict(format!(
            "Cannot delete doctor: {bills} bill(s) reference this doctor."
        )));
    }

    let result = sqlx::query("DELETE FROM doctors WHERE doctor_id = ?")
        .bind(doctor_id)
        .execute(&mut *tx)
        .await?;

    if result.rows_affected() == 0 {
        return Err(HmsError::NotFound(format!("doctor {doctor_id}")));
    }

    tx.commit().await?;

    info!(doctor_id, "doctor deleted");
    Ok(())
}

pub async fn get(pool: &SqlitePool, doctor_id: i64) -> HmsResult<Doctor> {
    sqlx::query_as::<_, Doctor>("SELECT * FROM doctors WHERE doctor_id = ?")
        .bind(doctor_id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| HmsError::NotFound(format!("doctor {doctor_id}")))
}

pub async fn list(pool: &SqlitePool) -> HmsResult<Vec<Doctor>> {
    let doctors = sqlx::query_as::<_, Doctor>("SELECT * FROM doctors ORDER BY name")
        .fetch_all(pool)
        .await?;
    Ok(doctors)
}

/// Standard consultation fee for a doctor, if the doctor exists.
///
/// Used to prefill the consultation fee on a bill when no consultation items
/// have been added; the presentation layer decides whether to apply it.
pub async fn consultation_fee(pool: &SqlitePool, doctor_id: i64) -> HmsResult<Option<Decimal>> {
    let fee: Option<String> = sqlx::query_scalar("SELECT fee FROM doctors WHERE doctor_id = ?")
        .bind(doctor_id)
        .fetch_optional(pool)
        .await?;

    Ok(fee.and_then(|f| Decimal::from_str_exact(f.trim()).ok()))
}
