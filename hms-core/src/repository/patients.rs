//! Patient CRUD.

use sqlx::SqlitePool;
use tracing::info;

use crate::error::{HmsError, HmsResult};
use crate::models::Patient;
use crate::validation;

fn validate(patient: &Patient) -> HmsResult<()> {
    validation::validate_name(&patient.name).map_err(HmsError::Validation)?;
    validation::validate_age(patient.age).map_err(HmsError::Validation)?;

    if patient.gender.trim().is_empty() {
        return Err(HmsError::Validation("Please select a gender.".into()));
    }

    validation::validate_phone(&patient.phone).map_err(HmsError::Validation)?;

    if let Some(email) = patient.email.as_deref() {
        validation::validate_email(email).map_err(HmsError::Validation)?;
    }

    Ok(())
}

/// Insert (id 0) or update a patient; the assigned id becomes authoritative.
pub async fn save(pool: &SqlitePool, patient: &mut Patient) -> HmsResult<i64> {
    validate(patient)?;

    if patient.id == 0 {
        let result = sqlx::query(
            "INSERT INTO patients (name, age, gender, phone, address, email)
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(&patient.name)
        .bind(patient.age)
        .bind(&patient.gender)
        .bind(&patient.phone)
        .bind(&patient.address)
        .bind(&patient.email)
        .execute(pool)
        .await?;

        patient.id = result.last_insert_rowid();
    } else {
        let result = sqlx::query(
            "UPDATE patients SET name = ?, age = ?, gender = ?, phone = ?, address = ?, email = ?
             WHERE patient_id = ?",
        )
        .bind(&patient.name)
        .bind(patient.age)
        .bind(&patient.gender)
        .bind(&patient.phone)
        .bind(&patient.address)
        .bind(&patient.email)
        .bind(patient.id)
        .execute(pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(HmsError::NotFound(format!("patient {}", patient.id)));
        }
    }

    info!(patient_id = patient.id, "patient saved");
    Ok(patient.id)
}

/// Delete a patient.
///
/// Foreign keys are enforced, so deleting a patient referenced by bills or
/// appointments fails with a store error that is surfaced unchanged.
pub async fn delete(pool: &SqlitePool, patient_id: i64) -> HmsResult<()> {
    let result = sqlx::query("DELETE FROM patients WHERE patient_id = ?")
        .bind(patient_id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(HmsError::NotFound(format!("patient {patient_id}")));
    }

    info!(patient_id, "patient deleted");
    Ok(())
}

pub async fn get(pool: &SqlitePool, patient_id: i64) -> HmsResult<Patient> {
    sqlx::query_as::<_, Patient>("SELECT * FROM patients WHERE patient_id = ?")
        .bind(patient_id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| HmsError::NotFound(format!("patient {patient_id}")))
}

pub async fn list(pool: &SqlitePool) -> HmsResult<Vec<Patient>> {
    let patients = sqlx::query_as::<_, Patient>("SELECT * FROM patients ORDER BY name")
        .fetch_all(pool)
        .await?;
    Ok(patients)
}

/// Email address on file, if any. Used by the bill mailer.
pub async fn email(pool: &SqlitePool, patient_id: i64) -> HmsResult<Option<String>> {
    let email: Option<Option<String>> =
        sqlx::query_scalar("SELECT email FROM patients WHERE patient_id = ?")
            .bind(patient_id)
            .fetch_optional(pool)
            .await?;

    Ok(email.flatten().filter(|e| !e.trim().is_empty()))
}
